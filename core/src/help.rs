//! Usage and help rendering.
//!
//! A usage line is a one-line synopsis:
//!
//! ```text
//! argdemo {build|run|remote}
//! build FILE [OPTIONS]
//! ```
//!
//! Help lists `ARGS` and `OPTIONS` sections. Each entry is its usage on one
//! line and its description, indented, on the next; an entry without a
//! description is a single line. A command that owns a
//! [`CommandGroup`] renders only the group's `SUBCOMMANDS` section; its own
//! positional and named options appear in its usage line but never in its
//! help text.

use std::io;

use crate::command::Command;
use crate::config::SEPARATOR;
use crate::group::CommandGroup;

fn push_item(out: &mut String, head: &str, description: &str) {
    out.push_str("  ");
    out.push_str(head);
    out.push('\n');
    if !description.is_empty() {
        out.push_str("    ");
        out.push_str(description);
        out.push('\n');
    }
}

impl Command {
    /// One-line synopsis of this command.
    ///
    /// # Examples
    ///
    /// ```
    /// use command_args_core::*;
    ///
    /// let cmd = Command::new("cp", "Copy files")
    ///     .with_positional(OptionValue::new("SRC", ValueKind::Path))
    ///     .with_positional(OptionValue::new("DEST", ValueKind::Path))
    ///     .with_named("--force", OptionValue::flag("force"));
    /// assert_eq!(cmd.usage(), "cp SRC DEST [OPTIONS]");
    /// ```
    pub fn usage(&self) -> String {
        let mut usage = self.name().to_string();
        if let Some(group) = self.command_group() {
            usage.push(' ');
            usage.push_str(&group.usage());
            if self.named_options().next().is_some() || !self.positionals().is_empty() {
                usage.push(' ');
                usage.push_str(SEPARATOR);
            }
        }
        for option in self.positionals() {
            usage.push(' ');
            usage.push_str(&option.usage());
        }
        if self.named_options().next().is_some() {
            usage.push_str(" [OPTIONS]");
        }
        usage
    }

    /// Multi-section help text.
    ///
    /// Commands with a subcommand group delegate entirely to
    /// [`CommandGroup::help`].
    pub fn help(&self) -> String {
        if let Some(group) = self.command_group() {
            return group.help();
        }

        let mut help = String::new();
        let mut separate = false;
        if !self.positionals().is_empty() {
            help.push_str("ARGS:\n");
            for option in self.positionals() {
                if separate {
                    help.push('\n');
                }
                push_item(&mut help, &option.usage(), option.description());
                separate = true;
            }
        }

        let mut named = self.named_options().peekable();
        if named.peek().is_some() {
            if separate {
                help.push('\n');
                separate = false;
            }
            help.push_str("OPTIONS:\n");
            for (key, option) in named {
                if separate {
                    help.push('\n');
                }
                let usage = option.usage();
                let head = if usage.is_empty() {
                    key.to_string()
                } else {
                    format!("{key} {usage}")
                };
                push_item(&mut help, &head, option.description());
                separate = true;
            }
        }
        help
    }

    /// Writes [`usage`](Self::usage) to `writer`, without a newline.
    pub fn print_usage(&self, writer: &mut impl io::Write) -> io::Result<()> {
        writer.write_all(self.usage().as_bytes())
    }

    /// Writes [`help`](Self::help) to `writer`.
    pub fn print_help(&self, writer: &mut impl io::Write) -> io::Result<()> {
        writer.write_all(self.help().as_bytes())
    }
}

impl CommandGroup {
    /// Alternation of subcommand names, e.g. `{build|run}`.
    pub fn usage(&self) -> String {
        let names: Vec<&str> = self.commands().iter().map(Command::name).collect();
        format!("{{{}}}", names.join("|"))
    }

    /// `SUBCOMMANDS` section listing each subcommand's usage and description.
    pub fn help(&self) -> String {
        let mut help = String::from("SUBCOMMANDS:\n");
        for (slot, command) in self.commands().iter().enumerate() {
            if slot > 0 {
                help.push('\n');
            }
            push_item(&mut help, &command.usage(), command.description());
        }
        help
    }
}
