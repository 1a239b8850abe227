//! Mutually exclusive subcommands.

use tracing::debug;

use crate::command::Command;
use crate::config::ParserConfig;
use crate::error::{ParseError, Result};

/// Placeholder name reported when no subcommand was given.
pub const SUBCOMMAND: &str = "SUBCOMMAND";

/// A set of subcommands attached to a parent [`Command`].
///
/// Exactly one subcommand is selected per parse run. Selection happens once,
/// on the first token the parent hands over, and the rest of the stream is
/// parsed by the selected command.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let mut group = CommandGroup::default()
///     .with_command(Command::new("build", "Compile"))
///     .with_command(Command::new("run", "Run"));
///
/// let next = group.parse(&["run"], 0, &ParserConfig::default()).unwrap();
/// assert_eq!(next, 1);
/// assert_eq!(group.selected_command().map(Command::name), Some("run"));
/// ```
#[derive(Debug, Clone)]
pub struct CommandGroup {
    name: String,
    commands: Vec<Command>,
    selected: Option<usize>,
}

impl Default for CommandGroup {
    fn default() -> Self {
        Self::new(SUBCOMMAND)
    }
}

impl CommandGroup {
    /// Creates an empty group; `name` is reported when no subcommand is given.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            commands: Vec::new(),
            selected: None,
        }
    }

    /// Adds a subcommand.
    pub fn with_command(mut self, command: Command) -> Self {
        self.add_command(command);
        self
    }

    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered subcommands in registration order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Finds a registered subcommand by exact name.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|command| command.name() == name)
    }

    pub fn selected_command(&self) -> Option<&Command> {
        self.selected.map(|slot| &self.commands[slot])
    }

    pub(crate) fn reset(&mut self) {
        self.selected = None;
        self.commands.iter_mut().for_each(Command::reset);
    }

    /// Selects the subcommand named by the token at `position` and parses
    /// the remaining tokens with it.
    ///
    /// Returns whatever position the selected command returns.
    ///
    /// # Errors
    ///
    /// - [`ParseError::MissingArgument`] if there is no token at `position`.
    /// - [`ParseError::InvalidArgument`] if the token names no subcommand, or
    ///   a subcommand was already selected in this run.
    /// - Any error from the selected command's own parse.
    pub fn parse<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        position: usize,
        config: &ParserConfig,
    ) -> Result<usize> {
        if let Some(slot) = self.selected {
            return Err(ParseError::invalid(
                &self.name,
                format!("subcommand '{}' already selected", self.commands[slot].name()),
            ));
        }
        let token: &str = tokens
            .get(position)
            .map(|token| token.as_ref())
            .ok_or_else(|| ParseError::MissingArgument(self.name.clone()))?;
        let Some(slot) = self.commands.iter().position(|command| command.name() == token) else {
            return Err(ParseError::invalid(
                &self.name,
                format!("unknown subcommand '{token}'"),
            ));
        };
        debug!(subcommand = token, position, "Selected subcommand");
        self.selected = Some(slot);
        self.commands[slot].parse_with(tokens, position + 1, config)
    }
}
