//! Serializable snapshots of a parse run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::command::Command;
use crate::value::Value;

/// Values set by one parse run, following the selected subcommand chain.
///
/// Named options are keyed by their registered key, positionals by name.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let mut cmd = Command::new("cat", "")
///     .with_positional(OptionValue::new("FILE", ValueKind::String))
///     .with_named("--lines", OptionValue::new("lines", ValueKind::Integer));
/// cmd.parse(&["--lines=3", "a.txt"], 0).unwrap();
///
/// let parsed = cmd.to_parsed();
/// assert_eq!(
///     parsed.to_json().unwrap(),
///     r#"{"command":"cat","values":{"--lines":3,"FILE":"a.txt"}}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCommand {
    /// Command name.
    pub command: String,
    /// Set values only; unset options are omitted.
    pub values: BTreeMap<String, Value>,
    /// The selected subcommand, if the command has a group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcommand: Option<Box<ParsedCommand>>,
}

impl ParsedCommand {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Command names from this command down the selected chain.
    pub fn command_path(&self) -> Vec<&str> {
        let mut path = vec![self.command.as_str()];
        let mut current = self;
        while let Some(sub) = &current.subcommand {
            path.push(sub.command.as_str());
            current = sub.as_ref();
        }
        path
    }

    /// The innermost selected command.
    pub fn leaf(&self) -> &ParsedCommand {
        match &self.subcommand {
            Some(sub) => sub.leaf(),
            None => self,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Command {
    /// Snapshots the values set by the last parse.
    pub fn to_parsed(&self) -> ParsedCommand {
        let named = self
            .named_options()
            .filter_map(|(key, option)| Some((key.to_string(), option.value()?.clone())));
        let positional = self
            .positionals()
            .iter()
            .filter_map(|option| Some((option.name().to_string(), option.value()?.clone())));

        ParsedCommand {
            command: self.name().to_string(),
            values: named.chain(positional).collect(),
            subcommand: self
                .selected_subcommand()
                .map(|sub| Box::new(sub.to_parsed())),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::group::CommandGroup;
    use crate::value::{OptionValue, ValueKind};

    use super::*;

    fn tree() -> Command {
        let remote = Command::new("remote", "")
            .with_command_group(
                CommandGroup::default().with_command(
                    Command::new("add", "")
                        .with_positional(OptionValue::new("NAME", ValueKind::String)),
                ),
            )
            .unwrap();
        Command::new("git", "")
            .with_named("--verbose", OptionValue::flag("verbose"))
            .with_command_group(CommandGroup::default().with_command(remote))
            .unwrap()
    }

    #[test]
    fn test_snapshot_follows_selected_chain() {
        let mut cmd = tree();
        cmd.parse(&["remote", "add", "origin"], 0).unwrap();

        let parsed = cmd.to_parsed();
        assert_eq!(parsed.command_path(), ["git", "remote", "add"]);
        assert!(parsed.values.is_empty());
        assert_eq!(
            parsed.leaf().get("NAME").and_then(Value::as_str),
            Some("origin")
        );
    }

    #[test]
    fn test_parent_option_after_separator() {
        let mut cmd = tree();
        cmd.parse(&["remote", "add", "origin", "--", "--verbose"], 0)
            .unwrap();
        let parsed = cmd.to_parsed();
        assert_eq!(parsed.get("--verbose").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_json_nests_subcommands() {
        let mut cmd = tree();
        cmd.parse(&["remote", "add", "origin"], 0).unwrap();
        assert_eq!(
            cmd.to_parsed().to_json().unwrap(),
            r#"{"command":"git","values":{},"subcommand":{"command":"remote","values":{},"subcommand":{"command":"add","values":{"NAME":"origin"}}}}"#
        );
    }
}
