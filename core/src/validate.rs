//! Command definition validation.
//!
//! Catches malformed command trees before any parsing happens: empty names,
//! keys that can never match, reserved keys, empty choice sets, nested
//! lists, and duplicate subcommands.
//!
//! # Examples
//!
//! ```
//! use command_args_core::*;
//!
//! let cmd = Command::new("tool", "")
//!     .with_named("--jobs", OptionValue::new("jobs", ValueKind::Integer));
//! assert!(validate_command(&cmd).is_empty());
//!
//! // A key containing '=' is always split before it can match.
//! let bad = Command::new("tool", "")
//!     .with_named("--a=b", OptionValue::flag("a"));
//! assert_eq!(
//!     validate_command(&bad),
//!     vec![DefinitionError::InvalidNamedKey("--a=b".into())]
//! );
//! ```

use std::collections::HashSet;

use crate::command::Command;
use crate::config::ParserConfig;
use crate::error::DefinitionError;
use crate::value::{OptionValue, ValueKind};

/// Validates a command tree against the default [`ParserConfig`].
pub fn validate_command(command: &Command) -> Vec<DefinitionError> {
    validate_command_with(command, &ParserConfig::default())
}

/// Validates a command tree against `config`'s reserved tokens.
///
/// Stops at the first problem found.
pub fn validate_command_with(command: &Command, config: &ParserConfig) -> Vec<DefinitionError> {
    let mut path = Vec::new();
    validate_tree(command, config, &mut path)
}

fn validate_tree(
    command: &Command,
    config: &ParserConfig,
    path: &mut Vec<String>,
) -> Vec<DefinitionError> {
    let mut errors = Vec::new();

    let name = command.name().trim();
    if name.is_empty() {
        errors.push(DefinitionError::EmptyCommandName);
        return errors;
    }

    for option in command.positionals() {
        if option.name().trim().is_empty() {
            errors.push(DefinitionError::EmptyPositionalName(name.to_string()));
            return errors;
        }
        errors.extend(validate_kind(option));
        if !errors.is_empty() {
            return errors;
        }
    }

    for (key, option) in command.named_options() {
        if key.is_empty() || key.contains(config.value_separator) {
            errors.push(DefinitionError::InvalidNamedKey(key.to_string()));
            return errors;
        }
        if key == config.separator || key == config.help_marker {
            errors.push(DefinitionError::ReservedKey(key.to_string()));
            return errors;
        }
        errors.extend(validate_kind(option));
        if !errors.is_empty() {
            return errors;
        }
    }

    let Some(group) = command.command_group() else {
        return errors;
    };
    if group.commands().is_empty() {
        errors.push(DefinitionError::EmptyCommandGroup(name.to_string()));
        return errors;
    }

    path.push(name.to_string());
    let mut seen: HashSet<&str> = HashSet::new();
    for sub in group.commands() {
        if !seen.insert(sub.name()) {
            let duplicate_path = path
                .iter()
                .cloned()
                .chain(std::iter::once(sub.name().to_string()))
                .collect::<Vec<_>>()
                .join(" ");
            errors.push(DefinitionError::DuplicateSubcommand(duplicate_path));
            break;
        }
        errors.extend(validate_tree(sub, config, path));
        if !errors.is_empty() {
            break;
        }
    }
    path.pop();

    errors
}

fn validate_kind(option: &OptionValue) -> Vec<DefinitionError> {
    let mut errors = Vec::new();
    match option.kind() {
        ValueKind::Choice(choices) if choices.is_empty() => {
            errors.push(DefinitionError::EmptyChoices(option.name().to_string()));
        }
        ValueKind::List(element) => match element.as_ref() {
            ValueKind::List(_) => {
                errors.push(DefinitionError::NestedList(option.name().to_string()));
            }
            ValueKind::Choice(choices) if choices.is_empty() => {
                errors.push(DefinitionError::EmptyChoices(option.name().to_string()));
            }
            _ => {}
        },
        _ => {}
    }
    errors
}
