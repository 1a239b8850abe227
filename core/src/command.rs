//! Commands: ordered positional slots, keyed named slots, and an optional
//! group of subcommands.
//!
//! Named options may appear anywhere in the token stream and are matched by
//! their exact key, either as `--key value` or `--key=value`. Positional
//! options are filled in the order they were added. A command stops at the
//! separator token or at the first token it cannot place, and reports that
//! position to its caller.

use std::collections::HashMap;

use tracing::debug;

use crate::config::ParserConfig;
use crate::error::{DefinitionError, HelpRequest, ParseError, Result};
use crate::group::CommandGroup;
use crate::value::{OptionValue, Value};

/// A named unit of argument acceptance.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let mut cmd = Command::new("cat", "Print a file")
///     .with_positional(OptionValue::new("FILE", ValueKind::Path))
///     .with_named("--verbose", OptionValue::flag("verbose"));
///
/// let next = cmd.parse(&["--verbose", "a.txt"], 0).unwrap();
/// assert_eq!(next, 2);
/// assert_eq!(cmd.value_of("--verbose").and_then(Value::as_bool), Some(true));
/// assert!(cmd.value_of("FILE").is_some());
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    description: String,
    positional: Vec<OptionValue>,
    named: Vec<(String, OptionValue)>,
    named_index: HashMap<String, usize>,
    command_group: Option<CommandGroup>,
}

impl Command {
    /// Creates a command with no options.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            positional: Vec::new(),
            named: Vec::new(),
            named_index: HashMap::new(),
            command_group: None,
        }
    }

    /// Appends a positional option; consumption follows insertion order.
    pub fn with_positional(mut self, option: OptionValue) -> Self {
        self.add_positional(option);
        self
    }

    /// Registers a named option under `key` (e.g. `"--verbose"`).
    pub fn with_named(mut self, key: &str, option: OptionValue) -> Self {
        self.add_named(key, option);
        self
    }

    /// Attaches the command's only subcommand group.
    ///
    /// # Errors
    ///
    /// [`DefinitionError::DuplicateCommandGroup`] if a group is already
    /// attached.
    pub fn with_command_group(
        mut self,
        group: CommandGroup,
    ) -> std::result::Result<Self, DefinitionError> {
        self.add_command_group(group)?;
        Ok(self)
    }

    pub fn add_positional(&mut self, option: OptionValue) {
        self.positional.push(option);
    }

    /// Registers a named option; an existing key is replaced in place.
    pub fn add_named(&mut self, key: &str, option: OptionValue) {
        match self.named_index.get(key) {
            Some(&slot) => self.named[slot].1 = option,
            None => {
                self.named_index.insert(key.to_string(), self.named.len());
                self.named.push((key.to_string(), option));
            }
        }
    }

    /// Attaches the command's only subcommand group and returns it.
    pub fn add_command_group(
        &mut self,
        group: CommandGroup,
    ) -> std::result::Result<&mut CommandGroup, DefinitionError> {
        if self.command_group.is_some() {
            return Err(DefinitionError::DuplicateCommandGroup(self.name.clone()));
        }
        Ok(self.command_group.insert(group))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Positional options in consumption order.
    pub fn positionals(&self) -> &[OptionValue] {
        &self.positional
    }

    /// Named options with their keys, in registration order.
    pub fn named_options(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.named.iter().map(|(key, option)| (key.as_str(), option))
    }

    pub fn named_option(&self, key: &str) -> Option<&OptionValue> {
        self.named_index.get(key).map(|&slot| &self.named[slot].1)
    }

    pub fn positional_option(&self, name: &str) -> Option<&OptionValue> {
        self.positional.iter().find(|option| option.name() == name)
    }

    /// Value of a set option, looked up by named key first, then by
    /// positional name.
    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.named_option(name)
            .or_else(|| self.positional_option(name))
            .and_then(OptionValue::value)
    }

    pub fn command_group(&self) -> Option<&CommandGroup> {
        self.command_group.as_ref()
    }

    /// The subcommand chosen by the last parse, if any.
    pub fn selected_subcommand(&self) -> Option<&Command> {
        self.command_group.as_ref()?.selected_command()
    }

    /// Resolves a command path such as [`HelpRequest::path`].
    ///
    /// The first element must name this command; the rest walk down through
    /// registered subcommands, selected or not.
    ///
    /// [`HelpRequest::path`]: crate::HelpRequest::path
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&Command> {
        let (first, rest) = path.split_first()?;
        if first.as_ref() != self.name {
            return None;
        }
        match rest.first() {
            None => Some(self),
            Some(child) => self.command_group.as_ref()?.command(child.as_ref())?.find(rest),
        }
    }

    /// Clears every option value and subcommand selection in this tree.
    pub fn reset(&mut self) {
        self.positional.iter_mut().for_each(OptionValue::reset);
        self.named.iter_mut().for_each(|(_, option)| option.reset());
        if let Some(group) = &mut self.command_group {
            group.reset();
        }
    }

    /// Parses with the default [`ParserConfig`].
    ///
    /// See [`parse_with`](Self::parse_with).
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S], offset: usize) -> Result<usize> {
        self.parse_with(tokens, offset, &ParserConfig::default())
    }

    /// Parses this command, its options, and any subcommands from `tokens`
    /// starting at `offset`.
    ///
    /// Returns the index of the first token this command did not consume.
    /// A tree is meant to be parsed once; call [`reset`](Self::reset) before
    /// parsing it again.
    ///
    /// # Errors
    ///
    /// - [`ParseError::HelpRequested`] as soon as the help marker is seen, or
    ///   when parsing stops at an unrecognized token and the marker follows
    ///   it before the next separator.
    /// - [`ParseError::InvalidArgument`] if a value fails conversion or a
    ///   subcommand name is unknown.
    /// - [`ParseError::MissingArgument`] after the loop, for an unselected
    ///   subcommand, then required named options in registration order,
    ///   then the first unfilled positional option.
    pub fn parse_with<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        offset: usize,
        config: &ParserConfig,
    ) -> Result<usize> {
        let mut next_positional = 0;
        let mut index = offset;
        while index < tokens.len() {
            let position = index;
            let token = tokens[position].as_ref();
            if token == config.separator {
                debug!(command = %self.name, position = index, "Separator reached");
                index += 1;
                break;
            }
            if token == config.help_marker {
                return Err(ParseError::HelpRequested(HelpRequest::new(&self.name)));
            }
            if let Some(group) = self
                .command_group
                .as_mut()
                .filter(|group| group.selected_command().is_none())
            {
                let name = &self.name;
                index = group.parse(tokens, position, config).map_err(|err| {
                    escalate(nest_help(err, name), tokens, position, usize::MAX, config, name)
                })?;
                continue;
            }
            if let Some(split) = token.find(config.value_separator) {
                let consumed = self
                    .parse_equals_value(token, split, config)
                    .map_err(|err| self.escalate_here(err, tokens, position, config))?;
                if consumed {
                    index += 1;
                    continue;
                }
            }
            if let Some(&slot) = self.named_index.get(token) {
                index = self.named[slot]
                    .1
                    .parse_named(tokens, position)
                    .map_err(|err| self.escalate_here(err, tokens, position, config))?;
                continue;
            }
            let Some(option) = self.positional.get_mut(next_positional) else {
                debug!(
                    command = %self.name,
                    token,
                    position = index,
                    "Stopping at unrecognized token"
                );
                if help_ahead(tokens, position, config) {
                    return Err(ParseError::HelpRequested(HelpRequest::new(&self.name)));
                }
                break;
            };
            next_positional += 1;
            index = option
                .parse(tokens, position)
                .map_err(|err| self.escalate_here(err, tokens, position, config))?;
        }

        if let Some(group) = &self.command_group {
            if group.selected_command().is_none() {
                return Err(ParseError::MissingArgument(group.name().to_string()));
            }
        }
        for (key, option) in &self.named {
            if !option.is_set() && option.is_required() {
                return Err(ParseError::MissingArgument(key.clone()));
            }
        }
        if let Some(option) = self.positional.get(next_positional) {
            return Err(ParseError::MissingArgument(option.name().to_string()));
        }
        Ok(index)
    }

    /// Parses a `name=value` token. Returns `false` if `name` is not a
    /// registered key, leaving the token for the other rules.
    fn parse_equals_value(
        &mut self,
        token: &str,
        split: usize,
        config: &ParserConfig,
    ) -> Result<bool> {
        let key = &token[..split];
        let value = &token[split + config.value_separator.len_utf8()..];
        let Some(&slot) = self.named_index.get(key) else {
            return Ok(false);
        };
        let next = self.named[slot].1.parse(&[value], 0)?;
        Ok(next > 0)
    }

    /// Escalates a failure at `position` to a help request for this command
    /// if the help marker appears before the next separator.
    fn escalate_here<S: AsRef<str>>(
        &self,
        err: ParseError,
        tokens: &[S],
        position: usize,
        config: &ParserConfig,
    ) -> ParseError {
        let scope = tokens[position..]
            .iter()
            .position(|token| token.as_ref() == config.separator)
            .map_or(usize::MAX, |len| position + len);
        escalate(err, tokens, position, scope, config, &self.name)
    }
}

/// Whether the help marker occurs at or after `position`, before the next
/// separator.
fn help_ahead<S: AsRef<str>>(tokens: &[S], position: usize, config: &ParserConfig) -> bool {
    tokens[position..]
        .iter()
        .map(AsRef::<str>::as_ref)
        .take_while(|token| *token != config.separator)
        .any(|token| token == config.help_marker)
}

/// Turns an invalid or missing argument into a help request for `command`
/// when the help marker occurs in `tokens[position..end]`.
fn escalate<S: AsRef<str>>(
    err: ParseError,
    tokens: &[S],
    position: usize,
    end: usize,
    config: &ParserConfig,
    command: &str,
) -> ParseError {
    if err.is_help() {
        return err;
    }
    let end = end.min(tokens.len());
    let help_pending = tokens[position..end]
        .iter()
        .any(|token| token.as_ref() == config.help_marker);
    if !help_pending {
        return err;
    }
    debug!(command, error = %err, "Help marker pending; reporting help instead");
    ParseError::HelpRequested(HelpRequest::new(command))
}

fn nest_help(err: ParseError, parent: &str) -> ParseError {
    match err {
        ParseError::HelpRequested(request) => ParseError::HelpRequested(request.nested_in(parent)),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::value::ValueKind;

    fn cat() -> Command {
        Command::new("cat", "Print a file")
            .with_positional(OptionValue::new("FILE", ValueKind::Path))
            .with_named("--verbose", OptionValue::flag("verbose"))
    }

    #[test]
    fn test_positional_only() {
        let mut cmd = cat();
        assert_eq!(cmd.parse(&["a.txt"], 0).unwrap(), 1);
        assert_eq!(
            cmd.value_of("FILE").and_then(Value::as_path),
            Some(Path::new("a.txt"))
        );
        assert!(!cmd.named_option("--verbose").unwrap().is_set());
    }

    #[test]
    fn test_empty_input_reports_missing_positional() {
        let mut cmd = cat();
        let err = cmd.parse(&[] as &[&str], 0).unwrap_err();
        assert_eq!(err, ParseError::MissingArgument("FILE".into()));
    }

    #[test]
    fn test_flag_before_positional() {
        let mut cmd = cat();
        assert_eq!(cmd.parse(&["--verbose", "a.txt"], 0).unwrap(), 2);
        assert_eq!(cmd.value_of("--verbose").and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_parse_from_offset() {
        let mut cmd = cat();
        assert_eq!(cmd.parse(&["prog", "a.txt"], 1).unwrap(), 2);
    }

    #[test]
    fn test_unrecognized_token_is_returned() {
        let mut cmd = cat();
        assert_eq!(cmd.parse(&["a.txt", "b.txt", "--verbose"], 0).unwrap(), 1);
        assert!(!cmd.named_option("--verbose").unwrap().is_set());
    }

    #[test]
    fn test_help_after_unrecognized_token() {
        let mut cmd = cat();
        let err = cmd.parse(&["a.txt", "b.txt", "--help"], 0).unwrap_err();
        assert!(err.is_help());

        let mut cmd = cat();
        assert_eq!(cmd.parse(&["a.txt", "b.txt", "--", "--help"], 0).unwrap(), 1);
    }

    #[test]
    fn test_separator_stops_this_level() {
        let mut cmd = cat();
        assert_eq!(cmd.parse(&["a.txt", "--", "--verbose"], 0).unwrap(), 2);
        assert!(!cmd.named_option("--verbose").unwrap().is_set());
    }

    #[test]
    fn test_equals_form_with_unknown_key_falls_through_to_positional() {
        let mut cmd = cat();
        cmd.parse(&["x=y"], 0).unwrap();
        assert_eq!(
            cmd.value_of("FILE").and_then(Value::as_path),
            Some(Path::new("x=y"))
        );
    }

    #[test]
    fn test_equals_form_keeps_later_separators_in_value() {
        let mut cmd = Command::new("env", "").with_named(
            "--set",
            OptionValue::new("set", ValueKind::String),
        );
        cmd.parse(&["--set=a=b"], 0).unwrap();
        assert_eq!(cmd.value_of("--set").and_then(Value::as_str), Some("a=b"));
    }

    #[test]
    fn test_add_named_replaces_existing_key() {
        let mut cmd = cat();
        cmd.add_named("--verbose", OptionValue::new("level", ValueKind::Integer));
        assert_eq!(cmd.named_options().count(), 1);
        assert_eq!(
            cmd.named_option("--verbose").unwrap().kind(),
            &ValueKind::Integer
        );
    }

    #[test]
    fn test_second_command_group_is_rejected() {
        let mut cmd = Command::new("git", "");
        cmd.add_command_group(CommandGroup::default()).unwrap();
        let err = cmd.add_command_group(CommandGroup::default()).unwrap_err();
        assert_eq!(err, DefinitionError::DuplicateCommandGroup("git".into()));
    }

    #[test]
    fn test_reset_allows_reparse() {
        let mut cmd = cat();
        cmd.parse(&["--verbose", "a.txt"], 0).unwrap();
        cmd.reset();
        assert!(cmd.value_of("--verbose").is_none());
        cmd.parse(&["b.txt"], 0).unwrap();
        assert_eq!(
            cmd.value_of("FILE").and_then(Value::as_path),
            Some(Path::new("b.txt"))
        );
    }

    #[test]
    fn test_find_walks_registered_subcommands() {
        let remote = Command::new("remote", "")
            .with_command_group(CommandGroup::default().with_command(Command::new("add", "")))
            .unwrap();
        let cmd = Command::new("git", "")
            .with_command_group(CommandGroup::default().with_command(remote))
            .unwrap();
        assert_eq!(cmd.find(&["git", "remote", "add"]).map(Command::name), Some("add"));
        assert!(cmd.find(&["git", "commit"]).is_none());
        assert!(cmd.find(&["svn"]).is_none());
        assert!(cmd.find(&[] as &[&str]).is_none());
    }
}
