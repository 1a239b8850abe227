//! Error types for parsing, command definitions, and configuration.
//!
//! Parsing surfaces three conditions through [`ParseError`]: a value that
//! failed conversion, a required argument that never appeared, and an
//! explicit request for help. None of them is retried; each aborts the
//! current [`Command::parse`](crate::Command::parse) call.

use thiserror::Error;

/// Signals raised while parsing a token stream.
///
/// # Examples
///
/// ```
/// use command_args_core::*;
///
/// let mut cmd = Command::new("tool", "A tool")
///     .with_positional(OptionValue::new("FILE", ValueKind::Path));
///
/// let err = cmd.parse(&[] as &[&str], 0).unwrap_err();
/// assert_eq!(err, ParseError::MissingArgument("FILE".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token matched an option but could not be converted, or a
    /// subcommand name could not be resolved.
    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A required named option, positional slot, or subcommand was absent.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// The help marker was seen.
    #[error("help requested for '{}'", .0.path().join(" "))]
    HelpRequested(HelpRequest),
}

impl ParseError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for the help signal, which is not a user error.
    pub fn is_help(&self) -> bool {
        matches!(self, Self::HelpRequested(_))
    }
}

/// Identifies the command whose help was requested.
///
/// The path runs from the outermost command to the one that saw the help
/// marker, e.g. `["argdemo", "build"]`. Resolve it with
/// [`Command::find`](crate::Command::find).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpRequest {
    path: Vec<String>,
}

impl HelpRequest {
    pub(crate) fn new(command: &str) -> Self {
        Self {
            path: vec![command.to_string()],
        }
    }

    pub(crate) fn nested_in(mut self, parent: &str) -> Self {
        self.path.insert(0, parent.to_string());
        self
    }

    /// Command names from the root down to the requesting command.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Name of the command that saw the help marker.
    pub fn command_name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}

/// Programming errors in a command definition.
///
/// These are never produced by user input; they indicate the command tree
/// itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// A command already owns a command group.
    #[error("command '{0}' already has a command group")]
    DuplicateCommandGroup(String),
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// A positional option has an empty name.
    #[error("positional option name cannot be empty in '{0}'")]
    EmptyPositionalName(String),
    /// A named option key is empty or contains the value separator.
    #[error("invalid named option key: {0}")]
    InvalidNamedKey(String),
    /// A named option key collides with the separator or help marker.
    #[error("named option key is reserved: {0}")]
    ReservedKey(String),
    /// A choice option has nothing to choose from.
    #[error("choice option '{0}' has no choices")]
    EmptyChoices(String),
    /// A list option whose elements are lists.
    #[error("list option '{0}' cannot contain lists")]
    NestedList(String),
    /// A command group without subcommands.
    #[error("command group in '{0}' has no subcommands")]
    EmptyCommandGroup(String),
    /// Two subcommands in the same group share a name.
    #[error("duplicate subcommand at path: {0}")]
    DuplicateSubcommand(String),
}

/// Errors raised while loading a [`ParserConfig`](crate::ParserConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The configuration parsed but is unusable.
    #[error("invalid parser config: {0}")]
    Invalid(String),
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
