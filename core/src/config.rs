//! Reserved tokens recognized by the parser.
//!
//! The defaults match common Unix conventions. A config may also be loaded
//! from YAML; missing keys fall back to their defaults.
//!
//! # Example YAML
//!
//! ```yaml
//! separator: "--"
//! help_marker: "--help"
//! value_separator: "="
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Token that ends parsing at the current command level.
pub const SEPARATOR: &str = "--";

/// Token that requests help, checked before any other interpretation.
pub const HELP: &str = "--help";

/// Binds a named option to its value inside one token (`--jobs=4`).
pub const EQUAL_SIGN: char = '=';

/// Reserved tokens used by [`Command::parse_with`](crate::Command::parse_with).
///
/// # Examples
///
/// ```
/// use command_args_core::ParserConfig;
///
/// let config = ParserConfig::from_yaml_str("help_marker: \"-h\"\n").unwrap();
/// assert_eq!(config.help_marker, "-h");
/// assert_eq!(config.separator, "--");
/// assert_eq!(config.value_separator, '=');
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Ends parsing at the current level; remaining tokens go to the caller.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Requests help for the command being parsed.
    #[serde(default = "default_help_marker")]
    pub help_marker: String,
    /// Splits `name=value` tokens.
    #[serde(default = "default_value_separator")]
    pub value_separator: char,
}

fn default_separator() -> String {
    SEPARATOR.to_string()
}

fn default_help_marker() -> String {
    HELP.to_string()
}

fn default_value_separator() -> char {
    EQUAL_SIGN
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            help_marker: default_help_marker(),
            value_separator: default_value_separator(),
        }
    }
}

impl ParserConfig {
    /// Parses and validates a config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a config from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Checks that the reserved tokens are usable together.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::Invalid("separator cannot be empty".into()));
        }
        if self.help_marker.is_empty() {
            return Err(ConfigError::Invalid("help marker cannot be empty".into()));
        }
        if self.help_marker == self.separator {
            return Err(ConfigError::Invalid(format!(
                "help marker and separator are both '{}'",
                self.separator
            )));
        }
        Ok(())
    }
}
