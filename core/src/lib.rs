//! Declarative command-line parsing with nested subcommands.
//!
//! This crate describes what a command accepts and derives parsing,
//! validation, error reporting, and usage/help text from that description:
//!
//! - [`OptionValue`]: a typed argument slot ([`ValueKind`]) that consumes
//!   tokens and remembers whether it was set.
//! - [`Command`]: ordered positional slots, keyed named slots, and at most
//!   one [`CommandGroup`] of subcommands.
//! - [`ParseError`]: the three parse outcomes other than success: an
//!   invalid value, a missing required argument, or a help request.
//!
//! Parsing walks the token stream once. At each token, in order: the
//! separator ends this level, the help marker requests help, an unselected
//! subcommand group takes over, `key=value` binds a named option, an exact
//! key matches a named option, and otherwise the next positional slot is
//! filled. Required arguments are checked only after the stream is
//! exhausted.
//!
//! # Example
//!
//! ```
//! use command_args_core::*;
//!
//! let build = Command::new("build", "Compile a file")
//!     .with_positional(OptionValue::new("FILE", ValueKind::Path))
//!     .with_named("--jobs", OptionValue::new("jobs", ValueKind::Integer));
//! let mut tool = Command::new("tool", "Example tool")
//!     .with_command_group(
//!         CommandGroup::default()
//!             .with_command(build)
//!             .with_command(Command::new("run", "Run it")),
//!     )
//!     .unwrap();
//!
//! let args = ["build", "--jobs=4", "main.rs"];
//! assert_eq!(tool.parse(&args, 0).unwrap(), 3);
//!
//! let build = tool.selected_subcommand().unwrap();
//! assert_eq!(build.value_of("--jobs").and_then(Value::as_integer), Some(4));
//! assert_eq!(tool.usage(), "tool {build|run}");
//! ```

mod command;
mod config;
mod error;
mod group;
mod help;
mod parsed;
mod validate;
mod value;

pub use command::Command;
pub use config::{EQUAL_SIGN, HELP, ParserConfig, SEPARATOR};
pub use error::{ConfigError, DefinitionError, HelpRequest, ParseError, Result};
pub use group::{CommandGroup, SUBCOMMAND};
pub use parsed::ParsedCommand;
pub use validate::{validate_command, validate_command_with};
pub use value::{OptionValue, Value, ValueKind};
