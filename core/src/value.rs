//! Typed argument slots.
//!
//! An [`OptionValue`] is one named or positional slot in a
//! [`Command`](crate::Command). It knows its [`ValueKind`], how to consume
//! tokens from the argument stream, and whether it has been set.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::{ParseError, Result};

/// Kind of value an [`OptionValue`] accepts.
///
/// # Examples
///
/// ```
/// use command_args_core::ValueKind;
///
/// let formats = ValueKind::choice(["json", "yaml"]);
/// assert_eq!(formats, ValueKind::Choice(vec!["json".into(), "yaml".into()]));
///
/// let ports = ValueKind::list(ValueKind::Integer);
/// assert!(matches!(ports, ValueKind::List(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// Presence switch; as a named option it consumes no value token.
    Flag,
    /// Explicit `true`/`false` value.
    Boolean,
    /// Signed 64-bit integer.
    Integer,
    /// 64-bit float.
    Float,
    /// Any text.
    String,
    /// Filesystem path (not checked for existence).
    Path,
    /// One of a fixed set of words (e.g. `--format json|yaml`).
    Choice(Vec<String>),
    /// Comma-separated elements of a scalar kind; repeats append.
    List(Box<ValueKind>),
}

impl ValueKind {
    /// Creates a [`ValueKind::Choice`] from any iterable of strings.
    pub fn choice<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Choice(choices.into_iter().map(Into::into).collect())
    }

    /// Creates a [`ValueKind::List`] of `element`.
    pub fn list(element: ValueKind) -> Self {
        Self::List(Box::new(element))
    }

    /// Returns `true` if a named option of this kind takes no value token.
    pub fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }

    fn default_usage(&self, name: &str) -> String {
        match self {
            Self::Flag => String::new(),
            Self::Choice(choices) => format!("{{{}}}", choices.join("|")),
            _ => name.trim_start_matches('-').to_uppercase(),
        }
    }

    fn convert(&self, name: &str, raw: &str) -> Result<Value> {
        match self {
            Self::Flag | Self::Boolean => parse_bool(raw)
                .map(Value::Bool)
                .ok_or_else(|| ParseError::invalid(name, format!("'{raw}' is not a boolean"))),
            Self::Integer => raw
                .parse()
                .map(Value::Integer)
                .map_err(|_| ParseError::invalid(name, format!("'{raw}' is not an integer"))),
            Self::Float => raw
                .parse()
                .map(Value::Float)
                .map_err(|_| ParseError::invalid(name, format!("'{raw}' is not a number"))),
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Path => Ok(Value::Path(PathBuf::from(raw))),
            Self::Choice(choices) => {
                if choices.iter().any(|choice| choice == raw) {
                    Ok(Value::String(raw.to_string()))
                } else {
                    Err(ParseError::invalid(
                        name,
                        format!("'{raw}' is not one of {}", choices.join(", ")),
                    ))
                }
            }
            Self::List(element) => {
                if raw.is_empty() {
                    return Ok(Value::List(Vec::new()));
                }
                raw.split(',')
                    .map(|item| element.convert(name, item))
                    .collect::<Result<Vec<_>>>()
                    .map(Value::List)
            }
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// A parsed argument value.
///
/// Serializes untagged, so a [`Value::Integer`] becomes a JSON number and a
/// [`Value::List`] a JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Path(PathBuf),
    List(Vec<Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Integer(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Text of a string or choice value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(values) => Some(values),
            _ => None,
        }
    }
}

/// One named or positional argument slot.
///
/// Slots are built once, registered with a [`Command`](crate::Command), and
/// filled in by a single parse run.
///
/// # Examples
///
/// ```
/// use command_args_core::{OptionValue, ValueKind};
///
/// let mut jobs = OptionValue::new("jobs", ValueKind::Integer)
///     .with_description("Number of parallel jobs");
/// assert!(!jobs.is_set());
///
/// let next = jobs.parse(&["8"], 0).unwrap();
/// assert_eq!(next, 1);
/// assert_eq!(jobs.value().and_then(|v| v.as_integer()), Some(8));
/// assert_eq!(jobs.usage(), "JOBS");
/// ```
#[derive(Debug, Clone)]
pub struct OptionValue {
    name: String,
    usage: Option<String>,
    description: String,
    required: bool,
    kind: ValueKind,
    value: Option<Value>,
}

impl OptionValue {
    /// Creates an optional, unset slot.
    pub fn new(name: &str, kind: ValueKind) -> Self {
        Self {
            name: name.to_string(),
            usage: None,
            description: String::new(),
            required: false,
            kind,
            value: None,
        }
    }

    /// Shorthand for a [`ValueKind::Flag`] slot.
    pub fn flag(name: &str) -> Self {
        Self::new(name, ValueKind::Flag)
    }

    /// Adds a description shown in help output.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Overrides the usage token shown in usage and help output.
    pub fn with_usage(mut self, usage: &str) -> Self {
        self.usage = Some(usage.to_string());
        self
    }

    /// Marks a named option as required.
    ///
    /// Positional options are always required by their command.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Consumes the value token at `position`.
    ///
    /// This is the positional form, also used for the value half of a
    /// `name=value` token. Returns the position after the consumed token.
    ///
    /// # Errors
    ///
    /// [`ParseError::InvalidArgument`] if no token is left or the token
    /// cannot be converted to this slot's kind.
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S], position: usize) -> Result<usize> {
        let raw = tokens
            .get(position)
            .ok_or_else(|| ParseError::invalid(&self.name, "expected a value"))?;
        let value = self.kind.convert(&self.name, raw.as_ref())?;
        self.store(value);
        Ok(position + 1)
    }

    /// Consumes a named occurrence whose key token is at `position`.
    ///
    /// A flag consumes only the key; every other kind also consumes the
    /// following value token.
    pub fn parse_named<S: AsRef<str>>(&mut self, tokens: &[S], position: usize) -> Result<usize> {
        if self.kind.is_flag() {
            self.store(Value::Bool(true));
            return Ok(position + 1);
        }
        self.parse(tokens, position + 1)
    }

    fn store(&mut self, value: Value) {
        match (&mut self.value, value) {
            (Some(Value::List(existing)), Value::List(more)) => existing.extend(more),
            (slot, value) => *slot = Some(value),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.value = None;
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Usage token; derived from the kind unless overridden.
    pub fn usage(&self) -> String {
        match &self.usage {
            Some(usage) => usage.clone(),
            None => self.kind.default_usage(&self.name),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The parsed value, if this slot has been set.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_option_is_unset() {
        let option = OptionValue::new("FILE", ValueKind::Path).required();
        assert!(!option.is_set());
        assert!(option.is_required());
        assert_eq!(option.value(), None);
    }

    #[test]
    fn test_positional_parse_advances_one() {
        let mut option = OptionValue::new("FILE", ValueKind::Path);
        let next = option.parse(&["skip", "a.txt"], 1).unwrap();
        assert_eq!(next, 2);
        assert_eq!(
            option.value().and_then(Value::as_path),
            Some(Path::new("a.txt"))
        );
    }

    #[test]
    fn test_integer_rejects_text() {
        let mut option = OptionValue::new("--jobs", ValueKind::Integer);
        let err = option.parse(&["many"], 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidArgument {
                name: "--jobs".into(),
                reason: "'many' is not an integer".into(),
            }
        );
        assert!(!option.is_set());
    }

    #[test]
    fn test_choice_rejects_unknown_word() {
        let mut option = OptionValue::new("format", ValueKind::choice(["json", "yaml"]));
        assert!(option.parse(&["toml"], 0).is_err());
        assert_eq!(option.parse(&["yaml"], 0).unwrap(), 1);
        assert_eq!(option.value().and_then(Value::as_str), Some("yaml"));
    }

    #[test]
    fn test_named_flag_consumes_only_key() {
        let mut option = OptionValue::flag("verbose");
        let next = option.parse_named(&["--verbose", "a.txt"], 0).unwrap();
        assert_eq!(next, 1);
        assert_eq!(option.value().and_then(Value::as_bool), Some(true));
    }

    #[test]
    fn test_named_value_consumes_key_and_value() {
        let mut option = OptionValue::new("jobs", ValueKind::Integer);
        let next = option.parse_named(&["--jobs", "4", "rest"], 0).unwrap();
        assert_eq!(next, 2);
        assert_eq!(option.value().and_then(Value::as_integer), Some(4));
    }

    #[test]
    fn test_named_value_without_value_token() {
        let mut option = OptionValue::new("jobs", ValueKind::Integer);
        let err = option.parse_named(&["--jobs"], 0).unwrap_err();
        assert!(matches!(err, ParseError::InvalidArgument { .. }));
    }

    #[test]
    fn test_flag_accepts_explicit_value() {
        let mut option = OptionValue::flag("verbose");
        option.parse(&["off"], 0).unwrap();
        assert_eq!(option.value().and_then(Value::as_bool), Some(false));
        assert!(option.parse(&["maybe"], 0).is_err());
    }

    #[test]
    fn test_boolean_takes_a_value_token() {
        let mut option = OptionValue::new("--color", ValueKind::Boolean);
        assert_eq!(option.parse_named(&["--color", "yes"], 0).unwrap(), 2);
        assert_eq!(option.value().and_then(Value::as_bool), Some(true));

        let mut option = OptionValue::new("--color", ValueKind::Boolean);
        let err = option.parse(&["maybe"], 0).unwrap_err();
        assert!(matches!(err, ParseError::InvalidArgument { .. }));
        assert!(!option.is_set());
    }

    #[test]
    fn test_float_parses_numbers() {
        let mut option = OptionValue::new("--ratio", ValueKind::Float);
        option.parse(&["1.5"], 0).unwrap();
        assert_eq!(option.value().and_then(Value::as_float), Some(1.5));

        let mut option = OptionValue::new("--ratio", ValueKind::Float);
        let err = option.parse(&["abc"], 0).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidArgument {
                name: "--ratio".into(),
                reason: "'abc' is not a number".into(),
            }
        );
    }

    #[test]
    fn test_as_float_widens_integers() {
        assert_eq!(Value::Integer(3).as_float(), Some(3.0));
        assert_eq!(Value::Float(0.25).as_float(), Some(0.25));
        assert_eq!(Value::String("3".into()).as_float(), None);
    }

    #[test]
    fn test_list_splits_and_appends() {
        let mut option = OptionValue::new("feature", ValueKind::list(ValueKind::String));
        option.parse(&["a,b"], 0).unwrap();
        option.parse(&["c"], 0).unwrap();
        let items: Vec<_> = option
            .value()
            .and_then(Value::as_list)
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(items, ["a", "b", "c"]);
    }

    #[test]
    fn test_list_element_conversion_fails() {
        let mut option = OptionValue::new("ports", ValueKind::list(ValueKind::Integer));
        assert!(option.parse(&["80,http"], 0).is_err());
    }

    #[test]
    fn test_scalar_keeps_last_value() {
        let mut option = OptionValue::new("jobs", ValueKind::Integer);
        option.parse(&["1"], 0).unwrap();
        option.parse(&["2"], 0).unwrap();
        assert_eq!(option.value().and_then(Value::as_integer), Some(2));
    }

    #[test]
    fn test_default_usage_tokens() {
        assert_eq!(OptionValue::flag("verbose").usage(), "");
        assert_eq!(OptionValue::new("--jobs", ValueKind::Integer).usage(), "JOBS");
        assert_eq!(
            OptionValue::new("format", ValueKind::choice(["json", "yaml"])).usage(),
            "{json|yaml}"
        );
        assert_eq!(
            OptionValue::new("FILE", ValueKind::Path)
                .with_usage("<file>")
                .usage(),
            "<file>"
        );
    }

    #[test]
    fn test_value_serializes_untagged() {
        let value = Value::List(vec![Value::Integer(1), Value::String("two".into())]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"[1,"two"]"#);
    }
}
