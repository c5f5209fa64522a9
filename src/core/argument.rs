//! Argument system for block invocation
//!
//! Blocks declare typed arguments with default values; the host passes the
//! actual values as a loosely typed map. Every argument these blocks declare
//! is string-valued, so values are coerced to text the way the host does.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Argument types understood by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgumentType {
    /// Free text field
    String,
    /// Numeric field
    Number,
    /// Boolean slot
    Boolean,
}

/// Argument declaration attached to a block descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgumentSpec {
    /// Placeholder name as it appears in the label, e.g. `FIELD`
    pub name: String,
    /// Argument type
    #[serde(rename = "type")]
    pub arg_type: ArgumentType,
    /// Value shown in the palette and used when the host omits the argument
    #[serde(rename = "defaultValue")]
    pub default_value: String,
}

impl ArgumentSpec {
    /// Declare a string argument with its default value
    pub fn string(name: impl Into<String>, default_value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arg_type: ArgumentType::String,
            default_value: default_value.into(),
        }
    }
}

/// Argument value as received from the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    /// String value
    String(String),
    /// Number value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Null / undefined
    Null,
}

impl ArgumentValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, ArgumentValue::Null)
    }

    /// Coerce the value to the text the block sees
    ///
    /// Integral numbers print without a fractional part, matching how the
    /// host renders numbers typed into a text slot.
    pub fn to_text(&self) -> String {
        match self {
            ArgumentValue::String(s) => s.clone(),
            ArgumentValue::Number(n) if n.is_nan() => "NaN".into(),
            ArgumentValue::Number(n) if n.is_infinite() => {
                if *n > 0.0 { "Infinity".into() } else { "-Infinity".into() }
            }
            ArgumentValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e21 => {
                format!("{}", *n as i64)
            }
            ArgumentValue::Number(n) => n.to_string(),
            ArgumentValue::Boolean(b) => b.to_string(),
            ArgumentValue::Null => String::new(),
        }
    }
}

impl From<String> for ArgumentValue {
    fn from(s: String) -> Self {
        ArgumentValue::String(s)
    }
}

impl From<&str> for ArgumentValue {
    fn from(s: &str) -> Self {
        ArgumentValue::String(s.to_string())
    }
}

impl From<f64> for ArgumentValue {
    fn from(n: f64) -> Self {
        ArgumentValue::Number(n)
    }
}

impl From<bool> for ArgumentValue {
    fn from(b: bool) -> Self {
        ArgumentValue::Boolean(b)
    }
}

/// Arguments of one block call, keyed by placeholder name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockArgs(HashMap<String, ArgumentValue>);

impl BlockArgs {
    /// Create an empty argument map
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an argument
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ArgumentValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Whether the argument is present and not null
    pub fn contains(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(|v| !v.is_null())
    }

    /// Raw value lookup
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.0.get(name)
    }

    /// Text of an argument; missing arguments read as the empty string
    pub fn text(&self, name: &str) -> String {
        self.0.get(name).map(ArgumentValue::to_text).unwrap_or_default()
    }

    /// Number of arguments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no arguments were passed
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<ArgumentValue>> FromIterator<(K, V)> for BlockArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
