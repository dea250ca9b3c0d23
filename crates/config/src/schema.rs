//! Configuration document schema

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use types::keys;

/// A scalar configuration value.
///
/// Documents are flat mappings of string keys to scalars; nested objects or
/// arrays are rejected at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit JSON null, kept so documents carrying one still load
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Unsigned integer too large for `i64`; untagged matching tries
    /// `Integer` first, so only values above `i64::MAX` land here
    Uint(u64),
    /// Floating point value
    Float(f64),
    /// String value (the common case for infrastructure parameters)
    String(String),
}

impl ConfigValue {
    /// String view of the value, `None` for non-strings
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// True when the value is the explicit JSON null
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => f.write_str("null"),
            ConfigValue::Bool(v) => write!(f, "{}", v),
            ConfigValue::Integer(v) => write!(f, "{}", v),
            ConfigValue::Uint(v) => write!(f, "{}", v),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::String(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

/// The full set of key-value entries loaded for one environment.
///
/// Entries are immutable once loaded; there is no mutation surface beyond
/// construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigDocument {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigDocument {
    /// Value stored under `key`, if any
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.get(key)
    }

    /// True when the document carries an entry for `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys present in the document, in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in the document, in sorted key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True for a document with no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Example document used to scaffold a new environment
    pub fn example() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(keys::ACCOUNT_ID.to_string(), ConfigValue::from("111111111111"));
        entries.insert(keys::AWS_REGION.to_string(), ConfigValue::from("us-east-1"));
        entries.insert(keys::STAGE.to_string(), ConfigValue::from("dev"));
        Self { entries }
    }
}

impl fmt::Display for ConfigDocument {
    /// Renders the document as compact JSON, used when dumping the full
    /// contents into missing-key log events
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(&self.entries) {
            Ok(rendered) => f.write_str(&rendered),
            Err(_) => write!(f, "{:?}", self.entries),
        }
    }
}
