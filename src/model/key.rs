//! # Record Keys
//!
//! A [`Key`] is the identity of a data object. Remote services hand out either
//! numeric or textual identifiers, so the key is a single sum type rather than
//! parallel integer and string fields that could disagree.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Opaque record identifier, either numeric or textual.
///
/// Two keys are equal when their canonical text forms are equal, so
/// `Key::Int(7)` and `Key::Text("7")` address the same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Text(String),
}

impl Key {
    /// Reads the key as a 64-bit integer. Unparseable keys read as `0`.
    pub fn as_i64(&self) -> i64 {
        match self {
            Key::Int(value) => *value,
            Key::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }

    /// Reads the key as a 32-bit integer. Unparseable or out-of-range keys read as `0`.
    pub fn as_i32(&self) -> i32 {
        match self {
            Key::Int(value) => i32::try_from(*value).unwrap_or(0),
            Key::Text(text) => text.trim().parse().unwrap_or(0),
        }
    }

    /// Canonical text form, as used in resource paths.
    pub fn as_text(&self) -> String {
        self.to_string()
    }

    /// True when the key cannot address a record (empty or whitespace text).
    pub fn is_blank(&self) -> bool {
        match self {
            Key::Int(_) => false,
            Key::Text(text) => text.trim().is_empty(),
        }
    }
}

impl Default for Key {
    fn default() -> Self {
        Key::Text(String::new())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(value) => write!(f, "{value}"),
            Key::Text(text) => f.write_str(text),
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Text(a), Key::Text(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_text().hash(state);
    }
}

impl From<i64> for Key {
    fn from(value: i64) -> Self {
        Key::Int(value)
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Int(i64::from(value))
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Text(value.to_string())
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Text(value)
    }
}
