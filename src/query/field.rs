//! # Field Resolution
//!
//! Maps field names, given as strings at runtime, to typed accessors. Each
//! [`Queryable`] type owns one [`FieldRegistry`], built on first use and shared
//! afterwards, so resolution is a lookup and safe to call from any task.
//!
//! Use the [`queryable!`](crate::queryable) macro to declare a registry:
//!
//! ```rust,ignore
//! remote_crud::queryable!(Workspace {
//!     "name" => |ws| FieldValue::from(ws.audit.name.as_str()),
//!     "memberCount" => |ws| FieldValue::from(ws.member_count),
//! });
//! ```

use crate::model::Key;
use crate::query::QueryError;
use chrono::{DateTime, SecondsFormat, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

/// Reads one field from a record.
pub type Accessor<T> = fn(&T) -> FieldValue;

/// Runtime value of a resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Total ordering used by sorts.
    ///
    /// Values are ranked by kind first: null, bool, number, text, timestamp.
    /// Within a kind they compare natively; integers and floats share the
    /// number kind and compare numerically.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => compare_int_float(*a, *b),
            (Float(a), Int(b)) => compare_int_float(*b, *a).reverse(),
            (Text(a), Text(b)) => a.cmp(b),
            (Timestamp(a), Timestamp(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            FieldValue::Null => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Int(_) | FieldValue::Float(_) => 2,
            FieldValue::Text(_) => 3,
            FieldValue::Timestamp(_) => 4,
        }
    }
}

/// Integers beyond 2^53 lose precision as `f64`; ties after the cast fall
/// back to comparing in the integer domain.
fn compare_int_float(a: i64, b: f64) -> Ordering {
    match (a as f64).total_cmp(&b) {
        Ordering::Equal => a.cmp(&(b as i64)),
        ordering => ordering,
    }
}

/// Canonical text form, the representation filters compare against.
///
/// Timestamps render as RFC 3339 with a `Z` suffix.
impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Int(value) => write!(f, "{value}"),
            FieldValue::Float(value) => write!(f, "{value}"),
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Timestamp(value) => {
                f.write_str(&value.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Int(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

impl From<&Key> for FieldValue {
    fn from(value: &Key) -> Self {
        match value {
            Key::Int(number) => FieldValue::Int(*number),
            Key::Text(text) => FieldValue::Text(text.clone()),
        }
    }
}

impl<V: Into<FieldValue>> From<Option<V>> for FieldValue {
    fn from(value: Option<V>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Field-name to accessor table for one record type.
///
/// Names are matched ASCII case-insensitively, so `"name"` and `"Name"`
/// resolve to the same accessor.
pub struct FieldRegistry<T> {
    type_name: &'static str,
    fields: HashMap<String, Accessor<T>>,
}

impl<T> FieldRegistry<T> {
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: HashMap::new(),
        }
    }

    /// Registers `accessor` under `name`, replacing any earlier entry.
    pub fn with(mut self, name: &str, accessor: Accessor<T>) -> Self {
        self.fields.insert(name.to_ascii_lowercase(), accessor);
        self
    }

    pub fn resolve(&self, field: &str) -> Result<Accessor<T>, QueryError> {
        self.fields
            .get(&field.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| QueryError::FieldResolution {
                field: field.to_string(),
                type_name: self.type_name,
            })
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A record type whose fields can be named in filters and sorts.
pub trait Queryable: Sized + 'static {
    fn field_registry() -> &'static FieldRegistry<Self>;

    fn resolve_field(field: &str) -> Result<Accessor<Self>, QueryError> {
        Self::field_registry().resolve(field)
    }
}

/// Implements [`Queryable`] for a concrete type from a list of
/// `"fieldName" => accessor` pairs. The registry is built once.
#[macro_export]
macro_rules! queryable {
    ($ty:ty { $($name:literal => $accessor:expr),* $(,)? }) => {
        impl $crate::query::Queryable for $ty {
            fn field_registry() -> &'static $crate::query::FieldRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<$crate::query::FieldRegistry<$ty>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    $crate::query::FieldRegistry::<$ty>::new(stringify!($ty))
                        $(.with($name, $accessor))*
                })
            }
        }
    };
}
