//! # Sort Definitions
//!
//! A [`SortDefinition`] names a field and a direction and compiles into a
//! [`KeySelector`]. Callers sort with a stable routine (`slice::sort_by`), so
//! records with equal keys keep their input order in either direction.

use crate::query::{Accessor, FieldValue, QueryError, Queryable};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortDefinition {
    pub sort_on: String,
    #[serde(default)]
    pub descending: bool,
}

impl SortDefinition {
    pub fn ascending(sort_on: impl Into<String>) -> Self {
        Self {
            sort_on: sort_on.into(),
            descending: false,
        }
    }

    pub fn descending(sort_on: impl Into<String>) -> Self {
        Self {
            sort_on: sort_on.into(),
            descending: true,
        }
    }

    /// Compiles this definition against `T`.
    ///
    /// # Errors
    /// [`QueryError::FieldResolution`] when `sort_on` is not a field of `T`.
    pub fn to_key_selector<T: Queryable>(&self) -> Result<KeySelector<T>, QueryError> {
        Ok(KeySelector {
            accessor: T::resolve_field(&self.sort_on)?,
            descending: self.descending,
        })
    }
}

pub struct KeySelector<T> {
    accessor: Accessor<T>,
    descending: bool,
}

impl<T> KeySelector<T> {
    pub fn key(&self, item: &T) -> FieldValue {
        (self.accessor)(item)
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }

    /// Compares two records by this key, honouring the direction.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        let ordering = self.key(a).compare(&self.key(b));
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Stable in-place sort by this key alone.
    pub fn sort(&self, items: &mut [T]) {
        items.sort_by(|a, b| self.compare(a, b));
    }
}

impl<T> fmt::Debug for KeySelector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeySelector")
            .field("descending", &self.descending)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Entry {
        id: u32,
        group: String,
    }

    crate::queryable!(Entry {
        "id" => |e| FieldValue::from(e.id),
        "group" => |e| FieldValue::from(e.group.as_str()),
    });

    fn entries() -> Vec<Entry> {
        [(1, "b"), (2, "a"), (3, "b"), (4, "a"), (5, "c")]
            .iter()
            .map(|(id, group)| Entry {
                id: *id,
                group: group.to_string(),
            })
            .collect()
    }

    fn ids(items: &[Entry]) -> Vec<u32> {
        items.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_ascending_is_stable() {
        let selector = SortDefinition::ascending("group")
            .to_key_selector::<Entry>()
            .unwrap();
        let mut items = entries();
        selector.sort(&mut items);
        assert_eq!(ids(&items), vec![2, 4, 1, 3, 5]);

        let once = items.clone();
        selector.sort(&mut items);
        assert_eq!(items, once);
    }

    #[test]
    fn test_descending_reverses_distinct_keys_only() {
        let selector = SortDefinition::descending("group")
            .to_key_selector::<Entry>()
            .unwrap();
        let mut items = entries();
        selector.sort(&mut items);
        // equal keys keep input order: 1 before 3, 2 before 4
        assert_eq!(ids(&items), vec![5, 1, 3, 2, 4]);
    }

    #[test]
    fn test_numeric_keys_sort_numerically() {
        let selector = SortDefinition::descending("ID")
            .to_key_selector::<Entry>()
            .unwrap();
        let mut items = entries();
        selector.sort(&mut items);
        assert_eq!(ids(&items), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = SortDefinition::ascending("missing")
            .to_key_selector::<Entry>()
            .unwrap_err();
        assert!(matches!(err, QueryError::FieldResolution { .. }));
    }
}
