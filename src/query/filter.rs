//! # Filter Definitions
//!
//! A [`FilterDefinition`] names a field, an operator and a text value. It
//! compiles into a [`Predicate`] for a concrete [`Queryable`] type. Values are
//! always compared as text: the field is rendered to its canonical string
//! form first, so there are no numeric-range or date semantics.

use crate::query::{Accessor, FieldValue, QueryError, Queryable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Recognised filter operators. Parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Contains,
    Equals,
}

impl FromStr for FilterOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contains" => Ok(FilterOperator::Contains),
            "equals" => Ok(FilterOperator::Equals),
            _ => Err(QueryError::UnsupportedOperator(s.to_string())),
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterOperator::Contains => f.write_str("contains"),
            FilterOperator::Equals => f.write_str("equals"),
        }
    }
}

/// How text is compared. Comparisons are case-sensitive unless asked otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterDefinition {
    pub filter_on: String,
    pub operator: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub case_sensitivity: CaseSensitivity,
}

impl FilterDefinition {
    pub fn new(
        filter_on: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            filter_on: filter_on.into(),
            operator: operator.into(),
            value: value.into(),
            case_sensitivity: CaseSensitivity::Sensitive,
        }
    }

    pub fn contains(filter_on: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(filter_on, FilterOperator::Contains.to_string(), value)
    }

    pub fn equals(filter_on: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(filter_on, FilterOperator::Equals.to_string(), value)
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitivity = CaseSensitivity::Insensitive;
        self
    }

    /// Compiles this definition against `T`.
    ///
    /// # Errors
    /// [`QueryError::FieldResolution`] when `filter_on` is not a field of `T`,
    /// [`QueryError::UnsupportedOperator`] when the operator is unknown.
    pub fn to_predicate<T: Queryable>(&self) -> Result<Predicate<T>, QueryError> {
        let accessor = T::resolve_field(&self.filter_on)?;
        let operator = self.operator.parse::<FilterOperator>()?;
        let value = match self.case_sensitivity {
            CaseSensitivity::Sensitive => self.value.clone(),
            CaseSensitivity::Insensitive => self.value.to_lowercase(),
        };
        Ok(Predicate {
            accessor,
            operator,
            value,
            case_sensitivity: self.case_sensitivity,
        })
    }
}

/// A compiled filter. Records whose field is null never match.
pub struct Predicate<T> {
    accessor: Accessor<T>,
    operator: FilterOperator,
    value: String,
    case_sensitivity: CaseSensitivity,
}

impl<T> Predicate<T> {
    pub fn matches(&self, item: &T) -> bool {
        let field = (self.accessor)(item);
        if field.is_null() {
            return false;
        }
        let text = match self.case_sensitivity {
            CaseSensitivity::Sensitive => field.to_string(),
            CaseSensitivity::Insensitive => field.to_string().to_lowercase(),
        };
        match self.operator {
            FilterOperator::Equals => text == self.value,
            FilterOperator::Contains => text.contains(self.value.as_str()),
        }
    }

    pub fn operator(&self) -> FilterOperator {
        self.operator
    }

    /// Evaluates the field without filtering, mostly useful for diagnostics.
    pub fn field_value(&self, item: &T) -> FieldValue {
        (self.accessor)(item)
    }
}

impl<T> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("operator", &self.operator)
            .field("value", &self.value)
            .field("case_sensitivity", &self.case_sensitivity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Row {
        name: String,
        score: i64,
        note: Option<String>,
    }

    crate::queryable!(Row {
        "name" => |row| FieldValue::from(row.name.as_str()),
        "score" => |row| FieldValue::from(row.score),
        "note" => |row| FieldValue::from(row.note.as_deref()),
    });

    fn rows() -> Vec<Row> {
        ["Alpha", "Beta", "Gamma"]
            .iter()
            .enumerate()
            .map(|(i, name)| Row {
                name: name.to_string(),
                score: i as i64 * 10,
                note: None,
            })
            .collect()
    }

    fn names(filter: &FilterDefinition) -> Vec<String> {
        let predicate = filter.to_predicate::<Row>().unwrap();
        rows()
            .into_iter()
            .filter(|r| predicate.matches(r))
            .map(|r| r.name)
            .collect()
    }

    #[test]
    fn test_contains_is_case_sensitive_by_default() {
        let filter = FilterDefinition::contains("name", "a");
        assert_eq!(names(&filter), vec!["Alpha", "Beta", "Gamma"]);

        let filter = FilterDefinition::contains("name", "A");
        assert_eq!(names(&filter), vec!["Alpha"]);
    }

    #[test]
    fn test_contains_case_insensitive() {
        let filter = FilterDefinition::contains("name", "A").case_insensitive();
        assert_eq!(names(&filter), vec!["Alpha", "Beta", "Gamma"]);

        let filter = FilterDefinition::contains("name", "GAM").case_insensitive();
        assert_eq!(names(&filter), vec!["Gamma"]);
    }

    #[test]
    fn test_equals_compares_canonical_text() {
        assert_eq!(names(&FilterDefinition::equals("name", "Beta")), vec!["Beta"]);
        assert!(names(&FilterDefinition::equals("name", "beta")).is_empty());
        assert_eq!(
            names(&FilterDefinition::equals("name", "beta").case_insensitive()),
            vec!["Beta"]
        );
        assert_eq!(names(&FilterDefinition::equals("score", "20")), vec!["Gamma"]);
        assert!(names(&FilterDefinition::equals("score", "20.0")).is_empty());
    }

    #[test]
    fn test_empty_value_is_always_contained() {
        assert_eq!(names(&FilterDefinition::contains("name", "")).len(), 3);
    }

    #[test]
    fn test_null_fields_never_match() {
        assert!(names(&FilterDefinition::contains("note", "")).is_empty());
    }

    #[test]
    fn test_operator_parsing_ignores_case() {
        assert_eq!("CONTAINS".parse::<FilterOperator>(), Ok(FilterOperator::Contains));
        assert_eq!("Equals".parse::<FilterOperator>(), Ok(FilterOperator::Equals));
        let filter = FilterDefinition::new("Name", "EQUALS", "Alpha");
        assert_eq!(names(&filter), vec!["Alpha"]);
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        let err = FilterDefinition::new("name", "startsWith", "A")
            .to_predicate::<Row>()
            .unwrap_err();
        assert_eq!(err, QueryError::UnsupportedOperator("startsWith".to_string()));
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = FilterDefinition::contains("doesNotExist", "x")
            .to_predicate::<Row>()
            .unwrap_err();
        assert!(matches!(err, QueryError::FieldResolution { ref field, .. } if field == "doesNotExist"));
    }

    #[test]
    fn test_wire_form() {
        let filter: FilterDefinition =
            serde_json::from_str(r#"{"filterOn":"name","operator":"contains","value":"a"}"#)
                .unwrap();
        assert_eq!(filter, FilterDefinition::contains("name", "a"));
    }
}
