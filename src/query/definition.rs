//! # Query Definitions
//!
//! A [`QueryDefinition`] bundles filters, sorts and a page window. Applying it
//! runs, in order:
//!
//! 1. every filter, AND-combined;
//! 2. every sort, first entry primary, later entries breaking ties;
//! 3. `skip`, then `take`.
//!
//! An empty filter list keeps every record and an empty sort list keeps input
//! order. A `skip` past the end yields an empty page.

use crate::model::PagedList;
use crate::query::{FilterDefinition, KeySelector, Predicate, QueryError, Queryable, SortDefinition};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::debug;

/// Wire value of [`Take::All`].
pub const TAKE_ALL: i64 = -1;

/// Upper bound of a page. Serialised as an integer, `-1` meaning [`Take::All`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Take {
    #[default]
    All,
    Count(usize),
}

impl Take {
    pub fn limit(self) -> usize {
        match self {
            Take::All => usize::MAX,
            Take::Count(count) => count,
        }
    }
}

impl TryFrom<i64> for Take {
    type Error = QueryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            TAKE_ALL => Ok(Take::All),
            v if v < 0 => Err(QueryError::NegativePaging { name: "take", value }),
            v => Ok(Take::Count(usize::try_from(v).unwrap_or(usize::MAX))),
        }
    }
}

impl From<Take> for i64 {
    fn from(take: Take) -> Self {
        match take {
            Take::All => TAKE_ALL,
            Take::Count(count) => i64::try_from(count).unwrap_or(i64::MAX),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDefinition {
    #[serde(default)]
    pub filters: Vec<FilterDefinition>,
    #[serde(default)]
    pub sorts: Vec<SortDefinition>,
    #[serde(default)]
    pub skip: usize,
    #[serde(default)]
    pub take: Take,
}

impl QueryDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: FilterDefinition) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sort(mut self, sort: SortDefinition) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: usize) -> Self {
        self.take = Take::Count(take);
        self
    }

    pub fn take_all(mut self) -> Self {
        self.take = Take::All;
        self
    }

    /// Sets the page window from raw signed values, as received from callers
    /// that speak the wire convention.
    ///
    /// # Errors
    /// [`QueryError::NegativePaging`] for a negative `skip`, or a negative
    /// `take` other than [`TAKE_ALL`].
    pub fn with_paging(mut self, skip: i64, take: i64) -> Result<Self, QueryError> {
        self.skip = usize::try_from(skip)
            .map_err(|_| QueryError::NegativePaging { name: "skip", value: skip })?;
        self.take = Take::try_from(take)?;
        Ok(self)
    }

    /// Resolves every field and operator against `T`.
    pub fn compile<T: Queryable>(&self) -> Result<CompiledQuery<T>, QueryError> {
        let predicates = self
            .filters
            .iter()
            .map(FilterDefinition::to_predicate::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        let selectors = self
            .sorts
            .iter()
            .map(SortDefinition::to_key_selector::<T>)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CompiledQuery {
            predicates,
            selectors,
            skip: self.skip,
            take: self.take,
        })
    }

    pub fn apply<T: Queryable>(
        &self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<Vec<T>, QueryError> {
        Ok(self.compile::<T>()?.apply(items))
    }

    pub fn apply_paged<T: Queryable>(
        &self,
        items: impl IntoIterator<Item = T>,
    ) -> Result<PagedList<T>, QueryError> {
        Ok(self.compile::<T>()?.apply_paged(items))
    }
}

/// A [`QueryDefinition`] resolved against one record type. Reusable.
#[derive(Debug)]
pub struct CompiledQuery<T> {
    predicates: Vec<Predicate<T>>,
    selectors: Vec<KeySelector<T>>,
    skip: usize,
    take: Take,
}

impl<T> CompiledQuery<T> {
    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|predicate| predicate.matches(item))
    }

    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        self.selectors
            .iter()
            .map(|selector| selector.compare(a, b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Filters and sorts, without applying the page window.
    pub fn filter_and_sort(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut kept: Vec<T> = items.into_iter().filter(|item| self.matches(item)).collect();
        if !self.selectors.is_empty() {
            kept.sort_by(|a, b| self.compare(a, b));
        }
        kept
    }

    pub fn page(&self, sorted: Vec<T>) -> Vec<T> {
        sorted
            .into_iter()
            .skip(self.skip)
            .take(self.take.limit())
            .collect()
    }

    pub fn apply(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        self.page(self.filter_and_sort(items))
    }

    /// Like [`apply`](Self::apply), but also reports how many records passed
    /// the filters before paging.
    pub fn apply_paged(&self, items: impl IntoIterator<Item = T>) -> PagedList<T> {
        let sorted = self.filter_and_sort(items);
        let total = sorted.len() as u64;
        let page = self.page(sorted);
        debug!(total, returned = page.len(), skip = self.skip, "Query applied");
        PagedList::new(page, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FieldValue;

    #[derive(Debug, Clone, PartialEq)]
    struct City {
        name: String,
        country: String,
        population: i64,
    }

    crate::queryable!(City {
        "name" => |c| FieldValue::from(c.name.as_str()),
        "country" => |c| FieldValue::from(c.country.as_str()),
        "population" => |c| FieldValue::from(c.population),
    });

    fn cities() -> Vec<City> {
        [
            ("Lyon", "FR", 500),
            ("Porto", "PT", 230),
            ("Paris", "FR", 2100),
            ("Lisbon", "PT", 540),
            ("Nice", "FR", 340),
            ("Braga", "PT", 190),
        ]
        .iter()
        .map(|(name, country, population)| City {
            name: name.to_string(),
            country: country.to_string(),
            population: *population,
        })
        .collect()
    }

    fn names(items: &[City]) -> Vec<&str> {
        items.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_returns_input_unchanged() {
        let result = QueryDefinition::new().apply(cities()).unwrap();
        assert_eq!(result, cities());
    }

    #[test]
    fn test_filters_are_and_combined() {
        let query = QueryDefinition::new()
            .filter(FilterDefinition::equals("country", "FR"))
            .filter(FilterDefinition::contains("name", "i"));
        let result = query.apply(cities()).unwrap();
        assert_eq!(names(&result), vec!["Paris", "Nice"]);
    }

    #[test]
    fn test_secondary_sort_breaks_ties() {
        let query = QueryDefinition::new()
            .sort(SortDefinition::ascending("country"))
            .sort(SortDefinition::descending("population"));
        let result = query.apply(cities()).unwrap();
        assert_eq!(
            names(&result),
            vec!["Paris", "Lyon", "Nice", "Lisbon", "Porto", "Braga"]
        );
    }

    #[test]
    fn test_skip_with_take_all() {
        let all = cities();
        for skip in 0..=all.len() + 2 {
            let result = QueryDefinition::new().skip(skip).apply(cities()).unwrap();
            assert_eq!(result.len(), all.len().saturating_sub(skip));
            assert_eq!(result.as_slice(), &all[skip.min(all.len())..]);
        }
    }

    #[test]
    fn test_page_window_applies_after_sorting() {
        let query = QueryDefinition::new()
            .sort(SortDefinition::ascending("name"))
            .skip(1)
            .take(2);
        let page = query.apply_paged(cities()).unwrap();
        assert_eq!(names(&page.data_objects), vec!["Lisbon", "Lyon"]);
        assert_eq!(page.total_records, 6);
        assert!(page.has_more(1));
    }

    #[test]
    fn test_total_records_counts_filtered_rows() {
        let query = QueryDefinition::new()
            .filter(FilterDefinition::equals("country", "PT"))
            .take(1);
        let page = query.apply_paged(cities()).unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page.total_records, 3);
    }

    #[test]
    fn test_negative_paging_is_rejected() {
        assert_eq!(
            QueryDefinition::new().with_paging(-2, 5).unwrap_err(),
            QueryError::NegativePaging { name: "skip", value: -2 }
        );
        assert_eq!(
            QueryDefinition::new().with_paging(0, -5).unwrap_err(),
            QueryError::NegativePaging { name: "take", value: -5 }
        );
        let query = QueryDefinition::new().with_paging(3, TAKE_ALL).unwrap();
        assert_eq!(query.skip, 3);
        assert_eq!(query.take, Take::All);
    }

    #[test]
    fn test_compile_fails_on_first_bad_definition() {
        let query = QueryDefinition::new()
            .filter(FilterDefinition::contains("name", "a"))
            .sort(SortDefinition::ascending("area"));
        assert!(matches!(
            query.compile::<City>().unwrap_err(),
            QueryError::FieldResolution { .. }
        ));
    }

    #[test]
    fn test_wire_form_uses_take_sentinel() {
        let json = r#"{"filters":[{"filterOn":"name","operator":"contains","value":"o"}],
                       "sorts":[{"sortOn":"name","descending":true}],"skip":0,"take":-1}"#;
        let query: QueryDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(query.take, Take::All);
        let result = query.apply(cities()).unwrap();
        assert_eq!(names(&result), vec!["Porto", "Lyon", "Lisbon"]);

        assert!(serde_json::from_str::<QueryDefinition>(r#"{"take":-3}"#).is_err());
        let out = serde_json::to_value(QueryDefinition::new().take(5)).unwrap();
        assert_eq!(out["take"], 5);
    }
}
