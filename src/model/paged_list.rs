use serde::{Deserialize, Serialize};

/// One page of records plus the total count ignoring the page window.
///
/// `data_objects.len() <= total_records` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedList<T> {
    pub data_objects: Vec<T>,
    pub total_records: u64,
}

impl<T> PagedList<T> {
    pub fn new(data_objects: Vec<T>, total_records: u64) -> Self {
        Self {
            data_objects,
            total_records,
        }
    }

    pub fn len(&self) -> usize {
        self.data_objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_objects.is_empty()
    }

    /// True when records remain after a page that started at `skip`.
    pub fn has_more(&self, skip: usize) -> bool {
        (skip as u64).saturating_add(self.len() as u64) < self.total_records
    }
}

impl<T> Default for PagedList<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}
