//! Query-string state for one list view.

use std::collections::BTreeMap;

use eventhub_core::pagination::{PageRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use eventhub_core::sorting::SortOrder;

/// Page, page size, sort and filters of a list request.
///
/// Filters are kept in a sorted map so the generated query string is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: i64,
    pub limit: i64,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_order: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page size. Values are floored and capped like the server does.
    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = PageRequest::new(self.page, limit).limit;
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }

    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Query pairs in a fixed order: paging, sort, then filters by name.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(sort_by) = &self.sort_by {
            pairs.push(("sort_by".to_string(), sort_by.clone()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order".to_string(), order.as_str().to_string()));
        }
        pairs.extend(
            self.filters
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        pairs
    }
}
