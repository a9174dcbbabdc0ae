//! Pagination metadata returned by list endpoints.

use serde::{Deserialize, Serialize};

/// Server-reported pagination for a list response.
///
/// `total_pages` is whatever the backend computed; the client never derives
/// it from `total` and `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of records matching the query.
    pub total: u64,
    /// Current page (1-based).
    pub page: u32,
    /// Page size the server applied.
    pub limit: u32,
    /// Total number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Whether a page exists after the current one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether a page exists before the current one.
    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.page > 1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{"total": 42, "page": 2, "limit": 10, "totalPages": 5}"#;
        let pagination: Pagination = serde_json::from_str(json).unwrap();
        assert_eq!(pagination.total, 42);
        assert_eq!(pagination.total_pages, 5);
    }

    #[test]
    fn test_page_navigation() {
        let pagination = Pagination {
            total: 42,
            page: 1,
            limit: 10,
            total_pages: 5,
        };
        assert!(pagination.has_next_page());
        assert!(!pagination.has_previous_page());

        let last = Pagination {
            page: 5,
            ..pagination
        };
        assert!(!last.has_next_page());
        assert!(last.has_previous_page());
    }
}
