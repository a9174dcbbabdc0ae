//! List view state: search, pagination, and debounced fetching.
//!
//! Every paged listing (categories, models, products) shares the same
//! state shape. Changing the search text or the page size snaps back to
//! page 1 so the visible rows always match the filter that produced them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use armoire_core::{CategoryId, ModelId};

use crate::api::{ListQuery, ProductQuery};

const DEFAULT_PAGE_SIZE: u32 = 10;
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Search and pagination state of one list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    search: String,
    page: u32,
    page_size: u32,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ListState {
    /// Current search text.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Current 1-based page.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Current rows-per-page.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Replace the search text, snapping back to page 1.
    ///
    /// Setting the identical text is a no-op and keeps the current page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        if search == self.search {
            return;
        }
        self.search = search;
        self.page = 1;
    }

    /// Jump to a page. Pages are 1-based; 0 is treated as 1.
    pub fn set_page(&mut self, page: u32) {
        self.page = page.max(1);
    }

    /// Change rows-per-page, snapping back to page 1.
    ///
    /// Setting the identical size is a no-op and keeps the current page.
    pub fn set_page_size(&mut self, page_size: u32) {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return;
        }
        self.page_size = page_size;
        self.page = 1;
    }

    /// Query parameters for the current state. Blank search is omitted.
    #[must_use]
    pub fn params(&self) -> ListQuery {
        ListQuery {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            page: self.page,
            limit: self.page_size,
        }
    }

    /// Product query parameters for the current state plus taxonomy filters.
    #[must_use]
    pub fn product_params(
        &self,
        category_id: Option<CategoryId>,
        model_id: Option<ModelId>,
    ) -> ProductQuery {
        ProductQuery {
            search: (!self.search.is_empty()).then(|| self.search.clone()),
            page: self.page,
            limit: self.page_size,
            category_id,
            model_id,
        }
    }
}

/// Collapses rapid search edits into one fetch.
///
/// Each edit calls [`settle`](Self::settle); only the call still current
/// after the debounce window reports `true`, so exactly one fetch runs for
/// a burst of keystrokes.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE)
    }
}

impl SearchDebouncer {
    /// Debouncer with a custom window.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the debounce window.
    ///
    /// Returns `true` if no newer edit arrived while waiting, meaning the
    /// caller should fetch now.
    pub async fn settle(&self) -> bool {
        let current = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == current
    }
}
