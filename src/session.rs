/// Mutable record of the search in progress: what was asked, which page the
/// gallery is on, and how many pages the provider can serve. Owned exclusively
/// by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    pub query: String,
    pub current_page: u32,
    pub total_pages: u32,
}

impl SearchSession {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            current_page: 1,
            total_pages: 0,
        }
    }

    /// Advance to the next page and return it. Called before the fetch is
    /// issued, so a failed fetch leaves the counter advanced.
    pub fn advance_page(&mut self) -> u32 {
        self.current_page += 1;
        self.current_page
    }

    /// Pagination has run past the last page the provider can serve.
    pub fn exhausted(&self) -> bool {
        self.current_page > self.total_pages
    }
}

pub fn total_pages(total_hits: u64, per_page: u32) -> u32 {
    if per_page == 0 {
        return 0;
    }
    total_hits.div_ceil(per_page as u64) as u32
}
