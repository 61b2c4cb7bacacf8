use std::collections::HashSet;

use crate::models::Movie;

/// Where the paginated list stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Idle,
    LoadingFirst,
    LoadingNext,
    /// The last page has been received.
    Exhausted,
    Failed,
}

/// Page counter and accumulated results for an infinitely scrolling list.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PageState,
    page: u32,
    has_more: bool,
    results: Vec<Movie>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    pub fn new() -> Self {
        Self {
            state: PageState::Idle,
            page: 1,
            has_more: false,
            results: Vec::new(),
        }
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn results(&self) -> &[Movie] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::LoadingFirst | PageState::LoadingNext)
    }

    /// Back to page 1 with nothing accumulated.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Reset and mark page 1 as in flight. Returns the page to fetch.
    pub fn begin_first(&mut self) -> u32 {
        self.reset();
        self.state = PageState::LoadingFirst;
        self.page
    }

    /// Handle a "last item became visible" event.
    ///
    /// Advances the page and returns it when the list is not loading, more
    /// pages exist, and the list is on screen.
    pub fn advance_on_visible(&mut self, list_on_screen: bool) -> Option<u32> {
        if !list_on_screen || self.is_loading() || !self.has_more {
            return None;
        }
        self.page += 1;
        self.state = PageState::LoadingNext;
        tracing::debug!(page = self.page, "advancing to next page");
        Some(self.page)
    }

    /// Apply a received page. Page 1 replaces the list, later pages append
    /// entries whose ids are not already present.
    pub fn apply_page(&mut self, page: u32, total_pages: u32, movies: Vec<Movie>) {
        self.page = page;

        if page <= 1 {
            self.results = movies;
            self.has_more = page < total_pages;
        } else if movies.is_empty() {
            self.has_more = false;
        } else {
            let mut seen: HashSet<_> = self.results.iter().map(|m| m.id.clone()).collect();
            self.results
                .extend(movies.into_iter().filter(|m| seen.insert(m.id.clone())));
            self.has_more = page < total_pages;
        }

        self.state = if self.has_more {
            PageState::Idle
        } else {
            PageState::Exhausted
        };
    }

    /// Record a failed fetch. A failed first page clears the list; a failed
    /// later page keeps what was already loaded.
    pub fn fail(&mut self) {
        if self.page <= 1 {
            self.results.clear();
        }
        self.state = PageState::Failed;
    }
}
