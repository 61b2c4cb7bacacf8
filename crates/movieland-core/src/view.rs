/// The four content areas of the main window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Home,
    Search,
    Watchlist,
    Recommended,
}

impl View {
    pub const ALL: [View; 4] = [View::Home, View::Search, View::Watchlist, View::Recommended];

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Search => "Search Results",
            Self::Watchlist => "Watchlist",
            Self::Recommended => "Recommended",
        }
    }
}

/// What selecting a tab requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabOutcome {
    /// Switched views, nothing else to do.
    Switched,
    /// Switched to search results and the active search must be re-run.
    Rerun,
    /// The tab cannot be entered right now.
    Ignored,
}

/// What the content area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content {
    View(View),
    /// The search error message replaces the search results.
    SearchError,
}

/// Tracks the selected view.
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    current: View,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn force(&mut self, view: View) {
        if self.current != view {
            tracing::debug!(from = ?self.current, to = ?view, "switching view");
        }
        self.current = view;
    }

    /// A tab click. The search tab is only reachable with something to
    /// search for, and entering it re-runs that search.
    pub fn select_tab(&mut self, view: View, has_criteria: bool) -> TabOutcome {
        match view {
            View::Search if !has_criteria => TabOutcome::Ignored,
            View::Search => {
                self.force(view);
                TabOutcome::Rerun
            }
            _ => {
                self.force(view);
                TabOutcome::Switched
            }
        }
    }

    /// Exactly one content area per state.
    pub fn content(&self, search_error: bool) -> Content {
        match self.current {
            View::Search if search_error => Content::SearchError,
            view => Content::View(view),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_tab_requires_criteria() {
        let mut views = ViewController::new();
        assert_eq!(views.select_tab(View::Search, false), TabOutcome::Ignored);
        assert_eq!(views.current(), View::Home);

        assert_eq!(views.select_tab(View::Search, true), TabOutcome::Rerun);
        assert_eq!(views.current(), View::Search);
    }

    #[test]
    fn test_other_tabs_just_switch() {
        let mut views = ViewController::new();
        for view in [View::Watchlist, View::Recommended, View::Home] {
            assert_eq!(views.select_tab(view, false), TabOutcome::Switched);
            assert_eq!(views.current(), view);
        }
    }

    #[test]
    fn test_error_replaces_search_content_only() {
        let mut views = ViewController::new();
        views.force(View::Search);
        assert_eq!(views.content(true), Content::SearchError);
        assert_eq!(views.content(false), Content::View(View::Search));

        views.force(View::Watchlist);
        assert_eq!(views.content(true), Content::View(View::Watchlist));
    }
}
