use crate::models::Movie;
use crate::pagination::{PageState, Paginator};

/// What the user asked for: free text and/or a genre filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    pub term: String,
    pub genre: Option<u64>,
}

impl SearchCriteria {
    pub fn new(term: impl Into<String>, genre: Option<u64>) -> Self {
        Self {
            term: term.into().trim().to_string(),
            genre,
        }
    }

    /// Neither text nor genre set.
    pub fn is_empty(&self) -> bool {
        self.term.is_empty() && self.genre.is_none()
    }

    /// The catalog query for a given page. Text always goes through title
    /// search (with the genre as an extra filter); a genre alone goes through
    /// discovery.
    pub fn request(&self, page: u32) -> Option<SearchRequest> {
        let query = match (self.term.is_empty(), self.genre) {
            (false, genre) => SearchQuery::Title {
                text: self.term.clone(),
                genre,
            },
            (true, Some(genre)) => SearchQuery::Genre(genre),
            (true, None) => return None,
        };
        Some(SearchRequest { query, page })
    }

    /// Message shown when page 1 comes back empty.
    pub fn empty_message(&self) -> String {
        match (self.term.is_empty(), self.genre.is_some()) {
            (false, true) => format!(
                "No movies found matching \"{}\" in the selected genre.",
                self.term
            ),
            (true, true) => "No movies found in the selected genre.".to_string(),
            _ => format!("No movies found matching \"{}\".", self.term),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Title { text: String, genre: Option<u64> },
    Genre(u64),
}

/// One page of a search, ready to hand to the catalog client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: SearchQuery,
    pub page: u32,
}

pub const FETCH_FAILED: &str = "Failed to fetch movies. Please try again.";
pub const FETCH_MORE_FAILED: &str = "Failed to fetch more movies. Please try again.";

/// Search input, the criteria of the running search, and its results.
///
/// Typed text stays in `input` until the search is submitted; the genre
/// filter applies immediately.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    input: String,
    genre: Option<u64>,
    active: SearchCriteria,
    paginator: Paginator,
    error: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn genre(&self) -> Option<u64> {
        self.genre
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn set_genre(&mut self, genre: Option<u64>) {
        self.genre = genre;
    }

    /// Criteria built from the current input and genre filter.
    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::new(self.input.as_str(), self.genre)
    }

    /// Whether there is anything to search for.
    pub fn has_criteria(&self) -> bool {
        !self.criteria().is_empty()
    }

    pub fn results(&self) -> &[Movie] {
        self.paginator.results()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn page_state(&self) -> PageState {
        self.paginator.state()
    }

    pub fn has_more(&self) -> bool {
        self.paginator.has_more()
    }

    /// Start a fresh search from page 1. `None` when there is nothing to
    /// search for; the session is left untouched in that case.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let criteria = self.criteria();
        if criteria.is_empty() {
            return None;
        }
        self.error = None;
        let page = self.paginator.begin_first();
        let request = criteria.request(page);
        self.active = criteria;
        tracing::debug!(?request, "submitting search");
        request
    }

    /// Handle the visibility sensor firing on the last result.
    pub fn on_last_visible(&mut self, list_on_screen: bool) -> Option<SearchRequest> {
        if self.error.is_some() {
            return None;
        }
        let page = self.paginator.advance_on_visible(list_on_screen)?;
        self.active.request(page)
    }

    /// Apply a successful response.
    pub fn apply_page(&mut self, request: &SearchRequest, total_pages: u32, movies: Vec<Movie>) {
        let first = request.page <= 1;
        let empty = movies.is_empty();
        self.paginator.apply_page(request.page, total_pages, movies);
        if first && empty {
            self.error = Some(self.active.empty_message());
        }
    }

    /// Apply a failed response.
    pub fn apply_failure(&mut self, request: &SearchRequest, error: &str) {
        tracing::warn!(page = request.page, error, "search failed");
        self.paginator.fail();
        self.error = Some(if request.page <= 1 {
            FETCH_FAILED.to_string()
        } else {
            FETCH_MORE_FAILED.to_string()
        });
    }

    /// Back to page 1 with no results and no error, keeping the input.
    pub fn reset_results(&mut self) {
        self.paginator.reset();
        self.error = None;
    }

    /// Drop text, genre, results and error.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovieId;

    fn movies(ids: &[u64]) -> Vec<Movie> {
        ids.iter()
            .map(|&id| Movie {
                id: MovieId::Catalog(id),
                title: format!("Batman {id}"),
                year: "2005".into(),
                poster: "https://via.placeholder.com/400x600".into(),
                genre: "N/A".into(),
                media_type: "movie".into(),
                rating: 7.0,
            })
            .collect()
    }

    #[test]
    fn test_request_shapes() {
        let genre_only = SearchCriteria::new("  ", Some(28));
        assert_eq!(
            genre_only.request(1),
            Some(SearchRequest {
                query: SearchQuery::Genre(28),
                page: 1
            })
        );

        let combined = SearchCriteria::new("batman", Some(28));
        assert_eq!(
            combined.request(2),
            Some(SearchRequest {
                query: SearchQuery::Title {
                    text: "batman".into(),
                    genre: Some(28)
                },
                page: 2
            })
        );

        assert_eq!(SearchCriteria::new("", None).request(1), None);
    }

    #[test]
    fn test_empty_messages() {
        assert_eq!(
            SearchCriteria::new("zzz", Some(28)).empty_message(),
            "No movies found matching \"zzz\" in the selected genre."
        );
        assert_eq!(
            SearchCriteria::new("", Some(28)).empty_message(),
            "No movies found in the selected genre."
        );
        assert_eq!(
            SearchCriteria::new("zzz", None).empty_message(),
            "No movies found matching \"zzz\"."
        );
    }

    #[test]
    fn test_submit_without_criteria_is_noop() {
        let mut session = SearchSession::new();
        session.set_input("   ");
        assert_eq!(session.submit(), None);
        assert_eq!(session.page_state(), PageState::Idle);
    }

    #[test]
    fn test_submit_clears_error_and_results() {
        let mut session = SearchSession::new();
        session.set_input("batman");
        let req = session.submit().unwrap();
        session.apply_failure(&req, "timeout");
        assert_eq!(session.error(), Some(FETCH_FAILED));

        let req = session.submit().unwrap();
        assert_eq!(session.error(), None);
        assert!(session.results().is_empty());
        assert_eq!(req.page, 1);
    }

    #[test]
    fn test_infinite_scroll_uses_submitted_criteria() {
        let mut session = SearchSession::new();
        session.set_input("batman");
        let req = session.submit().unwrap();
        session.apply_page(&req, 3, movies(&[1, 2]));

        // Typing without submitting does not change the running search.
        session.set_input("superman");
        let next = session.on_last_visible(true).unwrap();
        assert_eq!(
            next.query,
            SearchQuery::Title {
                text: "batman".into(),
                genre: None
            }
        );
        assert_eq!(next.page, 2);
    }

    #[test]
    fn test_empty_first_page_sets_message() {
        let mut session = SearchSession::new();
        session.set_genre(Some(99));
        let req = session.submit().unwrap();
        session.apply_page(&req, 0, Vec::new());
        assert_eq!(session.error(), Some("No movies found in the selected genre."));
    }

    #[test]
    fn test_later_page_failure_message() {
        let mut session = SearchSession::new();
        session.set_input("batman");
        let req = session.submit().unwrap();
        session.apply_page(&req, 3, movies(&[1]));

        let next = session.on_last_visible(true).unwrap();
        session.apply_failure(&next, "connection reset");
        assert_eq!(session.error(), Some(FETCH_MORE_FAILED));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.on_last_visible(true), None);
    }

    #[test]
    fn test_clear() {
        let mut session = SearchSession::new();
        session.set_input("batman");
        session.set_genre(Some(28));
        let req = session.submit().unwrap();
        session.apply_page(&req, 1, movies(&[1]));

        session.clear();
        assert_eq!(session.input(), "");
        assert_eq!(session.genre(), None);
        assert!(session.results().is_empty());
        assert!(!session.has_criteria());
    }
}
