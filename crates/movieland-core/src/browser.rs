//! The browsing session: every piece of client state and the transitions
//! between them.
//!
//! Each entry point mutates state and returns the [`Effect`]s the caller must
//! run (network fetches). Results come back through the matching `*_loaded`
//! method.

use crate::appearance::{Appearance, ThemePreference};
use crate::carousel::{CarouselWindow, Direction};
use crate::details::{DetailCache, DetailState, MovieDetails};
use crate::models::{Genre, HomeGenre, Movie, MovieId};
use crate::normalize::{normalize_list, RawMovie, RawPage};
use crate::search::{SearchRequest, SearchSession};
use crate::storage::SharedStore;
use crate::view::{Content, TabOutcome, View, ViewController};
use crate::visibility::{ScrollMetrics, VisibilitySensor};
use crate::watchlist::WatchlistStore;

/// Cards shown per carousel before the window is measured.
const DEFAULT_CAROUSEL_CAPACITY: usize = 5;

/// Pixels from the end of the result list at which the last card counts as
/// visible.
const DEFAULT_SCROLL_THRESHOLD: f32 = 200.0;

/// Work requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchGenres,
    /// Load every home carousel, one genre after another.
    FetchHomeRows,
    Search(SearchRequest),
    FetchRecommendations(u64),
    FetchDetail(u64),
}

/// A genre carousel on the home view.
#[derive(Debug, Clone)]
pub struct HomeRow {
    pub genre: HomeGenre,
    pub movies: Vec<Movie>,
    pub window: CarouselWindow,
}

pub struct Browser {
    views: ViewController,
    search: SearchSession,
    sensor: VisibilitySensor,
    /// Last known geometry of the result list.
    scroll: ScrollMetrics,
    scroll_threshold: f32,
    watchlist: WatchlistStore,
    appearance: Appearance,
    details: DetailCache,
    genres: Vec<Genre>,
    home_genres: Vec<HomeGenre>,
    home_rows: Vec<HomeRow>,
    home_loading: bool,
    recommendations: Vec<Movie>,
    carousel_capacity: usize,
}

impl Browser {
    pub fn new(store: SharedStore, os_prefers_dark: bool, home_genres: Vec<HomeGenre>) -> Self {
        Self {
            views: ViewController::new(),
            search: SearchSession::new(),
            sensor: VisibilitySensor::new(),
            scroll: ScrollMetrics::default(),
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            watchlist: WatchlistStore::load(store.clone()),
            appearance: Appearance::load(store, os_prefers_dark),
            details: DetailCache::new(),
            genres: Vec::new(),
            home_genres,
            home_rows: Vec::new(),
            home_loading: false,
            recommendations: Vec::new(),
            carousel_capacity: DEFAULT_CAROUSEL_CAPACITY,
        }
    }

    /// Startup fetches: home carousels, the genre list, and recommendations
    /// for the most recent watchlist entry.
    pub fn start(&mut self) -> Vec<Effect> {
        self.home_loading = true;
        let mut effects = vec![Effect::FetchHomeRows, Effect::FetchGenres];
        if let Some(id) = self.watchlist.last().and_then(|m| m.id.catalog_id()) {
            effects.push(Effect::FetchRecommendations(id));
        }
        effects
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn view(&self) -> View {
        self.views.current()
    }

    pub fn content(&self) -> Content {
        self.views.content(self.search.error().is_some())
    }

    pub fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn watchlist(&self) -> &WatchlistStore {
        &self.watchlist
    }

    pub fn in_watchlist(&self, id: &MovieId) -> bool {
        self.watchlist.contains(id)
    }

    pub fn theme(&self) -> ThemePreference {
        self.appearance.preference()
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn home_genres(&self) -> &[HomeGenre] {
        &self.home_genres
    }

    pub fn home_rows(&self) -> &[HomeRow] {
        &self.home_rows
    }

    pub fn home_loading(&self) -> bool {
        self.home_loading
    }

    pub fn recommendations(&self) -> &[Movie] {
        &self.recommendations
    }

    pub fn detail(&self, id: &MovieId) -> Option<&DetailState> {
        id.catalog_id().and_then(|id| self.details.get(id))
    }

    // ── Navigation ──────────────────────────────────────────────

    /// Brand click: back to home with search cleared.
    pub fn go_home(&mut self) {
        self.search.clear();
        self.sensor.attach(None);
        self.views.force(View::Home);
    }

    pub fn select_tab(&mut self, view: View) -> Vec<Effect> {
        match self.views.select_tab(view, self.search.has_criteria()) {
            TabOutcome::Rerun => self.run_search(),
            TabOutcome::Switched | TabOutcome::Ignored => Vec::new(),
        }
    }

    // ── Search ──────────────────────────────────────────────────

    pub fn set_search_input(&mut self, text: String) {
        self.search.set_input(text);
    }

    /// Genre dropdown change: always lands on search results, from page 1.
    pub fn select_genre(&mut self, genre: Option<u64>) -> Vec<Effect> {
        self.search.set_genre(genre);
        self.views.force(View::Search);
        let effects = self.run_search();
        if effects.is_empty() {
            self.search.reset_results();
            self.sensor.attach(None);
        }
        effects
    }

    /// Search form submission. Does nothing when both text and genre are empty.
    pub fn submit_search(&mut self) -> Vec<Effect> {
        self.run_search()
    }

    fn run_search(&mut self) -> Vec<Effect> {
        let Some(request) = self.search.submit() else {
            return Vec::new();
        };
        self.views.force(View::Search);
        self.sensor.attach(None);
        // Page 1 renders into a fresh list, scrolled to the top.
        self.scroll.offset = 0.0;
        vec![Effect::Search(request)]
    }

    pub fn search_loaded(&mut self, request: &SearchRequest, result: Result<RawPage, String>) {
        match result {
            Ok(page) => {
                let movies = normalize_list(&page.results);
                tracing::debug!(
                    page = request.page,
                    total_pages = page.total_pages,
                    count = movies.len(),
                    "search page loaded"
                );
                self.search.apply_page(request, page.total_pages, movies);
            }
            Err(e) => self.search.apply_failure(request, &e),
        }
        self.sensor
            .attach(self.search.results().last().map(|m| m.id.clone()));
    }

    pub fn set_scroll_threshold(&mut self, px: f32) {
        self.scroll_threshold = px.max(0.0);
    }

    /// The result list was scrolled.
    pub fn search_scrolled(&mut self, metrics: ScrollMetrics) -> Vec<Effect> {
        self.scroll = metrics;
        self.observe_last_result()
    }

    /// The result list was laid out again after a new page or a resize.
    ///
    /// A list that fits inside its viewport never scrolls, so this is the
    /// only way its last card is seen.
    pub fn search_measured(&mut self, viewport_height: f32, content_height: f32) -> Vec<Effect> {
        let max_offset = (content_height - viewport_height).max(0.0);
        self.scroll = ScrollMetrics {
            offset: self.scroll.offset.min(max_offset),
            viewport_height,
            content_height,
        };
        self.observe_last_result()
    }

    fn observe_last_result(&mut self) -> Vec<Effect> {
        let visible = self.scroll.end_within(self.scroll_threshold);
        self.last_result_visible(visible)
    }

    /// Feed the sensor. Off the results view the list is not rendered, so
    /// the last card counts as hidden.
    fn last_result_visible(&mut self, visible: bool) -> Vec<Effect> {
        let on_screen = self.views.current() == View::Search;
        if !self.sensor.observe(visible && on_screen) {
            return Vec::new();
        }
        self.search
            .on_last_visible(on_screen)
            .map(Effect::Search)
            .into_iter()
            .collect()
    }

    // ── Home ────────────────────────────────────────────────────

    pub fn genres_loaded(&mut self, result: Result<Vec<Genre>, String>) {
        match result {
            Ok(genres) => {
                tracing::debug!(count = genres.len(), "genres loaded");
                self.genres = genres;
            }
            Err(e) => tracing::warn!(error = %e, "failed to fetch genres"),
        }
    }

    pub fn home_rows_loaded(&mut self, rows: Vec<(HomeGenre, Vec<RawMovie>)>) {
        let capacity = self.carousel_capacity;
        self.home_rows = rows
            .into_iter()
            .map(|(genre, raws)| {
                let movies = normalize_list(&raws);
                let window = CarouselWindow::new(movies.len(), capacity);
                HomeRow {
                    genre,
                    movies,
                    window,
                }
            })
            .collect();
        self.home_loading = false;
    }

    pub fn scroll_carousel(&mut self, row: usize, direction: Direction) {
        if let Some(row) = self.home_rows.get_mut(row) {
            row.window.scroll(direction);
        }
    }

    /// Number of cards that fit in a carousel at the current window width.
    pub fn set_carousel_capacity(&mut self, capacity: usize) {
        self.carousel_capacity = capacity.max(1);
        for row in &mut self.home_rows {
            row.window.set_capacity(self.carousel_capacity);
        }
    }

    // ── Watchlist & recommendations ─────────────────────────────

    pub fn toggle_watchlist(&mut self, movie: &Movie) -> Vec<Effect> {
        let change = self.watchlist.toggle(movie);
        if self.watchlist.is_empty() {
            self.recommendations.clear();
        }
        change
            .recommend_for
            .and_then(|id| id.catalog_id())
            .map(Effect::FetchRecommendations)
            .into_iter()
            .collect()
    }

    pub fn clear_watchlist(&mut self) {
        self.watchlist.clear();
        self.recommendations.clear();
    }

    pub fn recommendations_loaded(&mut self, for_id: u64, result: Result<Vec<RawMovie>, String>) {
        match result {
            Ok(raws) => {
                // The list may have been emptied while the request was out.
                if self.watchlist.is_empty() {
                    return;
                }
                self.recommendations = normalize_list(&raws);
                tracing::debug!(for_id, count = self.recommendations.len(), "recommendations loaded");
            }
            Err(e) => tracing::warn!(for_id, error = %e, "failed to fetch recommendations"),
        }
    }

    // ── Theme ───────────────────────────────────────────────────

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.appearance.toggle()
    }

    // ── Details ─────────────────────────────────────────────────

    /// Pointer entered a card.
    pub fn hover(&mut self, id: &MovieId) -> Vec<Effect> {
        match id.catalog_id() {
            Some(id) if self.details.request(id) => vec![Effect::FetchDetail(id)],
            _ => Vec::new(),
        }
    }

    pub fn detail_loaded(&mut self, id: u64, result: Result<MovieDetails, String>) {
        self.details.resolve(id, result);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::search::SearchQuery;
    use crate::storage::{KeyValueStore, MemoryStore, THEME_KEY, WATCHLIST_KEY};

    fn browser() -> (Browser, SharedStore) {
        let store: SharedStore = Arc::new(MemoryStore::new());
        let home = vec![HomeGenre {
            name: "Action".into(),
            id: 28,
        }];
        (Browser::new(store.clone(), false, home), store)
    }

    fn raw_page(page: u32, total_pages: u32, ids: std::ops::RangeInclusive<u64>) -> RawPage {
        let results = ids
            .map(|id| {
                serde_json::from_value(serde_json::json!({
                    "id": id,
                    "title": format!("Batman {id}"),
                    "release_date": "2005-06-10",
                    "poster_path": format!("/{id}.jpg"),
                    "vote_average": 7.5,
                }))
                .unwrap()
            })
            .collect();
        RawPage {
            page,
            total_pages,
            results,
        }
    }

    fn movie(id: u64) -> Movie {
        Movie {
            id: MovieId::Catalog(id),
            title: "Fight Club".into(),
            year: "1999".into(),
            poster: "https://image.tmdb.org/t/p/w500/a.jpg".into(),
            genre: "Drama".into(),
            media_type: "movie".into(),
            rating: 8.4,
        }
    }

    fn only_search(effects: Vec<Effect>) -> SearchRequest {
        match effects.as_slice() {
            [Effect::Search(request)] => request.clone(),
            other => panic!("expected one search effect, got {other:?}"),
        }
    }

    #[test]
    fn test_start_effects() {
        let (mut b, store) = browser();
        assert_eq!(b.start(), vec![Effect::FetchHomeRows, Effect::FetchGenres]);
        assert!(b.home_loading());

        // A persisted watchlist also asks for recommendations.
        store
            .set(WATCHLIST_KEY, &serde_json::to_string(&vec![movie(13), movie(550)]).unwrap())
            .unwrap();
        let mut b = Browser::new(store, false, Vec::new());
        assert!(b.start().contains(&Effect::FetchRecommendations(550)));
    }

    #[test]
    fn test_batman_infinite_scroll() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let first = only_search(b.submit_search());
        assert_eq!(
            first,
            SearchRequest {
                query: SearchQuery::Title {
                    text: "batman".into(),
                    genre: None
                },
                page: 1
            }
        );
        assert_eq!(b.view(), View::Search);

        b.search_loaded(&first, Ok(raw_page(1, 3, 1..=20)));
        assert_eq!(b.search().results().len(), 20);

        // Sensor sits on card 20; scrolling it into view loads page 2.
        assert!(b.last_result_visible(false).is_empty());
        let second = only_search(b.last_result_visible(true));
        assert_eq!(second.page, 2);

        // Overlapping ids are not duplicated.
        b.search_loaded(&second, Ok(raw_page(2, 3, 18..=37)));
        let ids: Vec<u64> = b
            .search()
            .results()
            .iter()
            .filter_map(|m| m.id.catalog_id())
            .collect();
        assert_eq!(ids, (1..=37).collect::<Vec<_>>());
    }

    #[test]
    fn test_short_first_page_still_loads_more() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let first = only_search(b.submit_search());
        // Normalization dropped most of the page; it fits on screen.
        b.search_loaded(&first, Ok(raw_page(1, 3, 1..=4)));

        let second = only_search(b.search_measured(1200.0, 450.0));
        assert_eq!(second.page, 2);

        // Page 2 still fits: page 3 follows without any scrolling.
        b.search_loaded(&second, Ok(raw_page(2, 3, 5..=8)));
        assert_eq!(only_search(b.search_measured(1200.0, 900.0)).page, 3);
    }

    #[test]
    fn test_tall_page_waits_for_scroll() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let first = only_search(b.submit_search());
        b.search_loaded(&first, Ok(raw_page(1, 3, 1..=20)));

        assert!(b.search_measured(700.0, 2300.0).is_empty());
        let near_end = ScrollMetrics {
            offset: 1500.0,
            viewport_height: 700.0,
            content_height: 2300.0,
        };
        assert_eq!(only_search(b.search_scrolled(near_end)).page, 2);
    }

    #[test]
    fn test_last_response_wins() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let batman = only_search(b.submit_search());
        b.set_search_input("superman".into());
        let superman = only_search(b.submit_search());

        // Responses arrive out of order; no request tracking discards the
        // older one.
        b.search_loaded(&superman, Ok(raw_page(1, 1, 100..=102)));
        b.search_loaded(&batman, Ok(raw_page(1, 1, 1..=5)));

        let ids: Vec<u64> = b
            .search()
            .results()
            .iter()
            .filter_map(|m| m.id.catalog_id())
            .collect();
        assert_eq!(ids, (1..=5).collect::<Vec<_>>());
    }

    #[test]
    fn test_last_page_stops_sensor() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let first = only_search(b.submit_search());
        b.search_loaded(&first, Ok(raw_page(1, 2, 1..=20)));
        let second = only_search(b.last_result_visible(true));
        b.search_loaded(&second, Ok(raw_page(2, 2, 21..=30)));

        assert!(!b.search().has_more());
        assert!(b.last_result_visible(true).is_empty());
    }

    #[test]
    fn test_sensor_ignored_off_search_view() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let first = only_search(b.submit_search());
        b.search_loaded(&first, Ok(raw_page(1, 3, 1..=20)));

        b.select_tab(View::Watchlist);
        assert!(b.last_result_visible(true).is_empty());
    }

    #[test]
    fn test_genre_only_uses_discovery() {
        let (mut b, _) = browser();
        let request = only_search(b.select_genre(Some(28)));
        assert_eq!(request.query, SearchQuery::Genre(28));
        assert_eq!(b.view(), View::Search);
    }

    #[test]
    fn test_genre_with_text_is_one_combined_query() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let request = only_search(b.select_genre(Some(28)));
        assert_eq!(
            request.query,
            SearchQuery::Title {
                text: "batman".into(),
                genre: Some(28)
            }
        );
    }

    #[test]
    fn test_clearing_genre_without_text_resets() {
        let (mut b, _) = browser();
        let request = only_search(b.select_genre(Some(28)));
        b.search_loaded(&request, Ok(raw_page(1, 1, 1..=3)));

        assert!(b.select_genre(None).is_empty());
        assert_eq!(b.view(), View::Search);
        assert!(b.search().results().is_empty());
    }

    #[test]
    fn test_empty_submit_is_noop() {
        let (mut b, _) = browser();
        assert!(b.submit_search().is_empty());
        assert_eq!(b.view(), View::Home);
    }

    #[test]
    fn test_error_suppresses_search_until_new_search() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        let first = only_search(b.submit_search());
        b.search_loaded(&first, Err("connection refused".into()));
        assert_eq!(b.content(), Content::SearchError);
        assert_eq!(
            b.search().error(),
            Some("Failed to fetch movies. Please try again.")
        );

        only_search(b.submit_search());
        assert_eq!(b.content(), Content::View(View::Search));
    }

    #[test]
    fn test_brand_resets_everything() {
        let (mut b, _) = browser();
        b.set_search_input("batman".into());
        b.select_genre(Some(28));
        b.go_home();

        assert_eq!(b.view(), View::Home);
        assert_eq!(b.search().input(), "");
        assert_eq!(b.search().genre(), None);
        assert!(b.search().results().is_empty());
        assert!(b.search().error().is_none());
    }

    #[test]
    fn test_search_tab_reruns_only_with_criteria() {
        let (mut b, _) = browser();
        assert!(b.select_tab(View::Search).is_empty());
        assert_eq!(b.view(), View::Home);

        b.set_search_input("heat".into());
        only_search(b.select_tab(View::Search));
        assert_eq!(b.view(), View::Search);

        assert!(b.select_tab(View::Watchlist).is_empty());
        assert!(b.select_tab(View::Recommended).is_empty());
    }

    #[test]
    fn test_add_then_clear() {
        let (mut b, store) = browser();
        assert_eq!(
            b.toggle_watchlist(&movie(550)),
            vec![Effect::FetchRecommendations(550)]
        );
        b.recommendations_loaded(550, Ok(raw_page(1, 1, 600..=602).results));
        assert_eq!(b.recommendations().len(), 3);

        b.clear_watchlist();
        assert_eq!(store.get(WATCHLIST_KEY).unwrap(), None);
        assert!(b.watchlist().is_empty());

        b.select_tab(View::Recommended);
        assert_eq!(b.content(), Content::View(View::Recommended));
        assert!(b.recommendations().is_empty());
    }

    #[test]
    fn test_removing_last_entry_clears_recommendations() {
        let (mut b, _) = browser();
        b.toggle_watchlist(&movie(550));
        b.recommendations_loaded(550, Ok(raw_page(1, 1, 600..=602).results));

        assert!(b.toggle_watchlist(&movie(550)).is_empty());
        assert!(b.recommendations().is_empty());

        // A late response for the removed entry is dropped.
        b.recommendations_loaded(550, Ok(raw_page(1, 1, 600..=602).results));
        assert!(b.recommendations().is_empty());
    }

    #[test]
    fn test_theme_toggle_on_watchlist_tab() {
        let (mut b, store) = browser();
        b.toggle_watchlist(&movie(550));
        b.select_tab(View::Watchlist);
        let before = b.watchlist().movies().to_vec();

        assert_eq!(b.toggle_theme(), ThemePreference::Dark);
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(b.view(), View::Watchlist);
        assert_eq!(b.watchlist().movies(), before.as_slice());
    }

    #[test]
    fn test_hover_fetches_detail_once() {
        let (mut b, _) = browser();
        let id = MovieId::Catalog(550);
        assert_eq!(b.hover(&id), vec![Effect::FetchDetail(550)]);
        assert!(b.hover(&id).is_empty());
        assert_eq!(b.detail(&id), Some(&DetailState::Loading));

        b.detail_loaded(550, Err("404".into()));
        assert!(b.hover(&id).is_empty());
        assert_eq!(b.detail(&id), Some(&DetailState::Unavailable));

        // Legacy ids cannot address the catalog.
        assert!(b.hover(&MovieId::External("tt0137523".into())).is_empty());
    }

    #[test]
    fn test_home_rows_and_carousel() {
        let (mut b, _) = browser();
        b.start();
        let genre = b.home_genres()[0].clone();
        b.home_rows_loaded(vec![(genre, raw_page(1, 1, 1..=20).results)]);
        assert!(!b.home_loading());
        assert_eq!(b.home_rows()[0].movies.len(), 20);

        b.set_carousel_capacity(4);
        b.scroll_carousel(0, Direction::Right);
        assert_eq!(b.home_rows()[0].window.range(), 2..6);

        // Out-of-range rows are ignored.
        b.scroll_carousel(9, Direction::Right);
    }

    #[test]
    fn test_failed_genre_list_leaves_empty() {
        let (mut b, _) = browser();
        b.genres_loaded(Err("500".into()));
        assert!(b.genres().is_empty());

        b.genres_loaded(Ok(vec![Genre {
            id: 28,
            name: "Action".into(),
        }]));
        assert_eq!(b.genres().len(), 1);
    }
}
