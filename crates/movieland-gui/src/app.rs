use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::{button, column, container, pick_list, row, text, text_input, Row, Space};
use iced::{window, Alignment, Element, Length, Subscription, Task, Theme};

use movieland_api::{feed, CatalogService, TmdbClient, TmdbError};
use movieland_core::browser::{Browser, Effect};
use movieland_core::config::AppConfig;
use movieland_core::details::MovieDetails;
use movieland_core::models::{Genre, HomeGenre, MovieId};
use movieland_core::normalize::{RawMovie, RawPage};
use movieland_core::search::SearchRequest;
use movieland_core::storage::{self, MemoryStore, SharedStore, SqliteStore};
use movieland_core::view::{Content, View};

use crate::poster_cache::{self, PosterCache};
use crate::screen::{home, recommended, search, watchlist, Action};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets::{self, CardContext, CardEvent};
use crate::window_state::WindowState;

/// Error carried by results when the catalog client could not be built.
const CATALOG_UNAVAILABLE: &str = "catalog client unavailable";

/// Application state.
pub struct Movieland {
    config: AppConfig,
    browser: Browser,
    catalog: Option<Arc<TmdbClient>>,
    http: reqwest::Client,
    posters: PosterCache,
    cs: ColorScheme,
    /// Card under the pointer; its poster shows the detail overlay.
    hovered: Option<MovieId>,
    window_state: WindowState,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Header
    BrandPressed,
    SearchInputChanged(String),
    SearchSubmitted,
    GenrePicked(GenreOption),
    TabSelected(View),
    ThemeToggled,
    ClearWatchlist,

    // Screens
    Home(home::Message),
    Search(search::Message),
    Watchlist(watchlist::Message),
    Recommended(recommended::Message),

    // Async results
    GenresLoaded(Result<Vec<Genre>, String>),
    HomeRowsLoaded(Vec<(HomeGenre, Vec<RawMovie>)>),
    SearchLoaded(SearchRequest, Result<RawPage, String>),
    RecommendationsLoaded(u64, Result<Vec<RawMovie>, String>),
    DetailLoaded(u64, Result<MovieDetails, String>),
    PosterLoaded(MovieId, Result<PathBuf, String>),

    WindowEvent(window::Event),
}

/// Entry of the genre dropdown.
#[derive(Debug, Clone, PartialEq)]
pub enum GenreOption {
    All,
    Genre(Genre),
}

impl GenreOption {
    pub fn id(&self) -> Option<u64> {
        match self {
            Self::All => None,
            Self::Genre(g) => Some(g.id),
        }
    }
}

impl std::fmt::Display for GenreOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("All Genres"),
            Self::Genre(g) => f.write_str(&g.name),
        }
    }
}

impl Movieland {
    pub fn new() -> (Self, Task<Message>) {
        let cli = crate::cli();

        let config = match AppConfig::load(cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "failed to load config, using defaults");
                AppConfig::default()
            }
        };

        let store = open_store();
        if cli.reset {
            if let Err(e) = storage::reset(store.as_ref()) {
                tracing::warn!(error = %e, "failed to reset local storage");
            }
        }

        let catalog = match TmdbClient::new(&config.tmdb) {
            Ok(client) => Some(Arc::new(client)),
            Err(e) => {
                tracing::error!(error = %e, "failed to build catalog client");
                None
            }
        };

        let mut browser = Browser::new(store, theme::os_prefers_dark(), config.home.genres.clone());
        let window_state = WindowState::load();
        browser.set_carousel_capacity(widgets::cards_per_row(window_state.size().width));
        browser.set_scroll_threshold(config.search.scroll_threshold);

        let mut app = Self {
            cs: ColorScheme::for_preference(browser.theme()),
            config,
            browser,
            catalog,
            http: reqwest::Client::new(),
            posters: PosterCache::new(AppConfig::poster_cache_dir()),
            hovered: None,
            window_state,
        };

        let effects = app.browser.start();
        let task = Task::batch([app.run_effects(effects), app.sync_posters()]);
        (app, task)
    }

    pub fn title(&self) -> String {
        "MovieLand".into()
    }

    pub fn theme(&self) -> Theme {
        theme::build_theme(&self.cs)
    }

    pub fn subscription(&self) -> Subscription<Message> {
        iced::event::listen_with(|event, _status, _id| match event {
            iced::Event::Window(
                event @ (window::Event::Resized(_) | window::Event::Moved(_)),
            ) => Some(Message::WindowEvent(event)),
            _ => None,
        })
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::BrandPressed => {
                self.browser.go_home();
                Task::none()
            }
            Message::SearchInputChanged(input) => {
                self.browser.set_search_input(input);
                Task::none()
            }
            Message::SearchSubmitted => {
                let effects = self.browser.submit_search();
                self.run_effects(effects)
            }
            Message::GenrePicked(option) => {
                let effects = self.browser.select_genre(option.id());
                self.run_effects(effects)
            }
            Message::TabSelected(view) => {
                let effects = self.browser.select_tab(view);
                self.run_effects(effects)
            }
            Message::ThemeToggled => {
                let preference = self.browser.toggle_theme();
                tracing::debug!(theme = preference.as_str(), "theme toggled");
                self.cs = ColorScheme::for_preference(preference);
                Task::none()
            }
            Message::ClearWatchlist => {
                self.browser.clear_watchlist();
                Task::none()
            }

            Message::Home(msg) => {
                let action = home::update(&mut self.browser, msg);
                self.handle_action(action)
            }
            Message::Search(msg) => {
                let action = search::update(&mut self.browser, msg);
                self.handle_action(action)
            }
            Message::Watchlist(msg) => {
                let action = watchlist::update(msg);
                self.handle_action(action)
            }
            Message::Recommended(msg) => {
                let action = recommended::update(msg);
                self.handle_action(action)
            }

            Message::GenresLoaded(result) => {
                self.browser.genres_loaded(result);
                Task::none()
            }
            Message::HomeRowsLoaded(rows) => {
                self.browser.home_rows_loaded(rows);
                Task::none()
            }
            Message::SearchLoaded(request, result) => {
                self.browser.search_loaded(&request, result);
                self.measure_search()
            }
            Message::RecommendationsLoaded(for_id, result) => {
                self.browser.recommendations_loaded(for_id, result);
                Task::none()
            }
            Message::DetailLoaded(id, result) => {
                self.browser.detail_loaded(id, result);
                Task::none()
            }
            Message::PosterLoaded(id, result) => {
                self.posters.resolve(id, result);
                Task::none()
            }

            Message::WindowEvent(event) => match event {
                window::Event::Resized(size) => {
                    self.window_state.width = size.width;
                    self.window_state.height = size.height;
                    self.window_state.save();
                    self.browser
                        .set_carousel_capacity(widgets::cards_per_row(size.width));
                    self.measure_search()
                }
                window::Event::Moved(pos) => {
                    self.window_state.x = pos.x;
                    self.window_state.y = pos.y;
                    self.window_state.save();
                    Task::none()
                }
                _ => Task::none(),
            },
        };

        Task::batch([task, self.sync_posters()])
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::Run(effects) => self.run_effects(effects),
            Action::Card(event) => self.handle_card(event),
        }
    }

    fn handle_card(&mut self, event: CardEvent) -> Task<Message> {
        match event {
            CardEvent::Entered(id) => {
                let effects = self.browser.hover(&id);
                self.hovered = Some(id);
                self.run_effects(effects)
            }
            CardEvent::Exited(id) => {
                if self.hovered.as_ref() == Some(&id) {
                    self.hovered = None;
                }
                Task::none()
            }
            CardEvent::ToggleWatchlist(movie) => {
                let effects = self.browser.toggle_watchlist(&movie);
                self.run_effects(effects)
            }
        }
    }

    /// Re-check the end of the result list after its layout changed. A
    /// list shorter than the window never reports a scroll.
    fn measure_search(&mut self) -> Task<Message> {
        if self.browser.view() != View::Search {
            return Task::none();
        }
        let count = self.browser.search().results().len();
        let (viewport, content) = search::estimated_layout(self.window_state.size(), count);
        let effects = self.browser.search_measured(viewport, content);
        self.run_effects(effects)
    }

    // ── Effects ─────────────────────────────────────────────────────

    fn run_effects(&self, effects: Vec<Effect>) -> Task<Message> {
        Task::batch(effects.into_iter().map(|effect| self.run_effect(effect)))
    }

    fn run_effect(&self, effect: Effect) -> Task<Message> {
        match effect {
            Effect::FetchGenres => self.call_catalog(
                |catalog| async move { catalog.genres().await },
                Message::GenresLoaded,
            ),
            Effect::FetchHomeRows => {
                let home = self.config.home.clone();
                match self.catalog.clone() {
                    Some(catalog) => Task::perform(
                        async move { feed::load_home_rows(catalog.as_ref(), &home).await },
                        Message::HomeRowsLoaded,
                    ),
                    None => Task::done(Message::HomeRowsLoaded(
                        home.genres.into_iter().map(|g| (g, Vec::new())).collect(),
                    )),
                }
            }
            Effect::Search(request) => {
                let for_request = request.clone();
                self.call_catalog(
                    move |catalog| async move { feed::run_search(catalog.as_ref(), &request).await },
                    move |result| Message::SearchLoaded(for_request.clone(), result),
                )
            }
            Effect::FetchRecommendations(id) => self.call_catalog(
                move |catalog| async move { catalog.recommendations(id).await },
                move |result| Message::RecommendationsLoaded(id, result),
            ),
            Effect::FetchDetail(id) => self.call_catalog(
                move |catalog| async move { catalog.details(id).await },
                move |result| Message::DetailLoaded(id, result),
            ),
        }
    }

    /// Run one catalog call, converting its error into a message string.
    fn call_catalog<T, F, Fut>(
        &self,
        call: F,
        done: impl Fn(Result<T, String>) -> Message + Send + 'static,
    ) -> Task<Message>
    where
        T: Send + 'static,
        F: FnOnce(Arc<TmdbClient>) -> Fut,
        Fut: Future<Output = Result<T, TmdbError>> + Send + 'static,
    {
        match self.catalog.clone() {
            Some(catalog) => {
                let fut = call(catalog);
                Task::perform(async move { fut.await.map_err(|e| e.to_string()) }, done)
            }
            None => Task::done(done(Err(CATALOG_UNAVAILABLE.to_string()))),
        }
    }

    /// Start downloads for any poster shown in a list that isn't known yet.
    fn sync_posters(&mut self) -> Task<Message> {
        let browser = &self.browser;
        let movies = browser
            .home_rows()
            .iter()
            .flat_map(|row| row.movies.iter())
            .chain(browser.search().results())
            .chain(browser.watchlist().movies())
            .chain(browser.recommendations());

        let fetches = self.posters.request_all(movies);
        Task::batch(fetches.into_iter().map(|fetch| {
            let id = fetch.id;
            Task::perform(
                poster_cache::fetch_poster(self.http.clone(), fetch.url, fetch.path),
                move |result| Message::PosterLoaded(id.clone(), result),
            )
        }))
    }

    // ── View ────────────────────────────────────────────────────────

    pub fn view(&self) -> Element<'_, Message> {
        let ctx = CardContext {
            cs: &self.cs,
            browser: &self.browser,
            posters: &self.posters,
            hovered: self.hovered.as_ref(),
        };

        let content: Element<'_, Message> = match self.browser.content() {
            Content::SearchError => self.error_view(),
            Content::View(View::Home) => home::view(&ctx).map(Message::Home),
            Content::View(View::Search) => search::view(&ctx).map(Message::Search),
            Content::View(View::Watchlist) => watchlist::view(&ctx).map(Message::Watchlist),
            Content::View(View::Recommended) => {
                recommended::view(&ctx).map(Message::Recommended)
            }
        };

        column![
            self.header(),
            self.tabs(),
            container(content).width(Length::Fill).height(Length::Fill),
        ]
        .into()
    }

    fn header(&self) -> Element<'_, Message> {
        let cs = &self.cs;
        let session = self.browser.search();

        let brand = button(
            row![
                lucide_icons::iced::icon_clapperboard()
                    .size(style::TEXT_XL)
                    .color(cs.primary),
                text("MovieLand")
                    .size(style::TEXT_XL)
                    .font(style::FONT_HEADING)
                    .line_height(style::LINE_HEIGHT_TIGHT),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .padding(0)
        .on_press(Message::BrandPressed)
        .style(theme::brand_button(cs));

        let search_input = text_input("Search for movies...", session.input())
            .on_input(Message::SearchInputChanged)
            .on_submit(Message::SearchSubmitted)
            .size(style::TEXT_BASE)
            .padding(style::INPUT_PADDING)
            .width(Length::Fixed(style::SEARCH_INPUT_WIDTH))
            .style(theme::text_input_style(cs));

        let options = genre_options(self.browser.genres());
        let selected = options
            .iter()
            .find(|option| option.id() == session.genre())
            .cloned();
        let genre_picker = pick_list(options, selected, Message::GenrePicked)
            .placeholder("All Genres")
            .text_size(style::TEXT_BASE)
            .padding(style::INPUT_PADDING)
            .width(Length::Fixed(style::GENRE_PICKER_WIDTH))
            .style(theme::pick_list_style(cs))
            .menu_style(theme::pick_list_menu_style(cs));

        let search_button = button(
            row![
                lucide_icons::iced::icon_search().size(style::TEXT_BASE),
                text("Search").size(style::TEXT_BASE),
            ]
            .spacing(style::SPACE_XS)
            .align_y(Alignment::Center),
        )
        .padding(style::INPUT_PADDING)
        .on_press(Message::SearchSubmitted)
        .style(theme::primary_button(cs));

        let clear_button = button(
            row![
                lucide_icons::iced::icon_trash_2().size(style::TEXT_BASE),
                text("Clear Watchlist").size(style::TEXT_BASE),
            ]
            .spacing(style::SPACE_XS)
            .align_y(Alignment::Center),
        )
        .padding(style::INPUT_PADDING)
        .on_press(Message::ClearWatchlist)
        .style(theme::danger_button(cs));

        let theme_icon = if self.browser.theme().is_dark() {
            lucide_icons::iced::icon_sun()
        } else {
            lucide_icons::iced::icon_moon()
        };
        let theme_button = button(
            container(theme_icon.size(style::ICON_SIZE))
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        )
        .padding(0)
        .width(Length::Fixed(style::ICON_SIZE * 2.0))
        .height(Length::Fixed(style::ICON_SIZE * 2.0))
        .on_press(Message::ThemeToggled)
        .style(theme::icon_button(cs));

        let bar = row![
            brand,
            Space::new().width(Length::Fill),
            search_input,
            genre_picker,
            search_button,
            Space::new().width(Length::Fixed(style::SPACE_LG)),
            clear_button,
            theme_button,
        ]
        .spacing(style::SPACE_SM)
        .align_y(Alignment::Center);

        container(bar)
            .width(Length::Fill)
            .padding([0.0, style::CONTENT_PADDING])
            .center_y(Length::Fixed(style::HEADER_HEIGHT))
            .style(theme::header_bar(&self.cs))
            .into()
    }

    fn tabs(&self) -> Element<'_, Message> {
        let cs = &self.cs;
        let current = self.browser.view();
        let watchlist_len = self.browser.watchlist().len();

        let tabs = Row::with_children(View::ALL.into_iter().map(|view| {
            button(text(tab_label(view, watchlist_len)).size(style::TEXT_BASE))
                .padding([style::SPACE_XS, style::SPACE_LG])
                .on_press(Message::TabSelected(view))
                .style(theme::tab_button(view == current, cs))
                .into()
        }))
        .spacing(style::SPACE_SM);

        container(tabs)
            .padding([0.0, style::CONTENT_PADDING])
            .width(Length::Fill)
            .center_y(Length::Fixed(style::TAB_BAR_HEIGHT))
            .into()
    }

    fn error_view(&self) -> Element<'_, Message> {
        let cs = &self.cs;
        widgets::empty_state(
            cs,
            lucide_icons::iced::icon_circle_alert()
                .size(style::TEXT_2XL)
                .color(cs.error)
                .into(),
            self.browser.search().error().unwrap_or_default(),
            None,
        )
    }
}

/// Local key-value storage, falling back to memory when the database
/// cannot be opened.
fn open_store() -> SharedStore {
    match AppConfig::ensure_db_path().and_then(|path| SqliteStore::open(&path)) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            tracing::error!(error = %e, "cannot open local storage, changes will not persist");
            Arc::new(MemoryStore::new())
        }
    }
}

fn genre_options(genres: &[Genre]) -> Vec<GenreOption> {
    std::iter::once(GenreOption::All)
        .chain(genres.iter().cloned().map(GenreOption::Genre))
        .collect()
}

fn tab_label(view: View, watchlist_len: usize) -> String {
    match view {
        View::Watchlist => format!("{} ({watchlist_len})", view.title()),
        other => other.title().to_string(),
    }
}
