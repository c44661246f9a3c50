//! Application state management for the starship explorer
//!
//! This module contains the main application state, handling keyboard input,
//! navigation between screens, background data loading, and the lifetime of
//! the response cache sweeper.

use std::sync::Arc;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::cache::{ResponseCache, SweeperConfig, SweeperHandle};
use crate::cli::StartupConfig;
use crate::data::{HttpTransport, StarshipSummary, SwapiClient};
use crate::detail::{DetailEvent, DetailLoader, DetailQuery, DetailView, LoadState, StarshipId};
use crate::listing::{self, ListPage, ListQuery, ListState};
use crate::route::Route;
use crate::session::{LoginForm, Session};

/// Message shown when the starship listing cannot be loaded
pub const LIST_ERROR_MESSAGE: &str = "Error fetching data. Try again later.";

/// Capacity of the background event channels
const EVENT_CHANNEL_SIZE: usize = 32;

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Welcome screen with "Get Started"
    Landing,
    /// Username/password form
    Login,
    /// Filterable starship table
    Dashboard,
    /// One starship with its pilots and films
    Detail,
}

/// Main application struct managing state and data
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Logged-in flag
    pub session: Session,
    /// Login screen contents
    pub login_form: LoginForm,
    /// Dashboard filters and page
    pub list: ListState,
    /// Full starship collection; `None` until first requested
    pub starships: Option<LoadState<Vec<StarshipSummary>>>,
    /// Distinct manufacturers for the manufacturer selector
    pub manufacturers: Vec<String>,
    /// Highlighted row on the current dashboard page
    pub selected_row: usize,
    /// Whether typed characters go to the search box
    pub search_mode: bool,
    /// Detail screen state for a valid id
    pub detail: Option<DetailView>,
    /// Error for a detail link whose id was rejected
    pub detail_error: Option<String>,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// When the listing last finished loading
    pub last_refresh: Option<DateTime<Local>>,
    client: SwapiClient,
    cache: ResponseCache,
    loader: DetailLoader,
    sweeper_config: SweeperConfig,
    sweeper: Option<SweeperHandle>,
    list_tx: mpsc::Sender<Result<Vec<StarshipSummary>, String>>,
    list_rx: mpsc::Receiver<Result<Vec<StarshipSummary>, String>>,
    detail_tx: mpsc::Sender<DetailEvent>,
    detail_rx: mpsc::Receiver<DetailEvent>,
}

impl App {
    /// Creates an App talking to the API named in `config`
    pub fn new(config: &StartupConfig) -> Self {
        let transport = Arc::new(HttpTransport::new());
        let client = SwapiClient::with_transport(transport.clone(), config.base_url.clone());
        let cache = ResponseCache::with_capacity(transport, config.cache_capacity);
        let sweeper_config = SweeperConfig {
            interval: config.flush_interval,
            enabled: true,
        };
        Self::with_client(client, cache, sweeper_config)
    }

    /// Creates an App with a custom client and cache
    pub fn with_client(
        client: SwapiClient,
        cache: ResponseCache,
        sweeper_config: SweeperConfig,
    ) -> Self {
        let (list_tx, list_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let (detail_tx, detail_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let loader = DetailLoader::new(client.clone(), cache.clone());

        Self {
            screen: Screen::Landing,
            session: Session::new(),
            login_form: LoginForm::new(),
            list: ListState::default(),
            starships: None,
            manufacturers: Vec::new(),
            selected_row: 0,
            search_mode: false,
            detail: None,
            detail_error: None,
            should_quit: false,
            show_help: false,
            last_refresh: None,
            client,
            cache,
            loader,
            sweeper_config,
            sweeper: None,
            list_tx,
            list_rx,
            detail_tx,
            detail_rx,
        }
    }

    /// The shared response cache
    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Starts the periodic cache flush; must run inside a tokio runtime
    pub fn start(&mut self) {
        if self.sweeper.is_none() {
            self.sweeper = Some(SweeperHandle::start(
                self.cache.clone(),
                self.sweeper_config.clone(),
            ));
        }
    }

    /// Stops background tasks owned by the app
    pub async fn shutdown(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.stop().await;
        }
    }

    /// Whether the cache sweeper is running
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.as_ref().is_some_and(SweeperHandle::is_running)
    }

    /// Route describing the current screen
    pub fn current_route(&self) -> Route {
        match self.screen {
            Screen::Landing => Route::Landing,
            Screen::Login => Route::Login,
            Screen::Dashboard => Route::Dashboard(self.list.query().clone()),
            Screen::Detail => match &self.detail {
                Some(view) => Route::Starship {
                    raw_id: view.id.to_string(),
                    query: view.query.clone(),
                },
                None => Route::Landing,
            },
        }
    }

    /// Shows the screen for `route`, applying the login gate
    pub fn navigate(&mut self, route: Route) {
        let route = route.resolve(&self.session);
        info!(link = %route.to_link(), "navigate");
        self.show_help = false;
        self.search_mode = false;
        if !matches!(route, Route::Starship { .. }) {
            self.detail = None;
            self.detail_error = None;
        }

        match route {
            Route::Landing => self.screen = Screen::Landing,
            Route::Login => {
                self.login_form = LoginForm::new();
                self.screen = Screen::Login;
            }
            Route::Dashboard(query) => {
                self.list = ListState::new(query);
                self.selected_row = 0;
                self.show_dashboard();
            }
            Route::Starship { raw_id, query } => self.open_detail(&raw_id, query),
        }
    }

    /// Shows the dashboard with its current filters, loading data if needed
    fn show_dashboard(&mut self) {
        self.screen = Screen::Dashboard;
        if matches!(self.starships, None | Some(LoadState::Failed(_))) {
            self.load_starships();
        }
    }

    /// Fetches the full starship listing in the background
    pub fn load_starships(&mut self) {
        self.starships = Some(LoadState::Loading);
        let client = self.client.clone();
        let tx = self.list_tx.clone();

        tokio::spawn(async move {
            let result = client.fetch_all_starships().await.map_err(|e| {
                warn!(error = %e, "failed to load starship listing");
                LIST_ERROR_MESSAGE.to_string()
            });
            let _ = tx.send(result).await;
        });
    }

    /// Validates `raw_id` and starts loading its detail view
    fn open_detail(&mut self, raw_id: &str, query: DetailQuery) {
        self.screen = Screen::Detail;
        match StarshipId::parse(raw_id) {
            Ok(id) => {
                self.detail_error = None;
                self.loader.spawn(id, &query, self.detail_tx.clone());
                self.detail = Some(DetailView::new(id, query));
            }
            Err(e) => {
                warn!(raw_id, "rejected starship id");
                self.detail = None;
                self.detail_error = Some(e.to_string());
            }
        }
    }

    /// Applies a finished listing load
    fn apply_listing(&mut self, result: Result<Vec<StarshipSummary>, String>) {
        if let Ok(ships) = &result {
            self.manufacturers = listing::manufacturers(ships);
            self.last_refresh = Some(Local::now());
        }
        self.starships = Some(result.into());
    }

    /// Drains pending background results without blocking
    pub fn poll_events(&mut self) {
        while let Ok(result) = self.list_rx.try_recv() {
            self.apply_listing(result);
        }
        while let Ok(event) = self.detail_rx.try_recv() {
            self.apply_detail_event(event);
        }
    }

    /// Waits for the next background result and applies it
    pub async fn process_next_event(&mut self) {
        tokio::select! {
            Some(result) = self.list_rx.recv() => self.apply_listing(result),
            Some(event) = self.detail_rx.recv() => self.apply_detail_event(event),
        }
    }

    fn apply_detail_event(&mut self, event: DetailEvent) {
        // Results for a view that was navigated away from are dropped
        if let Some(view) = &mut self.detail {
            view.apply(event);
        }
    }

    /// Loaded starships, empty while loading or after a failure
    pub fn loaded_starships(&self) -> &[StarshipSummary] {
        self.starships
            .as_ref()
            .and_then(LoadState::loaded)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The dashboard page for the current filters
    pub fn list_page(&self) -> ListPage<'_> {
        self.list.view(self.loaded_starships())
    }

    /// The starship under the dashboard cursor
    pub fn selected_starship(&self) -> Option<&StarshipSummary> {
        let page = self.list_page();
        let index = self.selected_row.min(page.items.len().saturating_sub(1));
        page.items.get(index).copied()
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `?`: Toggle help (outside text entry)
    /// - `q`: Quit (outside text entry)
    /// - `Ctrl+C`: Quit from anywhere
    /// - Landing: `Enter` get started, `d` dashboard, `l` login/logout
    /// - Login: type, `Tab` switch field, `Enter` submit, `Esc` back
    /// - Dashboard: `/` search, `s` sort, `m`/`M` manufacturer, `+`/`-` crew,
    ///   `←`/`→` page, `↑`/`↓` row, `Enter` details, `r` reload, `o` logout
    /// - Detail: `p` pilots, `f` films, `Esc` back
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            self.should_quit = true;
            return;
        }

        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        match self.screen {
            Screen::Landing => self.handle_landing_key(key_event),
            Screen::Login => self.handle_login_key(key_event),
            Screen::Dashboard => self.handle_dashboard_key(key_event),
            Screen::Detail => self.handle_detail_key(key_event),
        }
    }

    fn handle_landing_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter | KeyCode::Char('g') => self.get_started(),
            KeyCode::Char('d') => self.navigate(Route::Dashboard(ListQuery::default())),
            KeyCode::Char('l') => self.toggle_login(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_login_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => self.navigate(Route::Landing),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login_form.toggle_focus()
            }
            KeyCode::Backspace => self.login_form.pop_char(),
            KeyCode::Enter => self.submit_login(),
            KeyCode::Char(c) => {
                self.login_form.dismiss_error();
                self.login_form.push_char(c);
            }
            _ => {}
        }
    }

    fn handle_dashboard_key(&mut self, key_event: KeyEvent) {
        if self.search_mode {
            match key_event.code {
                KeyCode::Enter | KeyCode::Esc => self.search_mode = false,
                KeyCode::Backspace => {
                    self.list.pop_search_char();
                    self.selected_row = 0;
                }
                KeyCode::Char(c) => {
                    self.list.push_search_char(c);
                    self.selected_row = 0;
                }
                _ => {}
            }
            return;
        }

        let total_pages = self.list_page().total_pages;
        match key_event.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => self.navigate(Route::Landing),
            KeyCode::Char('/') => self.search_mode = true,
            KeyCode::Char('s') => {
                self.list.toggle_sort();
                self.selected_row = 0;
            }
            KeyCode::Char('m') => {
                self.list.cycle_manufacturer(&self.manufacturers);
                self.selected_row = 0;
            }
            KeyCode::Char('M') => {
                self.list.set_manufacturer(None);
                self.selected_row = 0;
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.list.increment_min_crew();
                self.selected_row = 0;
            }
            KeyCode::Char('-') => {
                self.list.decrement_min_crew();
                self.selected_row = 0;
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.list.previous_page(total_pages);
                self.selected_row = 0;
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.list.next_page(total_pages);
                self.selected_row = 0;
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter => {
                if let Some(route) = self.selected_starship().and_then(Route::detail_for) {
                    self.navigate(route);
                }
            }
            KeyCode::Char('r') => self.load_starships(),
            KeyCode::Char('o') => self.logout(),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc | KeyCode::Backspace => self.back_to_dashboard(),
            KeyCode::Char('p') => self.toggle_section(|q| q.show_pilots = !q.show_pilots),
            KeyCode::Char('f') => self.toggle_section(|q| q.show_films = !q.show_films),
            KeyCode::Char('?') => self.show_help = true,
            _ => {}
        }
    }

    /// "Get Started": dashboard when logged in, login otherwise
    pub fn get_started(&mut self) {
        if self.session.is_authenticated() {
            self.navigate(Route::Dashboard(self.list.query().clone()));
        } else {
            self.navigate(Route::Login);
        }
    }

    /// Header action: log out when logged in, open login otherwise
    fn toggle_login(&mut self) {
        if self.session.is_authenticated() {
            self.logout();
        } else {
            self.navigate(Route::Login);
        }
    }

    /// Submits the login form; success opens the dashboard
    pub fn submit_login(&mut self) {
        if self.login_form.submit(&mut self.session).is_ok() {
            self.navigate(Route::Dashboard(self.list.query().clone()));
        }
    }

    /// Logs out; the dashboard is no longer reachable
    pub fn logout(&mut self) {
        self.session.logout();
        if self.screen == Screen::Dashboard {
            self.navigate(Route::Login);
        }
    }

    /// Leaves the detail screen for the dashboard, keeping its filters and page
    fn back_to_dashboard(&mut self) {
        self.detail = None;
        self.detail_error = None;
        if self.session.is_authenticated() {
            self.show_dashboard();
        } else {
            self.navigate(Route::Login);
        }
    }

    /// Reopens the current detail view with one section toggled
    fn toggle_section(&mut self, change: impl FnOnce(&mut DetailQuery)) {
        if let Some(view) = &self.detail {
            let mut query = view.query.clone();
            change(&mut query);
            let raw_id = view.id.to_string();
            self.navigate(Route::Starship { raw_id, query });
        }
    }

    /// Moves the selection up, wrapping to the bottom of the page
    fn move_selection_up(&mut self) {
        let count = self.list_page().items.len();
        if count == 0 {
            return;
        }
        self.selected_row = if self.selected_row == 0 {
            count - 1
        } else {
            self.selected_row.min(count) - 1
        };
    }

    /// Moves the selection down, wrapping to the top of the page
    fn move_selection_down(&mut self) {
        let count = self.list_page().items.len();
        if count == 0 {
            return;
        }
        self.selected_row = (self.selected_row + 1) % count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{FetchError, Transport};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::collections::HashMap;

    /// Serves a 12-ship listing over two pages plus one detail record
    struct FleetTransport {
        responses: HashMap<String, Value>,
    }

    impl FleetTransport {
        fn new() -> Self {
            let ship = |i: u32| {
                let manufacturer = if i % 2 == 0 {
                    "Kuat Drive Yards"
                } else {
                    "Incom Corporation"
                };
                json!({
                    "name": format!("Ship {:02}", i),
                    "model": "model",
                    "manufacturer": manufacturer,
                    "crew": i.to_string(),
                    "url": format!("http://api.test/starships/{}/", i)
                })
            };
            let page1: Vec<Value> = (1..=10).map(ship).collect();
            let page2: Vec<Value> = (11..=12).map(ship).collect();

            let mut responses = HashMap::new();
            responses.insert(
                "http://api.test/starships/?page=1".to_string(),
                json!({ "next": "http://api.test/starships/?page=2", "results": page1 }),
            );
            responses.insert(
                "http://api.test/starships/?page=2".to_string(),
                json!({ "next": null, "results": page2 }),
            );
            responses.insert(
                "http://api.test/starships/1/".to_string(),
                json!({
                    "name": "Ship 01",
                    "pilots": ["http://api.test/people/1/"],
                    "films": []
                }),
            );
            responses.insert(
                "http://api.test/people/1/".to_string(),
                json!({ "name": "Luke Skywalker" }),
            );
            Self { responses }
        }
    }

    #[async_trait]
    impl Transport for FleetTransport {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.responses.get(url).cloned().ok_or(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    fn test_app() -> App {
        let transport = Arc::new(FleetTransport::new());
        let client = SwapiClient::with_transport(transport.clone(), "http://api.test");
        let cache = ResponseCache::new(transport);
        App::with_client(client, cache, SweeperConfig::default())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    async fn log_in(app: &mut App) {
        app.navigate(Route::Login);
        type_text(app, "admin");
        app.handle_key(key(KeyCode::Tab));
        type_text(app, "password");
        app.handle_key(key(KeyCode::Enter));
        // Listing load started by the dashboard
        app.process_next_event().await;
    }

    #[test]
    fn test_app_starts_on_landing_logged_out() {
        let app = test_app();
        assert_eq!(app.screen, Screen::Landing);
        assert!(!app.session.is_authenticated());
        assert!(app.starships.is_none());
    }

    #[test]
    fn test_dashboard_redirects_to_login_when_logged_out() {
        let mut app = test_app();
        app.navigate(Route::Dashboard(ListQuery::default()));
        assert_eq!(app.screen, Screen::Login);
        assert!(app.starships.is_none(), "nothing fetched before login");
    }

    #[test]
    fn test_get_started_goes_to_login_when_logged_out() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Login);
    }

    #[tokio::test]
    async fn test_wrong_password_stays_on_login() {
        let mut app = test_app();
        app.navigate(Route::Login);
        type_text(&mut app, "admin");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "wrong");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert_eq!(
            app.login_form.error.as_ref().map(ToString::to_string).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[tokio::test]
    async fn test_login_opens_dashboard_and_loads_listing() {
        let mut app = test_app();
        log_in(&mut app).await;

        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.session.is_authenticated());
        assert_eq!(app.loaded_starships().len(), 12);
        assert_eq!(
            app.manufacturers,
            vec!["Incom Corporation".to_string(), "Kuat Drive Yards".to_string()]
        );
        assert!(app.last_refresh.is_some());

        let page = app.list_page();
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_dashboard_keys_filter_and_page() {
        let mut app = test_app();
        log_in(&mut app).await;

        app.handle_key(key(KeyCode::Right));
        assert_eq!(app.list.page(), 2);
        assert_eq!(app.list_page().items.len(), 2);

        app.handle_key(key(KeyCode::Char('/')));
        type_text(&mut app, "ship 1");
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.search_mode);
        assert_eq!(app.list.page(), 1, "filter change resets the page");
        // Ship 10, Ship 11, Ship 12
        assert_eq!(app.list_page().total_matches, 3);

        app.handle_key(key(KeyCode::Char('s')));
        assert_eq!(app.list_page().items[0].name, "Ship 12");

        app.handle_key(key(KeyCode::Char('m')));
        assert_eq!(
            app.list.query().manufacturer.as_deref(),
            Some("Incom Corporation")
        );
        let names: Vec<&str> = app.list_page().items.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ship 11"]);

        assert_eq!(
            app.current_route().to_link(),
            "/dashboard?search=ship+1&sort=desc&manufacturer=Incom+Corporation&crewSize="
        );
    }

    #[tokio::test]
    async fn test_enter_opens_detail_and_streams_sections() {
        let mut app = test_app();
        log_in(&mut app).await;

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Detail);
        let view = app.detail.as_ref().unwrap();
        assert_eq!(view.title(), Some("Ship 01"));
        assert!(view.starship.is_loading());

        // Record, then pilots and films in either order
        for _ in 0..3 {
            app.process_next_event().await;
        }

        let view = app.detail.as_ref().unwrap();
        assert_eq!(view.starship.loaded().unwrap().name, "Ship 01");
        let pilots = view.pilots.as_ref().and_then(LoadState::loaded).unwrap();
        assert_eq!(pilots[0]["name"], "Luke Skywalker");
        let films = view.films.as_ref().and_then(LoadState::loaded).unwrap();
        assert!(films.is_empty());
        assert!(app.cache().contains("http://api.test/people/1/"));
    }

    #[tokio::test]
    async fn test_invalid_detail_id_shows_error_without_loading() {
        let mut app = test_app();
        app.navigate(Route::parse("/starship/12a").unwrap());

        assert_eq!(app.screen, Screen::Detail);
        assert!(app.detail.is_none());
        assert_eq!(
            app.detail_error.as_deref(),
            Some("Invalid starship ID format: '12a'")
        );
    }

    #[tokio::test]
    async fn test_detail_back_keeps_dashboard_state() {
        let mut app = test_app();
        log_in(&mut app).await;
        app.handle_key(key(KeyCode::Right));

        app.navigate(Route::parse("/starship/1").unwrap());
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.screen, Screen::Dashboard);
        assert_eq!(app.list.page(), 2);
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_logout_from_dashboard_returns_to_login() {
        let mut app = test_app();
        log_in(&mut app).await;

        app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_stale_detail_events_are_dropped() {
        let mut app = test_app();
        app.navigate(Route::parse("/starship/1").unwrap());
        // Navigate away before anything arrives
        app.navigate(Route::Landing);

        app.process_next_event().await;
        assert!(app.detail.is_none());
    }

    #[tokio::test]
    async fn test_sweeper_lifecycle() {
        let mut app = test_app();
        assert!(!app.is_sweeping());
        app.start();
        assert!(app.is_sweeping());
        app.shutdown().await;
        assert!(!app.is_sweeping());
    }

    #[test]
    fn test_help_overlay_intercepts_keys() {
        let mut app = test_app();
        app.handle_key(key(KeyCode::Char('?')));
        assert!(app.show_help);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_login() {
        let mut app = test_app();
        app.navigate(Route::Login);
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
        assert!(app.login_form.username.is_empty());
    }
}
