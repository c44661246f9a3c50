//! Starship detail loading
//!
//! Validates the requested starship id, fetches the record, then fetches its
//! pilots and films through the response cache. Results are streamed as
//! [`DetailEvent`]s so the detail screen can show the record before the
//! related documents arrive.

use futures::future::try_join_all;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};
use url::form_urlencoded;

use crate::cache::ResponseCache;
use crate::data::{FetchError, StarshipDetail, SwapiClient};

/// Errors that can occur when loading a detail view
#[derive(Debug, Error)]
pub enum DetailError {
    /// The id is not a plain decimal number; nothing was fetched
    #[error("Invalid starship ID format: '{0}'")]
    InvalidId(String),

    /// The starship record could not be fetched
    #[error("Network error occurred while fetching starship details")]
    Starship(#[source] FetchError),

    /// One of the related documents could not be fetched
    #[error("Network error occurred while fetching additional data")]
    Related(#[source] FetchError),
}

/// A validated starship identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarshipId(u64);

impl StarshipId {
    /// Parses an id that must consist of ASCII digits only
    ///
    /// # Returns
    /// * `Ok(StarshipId)` for input like `"12"`
    /// * `Err(DetailError::InvalidId)` for `""`, `"12a"`, `"-1"` or `" 12"`
    pub fn parse(raw: &str) -> Result<Self, DetailError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DetailError::InvalidId(raw.to_string()));
        }
        raw.parse()
            .map(StarshipId)
            .map_err(|_| DetailError::InvalidId(raw.to_string()))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for StarshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options read from a detail link's query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailQuery {
    /// Fetch and show the pilots section
    pub show_pilots: bool,
    /// Fetch and show the films section
    pub show_films: bool,
    /// Name to show while the record loads; never used for fetching
    pub name: Option<String>,
}

impl Default for DetailQuery {
    fn default() -> Self {
        Self {
            show_pilots: true,
            show_films: true,
            name: None,
        }
    }
}

impl DetailQuery {
    /// Reads `showPilots`, `showFilms` and `name`
    ///
    /// A toggle is off only when its value is `false` (any case); absent or
    /// other values leave it on.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = DetailQuery::default();

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "showPilots" => parsed.show_pilots = !value.eq_ignore_ascii_case("false"),
                "showFilms" => parsed.show_films = !value.eq_ignore_ascii_case("false"),
                "name" => parsed.name = Some(value.into_owned()).filter(|n| !n.is_empty()),
                _ => {}
            }
        }

        parsed
    }

    /// Serializes the options, omitting defaults
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        if let Some(name) = &self.name {
            serializer.append_pair("name", name);
        }
        if !self.show_pilots {
            serializer.append_pair("showPilots", "false");
        }
        if !self.show_films {
            serializer.append_pair("showFilms", "false");
        }
        serializer.finish()
    }
}

/// Progress messages from a spawned detail load
#[derive(Debug, Clone)]
pub enum DetailEvent {
    /// The starship record resolved or failed
    Starship {
        id: StarshipId,
        result: Result<StarshipDetail, String>,
    },
    /// The pilots group resolved or failed
    Pilots {
        id: StarshipId,
        result: Result<Vec<Value>, String>,
    },
    /// The films group resolved or failed
    Films {
        id: StarshipId,
        result: Result<Vec<Value>, String>,
    },
}

/// Fetches starship records and their related documents
#[derive(Clone)]
pub struct DetailLoader {
    client: SwapiClient,
    cache: ResponseCache,
}

impl DetailLoader {
    pub fn new(client: SwapiClient, cache: ResponseCache) -> Self {
        Self { client, cache }
    }

    /// Validates `raw_id` and fetches the starship record
    ///
    /// Invalid ids fail before any request is made.
    pub async fn fetch_starship(&self, raw_id: &str) -> Result<StarshipDetail, DetailError> {
        let id = StarshipId::parse(raw_id)?;
        self.fetch_by_id(id).await
    }

    /// Fetches the starship record for a validated id, bypassing the cache
    pub async fn fetch_by_id(&self, id: StarshipId) -> Result<StarshipDetail, DetailError> {
        self.client.fetch_starship(id.get()).await.map_err(|e| {
            warn!(%id, error = %e, "failed to fetch starship details");
            DetailError::Starship(e)
        })
    }

    /// Fetches every URL through the cache, concurrently
    ///
    /// The output keeps the order of `urls`. A single failure fails the whole
    /// group.
    pub async fn fetch_related(&self, urls: &[String]) -> Result<Vec<Value>, DetailError> {
        if urls.is_empty() {
            return Ok(Vec::new());
        }

        try_join_all(urls.iter().map(|url| self.cache.get_or_fetch(url)))
            .await
            .map_err(|e| {
                warn!(count = urls.len(), error = %e, "failed to fetch additional data");
                DetailError::Related(e)
            })
    }

    /// Loads the detail view for `id` in the background
    ///
    /// Sends `Starship` first. If it succeeded, the enabled groups are fetched
    /// concurrently and each sends its own event as soon as it resolves.
    /// Disabled groups send nothing and make no requests.
    pub fn spawn(
        &self,
        id: StarshipId,
        query: &DetailQuery,
        tx: mpsc::Sender<DetailEvent>,
    ) -> JoinHandle<()> {
        let loader = self.clone();
        let show_pilots = query.show_pilots;
        let show_films = query.show_films;

        tokio::spawn(async move {
            let detail = match loader.fetch_by_id(id).await {
                Ok(detail) => detail,
                Err(e) => {
                    let _ = tx
                        .send(DetailEvent::Starship {
                            id,
                            result: Err(e.to_string()),
                        })
                        .await;
                    return;
                }
            };

            let pilot_urls = detail.pilots.clone();
            let film_urls = detail.films.clone();
            let _ = tx
                .send(DetailEvent::Starship {
                    id,
                    result: Ok(detail),
                })
                .await;

            let pilots = async {
                if show_pilots {
                    let result = loader.fetch_related(&pilot_urls).await;
                    debug!(%id, ok = result.is_ok(), "pilots resolved");
                    let _ = tx
                        .send(DetailEvent::Pilots {
                            id,
                            result: result.map_err(|e| e.to_string()),
                        })
                        .await;
                }
            };

            let films = async {
                if show_films {
                    let result = loader.fetch_related(&film_urls).await;
                    debug!(%id, ok = result.is_ok(), "films resolved");
                    let _ = tx
                        .send(DetailEvent::Films {
                            id,
                            result: result.map_err(|e| e.to_string()),
                        })
                        .await;
                }
            };

            tokio::join!(pilots, films);
        })
    }
}

/// Loading state of a single value
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// The loaded value, if any
    pub fn loaded(&self) -> Option<&T> {
        match self {
            LoadState::Loaded(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Result<T, String>> for LoadState<T> {
    fn from(result: Result<T, String>) -> Self {
        match result {
            Ok(value) => LoadState::Loaded(value),
            Err(message) => LoadState::Failed(message),
        }
    }
}

/// State of the detail screen for one starship
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub id: StarshipId,
    pub query: DetailQuery,
    pub starship: LoadState<StarshipDetail>,
    /// `None` when the pilots section is switched off
    pub pilots: Option<LoadState<Vec<Value>>>,
    /// `None` when the films section is switched off
    pub films: Option<LoadState<Vec<Value>>>,
}

impl DetailView {
    /// A view with everything still loading
    pub fn new(id: StarshipId, query: DetailQuery) -> Self {
        let pilots = query.show_pilots.then_some(LoadState::Loading);
        let films = query.show_films.then_some(LoadState::Loading);
        Self {
            id,
            query,
            starship: LoadState::Loading,
            pilots,
            films,
        }
    }

    /// Title to show: the record's name, else the name hint from the link
    pub fn title(&self) -> Option<&str> {
        self.starship
            .loaded()
            .map(|detail| detail.name.as_str())
            .or(self.query.name.as_deref())
    }

    /// Applies an event, ignoring events for other starships
    ///
    /// # Returns
    /// `true` if the event belonged to this view
    pub fn apply(&mut self, event: DetailEvent) -> bool {
        match event {
            DetailEvent::Starship { id, result } if id == self.id => {
                self.starship = result.into();
                true
            }
            DetailEvent::Pilots { id, result } if id == self.id => {
                if self.pilots.is_some() {
                    self.pilots = Some(result.into());
                }
                true
            }
            DetailEvent::Films { id, result } if id == self.id => {
                if self.films.is_some() {
                    self.films = Some(result.into());
                }
                true
            }
            _ => false,
        }
    }

    /// Link that reopens this view
    pub fn link(&self) -> String {
        let query = self.query.to_query_string();
        if query.is_empty() {
            format!("/starship/{}", self.id)
        } else {
            format!("/starship/{}?{}", self.id, query)
        }
    }
}
