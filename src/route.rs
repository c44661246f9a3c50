//! Navigable links
//!
//! Every screen has a link of the form `/path?query`. Links can be parsed
//! back into a [`Route`], which is how views are shared and how `--open`
//! starts the app on a given screen.

use thiserror::Error;
use url::Url;

use crate::data::StarshipSummary;
use crate::detail::DetailQuery;
use crate::listing::ListQuery;
use crate::session::Session;

/// Errors that can occur when parsing a link
#[derive(Debug, Error)]
pub enum RouteError {
    /// The text is not a valid URL path
    #[error("Invalid link: {0}")]
    InvalidLink(#[from] url::ParseError),

    /// The path does not name any screen
    #[error("Unknown path: '{0}'")]
    UnknownPath(String),
}

/// A screen plus the parameters needed to rebuild it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Landing,
    /// `/login`
    Login,
    /// `/dashboard?search=&sort=&manufacturer=&crewSize=`
    Dashboard(ListQuery),
    /// `/starship/<id>?showPilots=&showFilms=&name=`
    ///
    /// The id is kept raw; it is validated when the view loads.
    Starship { raw_id: String, query: DetailQuery },
}

impl Route {
    /// Parses a link such as `/dashboard?sort=desc`
    ///
    /// Absolute URLs are accepted too; only path and query are used.
    pub fn parse(link: &str) -> Result<Self, RouteError> {
        let base = Url::parse("http://localhost/")?;
        let url = base.join(link.trim())?;
        let query = url.query().unwrap_or("");

        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            [] => Ok(Route::Landing),
            ["login"] => Ok(Route::Login),
            ["dashboard"] => Ok(Route::Dashboard(ListQuery::from_query_string(query))),
            ["starship", raw_id] => Ok(Route::Starship {
                raw_id: raw_id.to_string(),
                query: DetailQuery::from_query_string(query),
            }),
            _ => Err(RouteError::UnknownPath(url.path().to_string())),
        }
    }

    /// Link for this route
    pub fn to_link(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Dashboard(query) => format!("/dashboard?{}", query.to_query_string()),
            Route::Starship { raw_id, query } => {
                let query = query.to_query_string();
                if query.is_empty() {
                    format!("/starship/{}", raw_id)
                } else {
                    format!("/starship/{}?{}", raw_id, query)
                }
            }
        }
    }

    /// Detail route for a listed starship, carrying its name as a hint
    ///
    /// Returns `None` when the starship's URL has no numeric id.
    pub fn detail_for(ship: &StarshipSummary) -> Option<Self> {
        let id = ship.resource_id()?;
        Some(Route::Starship {
            raw_id: id.to_string(),
            query: DetailQuery {
                name: Some(ship.name.clone()),
                ..Default::default()
            },
        })
    }

    /// Whether the route needs a logged-in session
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Dashboard(_))
    }

    /// Applies the session gate: protected routes become `Login` when
    /// logged out
    pub fn resolve(self, session: &Session) -> Self {
        if self.is_protected() && !session.is_authenticated() {
            Route::Login
        } else {
            self
        }
    }
}
