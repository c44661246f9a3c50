//! Core data models for the starship explorer
//!
//! This module contains the SWAPI record types used throughout the application
//! and the client used to fetch them.

pub mod swapi;

pub use swapi::{FetchError, HttpTransport, SwapiClient, Transport, DEFAULT_BASE_URL};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of a paginated SWAPI collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Total number of records across all pages, when reported
    #[serde(default)]
    pub count: Option<u64>,
    /// URL of the next page, `None` on the last page
    #[serde(default)]
    pub next: Option<String>,
    /// URL of the previous page, `None` on the first page
    #[serde(default)]
    pub previous: Option<String>,
    /// Records on this page
    pub results: Vec<T>,
}

/// A starship as listed on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarshipSummary {
    /// Display name, e.g. "Millennium Falcon"
    pub name: String,
    /// Model designation
    #[serde(default)]
    pub model: String,
    /// Manufacturer, compared by exact match when filtering
    #[serde(default)]
    pub manufacturer: String,
    /// Crew size as free text ("4", "30-165", "unknown")
    #[serde(default)]
    pub crew: String,
    /// Canonical resource URL, ends in `/<id>/`
    #[serde(default)]
    pub url: String,
}

impl StarshipSummary {
    /// Crew size as a number, or `None` when the text is not numeric
    pub fn crew_count(&self) -> Option<f64> {
        parse_crew(&self.crew)
    }

    /// Numeric identifier taken from the trailing segment of `url`
    pub fn resource_id(&self) -> Option<u64> {
        resource_id_from_url(&self.url)
    }
}

/// Full starship record shown on the detail screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarshipDetail {
    pub name: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub crew: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub cost_in_credits: String,
    #[serde(default)]
    pub passengers: String,
    #[serde(default)]
    pub length: String,
    #[serde(default)]
    pub hyperdrive_rating: String,
    #[serde(default)]
    pub max_atmosphering_speed: String,
    #[serde(default)]
    pub starship_class: String,
    /// Pilot resource URLs, in API order
    #[serde(default)]
    pub pilots: Vec<String>,
    /// Film resource URLs, in API order
    #[serde(default)]
    pub films: Vec<String>,
}

/// Parses a free-text crew field into a number.
///
/// Only plain decimal numbers are accepted; ranges ("30-165"), thousands
/// separators ("1,600") and words ("unknown") yield `None`.
pub fn parse_crew(crew: &str) -> Option<f64> {
    let trimmed = crew.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Extracts the trailing numeric segment from a resource URL.
///
/// `https://swapi.dev/api/starships/12/` yields `Some(12)`. The URL must end
/// with a slash, matching the canonical form the API returns.
pub fn resource_id_from_url(url: &str) -> Option<u64> {
    let without_slash = url.strip_suffix('/')?;
    let segment = without_slash.rsplit('/').next()?;
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

/// Display label for a sub-resource document.
///
/// Pilots carry a `name`, films a `title`.
pub fn resource_label(document: &Value) -> Option<&str> {
    document
        .get("name")
        .or_else(|| document.get("title"))
        .and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn falcon() -> StarshipSummary {
        StarshipSummary {
            name: "Millennium Falcon".to_string(),
            model: "YT-1300 light freighter".to_string(),
            manufacturer: "Corellian Engineering Corporation".to_string(),
            crew: "4".to_string(),
            url: "https://swapi.dev/api/starships/10/".to_string(),
        }
    }

    #[test]
    fn test_parse_crew_plain_numbers() {
        assert_eq!(parse_crew("4"), Some(4.0));
        assert_eq!(parse_crew(" 165 "), Some(165.0));
        assert_eq!(parse_crew("0"), Some(0.0));
    }

    #[test]
    fn test_parse_crew_rejects_free_text() {
        assert_eq!(parse_crew("unknown"), None);
        assert_eq!(parse_crew("30-165"), None);
        assert_eq!(parse_crew("1,600"), None);
        assert_eq!(parse_crew(""), None);
        assert_eq!(parse_crew("inf"), None);
    }

    #[test]
    fn test_resource_id_from_url() {
        assert_eq!(
            resource_id_from_url("https://swapi.dev/api/starships/12/"),
            Some(12)
        );
        assert_eq!(resource_id_from_url("https://swapi.dev/api/starships/12"), None);
        assert_eq!(resource_id_from_url("https://swapi.dev/api/starships/x1/"), None);
        assert_eq!(resource_id_from_url(""), None);
    }

    #[test]
    fn test_summary_helpers() {
        let ship = falcon();
        assert_eq!(ship.crew_count(), Some(4.0));
        assert_eq!(ship.resource_id(), Some(10));
    }

    #[test]
    fn test_summary_ignores_unknown_fields() {
        let value = json!({
            "name": "X-wing",
            "model": "T-65 X-wing",
            "manufacturer": "Incom Corporation",
            "crew": "1",
            "url": "https://swapi.dev/api/starships/12/",
            "cargo_capacity": "110",
            "created": "2014-12-12T11:19:05.340000Z"
        });

        let ship: StarshipSummary = serde_json::from_value(value).unwrap();
        assert_eq!(ship.name, "X-wing");
        assert_eq!(ship.resource_id(), Some(12));
    }

    #[test]
    fn test_page_without_next_is_last() {
        let page: Page<StarshipSummary> = serde_json::from_value(json!({
            "count": 1,
            "next": null,
            "previous": null,
            "results": [serde_json::to_value(falcon()).unwrap()]
        }))
        .unwrap();

        assert!(page.next.is_none());
        assert_eq!(page.results.len(), 1);
    }

    #[test]
    fn test_detail_keeps_sub_resource_order() {
        let detail: StarshipDetail = serde_json::from_value(json!({
            "name": "Millennium Falcon",
            "pilots": [
                "https://swapi.dev/api/people/13/",
                "https://swapi.dev/api/people/14/"
            ],
            "films": ["https://swapi.dev/api/films/1/"]
        }))
        .unwrap();

        assert_eq!(detail.pilots[0], "https://swapi.dev/api/people/13/");
        assert_eq!(detail.pilots[1], "https://swapi.dev/api/people/14/");
        assert_eq!(detail.films.len(), 1);
        assert!(detail.starship_class.is_empty());
    }

    #[test]
    fn test_resource_label() {
        assert_eq!(resource_label(&json!({"name": "Han Solo"})), Some("Han Solo"));
        assert_eq!(resource_label(&json!({"title": "A New Hope"})), Some("A New Hope"));
        assert_eq!(resource_label(&json!({"episode_id": 4})), None);
    }
}
