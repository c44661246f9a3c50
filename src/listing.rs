//! Dashboard list derivation
//!
//! Turns the full starship collection into the filtered, sorted page shown on
//! the dashboard, and mirrors the filter state to and from the dashboard
//! link's query string.

use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::warn;
use url::form_urlencoded;

use crate::data::StarshipSummary;

/// Number of rows per dashboard page
pub const PAGE_SIZE: usize = 10;

/// Sort direction on starship name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Query-string value ("asc" or "desc")
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }

    /// Parses "asc"/"desc", case-insensitively
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Some(SortOrder::Ascending),
            "desc" => Some(SortOrder::Descending),
            _ => None,
        }
    }

    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Compares two names the way a human-facing sort would.
///
/// Letters compare case-insensitively first; names differing only in case put
/// the lowercase form first. The result is a total order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}

/// Filter and sort parameters for the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    /// Case-insensitive substring of the name; empty matches everything
    pub search: String,
    /// Exact manufacturer to keep, if any
    pub manufacturer: Option<String>,
    /// Minimum numeric crew size, if any
    pub min_crew: Option<u32>,
    /// Sort direction on name
    pub sort: SortOrder,
}

impl ListQuery {
    /// Whether `ship` passes every active filter
    ///
    /// Ships whose crew is not a plain number never pass an active
    /// minimum-crew filter.
    pub fn matches(&self, ship: &StarshipSummary) -> bool {
        let search_ok = self.search.is_empty()
            || ship
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase());

        let manufacturer_ok = match &self.manufacturer {
            Some(manufacturer) => ship.manufacturer == *manufacturer,
            None => true,
        };

        let crew_ok = match self.min_crew {
            Some(min) => ship.crew_count().is_some_and(|crew| crew >= f64::from(min)),
            None => true,
        };

        search_ok && manufacturer_ok && crew_ok
    }

    /// Filters then sorts `ships` by name in the requested direction
    pub fn apply<'a>(&self, ships: &'a [StarshipSummary]) -> Vec<&'a StarshipSummary> {
        let mut filtered: Vec<&StarshipSummary> =
            ships.iter().filter(|ship| self.matches(ship)).collect();

        match self.sort {
            SortOrder::Ascending => filtered.sort_by(|a, b| locale_cmp(&a.name, &b.name)),
            SortOrder::Descending => filtered.sort_by(|a, b| locale_cmp(&b.name, &a.name)),
        }

        filtered
    }

    /// Serializes the query for the dashboard link
    ///
    /// All four keys are always written so a link fully describes the view.
    pub fn to_query_string(&self) -> String {
        let crew = self.min_crew.map(|n| n.to_string()).unwrap_or_default();
        form_urlencoded::Serializer::new(String::new())
            .append_pair("search", &self.search)
            .append_pair("sort", self.sort.as_str())
            .append_pair("manufacturer", self.manufacturer.as_deref().unwrap_or(""))
            .append_pair("crewSize", &crew)
            .finish()
    }

    /// Reads a query back from a link's query string
    ///
    /// Missing keys fall back to defaults. An unknown sort value falls back to
    /// ascending; a crew size that is not a positive integer means no filter.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = ListQuery::default();

        for (key, value) in form_urlencoded::parse(query.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "search" => parsed.search = value.into_owned(),
                "sort" => {
                    parsed.sort = SortOrder::from_str(&value).unwrap_or_else(|| {
                        if !value.is_empty() {
                            warn!(sort = %value, "unknown sort order, using ascending");
                        }
                        SortOrder::Ascending
                    })
                }
                "manufacturer" => {
                    parsed.manufacturer = Some(value.into_owned()).filter(|m| !m.is_empty())
                }
                "crewSize" => {
                    parsed.min_crew = value.trim().parse::<u32>().ok().filter(|n| *n > 0)
                }
                _ => {}
            }
        }

        parsed
    }
}

/// Number of pages needed for `count` rows
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE)
}

/// Distinct manufacturers in first-seen order
pub fn manufacturers(ships: &[StarshipSummary]) -> Vec<String> {
    let mut seen = HashSet::new();
    ships
        .iter()
        .filter(|ship| seen.insert(ship.manufacturer.as_str()))
        .map(|ship| ship.manufacturer.clone())
        .collect()
}

/// One page of the derived dashboard view
#[derive(Debug, Clone)]
pub struct ListPage<'a> {
    /// Rows on this page, at most `PAGE_SIZE`
    pub items: Vec<&'a StarshipSummary>,
    /// 1-based page number
    pub page: usize,
    /// Pages available for the current filters
    pub total_pages: usize,
    /// Rows matching the current filters across all pages
    pub total_matches: usize,
}

/// Dashboard filter state plus the current page
///
/// Every filter or sort change sends the view back to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    query: ListQuery,
    page: usize,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new(ListQuery::default())
    }
}

impl ListState {
    /// Creates a state on page 1 for `query`
    pub fn new(query: ListQuery) -> Self {
        Self { query, page: 1 }
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    /// Current 1-based page
    pub fn page(&self) -> usize {
        self.page
    }

    fn update(&mut self, change: impl FnOnce(&mut ListQuery)) {
        let before = self.query.clone();
        change(&mut self.query);
        if self.query != before {
            self.page = 1;
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        let search = search.into();
        self.update(|q| q.search = search);
    }

    /// Appends one character to the search text
    pub fn push_search_char(&mut self, c: char) {
        self.update(|q| q.search.push(c));
    }

    /// Removes the last character of the search text
    pub fn pop_search_char(&mut self) {
        self.update(|q| {
            q.search.pop();
        });
    }

    pub fn set_manufacturer(&mut self, manufacturer: Option<String>) {
        self.update(|q| q.manufacturer = manufacturer.filter(|m| !m.is_empty()));
    }

    /// Moves the manufacturer selection to the next entry of `options`
    ///
    /// Cycles none -> first -> ... -> last -> none.
    pub fn cycle_manufacturer(&mut self, options: &[String]) {
        let next = match &self.query.manufacturer {
            None => options.first().cloned(),
            Some(current) => options
                .iter()
                .position(|m| m == current)
                .and_then(|i| options.get(i + 1))
                .cloned(),
        };
        self.set_manufacturer(next);
    }

    /// Sets the minimum crew size; zero clears the filter
    pub fn set_min_crew(&mut self, min_crew: Option<u32>) {
        self.update(|q| q.min_crew = min_crew.filter(|n| *n > 0));
    }

    /// Raises the minimum crew size by one, starting at 1
    pub fn increment_min_crew(&mut self) {
        let next = self.query.min_crew.map_or(1, |n| n.saturating_add(1));
        self.set_min_crew(Some(next));
    }

    /// Lowers the minimum crew size by one, clearing it below 1
    pub fn decrement_min_crew(&mut self) {
        let next = self.query.min_crew.and_then(|n| n.checked_sub(1));
        self.set_min_crew(next);
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.update(|q| q.sort = sort);
    }

    pub fn toggle_sort(&mut self) {
        self.update(|q| q.sort = q.sort.toggled());
    }

    /// Jumps to `page`, clamped to `[1, total_pages]`
    pub fn set_page(&mut self, page: usize, total_pages: usize) {
        self.page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.set_page(self.page + 1, total_pages);
    }

    pub fn previous_page(&mut self, total_pages: usize) {
        self.set_page(self.page.saturating_sub(1), total_pages);
    }

    /// Derives the visible page from the full collection
    pub fn view<'a>(&self, ships: &'a [StarshipSummary]) -> ListPage<'a> {
        let filtered = self.query.apply(ships);
        let total_matches = filtered.len();
        let start = (self.page.max(1) - 1) * PAGE_SIZE;
        let items = filtered.into_iter().skip(start).take(PAGE_SIZE).collect();

        ListPage {
            items,
            page: self.page,
            total_pages: total_pages(total_matches),
            total_matches,
        }
    }

    /// Shareable dashboard link for the current filters
    pub fn link(&self) -> String {
        format!("/dashboard?{}", self.query.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(name: &str, manufacturer: &str, crew: &str) -> StarshipSummary {
        StarshipSummary {
            name: name.to_string(),
            model: format!("{} model", name),
            manufacturer: manufacturer.to_string(),
            crew: crew.to_string(),
            url: String::new(),
        }
    }

    fn fleet() -> Vec<StarshipSummary> {
        vec![
            ship("X-wing", "Incom Corporation", "1"),
            ship("Death Star", "Imperial Department of Military Research", "342,953"),
            ship("Millennium Falcon", "Corellian Engineering Corporation", "4"),
            ship("CR90 corvette", "Corellian Engineering Corporation", "30-165"),
            ship("Star Destroyer", "Kuat Drive Yards", "47060"),
            ship("Sentinel-class landing craft", "Sienar Fleet Systems", "5"),
            ship("Y-wing", "Koensayr Manufacturing", "2"),
            ship("TIE Advanced x1", "Sienar Fleet Systems", "1"),
            ship("Executor", "Kuat Drive Yards", "279,144"),
            ship("Rebel transport", "Gallofree Yards", "6"),
            ship("Slave 1", "Kuat Systems Engineering", "1"),
            ship("Imperial shuttle", "Sienar Fleet Systems", "6"),
            ship("EF76 Nebulon-B escort frigate", "Kuat Drive Yards", "854"),
            ship("Calamari Cruiser", "Mon Calamari shipyards", "5400"),
            ship("A-wing", "Alliance Underground Engineering", "1"),
            ship("B-wing", "Slayn & Korpil", "1"),
            ship("Republic Cruiser", "Corellian Engineering Corporation", "9"),
            ship("Droid control ship", "Hoersch-Kessel Drive, Inc.", "175"),
            ship("Naboo fighter", "Theed Palace Space Vessel Engineering Corps", "1"),
            ship("Banking clan frigte", "Hoersch-Kessel Drive, Inc.", "unknown"),
            ship("millennium falcon", "Corellian Engineering Corporation", "4"),
        ]
    }

    fn names<'a>(ships: &[&'a StarshipSummary]) -> Vec<&'a str> {
        ships.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!(SortOrder::from_str("asc"), Some(SortOrder::Ascending));
        assert_eq!(SortOrder::from_str("DESC"), Some(SortOrder::Descending));
        assert_eq!(SortOrder::from_str("sideways"), None);
        assert_eq!(SortOrder::Ascending.toggled(), SortOrder::Descending);
    }

    #[test]
    fn test_locale_cmp_ignores_case_first() {
        assert_eq!(locale_cmp("b-wing", "A-wing"), Ordering::Greater);
        assert_eq!(locale_cmp("Calamari", "banking"), Ordering::Greater);
        assert_eq!(locale_cmp("falcon", "Falcon"), Ordering::Less);
        assert_eq!(locale_cmp("Falcon", "Falcon"), Ordering::Equal);
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let ships = fleet();
        let query = ListQuery {
            search: "WING".to_string(),
            ..Default::default()
        };

        assert_eq!(
            names(&query.apply(&ships)),
            vec!["A-wing", "B-wing", "X-wing", "Y-wing"]
        );
    }

    #[test]
    fn test_manufacturer_is_exact_match() {
        let ships = fleet();
        let query = ListQuery {
            manufacturer: Some("Kuat Drive Yards".to_string()),
            ..Default::default()
        };

        let result = query.apply(&ships);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|s| s.manufacturer == "Kuat Drive Yards"));

        let partial = ListQuery {
            manufacturer: Some("Kuat".to_string()),
            ..Default::default()
        };
        assert!(partial.apply(&ships).is_empty());
    }

    #[test]
    fn test_min_crew_excludes_non_numeric_crew() {
        let ships = fleet();
        let query = ListQuery {
            min_crew: Some(100),
            ..Default::default()
        };

        let result = names(&query.apply(&ships));
        assert_eq!(
            result,
            vec![
                "Calamari Cruiser",
                "Droid control ship",
                "EF76 Nebulon-B escort frigate",
                "Star Destroyer",
            ]
        );
        // "342,953", "30-165" and "unknown" are not plain numbers
        assert!(!result.contains(&"Death Star"));
        assert!(!result.contains(&"CR90 corvette"));
        assert!(!result.contains(&"Banking clan frigte"));
    }

    #[test]
    fn test_descending_reverses_ascending_for_distinct_names() {
        let ships: Vec<StarshipSummary> = fleet()
            .into_iter()
            .filter(|s| s.name != "millennium falcon")
            .collect();
        let mut query = ListQuery::default();

        let ascending = names(&query.apply(&ships));
        query.sort = SortOrder::Descending;
        let mut descending = names(&query.apply(&ships));
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_filtered_view_is_consistent_for_all_pages() {
        let ships = fleet();
        let queries = [
            ListQuery::default(),
            ListQuery {
                search: "e".to_string(),
                sort: SortOrder::Descending,
                ..Default::default()
            },
            ListQuery {
                manufacturer: Some("Sienar Fleet Systems".to_string()),
                min_crew: Some(2),
                ..Default::default()
            },
        ];

        for query in queries {
            let matching = query.apply(&ships);
            let mut state = ListState::new(query.clone());
            let first = state.view(&ships);
            assert!(first.total_pages <= total_pages(matching.len()));

            let mut seen = Vec::new();
            for page in 1..=first.total_pages {
                state.set_page(page, first.total_pages);
                let view = state.view(&ships);
                assert!(view.items.len() <= PAGE_SIZE);
                assert!(view.items.iter().all(|s| query.matches(s)));
                seen.extend(view.items);
            }
            assert_eq!(names(&seen), names(&matching));
        }
    }

    #[test]
    fn test_pagination_slices_ten_rows() {
        let ships = fleet();
        let mut state = ListState::default();

        let first = state.view(&ships);
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_matches, ships.len());

        state.next_page(first.total_pages);
        state.next_page(first.total_pages);
        state.next_page(first.total_pages);
        let last = state.view(&ships);
        assert_eq!(last.page, 3);
        assert_eq!(last.items.len(), 1);

        state.previous_page(last.total_pages);
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let ships = fleet();
        let mut state = ListState::default();
        let total = state.view(&ships).total_pages;

        state.set_page(3, total);
        state.push_search_char('a');
        assert_eq!(state.page(), 1);

        state.set_page(2, total);
        state.toggle_sort();
        assert_eq!(state.page(), 1);

        state.set_page(2, total);
        state.increment_min_crew();
        assert_eq!(state.page(), 1);

        state.set_page(2, total);
        state.set_manufacturer(Some("Kuat Drive Yards".to_string()));
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_setting_same_value_keeps_page() {
        let ships = fleet();
        let mut state = ListState::default();
        let total = state.view(&ships).total_pages;

        state.set_page(2, total);
        state.set_sort(SortOrder::Ascending);
        state.set_search("");
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn test_crew_adjustment_clears_at_zero() {
        let mut state = ListState::default();
        state.increment_min_crew();
        state.increment_min_crew();
        assert_eq!(state.query().min_crew, Some(2));

        state.decrement_min_crew();
        state.decrement_min_crew();
        assert_eq!(state.query().min_crew, None);
    }

    #[test]
    fn test_cycle_manufacturer_wraps_to_none() {
        let options = vec!["Incom".to_string(), "Kuat".to_string()];
        let mut state = ListState::default();

        state.cycle_manufacturer(&options);
        assert_eq!(state.query().manufacturer.as_deref(), Some("Incom"));
        state.cycle_manufacturer(&options);
        assert_eq!(state.query().manufacturer.as_deref(), Some("Kuat"));
        state.cycle_manufacturer(&options);
        assert_eq!(state.query().manufacturer, None);
    }

    #[test]
    fn test_manufacturers_are_distinct_in_first_seen_order() {
        let ships = fleet();
        let list = manufacturers(&ships);

        assert_eq!(list[0], "Incom Corporation");
        assert_eq!(list[1], "Imperial Department of Military Research");
        assert_eq!(list[2], "Corellian Engineering Corporation");
        let unique: HashSet<&String> = list.iter().collect();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn test_query_string_round_trip() {
        let query = ListQuery {
            search: "star destroyer".to_string(),
            manufacturer: Some("Kuat Drive Yards".to_string()),
            min_crew: Some(10),
            sort: SortOrder::Descending,
        };

        let encoded = query.to_query_string();
        assert!(encoded.contains("sort=desc"));
        assert!(encoded.contains("crewSize=10"));
        assert_eq!(ListQuery::from_query_string(&encoded), query);
    }

    #[test]
    fn test_query_string_writes_every_key() {
        assert_eq!(
            ListQuery::default().to_query_string(),
            "search=&sort=asc&manufacturer=&crewSize="
        );
    }

    #[test]
    fn test_lenient_query_string_parsing() {
        let query = ListQuery::from_query_string("?sort=sideways&crewSize=abc&manufacturer=");
        assert_eq!(query, ListQuery::default());

        let query = ListQuery::from_query_string("crewSize=0&search=x%2Dwing");
        assert_eq!(query.min_crew, None);
        assert_eq!(query.search, "x-wing");
    }

    #[test]
    fn test_link_points_at_dashboard() {
        let mut state = ListState::default();
        state.set_search("falcon");
        assert_eq!(
            state.link(),
            "/dashboard?search=falcon&sort=asc&manufacturer=&crewSize="
        );
    }
}
