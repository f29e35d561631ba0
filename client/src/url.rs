//! Mirroring of the filter [`State`] into the location query string.

use std::fmt;

use crate::filter::{Action, PageSize, SortBy, State};

/// Path of the listing view.
pub const LISTING_PATH: &str = "/users";

/// Query keys owned by the [`Synchronizer`], in their canonical order.
const KEYS: [&str; 5] = ["search", "sortBy", "desc", "limit", "page"];

/// Browser-visible location: a path and a query string.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    /// Path of this [`Location`].
    path: String,

    /// Query string of this [`Location`], without the leading `?`.
    query: String,
}

impl Location {
    /// Creates a new [`Location`] out of the provided `path` and `query`.
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// Parses a [`Location`] out of the provided `href`.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let (path, query) = href.split_once('?').unwrap_or((href, ""));
        Self::new(path, query)
    }

    /// Returns the path of this [`Location`].
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query string of this [`Location`].
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Decodes the provided query string into key-value pairs.
///
/// Undecodable query strings are treated as empty.
fn decode(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str(query).unwrap_or_default()
}

/// Encodes the provided key-value pairs into a query string.
fn encode(pairs: &[(String, String)]) -> String {
    serde_urlencoded::to_string(pairs).unwrap_or_default()
}

impl State {
    /// Seeds a new [`State`] from the provided query string.
    ///
    /// Only recognized, well-typed values are taken, the rest falls back to
    /// defaults. The search is seeded both raw and committed.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        let pairs = decode(query);
        let get = |key: &str| {
            pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
        };

        let mut state = Self::default();
        if let Some(search) = get("search") {
            state.apply(Action::SetSearch(search.to_owned()));
            state.apply(Action::CommitDebouncedSearch(search.to_owned()));
        }
        if let Some(by) = get("sortBy").and_then(|v| v.parse::<SortBy>().ok())
        {
            state.apply(Action::SetSortBy(by));
        }
        if let Some(desc) = get("desc").and_then(|v| v.parse::<bool>().ok()) {
            state.apply(Action::SetDesc(desc));
        }
        if let Some(size) =
            get("limit").and_then(|v| v.parse::<PageSize>().ok())
        {
            state.apply(Action::SetPageSize(size));
        }
        if let Some(page) = get("page")
            .and_then(|v| v.parse::<usize>().ok())
            .filter(|p| *p > 0)
        {
            state.apply(Action::SetCurrentPage(page));
        }
        state
    }

    /// Returns the values of the owned query keys differing from defaults,
    /// in the canonical order.
    fn query_values(&self) -> [Option<String>; KEYS.len()] {
        let default = Self::default();
        [
            (self.debounced_search() != default.debounced_search())
                .then(|| self.debounced_search().to_owned()),
            (self.sort_by() != default.sort_by())
                .then(|| self.sort_by().to_string()),
            (self.desc() != default.desc()).then(|| self.desc().to_string()),
            (self.page_size() != default.page_size())
                .then(|| self.page_size().to_string()),
            (self.current_page() != default.current_page())
                .then(|| self.current_page().to_string()),
        ]
    }

    /// Serializes this [`State`] into a query string, omitting the
    /// default-valued keys.
    #[must_use]
    pub fn to_query(&self) -> String {
        let pairs = KEYS
            .into_iter()
            .zip(self.query_values())
            .filter_map(|(k, v)| Some((k.to_owned(), v?)))
            .collect::<Vec<_>>();
        encode(&pairs)
    }
}

/// Keeps the [`Location`] consistent with the filter [`State`].
///
/// Navigations always replace the current history entry, never push a new
/// one.
#[derive(Clone, Debug)]
pub struct Synchronizer {
    /// Current [`Location`].
    location: Location,
}

impl Synchronizer {
    /// Creates a new [`Synchronizer`] starting at the provided [`Location`].
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self { location }
    }

    /// Returns the current [`Location`].
    #[must_use]
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Replaces the current [`Location`].
    pub fn replace(&mut self, location: Location) {
        self.location = location;
    }

    /// Rewrites the current [`Location`] to reflect the provided [`State`].
    ///
    /// Query keys not owned by the [`Synchronizer`] are kept in place. An
    /// owned key replaces its first occurrence, dropping the later ones, or
    /// is appended if absent. Default-valued owned keys are removed.
    ///
    /// Returns the new [`Location`] if the query string has changed, or
    /// [`None`] otherwise.
    pub fn sync(&mut self, state: &State) -> Option<&Location> {
        let current = decode(&self.location.query);

        let mut pairs = current.clone();
        for (key, value) in KEYS.into_iter().zip(state.query_values()) {
            match value {
                Some(value) => {
                    if let Some(i) = pairs.iter().position(|(k, _)| k == key) {
                        pairs[i].1 = value;
                        let mut seen = 0;
                        pairs.retain(|(k, _)| {
                            if k != key {
                                return true;
                            }
                            seen += 1;
                            seen == 1
                        });
                    } else {
                        pairs.push((key.to_owned(), value));
                    }
                }
                None => pairs.retain(|(k, _)| k != key),
            }
        }

        let query = encode(&pairs);
        if query == encode(&current) {
            return None;
        }

        self.location.query = query;
        Some(&self.location)
    }
}
