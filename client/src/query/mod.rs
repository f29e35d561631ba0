//! Fetching of the listing through a cache.

pub mod cache;
pub mod detail;
pub mod fetcher;
pub mod retry;

use serde::Serialize;
use service::domain::{user, User};

use crate::filter::{PageSize, SortBy, State};

pub use self::{
    cache::Cache, detail::Detail, fetcher::Fetcher, retry::Retry,
};

/// Resource family of the listing queries.
pub const USERS: &str = "users";

/// Resource family of the single [`User`] queries.
pub const USER: &str = "user";

/// Parameters fully determining a single listing result.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParams {
    /// Number of [`User`]s on a page.
    pub limit: PageSize,

    /// Committed search.
    pub search: String,

    /// Field to sort by.
    pub sort_by: SortBy,

    /// Whether sorting is descending.
    pub desc: bool,

    /// 1-based page number.
    pub page: usize,
}

impl From<&State> for QueryParams {
    fn from(state: &State) -> Self {
        Self {
            limit: state.page_size(),
            search: state.debounced_search().to_owned(),
            sort_by: state.sort_by(),
            desc: state.desc(),
            page: state.current_page(),
        }
    }
}

/// Key of a cached query: its resource family and parameters.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct QueryKey<P = QueryParams> {
    /// Resource family the query belongs to.
    pub family: &'static str,

    /// Parameters of the query.
    pub params: P,
}

impl QueryKey {
    /// Creates a new [`QueryKey`] of the [`USERS`] family.
    #[must_use]
    pub fn users(params: QueryParams) -> Self {
        Self {
            family: USERS,
            params,
        }
    }
}

impl QueryKey<user::Id> {
    /// Creates a new [`QueryKey`] of the [`USER`] family.
    #[must_use]
    pub fn user(id: user::Id) -> Self {
        Self {
            family: USER,
            params: id,
        }
    }
}

/// Page of the listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Page {
    /// [`User`]s on this [`Page`].
    pub users: Vec<User>,

    /// Total number of [`User`]s matching the search.
    pub total: usize,

    /// Total number of pages.
    pub total_pages: usize,

    /// 1-based number of this [`Page`].
    pub current_page: usize,
}

/// Status of the current query.
#[derive(Clone, Copy, Debug)]
pub struct Status<'a, D, E> {
    /// Last fetched data of the current query, if any.
    ///
    /// May be stale.
    pub data: Option<&'a D>,

    /// Whether the current query has neither data nor error yet.
    pub is_loading: bool,

    /// Error of the last fetch of the current query, if it failed.
    pub error: Option<&'a E>,
}
