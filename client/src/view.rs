//! Headless users listing view.

use std::future::Future;

use common::operations::{By, Delete, Perform, Select};
use service::domain::{
    user::{self, Role},
    User,
};
use tracing as log;

use crate::{
    debounce::{Debounce, SEARCH_DEBOUNCE},
    filter::{Action, PageSize, SortBy, State},
    query::{
        fetcher::{Error, Response},
        Fetcher, Page, QueryParams, Retry, Status,
    },
    transport::{Refresh, Transport},
    url::{Location, Synchronizer, LISTING_PATH},
};

/// Users listing view: filter [`State`] driving the [`Location`] and the
/// fetched [`Page`]s.
///
/// Every mutation of the [`State`] is mirrored into the [`Location`] and
/// switches the [`Fetcher`] to the new [`QueryParams`] synchronously, in the
/// order dispatched. Fetching is driven explicitly via [`Listing::load()`].
#[derive(Debug)]
pub struct Listing<T> {
    /// Current filter selections.
    state: State,

    /// [`Debounce`] of the search input.
    debounce: Debounce<String>,

    /// [`Synchronizer`] of the [`Location`].
    url: Synchronizer,

    /// [`Fetcher`] of the listing [`Page`]s.
    fetcher: Fetcher<T>,
}

impl<T> Listing<T> {
    /// Mounts a new [`Listing`] at the provided [`Location`], seeding its
    /// [`State`] from the query string.
    #[must_use]
    pub fn mount(transport: T, location: Location) -> Self {
        Self::with_retry(transport, location, Retry::default())
    }

    /// Mounts a new [`Listing`] using the provided [`Retry`] policy.
    #[must_use]
    pub fn with_retry(transport: T, location: Location, retry: Retry) -> Self {
        let state = State::from_query(location.query());
        let fetcher = Fetcher::new(transport, retry, QueryParams::from(&state));
        let mut listing = Self {
            state,
            debounce: Debounce::new(SEARCH_DEBOUNCE),
            url: Synchronizer::new(location),
            fetcher,
        };
        listing.settle();
        listing
    }

    /// Returns the current filter [`State`].
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Returns the current [`Location`].
    #[must_use]
    pub fn location(&self) -> &Location {
        self.url.location()
    }

    /// Returns the [`Status`] of the current query.
    #[must_use]
    pub fn status(&self) -> Status<'_, Page, Error> {
        self.fetcher.status()
    }

    /// Classifies the [`Status`] of the current query for rendering.
    #[must_use]
    pub fn outcome(&self) -> Outcome<'_> {
        let status = self.status();
        if status.is_loading {
            return Outcome::Loading;
        }
        if let Some(e) = status.error {
            return Outcome::Failed(ErrorKind::of(e));
        }
        match status.data {
            None => Outcome::Loading,
            Some(page) if page.users.is_empty() => Outcome::Empty,
            Some(page) => Outcome::Ready(page),
        }
    }

    /// Dispatches the provided [`Action`].
    ///
    /// [`Action::SetSearch`] (re)starts the search [`Debounce`] as well, while
    /// [`Action::Reset`] cancels it. [`Action::CommitDebouncedSearch`] is
    /// ignored, since only the [`Debounce`] commits the search, via
    /// [`Listing::next_commit()`].
    ///
    /// Must be called within a [`tokio`] runtime.
    pub fn dispatch(&mut self, action: Action) {
        match &action {
            Action::SetSearch(search) => self.debounce.schedule(search.clone()),
            Action::Reset => self.debounce.cancel(),
            Action::CommitDebouncedSearch(search) => {
                log::warn!("ignored dispatched commit of search `{search}`");
                return;
            }
            Action::SetSortBy(_)
            | Action::SetDesc(_)
            | Action::SetPageSize(_)
            | Action::SetCurrentPage(_) => {}
        }
        self.perform(action);
    }

    /// Sets the raw search input.
    pub fn search(&mut self, input: impl Into<String>) {
        self.dispatch(Action::SetSearch(input.into()));
    }

    /// Clears the search input, through the [`Debounce`] as typing would.
    pub fn clear_search(&mut self) {
        self.search("");
    }

    /// Sets the field to sort by.
    pub fn sort_by(&mut self, by: SortBy) {
        self.dispatch(Action::SetSortBy(by));
    }

    /// Flips the sorting direction.
    pub fn sort_toggle(&mut self) {
        self.dispatch(Action::SetDesc(!self.state.desc()));
    }

    /// Sets the [`PageSize`].
    pub fn page_size(&mut self, size: PageSize) {
        self.dispatch(Action::SetPageSize(size));
    }

    /// Goes to the previous page, if any.
    pub fn previous_page(&mut self) {
        let page = self.state.current_page();
        if page > 1 {
            self.dispatch(Action::SetCurrentPage(page - 1));
        }
    }

    /// Goes to the next page, unless the last known page is reached.
    ///
    /// Does nothing until a [`Page`] is fetched.
    pub fn next_page(&mut self) {
        let page = self.state.current_page();
        if self.fetcher.total_pages().is_some_and(|total| page < total) {
            self.dispatch(Action::SetCurrentPage(page + 1));
        }
    }

    /// Resets all the filters to defaults at once, dropping the pending
    /// search and navigating to the bare listing [`Location`].
    pub fn reset_filters(&mut self) {
        self.url.replace(Location::new(LISTING_PATH, ""));
        self.dispatch(Action::Reset);
        self.fetcher.invalidate();
    }

    /// Waits for the pending search to be committed.
    ///
    /// Returns `false` immediately if no search is pending.
    pub async fn next_commit(&mut self) -> bool {
        let Some(search) = self.debounce.fired().await else {
            return false;
        };
        self.perform(Action::CommitDebouncedSearch(search));
        true
    }

    /// Applies the provided [`Response`], discarding a superseded one.
    ///
    /// Returns whether the [`Response`] has been applied.
    pub fn apply(&mut self, response: Response) -> bool {
        self.fetcher.apply(response)
    }

    /// Unmounts this [`Listing`], cancelling the pending search.
    pub fn unmount(mut self) {
        self.debounce.cancel();
    }

    /// Applies the provided [`Action`] to the [`State`] and settles it.
    fn perform(&mut self, action: Action) {
        self.state.apply(action);
        self.settle();
    }

    /// Mirrors the [`State`] into the [`Location`] and the [`Fetcher`].
    fn settle(&mut self) {
        if let Some(location) = self.url.sync(&self.state) {
            log::debug!("replaced location with `{location}`");
        }
        _ = self.fetcher.set_params(QueryParams::from(&self.state));
    }
}

impl<T> Listing<T>
where
    T: Transport<Select<By<Page, QueryParams>>, Ok = Page, Err = Error>
        + Transport<Perform<Refresh>, Ok = (), Err = Error>
        + Transport<Delete<By<(), user::Id>>, Ok = (), Err = Error>
        + Clone,
{
    /// Loads the current query, unless a fresh [`Page`] is cached.
    ///
    /// Returns whether a fetch has been performed.
    pub async fn load(&mut self) -> bool {
        self.fetcher.fetch().await
    }

    /// Requests the current query without applying it.
    ///
    /// See [`Fetcher::request()`].
    pub fn request(&self) -> impl Future<Output = Response> {
        self.fetcher.request()
    }

    /// Refetches the current query.
    pub async fn reload(&mut self) {
        self.fetcher.invalidate();
        _ = self.load().await;
    }

    /// Refetches the current query once the application regains focus.
    pub async fn focus(&mut self) {
        self.reload().await;
    }

    /// Performs the provided [`Recovery`].
    pub async fn recover(&mut self, recovery: Recovery) {
        match recovery {
            Recovery::ClearSearch => self.clear_search(),
            Recovery::Retry => self.reload().await,
            Recovery::ResetFilters => {
                self.reset_filters();
                _ = self.load().await;
            }
        }
    }

    /// Refreshes the data of the [`User`] with the provided ID.
    ///
    /// Reloads the listing on success. A failure is logged and leaves the
    /// listing as is. Returns whether the refresh succeeded.
    pub async fn refresh_user(&mut self, user_id: user::Id) -> bool {
        let result = self
            .fetcher
            .transport()
            .execute(Perform(Refresh {
                user_id: user_id.clone(),
            }))
            .await;
        self.settle_mutation(result, "refresh", &user_id).await
    }

    /// Deletes the [`User`] with the provided ID.
    ///
    /// Reloads the listing on success. A failure is logged and leaves the
    /// listing as is. Returns whether the deletion succeeded.
    pub async fn delete_user(&mut self, user_id: user::Id) -> bool {
        let result = self
            .fetcher
            .transport()
            .execute(Delete(By::new(user_id.clone())))
            .await;
        self.settle_mutation(result, "delete", &user_id).await
    }

    /// Reloads the listing after a successful mutation, or logs its error.
    async fn settle_mutation(
        &mut self,
        result: Result<(), Error>,
        op: &str,
        user_id: &user::Id,
    ) -> bool {
        match result {
            Ok(()) => {
                self.reload().await;
                true
            }
            Err(e) => {
                log::error!("failed to {op} user `{user_id}`: {e}");
                false
            }
        }
    }
}

/// Indicates whether the provided [`User`] may be edited from the listing.
#[must_use]
pub fn can_edit(user: &User) -> bool {
    user.role != Role::Admin
}

/// Renderable outcome of the current query.
#[derive(Clone, Copy, Debug)]
pub enum Outcome<'a> {
    /// Nothing fetched yet.
    Loading,

    /// Fetching failed.
    Failed(ErrorKind),

    /// No [`User`]s match the filters.
    ///
    /// Offers [`Recovery::ResetFilters`].
    Empty,

    /// [`Page`] to render.
    Ready(&'a Page),
}

/// Kind of a fetching failure.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    /// HTTP API responded with `404`.
    NotFound,

    /// HTTP API responded with a `5xx` status.
    Server,

    /// Any other failure.
    Generic,
}

impl ErrorKind {
    /// Classifies the provided [`Error`].
    #[must_use]
    pub fn of(e: &Error) -> Self {
        match e.as_ref().status() {
            Some(404) => Self::NotFound,
            Some(500..=599) => Self::Server,
            _ => Self::Generic,
        }
    }

    /// Returns the [`Recovery`] offered for this [`ErrorKind`].
    #[must_use]
    pub fn recovery(self) -> Recovery {
        match self {
            Self::NotFound => Recovery::ClearSearch,
            Self::Server | Self::Generic => Recovery::Retry,
        }
    }
}

/// Recovery action offered to the user.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Recovery {
    /// Clear the search.
    ClearSearch,

    /// Refetch the current query.
    Retry,

    /// Reset all the filters.
    ResetFilters,
}
