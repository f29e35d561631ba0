//! [`Fetcher`] of the listing.

use std::future::Future;

use common::operations::{By, Select};
use tracerr::Traced;
use tracing as log;

use crate::transport::{Transport, TransportError};

use super::{Cache, Page, QueryKey, QueryParams, Retry, Status, USERS};

/// Error of fetching a [`Page`].
pub type Error = Traced<TransportError>;

/// Result of a [`Fetcher::request()`], to be [`Fetcher::apply()`]ed.
#[derive(Debug)]
pub struct Response {
    /// [`QueryKey`] the request was issued for.
    pub key: QueryKey,

    /// Fetched [`Page`] or the last error.
    pub result: Result<Page, Error>,
}

/// Fetcher of the listing [`Page`]s, caching them by [`QueryKey`].
#[derive(Debug)]
pub struct Fetcher<T> {
    /// [`Transport`] to fetch with.
    transport: T,

    /// [`Retry`] policy of failed fetches.
    retry: Retry,

    /// Fetched [`Page`]s.
    cache: Cache<Page>,

    /// [`QueryKey`] currently in effect.
    key: QueryKey,

    /// Error of the last fetch of the current [`QueryKey`].
    error: Option<Error>,

    /// Number of pages reported by the last applied [`Page`].
    total_pages: Option<usize>,
}

impl<T> Fetcher<T> {
    /// Creates a new [`Fetcher`] of the provided [`QueryParams`].
    #[must_use]
    pub fn new(transport: T, retry: Retry, params: QueryParams) -> Self {
        Self {
            transport,
            retry,
            cache: Cache::default(),
            key: QueryKey::users(params),
            error: None,
            total_pages: None,
        }
    }

    /// Returns the [`Transport`] of this [`Fetcher`].
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the [`QueryKey`] currently in effect.
    #[must_use]
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Returns the number of pages reported by the last applied [`Page`].
    #[must_use]
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
    }

    /// Switches to the provided [`QueryParams`].
    ///
    /// A change of the [`QueryParams`] invalidates the whole [`USERS`]
    /// family. Returns whether the [`QueryParams`] have changed.
    pub fn set_params(&mut self, params: QueryParams) -> bool {
        if self.key.params == params {
            return false;
        }
        self.key = QueryKey::users(params);
        self.error = None;
        self.invalidate();
        true
    }

    /// Marks all the cached [`Page`]s stale.
    pub fn invalidate(&mut self) {
        self.cache.invalidate(USERS);
    }

    /// Indicates whether a fresh [`Page`] is cached for the current
    /// [`QueryKey`].
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.cache.is_fresh(&self.key)
    }

    /// Returns the [`Status`] of the current [`QueryKey`].
    #[must_use]
    pub fn status(&self) -> Status<'_, Page, Error> {
        let data = self.cache.get(&self.key);
        Status {
            data,
            is_loading: data.is_none() && self.error.is_none(),
            error: self.error.as_ref(),
        }
    }

    /// Applies the provided [`Response`].
    ///
    /// A [`Response`] to a superseded [`QueryKey`] is discarded. Returns
    /// whether the [`Response`] has been applied.
    pub fn apply(&mut self, response: Response) -> bool {
        let Response { key, result } = response;
        if key != self.key {
            log::debug!("discarded response to superseded {key:?}");
            return false;
        }

        match result {
            Ok(page) => {
                self.total_pages = Some(page.total_pages);
                self.cache.insert(key, page);
                self.error = None;
            }
            Err(e) => {
                log::error!("failed to fetch users: {e}");
                self.error = Some(e);
            }
        }
        true
    }
}

impl<T> Fetcher<T>
where
    T: Transport<Select<By<Page, QueryParams>>, Ok = Page, Err = Error>
        + Clone,
{
    /// Requests a [`Page`] of the current [`QueryKey`], retrying according
    /// to the [`Retry`] policy.
    ///
    /// The returned [`Future`] doesn't borrow this [`Fetcher`], so the
    /// [`QueryKey`] may change while it's in flight.
    pub fn request(&self) -> impl Future<Output = Response> {
        let (transport, retry, key) =
            (self.transport.clone(), self.retry, self.key.clone());
        async move {
            let result = retry
                .run(|| transport.execute(Select(By::new(key.params.clone()))))
                .await;
            Response { key, result }
        }
    }

    /// Fetches a [`Page`] of the current [`QueryKey`], unless a fresh one
    /// is cached already.
    ///
    /// Returns whether a fetch has been performed.
    pub async fn fetch(&mut self) -> bool {
        if self.is_fresh() {
            return false;
        }
        let response = self.request().await;
        _ = self.apply(response);
        true
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        filter::{Action, State},
        query::{QueryParams, Retry},
        transport::fake::Fake,
    };

    use super::Fetcher;

    fn params(search: &str) -> QueryParams {
        let mut state = State::default();
        state.apply(Action::CommitDebouncedSearch(search.into()));
        QueryParams::from(&state)
    }

    #[tokio::test]
    async fn fetches_once_while_fresh() {
        let fake = Fake::with_users(45);
        let mut fetcher = Fetcher::new(fake.clone(), Retry::NEVER, params(""));
        assert!(fetcher.status().is_loading);

        assert!(fetcher.fetch().await);
        assert!(!fetcher.fetch().await);

        let status = fetcher.status();
        let page = status.data.unwrap();
        assert!(!status.is_loading);
        assert_eq!(page.users.len(), 20);
        assert_eq!(page.total, 45);
        assert_eq!(fetcher.total_pages(), Some(3));
        assert_eq!(fake.selects().len(), 1);
    }

    #[tokio::test]
    async fn discards_superseded_response() {
        let fake = Fake::with_users(45);
        let mut fetcher = Fetcher::new(fake, Retry::NEVER, params(""));

        let stale = fetcher.request();
        assert!(fetcher.set_params(params("user04")));
        let fresh = fetcher.request();

        let (fresh, stale) = (fresh.await, stale.await);
        assert!(fetcher.apply(fresh));
        assert!(!fetcher.apply(stale));

        assert_eq!(fetcher.status().data.unwrap().total, 6);
    }

    #[tokio::test]
    async fn changed_params_invalidate_family() {
        let fake = Fake::with_users(45);
        let mut fetcher = Fetcher::new(fake.clone(), Retry::NEVER, params(""));
        _ = fetcher.fetch().await;

        assert!(!fetcher.set_params(params("")));
        assert!(fetcher.set_params(params("user")));
        _ = fetcher.fetch().await;
        assert!(fetcher.set_params(params("")));

        // Stale data is still shown, but gets refetched.
        assert!(fetcher.status().data.is_some());
        assert!(!fetcher.is_fresh());
        assert!(fetcher.fetch().await);
        assert_eq!(fake.selects().len(), 3);
    }

    #[tokio::test]
    async fn keeps_last_error() {
        let fake = Fake::with_users(45);
        fake.fail_next(1);
        let mut fetcher = Fetcher::new(fake, Retry::NEVER, params(""));

        _ = fetcher.fetch().await;
        let status = fetcher.status();
        assert!(status.data.is_none());
        assert!(!status.is_loading);
        assert_eq!(status.error.unwrap().as_ref().status(), Some(500));

        fetcher.invalidate();
        _ = fetcher.fetch().await;
        assert!(fetcher.status().error.is_none());
        assert!(fetcher.status().data.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn retries_before_failing() {
        let fake = Fake::with_users(5);
        fake.fail_next(2);
        let mut fetcher =
            Fetcher::new(fake.clone(), Retry::default(), params(""));

        _ = fetcher.fetch().await;

        assert!(fetcher.status().error.is_none());
        assert_eq!(fetcher.status().data.unwrap().total, 5);
        assert_eq!(fake.selects().len(), 3);
    }
}
