//! [`Detail`] of a single [`User`].

use common::operations::{By, Select};
use service::domain::{user, User};
use tracing as log;

use crate::transport::Transport;

use super::{fetcher::Error, Cache, QueryKey, Retry, Status};

/// Fetcher of a single [`User`], caching it under the [`USER`] family.
///
/// The [`USER`] family is separate from the listing's [`USERS`] one, so
/// invalidating the listing leaves the cached [`User`] fresh.
///
/// [`USER`]: super::USER
/// [`USERS`]: super::USERS
#[derive(Debug)]
pub struct Detail<T> {
    /// [`Transport`] to fetch with.
    transport: T,

    /// [`Retry`] policy of failed fetches.
    retry: Retry,

    /// Fetched [`User`], or [`None`] if it doesn't exist.
    cache: Cache<Option<User>, user::Id>,

    /// [`QueryKey`] of the [`User`].
    key: QueryKey<user::Id>,

    /// Error of the last fetch.
    error: Option<Error>,
}

impl<T> Detail<T> {
    /// Creates a new [`Detail`] of the [`User`] with the provided ID.
    #[must_use]
    pub fn new(transport: T, retry: Retry, user_id: user::Id) -> Self {
        Self {
            transport,
            retry,
            cache: Cache::default(),
            key: QueryKey::user(user_id),
            error: None,
        }
    }

    /// Returns the ID of the [`User`].
    #[must_use]
    pub fn user_id(&self) -> &user::Id {
        &self.key.params
    }

    /// Marks the cached [`User`] stale, if it belongs to the provided
    /// resource `family`.
    pub fn invalidate(&mut self, family: &str) {
        self.cache.invalidate(family);
    }

    /// Indicates whether the [`User`] is cached and not stale.
    #[must_use]
    pub fn is_fresh(&self) -> bool {
        self.cache.is_fresh(&self.key)
    }

    /// Returns the [`Status`] of the [`User`] query.
    #[must_use]
    pub fn status(&self) -> Status<'_, Option<User>, Error> {
        let data = self.cache.get(&self.key);
        Status {
            data,
            is_loading: data.is_none() && self.error.is_none(),
            error: self.error.as_ref(),
        }
    }

    /// Classifies the [`Status`] of the [`User`] query for rendering.
    #[must_use]
    pub fn outcome(&self) -> Lookup<'_> {
        let status = self.status();
        if let Some(e) = status.error {
            return Lookup::Failed(e);
        }
        match status.data {
            None => Lookup::Loading,
            Some(None) => Lookup::NotFound,
            Some(Some(user)) => Lookup::Found(user),
        }
    }
}

impl<T> Detail<T>
where
    T: Transport<
        Select<By<Option<User>, user::Id>>,
        Ok = Option<User>,
        Err = Error,
    >,
{
    /// Fetches the [`User`], unless a fresh one is cached already.
    ///
    /// Returns whether a fetch has been performed.
    pub async fn fetch(&mut self) -> bool {
        if self.is_fresh() {
            return false;
        }

        let (transport, id) = (&self.transport, &self.key.params);
        let result = self
            .retry
            .run(|| transport.execute(Select(By::new(id.clone()))))
            .await;

        match result {
            Ok(user) => {
                self.cache.insert(self.key.clone(), user);
                self.error = None;
            }
            Err(e) => {
                log::error!("failed to fetch user `{id}`: {e}");
                self.error = Some(e);
            }
        }
        true
    }
}

/// Renderable outcome of a [`User`] query.
#[derive(Clone, Copy, Debug)]
pub enum Lookup<'a> {
    /// Nothing fetched yet.
    Loading,

    /// Fetching failed.
    Failed(&'a Error),

    /// [`User`] doesn't exist.
    NotFound,

    /// [`User`] to render.
    Found(&'a User),
}

#[cfg(test)]
mod spec {
    use service::domain::user;

    use crate::{
        query::{Retry, USER, USERS},
        transport::fake::Fake,
    };

    use super::{Detail, Lookup};

    #[tokio::test]
    async fn fetches_once_while_fresh() {
        let fake = Fake::with_users(5);
        let mut detail =
            Detail::new(fake.clone(), Retry::NEVER, user::Id::from("3"));
        assert!(matches!(detail.outcome(), Lookup::Loading));

        assert!(detail.fetch().await);
        assert!(!detail.fetch().await);

        let Lookup::Found(user) = detail.outcome() else {
            panic!("expected user");
        };
        assert_eq!(user.email.as_ref(), "user003@test.com");
        assert_eq!(fake.lookups(), [user::Id::from("3")]);
    }

    #[tokio::test]
    async fn survives_listing_invalidation() {
        let fake = Fake::with_users(5);
        let mut detail =
            Detail::new(fake.clone(), Retry::NEVER, user::Id::from("2"));
        _ = detail.fetch().await;

        detail.invalidate(USERS);
        assert!(detail.is_fresh());
        assert!(!detail.fetch().await);

        detail.invalidate(USER);
        assert!(!detail.is_fresh());
        // Stale data is still shown, but gets refetched.
        assert!(matches!(detail.outcome(), Lookup::Found(_)));
        assert!(detail.fetch().await);
        assert_eq!(fake.lookups().len(), 2);
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let fake = Fake::with_users(5);
        let mut detail = Detail::new(fake, Retry::NEVER, user::Id::from("404"));

        _ = detail.fetch().await;

        assert!(matches!(detail.outcome(), Lookup::NotFound));
        assert!(detail.status().error.is_none());
        assert_eq!(detail.user_id(), &user::Id::from("404"));
    }

    #[tokio::test]
    async fn keeps_last_error() {
        let fake = Fake::with_users(5);
        fake.fail_next(1);
        let mut detail = Detail::new(fake, Retry::NEVER, user::Id::from("1"));

        _ = detail.fetch().await;
        let Lookup::Failed(e) = detail.outcome() else {
            panic!("expected failure");
        };
        assert_eq!(e.as_ref().status(), Some(500));

        assert!(detail.fetch().await);
        assert!(matches!(detail.outcome(), Lookup::Found(_)));
    }
}
