//! HTTP [`Transport`] implementation.

use common::operations::{By, Delete, Perform, Select};
use serde::Deserialize;
use service::domain::{user, User};
use tracerr::Traced;

use crate::query::{Page, QueryParams};

use super::{Refresh, Transport, TransportError};

/// [`Transport`] over HTTP.
///
/// Cloning an [`Http`] shares the underlying connection pool.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying HTTP client.
    client: reqwest::Client,

    /// Base URL of the HTTP API, without a trailing `/`.
    base: String,
}

impl Http {
    /// Creates a new [`Http`] transport to the HTTP API at the provided
    /// `base` URL.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base)
    }

    /// Creates a new [`Http`] transport using the provided
    /// [`reqwest::Client`].
    #[must_use]
    pub fn with_client(client: reqwest::Client, base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            _ = base.pop();
        }
        Self { client, base }
    }

    /// Returns the URL of the provided [`User`].
    fn user_url(&self, id: &user::Id) -> String {
        format!("{}/api/users/{id}", self.base)
    }

    /// Sends the provided request, failing on a non-successful status.
    async fn send(
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, Traced<TransportError>> {
        let response = request
            .send()
            .await
            .map_err(TransportError::Request)
            .map_err(tracerr::wrap!())?;
        if !response.status().is_success() {
            return Err(tracerr::new!(TransportError::Status(
                response.status().as_u16()
            )));
        }
        Ok(response)
    }
}

/// Listing as returned by the HTTP API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Listing {
    /// [`User`]s on the page.
    data: Vec<User>,

    /// Total number of matching [`User`]s.
    total: usize,

    /// 1-based number of the page.
    page: usize,

    /// Total number of pages.
    total_pages: usize,
}

impl From<Listing> for Page {
    fn from(listing: Listing) -> Self {
        Self {
            users: listing.data,
            total: listing.total,
            total_pages: listing.total_pages,
            current_page: listing.page,
        }
    }
}

impl Transport<Select<By<Page, QueryParams>>> for Http {
    type Ok = Page;
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Select(by): Select<By<Page, QueryParams>>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = self
            .client
            .get(format!("{}/api/users", self.base))
            .query(by.inner());

        Self::send(request)
            .await?
            .json::<Listing>()
            .await
            .map(Into::into)
            .map_err(TransportError::Request)
            .map_err(tracerr::wrap!())
    }
}

impl Transport<Select<By<Option<User>, user::Id>>> for Http {
    type Ok = Option<User>;
    type Err = Traced<TransportError>;

    /// Responds with [`None`] if the HTTP API doesn't know the [`User`].
    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let response =
            match Self::send(self.client.get(self.user_url(by.inner()))).await {
                Ok(resp) => resp,
                Err(e) if e.as_ref().status() == Some(404) => return Ok(None),
                Err(e) => return Err(e),
            };

        response
            .json::<User>()
            .await
            .map(Some)
            .map_err(TransportError::Request)
            .map_err(tracerr::wrap!())
    }
}

impl Transport<Perform<Refresh>> for Http {
    type Ok = ();
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Perform(Refresh { user_id }): Perform<Refresh>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = format!("{}/refresh", self.user_url(&user_id));
        Self::send(self.client.post(url)).await.map(drop)
    }
}

impl Transport<Delete<By<(), user::Id>>> for Http {
    type Ok = ();
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Delete(by): Delete<By<(), user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        Self::send(self.client.delete(self.user_url(by.inner())))
            .await
            .map(drop)
    }
}
