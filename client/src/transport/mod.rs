//! [`Transport`] of the listing to the HTTP API.

#[cfg(test)]
pub(crate) mod fake;
pub mod http;

use derive_more::{Display, Error};
#[cfg(doc)]
use service::domain::User;
use service::domain::user;

pub use self::http::Http;

/// Call to the HTTP API.
pub use common::Handler as Transport;

/// Operation payload refreshing a [`User`]'s data.
#[derive(Clone, Debug)]
pub struct Refresh {
    /// ID of the [`User`] to refresh.
    pub user_id: user::Id,
}

/// [`Transport`] error.
#[derive(Debug, Display, Error)]
pub enum TransportError {
    /// HTTP API responded with a non-successful status code.
    #[display("HTTP API responded with `{_0}` status")]
    Status(#[error(not(source))] u16),

    /// Request failed to be performed or its response to be decoded.
    #[display("request failed: {_0}")]
    Request(reqwest::Error),
}

impl TransportError {
    /// Returns the HTTP status code of the response, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
        }
    }
}
