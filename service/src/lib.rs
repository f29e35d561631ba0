//! Service contains the business logic of the users listing.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod query;
pub mod read;

use std::time::Duration;

// Used in tests only.
#[cfg(all(test, not(feature = "mock")))]
use rand as _;
#[cfg(test)]
use serde_json as _;

#[cfg(doc)]
use infra::Database;

pub use self::{command::Command, query::Query};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Config {
    /// Artificial [`Latency`] of the [`Service`] operations.
    pub latency: Latency,
}

/// Artificial latency added to [`Service`] operations, imitating a remote
/// API.
///
/// Zero durations disable the latency.
#[derive(Clone, Copy, Debug, Default)]
pub struct Latency {
    /// Latency of [`query::users::List`].
    pub list: Duration,

    /// Latency of single [`User`] reads.
    ///
    /// [`User`]: domain::User
    pub read: Duration,

    /// Latency of [`Command`]s.
    pub write: Duration,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,
}

impl<Db> Service<Db> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db) -> Self {
        Self { config, database }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Waits for the [`Latency`] duration selected by the provided function.
    pub(crate) async fn emulate_latency(&self, of: fn(&Latency) -> Duration) {
        let duration = of(&self.config.latency);
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
