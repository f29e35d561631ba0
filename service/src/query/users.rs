//! [`Query`] collection related to the multiple [`User`]s.

use std::time::Duration;

use common::operations::By;

#[cfg(doc)]
use crate::{domain::User, Query};
use crate::{read, Latency};

use super::{DatabaseQuery, Latent};

/// Queries a list of [`User`]s.
pub type List =
    DatabaseQuery<By<read::user::list::Page, read::user::list::Selector>>;

impl Latent for By<read::user::list::Page, read::user::list::Selector> {
    fn latency(latency: &Latency) -> Duration {
        latency.list
    }
}
