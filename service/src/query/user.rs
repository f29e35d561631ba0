//! [`Query`] collection related to a single [`User`].

use std::time::Duration;

use common::operations::By;

use crate::{
    domain::{user, User},
    Latency,
};
#[cfg(doc)]
use crate::Query;

use super::{DatabaseQuery, Latent};

/// Queries a [`User`] by its [`user::Id`].
pub type ById = DatabaseQuery<By<Option<User>, user::Id>>;

impl Latent for By<Option<User>, user::Id> {
    fn latency(latency: &Latency) -> Duration {
        latency.read
    }
}
