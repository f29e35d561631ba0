//! [`Command`] for refreshing a [`User`]'s data.

use std::convert::Infallible;

use derive_more::From;
use tracing as log;

#[cfg(doc)]
use crate::domain::User;
use crate::{
    domain::user::{self, RefreshDateTime},
    Service,
};

use super::Command;

/// [`Command`] for refreshing a [`User`]'s data.
///
/// Only touches the [`User`] by its ID, without looking it up, so it never
/// fails.
#[derive(Clone, Debug, From)]
pub struct RefreshUser {
    /// ID of the [`User`] to be refreshed.
    pub user_id: user::Id,
}

/// Output of [`RefreshUser`] [`Command`].
#[derive(Clone, Debug)]
pub struct Refreshed {
    /// ID of the refreshed [`User`].
    pub user_id: user::Id,

    /// [`RefreshDateTime`] of the refresh.
    pub timestamp: RefreshDateTime,
}

impl<Db> Command<RefreshUser> for Service<Db> {
    type Ok = Refreshed;
    type Err = Infallible;

    async fn execute(&self, cmd: RefreshUser) -> Result<Self::Ok, Self::Err> {
        let RefreshUser { user_id } = cmd;

        self.emulate_latency(|l| l.write).await;

        log::debug!("refreshed `User(id: {user_id})`");

        Ok(Refreshed {
            user_id,
            timestamp: RefreshDateTime::now(),
        })
    }
}
