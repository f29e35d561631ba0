//! In-memory [`Database`] implementation.

mod impls;
#[cfg(feature = "mock")]
pub mod mock;

use std::sync::Arc;

use derive_more::{Display, Error as StdError};
use tokio::sync::RwLock;

use crate::domain::{user, User};
#[cfg(doc)]
use crate::infra::Database;

/// In-memory [`Database`] owning an ordered collection of [`User`]s.
///
/// Cloning a [`Memory`] produces a new handle to the same collection.
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// Shared [`State`] of this [`Memory`].
    state: Arc<RwLock<State>>,
}

/// Contents of a [`Memory`] database.
#[derive(Debug, Default)]
struct State {
    /// [`User`]s in their insertion order.
    users: Vec<User>,

    /// Last allocated [`user::Id`] sequence number.
    last_id: u64,
}

impl Memory {
    /// Creates a new [`Memory`] database holding the provided [`User`]s in
    /// the provided order.
    #[must_use]
    pub fn new(users: impl IntoIterator<Item = User>) -> Self {
        let users = users.into_iter().collect::<Vec<_>>();
        let last_id = users
            .iter()
            .filter_map(|u| u.id.number())
            .max()
            .unwrap_or_default();
        Self {
            state: Arc::new(RwLock::new(State { users, last_id })),
        }
    }

    /// Returns the number of [`User`]s stored in this [`Memory`].
    pub async fn len(&self) -> usize {
        self.state.read().await.users.len()
    }

    /// Indicates whether this [`Memory`] stores no [`User`]s.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// [`Memory`] database error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// [`User`] with the same [`user::Id`] is already stored.
    #[display("`User(id: {_0})` already exists")]
    Duplicate(#[error(not(source))] user::Id),

    /// [`User`] with the [`user::Id`] is not stored.
    #[display("`User(id: {_0})` does not exist")]
    Missing(#[error(not(source))] user::Id),
}
