//! [`Command`] for updating an existing [`User`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::{Email, Plan, Role};
use crate::{
    domain::{user, User},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for updating an existing [`User`].
///
/// Absent fields keep their current values.
#[derive(Clone, Debug)]
pub struct UpdateUser {
    /// ID of the [`User`] to be updated.
    pub user_id: user::Id,

    /// New [`Email`] of the [`User`].
    pub email: Option<user::Email>,

    /// New [`Role`] of the [`User`].
    pub role: Option<user::Role>,

    /// New [`Plan`] of the [`User`].
    ///
    /// `Some(None)` indicates [`Plan`] removal.
    pub plan: Option<Option<user::Plan>>,
}

impl<Db> Command<UpdateUser> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<Update<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UpdateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateUser {
            user_id,
            email,
            role,
            plan,
        } = cmd;

        self.emulate_latency(|l| l.write).await;

        let mut user = self
            .database()
            .execute(Select(By::<Option<User>, _>::new(user_id.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())?;

        if let Some(email) = email {
            user.email = email;
        }
        if let Some(role) = role {
            user.role = role;
        }
        if let Some(plan) = plan {
            user.plan = plan;
        }

        self.database()
            .execute(Update(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!("updated `User(id: {})`", user.id);

        Ok(user)
    }
}

/// Error of [`UpdateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`User`] doesn't exist.
    #[display("`User(id: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Id),
}
