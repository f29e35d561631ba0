//! [`Command`] for creating a new [`User`].

use common::operations::{Insert, Next};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::user::Email;
use crate::{
    domain::{
        user::{self, CreationDateTime, Role},
        User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`User`].
///
/// A new [`User`] is a [`Role::Viewer`] without a plan, appended to the end
/// of the insertion order.
#[derive(Clone, Debug)]
pub struct CreateUser {
    /// [`Email`] of a new [`User`].
    ///
    /// [`None`] is rejected with [`ExecutionError::EmailRequired`].
    pub email: Option<user::Email>,
}

impl<Db> Command<CreateUser> for Service<Db>
where
    Db: Database<Next<user::Id>, Ok = user::Id, Err = Traced<database::Error>>
        + Database<Insert<User>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = User;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateUser { email } = cmd;
        let email = email
            .ok_or(E::EmailRequired)
            .map_err(tracerr::wrap!())?;

        self.emulate_latency(|l| l.write).await;

        let id = self
            .database()
            .execute(Next::<user::Id>::default())
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let user = User {
            id,
            email,
            role: Role::Viewer,
            created_at: CreationDateTime::now(),
            plan: None,
        };
        self.database()
            .execute(Insert(user.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::debug!("created `User(id: {})`", user.id);

        Ok(user)
    }
}

/// Error of [`CreateUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// No [`Email`] provided.
    #[display("No email provided")]
    EmailRequired,
}

#[cfg(test)]
mod spec {
    use crate::{
        command::spec::service,
        domain::user::{self, Role},
        query::user::ById,
        Command as _, Query as _,
    };

    use super::{CreateUser, ExecutionError};

    #[tokio::test]
    async fn creates_viewer_without_plan() {
        let service = service(&["a@test.com", "b@test.com"]);

        let user = service
            .execute(CreateUser {
                email: user::Email::new("new@test.com"),
            })
            .await
            .unwrap();

        assert_eq!(user.id, user::Id::from("3"));
        assert_eq!(user.email.as_ref(), "new@test.com");
        assert_eq!(user.role, Role::Viewer);
        assert_eq!(user.plan, None);

        let stored = service.execute(ById::by(user.id.clone())).await.unwrap();
        assert_eq!(stored, Some(user));
    }

    #[tokio::test]
    async fn requires_email() {
        let service = service(&[]);

        let err = service
            .execute(CreateUser { email: None })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::EmailRequired));
        assert!(service.database().is_empty().await);
    }
}
