//! [`Command`] definition.

pub mod create_user;
pub mod delete_user;
pub mod refresh_user;
pub mod update_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    create_user::CreateUser, delete_user::DeleteUser,
    refresh_user::RefreshUser, update_user::UpdateUser,
};

#[cfg(test)]
mod spec {
    //! Helpers shared by [`Command`] tests.
    //!
    //! [`Command`]: super::Command

    use crate::{
        domain::{
            user::{self, CreationDateTime, Role},
            User,
        },
        infra::Memory,
        Config, Service,
    };

    /// Creates a new [`Service`] without latency, holding the [`User`]s
    /// with the provided emails and sequential IDs.
    pub(crate) fn service(emails: &[&str]) -> Service<Memory> {
        let users = emails.iter().zip(1..).map(|(email, i)| User {
            id: user::Id::from_number(i),
            email: user::Email::new(*email).unwrap(),
            role: Role::Editor,
            created_at: CreationDateTime::UNIX_EPOCH,
            plan: None,
        });
        Service::new(Config::default(), Memory::new(users))
    }
}
