//! [`User`]-related [`Database`] implementations.

use common::operations::{By, Delete, Insert, Next, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{user, User},
    infra::{
        database::{self, memory},
        Database, Memory,
    },
    read,
};

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }
}

impl Database<Select<By<read::user::list::Page, read::user::list::Selector>>>
    for Memory
{
    type Ok = read::user::list::Page;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<
            By<read::user::list::Page, read::user::list::Selector>,
        >,
    ) -> Result<Self::Ok, Self::Err> {
        let selector = by.into_inner();
        Ok(read::user::list::select(
            &selector,
            &self.state.read().await.users,
        ))
    }
}

impl Database<Next<user::Id>> for Memory {
    type Ok = user::Id;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Next<user::Id>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.write().await;
        state.last_id += 1;
        Ok(user::Id::from_number(state.last_id))
    }
}

impl Database<Insert<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(user): Insert<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.write().await;
        if state.users.iter().any(|u| u.id == user.id) {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::Duplicate(user.id)
            )));
        }

        if let Some(n) = user.id.number() {
            state.last_id = state.last_id.max(n);
        }
        state.users.push(user);
        Ok(())
    }
}

impl Database<Update<User>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(user): Update<User>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.write().await;
        let Some(stored) = state.users.iter_mut().find(|u| u.id == user.id)
        else {
            return Err(tracerr::new!(database::Error::from(
                memory::Error::Missing(user.id)
            )));
        };

        *stored = user;
        Ok(())
    }
}

impl Database<Delete<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self.state.write().await;
        Ok(state
            .users
            .iter()
            .position(|u| u.id == id)
            .map(|i| state.users.remove(i)))
    }
}
