//! In-process [`Transport`] for tests.

use std::sync::{Arc, Mutex};

use common::{
    operations::{By, Delete, Perform, Select},
    pagination::Order,
};
use service::{
    domain::{
        user::{self, CreationDateTime, Role},
        User,
    },
    read::user::list,
};
use tracerr::Traced;

use crate::query::{Page, QueryParams};

use super::{Refresh, Transport, TransportError};

/// [`Transport`] serving the listing out of memory.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fake {
    /// Shared state of this [`Fake`].
    state: Arc<Mutex<State>>,
}

/// State of a [`Fake`].
#[derive(Debug, Default)]
struct State {
    /// Served [`User`]s.
    users: Vec<User>,

    /// Number of the next selects and lookups to fail with `500`.
    failures: usize,

    /// Whether mutations fail with `500`.
    broken_mutations: bool,

    /// [`QueryParams`] of the performed selects.
    selects: Vec<QueryParams>,

    /// IDs of the looked up [`User`]s.
    lookups: Vec<user::Id>,

    /// IDs of the refreshed [`User`]s.
    refreshed: Vec<user::Id>,
}

impl Fake {
    /// Creates a new [`Fake`] serving `count` [`User`]s.
    pub(crate) fn with_users(count: u64) -> Self {
        let users = (1..=count)
            .map(|i| User {
                id: user::Id::from_number(i),
                email: user::Email::new(format!("user{i:03}@test.com"))
                    .unwrap(),
                role: Role::Viewer,
                created_at: CreationDateTime::UNIX_EPOCH,
                plan: None,
            })
            .collect();
        let fake = Self::default();
        fake.state.lock().unwrap().users = users;
        fake
    }

    /// Makes the next `n` selects and lookups fail.
    pub(crate) fn fail_next(&self, n: usize) {
        self.state.lock().unwrap().failures = n;
    }

    /// Makes all the mutations fail.
    pub(crate) fn break_mutations(&self) {
        self.state.lock().unwrap().broken_mutations = true;
    }

    /// Returns [`QueryParams`] of the performed selects.
    pub(crate) fn selects(&self) -> Vec<QueryParams> {
        self.state.lock().unwrap().selects.clone()
    }

    /// Returns IDs of the looked up [`User`]s.
    pub(crate) fn lookups(&self) -> Vec<user::Id> {
        self.state.lock().unwrap().lookups.clone()
    }

    /// Returns IDs of the refreshed [`User`]s.
    pub(crate) fn refreshed(&self) -> Vec<user::Id> {
        self.state.lock().unwrap().refreshed.clone()
    }

    /// Returns the number of served [`User`]s.
    pub(crate) fn users_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }
}

impl Transport<Select<By<Page, QueryParams>>> for Fake {
    type Ok = Page;
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Select(by): Select<By<Page, QueryParams>>,
    ) -> Result<Self::Ok, Self::Err> {
        let params = by.into_inner();
        let mut state = self.state.lock().unwrap();
        state.selects.push(params.clone());
        if state.failures > 0 {
            state.failures -= 1;
            return Err(tracerr::new!(TransportError::Status(500)));
        }

        let selector = list::Selector {
            arguments: list::Arguments::new(params.page, params.limit.get())
                .unwrap(),
            filter: list::Filter {
                search: params.search,
            },
            sorting: list::Sorting {
                by: params.sort_by,
                order: Order::from_desc(params.desc),
            },
        };
        let page = list::select(&selector, &state.users);
        Ok(Page {
            total_pages: page.total_pages(),
            current_page: page.arguments.page(),
            total: page.total,
            users: page.items,
        })
    }
}

impl Transport<Select<By<Option<User>, user::Id>>> for Fake {
    type Ok = Option<User>;
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        let mut state = self.state.lock().unwrap();
        state.lookups.push(id.clone());
        if state.failures > 0 {
            state.failures -= 1;
            return Err(tracerr::new!(TransportError::Status(500)));
        }
        Ok(state.users.iter().find(|u| u.id == id).cloned())
    }
}

impl Transport<Perform<Refresh>> for Fake {
    type Ok = ();
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Perform(Refresh { user_id }): Perform<Refresh>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.lock().unwrap();
        if state.broken_mutations {
            return Err(tracerr::new!(TransportError::Status(500)));
        }
        state.refreshed.push(user_id);
        Ok(())
    }
}

impl Transport<Delete<By<(), user::Id>>> for Fake {
    type Ok = ();
    type Err = Traced<TransportError>;

    async fn execute(
        &self,
        Delete(by): Delete<By<(), user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let mut state = self.state.lock().unwrap();
        if state.broken_mutations {
            return Err(tracerr::new!(TransportError::Status(500)));
        }
        let id = by.into_inner();
        let Some(i) = state.users.iter().position(|u| u.id == id) else {
            return Err(tracerr::new!(TransportError::Status(404)));
        };
        _ = state.users.remove(i);
        Ok(())
    }
}
