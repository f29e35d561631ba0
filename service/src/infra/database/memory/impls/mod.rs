//! [`Memory`] [`Database`] implementations.
//!
//! [`Database`]: crate::infra::Database
//! [`Memory`]: super::Memory

mod user;
