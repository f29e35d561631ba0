//! Headless state of the users listing view.
//!
//! Keeps the filter selections, debounces the search input, mirrors the
//! filters into the location query string and fetches the listing through a
//! cache invalidated by resource family.

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod debounce;
pub mod filter;
pub mod query;
pub mod transport;
pub mod url;
pub mod view;

// Used in tests only.
#[cfg(test)]
use application as _;
#[cfg(test)]
use axum as _;

pub use self::{
    debounce::Debounce,
    filter::{Action, State},
    query::{Detail, Fetcher, QueryParams},
    transport::{Http, Transport},
    url::{Location, Synchronizer},
    view::Listing,
};
