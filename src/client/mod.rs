//! Student records API client
//!
//! - [`api`] - service traits consumed by the views
//! - [`models`] - wire types
//! - [`interceptor`] - request middleware chain (bearer token injection)
//! - [`roster`] - reqwest implementation of the service traits

pub mod api;
#[cfg(test)]
pub mod fixtures;
pub mod interceptor;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod roster;

pub use api::{AuthApi, StudentApi};
#[cfg(test)]
pub use mock::MockRosterClient;
pub use roster::RosterClient;
