//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - login and registration
//! - [`StudentApi`] - CRUD on the `/students` resource
//!
//! Views depend on these traits rather than on the concrete client so they
//! can be driven by the mock client in tests.

mod auth;
mod student;

pub use auth::AuthApi;
pub use student::StudentApi;
