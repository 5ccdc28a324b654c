//! Student records API data models
//!
//! Wire types exchanged with the backend. Field names are camelCase on the
//! wire and snake_case in Rust.

mod auth;
mod student;

pub use auth::{Credentials, LoginResponse, Registration};
pub use student::{NewStudent, Student};
