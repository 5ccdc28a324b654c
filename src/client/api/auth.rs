//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{Credentials, LoginResponse, Registration};
use crate::error::Result;

/// Authentication operations against the student records backend
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token (`POST /api/login`)
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;

    /// Create an account (`POST /api/register`).
    ///
    /// The success body is arbitrary and returned as-is.
    async fn register(&self, registration: &Registration) -> Result<serde_json::Value>;
}
