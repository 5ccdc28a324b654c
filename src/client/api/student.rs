//! Student API trait for CRUD operations

use async_trait::async_trait;

use crate::client::models::{NewStudent, Student};
use crate::error::Result;

/// Student management operations
#[async_trait]
pub trait StudentApi: Send + Sync {
    /// List every student (`GET /api/students`)
    async fn list_students(&self) -> Result<Vec<Student>>;

    /// Fetch one student (`GET /api/students/{id}`)
    async fn get_student(&self, id: i64) -> Result<Student>;

    /// Create a student; the backend assigns the id (`POST /api/students`)
    async fn create_student(&self, student: &NewStudent) -> Result<()>;

    /// Replace a student record (`PUT /api/students/{id}`)
    async fn update_student(&self, id: i64, student: &Student) -> Result<()>;

    /// Delete a student (`DELETE /api/students/{id}`)
    async fn delete_student(&self, id: i64) -> Result<()>;
}
