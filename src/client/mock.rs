//! Mock student records API client for testing
//!
//! Provides an in-memory implementation of the API traits so views can be
//! exercised without making real API calls.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::api::{AuthApi, StudentApi};
use super::models::{Credentials, LoginResponse, NewStudent, Registration, Student};
use crate::error::{ApiError, Result};
use crate::views::ViewLifetime;

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
/// Student mutations are applied to the in-memory list so that reloads see
/// them, the way the real backend would.
///
/// # Example
/// ```ignore
/// let mock = MockRosterClient::new()
///     .with_students(vec![StudentBuilder::new(7).build()])
///     .await;
///
/// let students = mock.list_students().await?;
/// assert_eq!(students.len(), 1);
/// ```
#[derive(Default)]
pub struct MockRosterClient {
    /// Students served by list/get and mutated by create/update/delete
    students: Arc<Mutex<Vec<Student>>>,
    /// Token returned by login
    token: Arc<Mutex<Option<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// View lifetime ended when the next call arrives
    end_on_call: Arc<Mutex<Option<ViewLifetime>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub register: usize,
    pub list_students: usize,
    pub get_student: usize,
    pub create_student: usize,
    pub update_student: usize,
    pub delete_student: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.login
            + self.register
            + self.list_students
            + self.get_student
            + self.create_student
            + self.update_student
            + self.delete_student
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    /// HTTP method the real client would use
    pub method: String,
    /// Request path the real client would use
    pub path: String,
    /// JSON body, if the request has one
    pub body: Option<serde_json::Value>,
}

impl MockRosterClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure students served by the mock backend.
    pub async fn with_students(self, students: Vec<Student>) -> Self {
        *self.students.lock().await = students;
        self
    }

    /// Configure the token returned by login.
    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(token.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        self.fail_next(error).await;
        self
    }

    /// Make the next API call fail, after the mock is already in use.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// End `lifetime` as soon as the next call arrives, simulating a view
    /// torn down while its request is in flight.
    pub async fn end_lifetime_on_call(&self, lifetime: ViewLifetime) {
        *self.end_on_call.lock().await = Some(lifetime);
    }

    /// Current contents of the mock backend.
    pub async fn students(&self) -> Vec<Student> {
        self.students.lock().await.clone()
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Record the request, fire the lifetime hook and consume any pending error.
    async fn begin(&self, method: &str, path: String, body: Option<serde_json::Value>) -> Result<()> {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            path,
            body,
        });

        if let Some(lifetime) = self.end_on_call.lock().await.take() {
            lifetime.end();
        }

        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockRosterClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.call_count.lock().await.login += 1;
        self.begin("POST", "/api/login".to_string(), serde_json::to_value(credentials).ok())
            .await?;

        let token = self.token.lock().await.clone();
        Ok(LoginResponse {
            token: token.unwrap_or_else(|| "mock-token".to_string()),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<serde_json::Value> {
        self.call_count.lock().await.register += 1;
        self.begin(
            "POST",
            "/api/register".to_string(),
            serde_json::to_value(registration).ok(),
        )
        .await?;

        Ok(serde_json::json!({ "login": registration.login }))
    }
}

// ============================================================================
// StudentApi Implementation
// ============================================================================

#[async_trait]
impl StudentApi for MockRosterClient {
    async fn list_students(&self) -> Result<Vec<Student>> {
        self.call_count.lock().await.list_students += 1;
        self.begin("GET", "/api/students".to_string(), None).await?;

        Ok(self.students.lock().await.clone())
    }

    async fn get_student(&self, id: i64) -> Result<Student> {
        self.call_count.lock().await.get_student += 1;
        self.begin("GET", format!("/api/students/{}", id), None).await?;

        self.students
            .lock()
            .await
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("student {}", id)).into())
    }

    async fn create_student(&self, student: &NewStudent) -> Result<()> {
        self.call_count.lock().await.create_student += 1;
        self.begin(
            "POST",
            "/api/students".to_string(),
            serde_json::to_value(student).ok(),
        )
        .await?;

        let mut students = self.students.lock().await;
        let next_id = students.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        students.push(student.clone().with_id(next_id));
        Ok(())
    }

    async fn update_student(&self, id: i64, student: &Student) -> Result<()> {
        self.call_count.lock().await.update_student += 1;
        self.begin(
            "PUT",
            format!("/api/students/{}", id),
            serde_json::to_value(student).ok(),
        )
        .await?;

        let mut students = self.students.lock().await;
        let existing = students
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("student {}", id)))?;
        *existing = Student {
            id,
            ..student.clone()
        };
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        self.call_count.lock().await.delete_student += 1;
        self.begin("DELETE", format!("/api/students/{}", id), None)
            .await?;

        let mut students = self.students.lock().await;
        let before = students.len();
        students.retain(|s| s.id != id);
        if students.len() == before {
            return Err(ApiError::NotFound(format!("student {}", id)).into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures::{StudentBuilder, students};

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockRosterClient::new();

        assert!(mock.list_students().await.unwrap().is_empty());
        assert_eq!(mock.call_counts().await.list_students, 1);
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockRosterClient::new()
            .with_students(students(2))
            .await
            .with_error(ApiError::ServerError("boom".to_string()))
            .await;

        assert!(mock.list_students().await.is_err());
        // Error is consumed
        assert_eq!(mock.list_students().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_create_assigns_next_id() {
        let mock = MockRosterClient::new().with_students(students(3)).await;

        mock.create_student(&StudentBuilder::new(0).first_name("New").build_new())
            .await
            .unwrap();

        let all = mock.students().await;
        assert_eq!(all.len(), 4);
        assert_eq!(all[3].id, 4);
        assert_eq!(all[3].first_name, "New");
    }

    #[tokio::test]
    async fn test_mock_delete_records_path() {
        let mock = MockRosterClient::new().with_students(students(3)).await;

        mock.delete_student(2).await.unwrap();

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/api/students/2");
        assert!(mock.delete_student(2).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_call_counts_total() {
        let mock = MockRosterClient::new().with_token("t").await;

        mock.login(&Credentials {
            login: "a".to_string(),
            password: "b".to_string(),
        })
        .await
        .unwrap();
        mock.list_students().await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.login, 1);
        assert_eq!(counts.total(), 2);
    }
}
