//! Student records API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{AuthApi, StudentApi};
use super::interceptor::{AuthInterceptor, Interceptor, LoggingInterceptor, Next};
use super::models::{Credentials, LoginResponse, NewStudent, Registration, Student};
use crate::error::{ApiError, Result};
use crate::session::SharedTokenStore;

/// Path prefix shared by every backend endpoint
const API_PREFIX: &str = "/api";

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Student records API client
pub struct RosterClient {
    http: HttpClient,
    base_url: String,
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl RosterClient {
    /// Create a client with the default chain: request logging, then bearer
    /// token injection from `store`.
    pub fn new(api_host: &str, store: SharedTokenStore) -> Result<Self> {
        Self::with_interceptors(
            api_host,
            vec![
                Arc::new(LoggingInterceptor),
                Arc::new(AuthInterceptor::new(store)),
            ],
        )
    }

    /// Create a client with an explicit interceptor chain
    pub fn with_interceptors(
        api_host: &str,
        interceptors: Vec<Arc<dyn Interceptor>>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: format!("{}{}", api_host.trim_end_matches('/'), API_PREFIX),
            interceptors,
        })
    }

    /// Base URL including the `/api` prefix
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
    }

    /// Run a request through the interceptor chain and map error statuses
    async fn execute(&self, builder: RequestBuilder, resource: &str) -> Result<Response> {
        let request = builder.build().map_err(ApiError::from)?;
        let response = Next::new(&self.http, &self.interceptors)
            .run(request)
            .await?;

        let status = response.status();
        match status {
            s if s.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized.into()),
            StatusCode::FORBIDDEN => Err(ApiError::Forbidden.into()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(resource.to_string()).into()),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Bad request".to_string());
                Err(ApiError::BadRequest(error_msg).into())
            }
            s if s.is_server_error() => {
                let error_msg = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("Server error: {}", s));
                Err(ApiError::ServerError(error_msg).into())
            }
            _ => {
                let error_msg = format!("Unexpected status code: {}", status);
                Err(ApiError::InvalidResponse(error_msg).into())
            }
        }
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        resource: &str,
    ) -> Result<T> {
        let response = self.execute(builder, resource).await?;
        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }
}

#[async_trait]
impl AuthApi for RosterClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        debug!("Logging in as {}", credentials.login);
        let builder = self.builder(Method::POST, "/login").json(credentials);
        self.execute_json(builder, "login").await
    }

    async fn register(&self, registration: &Registration) -> Result<serde_json::Value> {
        debug!("Registering account {}", registration.login);
        let builder = self.builder(Method::POST, "/register").json(registration);
        let response = self.execute(builder, "register").await?;

        let body = response.text().await.map_err(ApiError::from)?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }
}

#[async_trait]
impl StudentApi for RosterClient {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let builder = self.builder(Method::GET, "/students");
        self.execute_json(builder, "students").await
    }

    async fn get_student(&self, id: i64) -> Result<Student> {
        let builder = self.builder(Method::GET, &format!("/students/{}", id));
        self.execute_json(builder, &format!("student {}", id)).await
    }

    async fn create_student(&self, student: &NewStudent) -> Result<()> {
        let builder = self.builder(Method::POST, "/students").json(student);
        self.execute(builder, "students").await?;
        Ok(())
    }

    async fn update_student(&self, id: i64, student: &Student) -> Result<()> {
        let builder = self
            .builder(Method::PUT, &format!("/students/{}", id))
            .json(student);
        self.execute(builder, &format!("student {}", id)).await?;
        Ok(())
    }

    async fn delete_student(&self, id: i64) -> Result<()> {
        let builder = self.builder(Method::DELETE, &format!("/students/{}", id));
        self.execute(builder, &format!("student {}", id)).await?;
        Ok(())
    }
}
