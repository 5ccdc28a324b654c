//! Request interceptor chain
//!
//! Every request built by [`RosterClient`](super::RosterClient) passes through
//! an ordered list of [`Interceptor`]s before reaching the network. Each
//! interceptor receives the request and a [`Next`] continuation and must call
//! [`Next::run`] exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Client as HttpClient, Request, Response};

use crate::error::{ApiError, Result};
use crate::session::SharedTokenStore;

/// Middleware applied to every outgoing request
#[async_trait]
pub trait Interceptor: Send + Sync {
    /// Inspect or modify `request`, then hand it to `next`
    async fn intercept(&self, request: Request, next: Next<'_>) -> Result<Response>;
}

/// Continuation over the remaining interceptors and the HTTP transport
pub struct Next<'a> {
    http: &'a HttpClient,
    chain: &'a [Arc<dyn Interceptor>],
}

impl<'a> Next<'a> {
    /// Start a chain over `interceptors`, ending at `http`
    pub fn new(http: &'a HttpClient, chain: &'a [Arc<dyn Interceptor>]) -> Self {
        Self { http, chain }
    }

    /// Pass the request to the next interceptor, or send it when none remain
    pub async fn run(self, request: Request) -> Result<Response> {
        match self.chain.split_first() {
            Some((head, rest)) => {
                head.intercept(
                    request,
                    Next {
                        http: self.http,
                        chain: rest,
                    },
                )
                .await
            }
            None => Ok(self.http.execute(request).await.map_err(ApiError::from)?),
        }
    }
}

/// Attaches `Authorization: Bearer <token>` when a session token is stored
pub struct AuthInterceptor {
    store: SharedTokenStore,
}

impl AuthInterceptor {
    pub fn new(store: SharedTokenStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Interceptor for AuthInterceptor {
    async fn intercept(&self, mut request: Request, next: Next<'_>) -> Result<Response> {
        if let Some(token) = self.store.get().filter(|t| !t.is_empty()) {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(value) => {
                    request.headers_mut().insert(AUTHORIZATION, value);
                }
                // Not representable as a header; the request goes out unauthenticated
                Err(_) => warn!("Stored session token contains invalid header characters"),
            }
        }

        next.run(request).await
    }
}

/// Logs method, URL and response status at debug level
pub struct LoggingInterceptor;

#[async_trait]
impl Interceptor for LoggingInterceptor {
    async fn intercept(&self, request: Request, next: Next<'_>) -> Result<Response> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("--> {} {}", method, url);

        let result = next.run(request).await;
        match &result {
            Ok(response) => debug!("<-- {} {} {}", response.status(), method, url),
            Err(e) => debug!("<-- failed {} {}: {}", method, url, e),
        }
        result
    }
}
