//! HTTP client forwarding validated calls to the ShareIt server

use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{self, header::CONTENT_TYPE, Method},
    response::Response,
};

use crate::{
    api::SHARER_USER_ID,
    config::GatewayConfig,
    error::{AppError, AppResult},
};

/// One call to forward, built by the gateway handlers
#[derive(Debug, Clone)]
pub struct Forward {
    method: Method,
    path: String,
    query: Option<String>,
    user_id: Option<i64>,
    body: Option<Bytes>,
}

impl Forward {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            user_id: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Acting user, sent as `X-Sharer-User-Id`
    pub fn user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Raw query string, passed through as received
    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.is_empty());
        self
    }

    /// JSON body, passed through as received
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = Some(body);
        self
    }

    fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        match &self.query {
            Some(query) => format!("{}{}?{}", base, self.path, query),
            None => format!("{}{}", base, self.path),
        }
    }
}

/// Client of the ShareIt server
#[derive(Clone)]
pub struct ServerClient {
    http: reqwest::Client,
    base_url: String,
}

impl ServerClient {
    pub fn new(config: &GatewayConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.server_url.clone(),
        })
    }

    /// Send the call and hand back the server's status and body unchanged
    pub async fn forward(&self, call: Forward) -> AppResult<Response> {
        let url = call.url(&self.base_url);
        tracing::debug!("Forwarding {} {}", call.method, url);

        let mut request = self.http.request(call.method.clone(), &url);
        if let Some(user_id) = call.user_id {
            request = request.header(SHARER_USER_ID, user_id.to_string());
        }
        if let Some(body) = call.body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!("ShareIt server call {} {} failed: {}", call.method, url, e);
            AppError::Upstream(format!("ShareIt server unavailable: {}", e))
        })?;

        let status = response.status();
        let content_type = response.headers().get(CONTENT_TYPE).cloned();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!("Reading ShareIt server response failed: {}", e);
            AppError::Upstream(format!("Broken ShareIt server response: {}", e))
        })?;

        let mut builder = http::Response::builder().status(status);
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder
            .body(Body::from(body))
            .map_err(|e| AppError::Internal(format!("Failed to build response: {}", e)))
    }
}
