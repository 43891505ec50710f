use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::common::{ApiErrorDetails, ApiErrorResponse, ApiQueryParams, ApiResponse};
use super::error::ApiError;
use super::pool::{ConnectionPoolConfig, ConnectionPoolManager};

/// NIOS WAPI client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    retry_config: RetryConfig,
    pool_manager: ConnectionPoolManager,
}

#[derive(Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_seconds: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 10000,
            timeout_seconds: 30,
        }
    }
}

impl Client {
    /// Create a new API client with default configuration
    pub fn new(
        endpoint: &str,
        wapi_version: &str,
        username: &str,
        password: &str,
        insecure: bool,
    ) -> Result<Self, ApiError> {
        Self::with_config(
            endpoint,
            wapi_version,
            username,
            password,
            insecure,
            RetryConfig::default(),
        )
    }

    /// Create a new API client with custom retry configuration
    pub fn with_config(
        endpoint: &str,
        wapi_version: &str,
        username: &str,
        password: &str,
        insecure: bool,
        retry_config: RetryConfig,
    ) -> Result<Self, ApiError> {
        let base_url = wapi_base_url(endpoint, wapi_version)?;

        let pool_config = ConnectionPoolConfig {
            request_timeout: std::time::Duration::from_secs(retry_config.timeout_seconds),
            ..Default::default()
        };

        let pool_manager = ConnectionPoolManager::new(pool_config);
        let http_client = pool_manager.build_client(insecure)?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                username: username.to_string(),
                password: password.to_string(),
                retry_config,
                pool_manager,
            }),
        })
    }

    /// `{host}/wapi/{version}`
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Execute a GET request with retry logic
    pub async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        params: &ApiQueryParams,
    ) -> Result<T, ApiError> {
        let full_path = format!("{}{}", path, params.to_query_string());
        self.execute_with_retry(
            || async {
                let url = format!("{}{}", self.inner.base_url, full_path);

                tracing::debug!("GET request to: {}", url);

                self.inner
                    .http_client
                    .get(&url)
                    .basic_auth(&self.inner.username, Some(&self.inner.password))
                    .send()
                    .await
            },
            path,
        )
        .await
    }

    /// Execute a POST request with retry logic
    pub async fn post<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        params: &ApiQueryParams,
        body: &B,
    ) -> Result<T, ApiError> {
        let full_path = format!("{}{}", path, params.to_query_string());
        self.execute_with_retry(
            || async {
                let url = format!("{}{}", self.inner.base_url, full_path);

                tracing::debug!("POST request to: {}", url);

                self.inner
                    .http_client
                    .post(&url)
                    .basic_auth(&self.inner.username, Some(&self.inner.password))
                    .json(body)
                    .send()
                    .await
            },
            path,
        )
        .await
    }

    /// Execute a PUT request with retry logic
    pub async fn put<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        path: &str,
        params: &ApiQueryParams,
        body: &B,
    ) -> Result<T, ApiError> {
        let full_path = format!("{}{}", path, params.to_query_string());
        self.execute_with_retry(
            || async {
                let url = format!("{}{}", self.inner.base_url, full_path);

                tracing::debug!("PUT request to: {}", url);

                self.inner
                    .http_client
                    .put(&url)
                    .basic_auth(&self.inner.username, Some(&self.inner.password))
                    .json(body)
                    .send()
                    .await
            },
            path,
        )
        .await
    }

    /// Execute a DELETE request with retry logic
    pub async fn delete<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, ApiError> {
        self.execute_with_retry(
            || async {
                let url = format!("{}{}", self.inner.base_url, path);

                tracing::debug!("DELETE request to: {}", url);

                self.inner
                    .http_client
                    .delete(&url)
                    .basic_auth(&self.inner.username, Some(&self.inner.password))
                    .send()
                    .await
            },
            path,
        )
        .await
    }

    /// Get connection pool statistics
    pub async fn get_connection_stats(&self) -> super::pool::ConnectionStats {
        self.inner.pool_manager.get_stats().await
    }

    /// Grid API operations
    pub fn grid(&self) -> crate::api::grid::GridApi<'_> {
        crate::api::grid::GridApi::new(self)
    }

    /// Execute request with retry logic
    async fn execute_with_retry<F, Fut, T>(&self, request_fn: F, path: &str) -> Result<T, ApiError>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
        T: for<'de> Deserialize<'de>,
    {
        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.inner.retry_config.max_retries {
            if attempt > 0 {
                let backoff = std::cmp::min(
                    self.inner.retry_config.initial_backoff_ms * (2_u64.pow(attempt - 1)),
                    self.inner.retry_config.max_backoff_ms,
                );
                tracing::warn!(
                    "Retrying request to {} after {}ms (attempt {})",
                    path,
                    backoff,
                    attempt
                );
                self.inner.pool_manager.record_retry().await;
                tokio::time::sleep(tokio::time::Duration::from_millis(backoff)).await;
            }

            match request_fn().await {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        self.inner.pool_manager.record_request(true).await;
                        return self.parse_success_response(response).await;
                    }

                    self.inner.pool_manager.record_request(false).await;

                    if status == reqwest::StatusCode::UNAUTHORIZED {
                        return Err(ApiError::AuthError);
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(ApiError::NotFound(path.to_string()));
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        last_error = Some(ApiError::RateLimited);
                    } else if status.is_server_error() {
                        last_error = Some(ApiError::ServiceUnavailable);
                    } else {
                        return self.handle_error_response(response, path).await;
                    }
                }
                Err(e) => {
                    self.inner.pool_manager.record_request(false).await;

                    if e.is_timeout() {
                        last_error =
                            Some(ApiError::Timeout(self.inner.retry_config.timeout_seconds));
                    } else if e.is_connect() || e.is_request() {
                        last_error = Some(ApiError::ServiceUnavailable);
                    } else {
                        return Err(ApiError::RequestError(e));
                    }
                }
            }

            attempt += 1;
        }

        Err(last_error.unwrap_or(ApiError::ServiceUnavailable))
    }

    /// Parse successful response
    async fn parse_success_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let text = response.text().await?;
        tracing::debug!("API response body: {}", text);

        match serde_json::from_str::<ApiResponse<T>>(&text) {
            Ok(wrapper) => Ok(wrapper.result),
            Err(_) => match serde_json::from_str::<T>(&text) {
                Ok(data) => Ok(data),
                Err(e) => {
                    tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
                    Err(ApiError::ParseError(format!(
                        "Failed to parse response: {}",
                        e
                    )))
                }
            },
        }
    }

    /// Handle error response
    async fn handle_error_response<T>(
        &self,
        response: reqwest::Response,
        path: &str,
    ) -> Result<T, ApiError> {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let details = serde_json::from_str::<ApiErrorResponse>(&text)
            .ok()
            .map(ApiErrorDetails::from);

        // WAPI reports some missing references as 400 with a NotFound code
        if details.as_ref().is_some_and(ApiErrorDetails::is_not_found) {
            return Err(ApiError::NotFound(path.to_string()));
        }

        let message = details
            .as_ref()
            .and_then(|d| d.text.clone().or_else(|| d.error.clone()))
            .unwrap_or(text);

        Err(ApiError::ApiError {
            status,
            message,
            details: details.map(Box::new),
        })
    }
}

fn wapi_base_url(endpoint: &str, wapi_version: &str) -> Result<String, ApiError> {
    let parsed = url::Url::parse(endpoint)
        .map_err(|e| ApiError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ApiError::InvalidEndpoint(format!(
            "{}: scheme must be http or https",
            endpoint
        )));
    }
    if wapi_version.trim().is_empty() {
        return Err(ApiError::InvalidEndpoint(
            "WAPI version must not be empty".to_string(),
        ));
    }

    Ok(format!(
        "{}/wapi/{}",
        endpoint.trim_end_matches('/'),
        wapi_version.trim_matches('/')
    ))
}
