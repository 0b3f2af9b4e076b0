//! HTTP client for the status-page JSON API.
//!
//! One GET per entity, parsed into the wire types. Failures are retried
//! according to the configured [`RetryPolicy`] and then classified into the
//! request, timeout, network, and HTTP error kinds.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::{StatusError, StatusResult};
use crate::retry::RetryPolicy;
use crate::types::Entity;
use crate::wire::{
    RawComponentsResponse, RawIncidentsResponse, RawMaintenancesResponse, RawStatusResponse,
    RawSummaryResponse,
};

const USER_AGENT: &str = concat!("cloudstatus/", env!("CARGO_PKG_VERSION"));

/// The structured data source tried first for every request.
#[async_trait]
pub trait PrimarySource: Send + Sync {
    async fn fetch_status(&self) -> StatusResult<RawStatusResponse>;
    async fn fetch_summary(&self) -> StatusResult<RawSummaryResponse>;
    async fn fetch_components(&self) -> StatusResult<RawComponentsResponse>;
    async fn fetch_incidents(&self) -> StatusResult<RawIncidentsResponse>;
    async fn fetch_unresolved_incidents(&self) -> StatusResult<RawIncidentsResponse>;
    async fn fetch_scheduled_maintenances(&self) -> StatusResult<RawMaintenancesResponse>;
    async fn fetch_active_maintenances(&self) -> StatusResult<RawMaintenancesResponse>;
    async fn fetch_upcoming_maintenances(&self) -> StatusResult<RawMaintenancesResponse>;
}

/// Client for the status-page API.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
    retry: RetryPolicy,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> StatusResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| StatusError::Request {
                url: config.base_url.clone(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        tracing::debug!(
            "API client initialized: {} (timeout {}ms, {} retries)",
            config.base_url,
            config.timeout_ms,
            config.retry_attempts
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, entity: Entity) -> StatusResult<T> {
        let path = entity.api_path();
        let label = format!("GET {path}");
        self.retry.run(&label, || self.request(path)).await
    }

    async fn request<T: DeserializeOwned>(&self, path: &str) -> StatusResult<T> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!("API request: GET {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(path, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error response: {} {path}", status.as_u16());
            return Err(StatusError::Http {
                url: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| self.classify(path, e))?;
        tracing::debug!("API response: {} {path}", status.as_u16());
        Ok(parsed)
    }

    fn classify(&self, path: &str, err: reqwest::Error) -> StatusError {
        if err.is_timeout() {
            StatusError::Timeout {
                url: path.to_string(),
                timeout_ms: self.timeout_ms,
            }
        } else if err.is_connect() {
            StatusError::Network {
                url: path.to_string(),
                code: network_code(&err),
                message: err.to_string(),
            }
        } else {
            StatusError::Request {
                url: path.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// Name the underlying I/O failure, e.g. `ConnectionRefused`.
fn network_code(err: &reqwest::Error) -> String {
    let mut source = std::error::Error::source(err);
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            return format!("{:?}", io.kind());
        }
        source = inner.source();
    }
    "ConnectError".to_string()
}

#[async_trait]
impl PrimarySource for ApiClient {
    async fn fetch_status(&self) -> StatusResult<RawStatusResponse> {
        self.get_json(Entity::Status).await
    }

    async fn fetch_summary(&self) -> StatusResult<RawSummaryResponse> {
        self.get_json(Entity::Summary).await
    }

    async fn fetch_components(&self) -> StatusResult<RawComponentsResponse> {
        self.get_json(Entity::Components).await
    }

    async fn fetch_incidents(&self) -> StatusResult<RawIncidentsResponse> {
        self.get_json(Entity::Incidents).await
    }

    async fn fetch_unresolved_incidents(&self) -> StatusResult<RawIncidentsResponse> {
        self.get_json(Entity::UnresolvedIncidents).await
    }

    async fn fetch_scheduled_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.get_json(Entity::ScheduledMaintenances).await
    }

    async fn fetch_active_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.get_json(Entity::ActiveMaintenances).await
    }

    async fn fetch_upcoming_maintenances(&self) -> StatusResult<RawMaintenancesResponse> {
        self.get_json(Entity::UpcomingMaintenances).await
    }
}
