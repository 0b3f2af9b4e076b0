//! Status-page data access: an API client, a browser fallback, and a TTL
//! cache in front of per-entity services.

pub mod api_client;
pub mod cache;
pub mod config;
pub mod data_access;
pub mod error;
pub mod renderer;
pub mod retry;
pub mod scraper;
pub mod services;
pub mod transform;
pub mod types;
pub mod wire;

#[cfg(test)]
mod fixtures;

pub use api_client::{ApiClient, PrimarySource};
pub use cache::{CacheStats, TtlCache};
pub use config::Config;
pub use data_access::{AllData, DataAccessLayer};
pub use error::{StatusError, StatusResult};
pub use retry::RetryPolicy;
pub use scraper::{FallbackSource, ScrapedData, WebScraper};
pub use services::{ComponentService, IncidentService, StatusService};
pub use types::*;
