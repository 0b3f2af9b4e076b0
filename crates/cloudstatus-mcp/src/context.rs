//! Server-wide state: one cache, one data-access layer, and the services
//! built on them.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use cloudstatus::{
    ComponentService, Config, DataAccessLayer, IncidentService, StatusService, TtlCache,
};

use crate::types::McpResult;

const CACHE_NAME: &str = "cloudstatus";

/// Owns everything the tools read from. Created when the server starts and
/// closed when it stops.
pub struct ServerContext {
    cache: Arc<TtlCache>,
    data: Arc<DataAccessLayer>,
    status: StatusService,
    components: ComponentService,
    incidents: IncidentService,
    sweeper: std::sync::Mutex<Option<JoinHandle<()>>>,
}

impl ServerContext {
    /// Build the API client and scraper from `config` and start the sweep task.
    pub fn from_config(config: &Config) -> McpResult<Self> {
        let data = Arc::new(DataAccessLayer::from_config(config)?);
        Ok(Self::with_data_access(data, config))
    }

    /// Build around an existing data-access layer. Must be called inside a
    /// Tokio runtime.
    pub fn with_data_access(data: Arc<DataAccessLayer>, config: &Config) -> Self {
        let cache = Arc::new(TtlCache::new(CACHE_NAME));
        let sweeper = spawn_sweeper(Arc::clone(&cache), config.cache.sweep_interval());

        tracing::info!("Server context initialized");

        Self {
            status: StatusService::new(Arc::clone(&data), Arc::clone(&cache), &config.cache),
            components: ComponentService::new(Arc::clone(&data), Arc::clone(&cache), &config.cache),
            incidents: IncidentService::new(Arc::clone(&data), Arc::clone(&cache), &config.cache),
            cache,
            data,
            sweeper: std::sync::Mutex::new(Some(sweeper)),
        }
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    pub fn status(&self) -> &StatusService {
        &self.status
    }

    pub fn components(&self) -> &ComponentService {
        &self.components
    }

    pub fn incidents(&self) -> &IncidentService {
        &self.incidents
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweeper
            .lock()
            .map(|s| s.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Stop the sweep task, release the browser, and clear the cache.
    /// Safe to call more than once.
    pub async fn close(&self) -> McpResult<()> {
        tracing::info!("Closing server context");

        let sweeper = self.sweeper.lock().ok().and_then(|mut s| s.take());
        if let Some(handle) = sweeper {
            handle.abort();
        }

        let closed = self.data.close().await;
        self.cache.clear();
        closed?;

        tracing::info!("Server context closed");
        Ok(())
    }
}

impl Drop for ServerContext {
    fn drop(&mut self) {
        if let Ok(mut sweeper) = self.sweeper.lock() {
            if let Some(handle) = sweeper.take() {
                handle.abort();
            }
        }
    }
}

fn spawn_sweeper(cache: Arc<TtlCache>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            cache.clean_expired();
        }
    })
}
