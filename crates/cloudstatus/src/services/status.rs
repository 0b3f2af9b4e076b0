//! Overall status of the page.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::data_access::DataAccessLayer;
use crate::error::StatusResult;
use crate::transform::transform_status;
use crate::types::{IndicatorLevel, OverallStatus, StatusLevel};

use super::OVERALL_STATUS_KEY;

pub struct StatusService {
    data: Arc<DataAccessLayer>,
    cache: Arc<TtlCache>,
    ttl: Duration,
}

impl StatusService {
    pub fn new(data: Arc<DataAccessLayer>, cache: Arc<TtlCache>, config: &CacheConfig) -> Self {
        Self {
            data,
            cache,
            ttl: config.ttl_status(),
        }
    }

    pub async fn overall_status(&self) -> StatusResult<OverallStatus> {
        tracing::debug!("Getting overall status");
        self.cache
            .get(OVERALL_STATUS_KEY, self.ttl, || async {
                Ok(transform_status(self.data.get_status().await?))
            })
            .await
    }

    pub async fn description(&self) -> StatusResult<String> {
        Ok(self.overall_status().await?.description)
    }

    pub async fn indicator(&self) -> StatusResult<IndicatorLevel> {
        Ok(self.overall_status().await?.indicator)
    }

    pub async fn is_operational(&self) -> StatusResult<bool> {
        Ok(self.overall_status().await?.status == StatusLevel::Operational)
    }

    pub async fn has_issues(&self) -> StatusResult<bool> {
        Ok(self.overall_status().await?.indicator != IndicatorLevel::None)
    }

    pub async fn status_level(&self) -> StatusResult<StatusLevel> {
        Ok(self.overall_status().await?.status)
    }

    /// Drop the cached status. Returns whether an entry was removed.
    pub fn invalidate_cache(&self) -> bool {
        let removed = self.cache.delete(OVERALL_STATUS_KEY);
        tracing::info!("Status cache invalidated");
        removed
    }
}
