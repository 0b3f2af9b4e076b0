//! Component queries.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use regex::RegexBuilder;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::data_access::DataAccessLayer;
use crate::error::{StatusError, StatusResult};
use crate::transform::transform_components;
use crate::types::{Component, ComponentGroup, IndicatorLevel};

use super::ALL_COMPONENTS_KEY;

/// Group name used for components that belong to no group.
pub const UNGROUPED: &str = "Ungrouped";

pub struct ComponentService {
    data: Arc<DataAccessLayer>,
    cache: Arc<TtlCache>,
    ttl: Duration,
}

impl ComponentService {
    pub fn new(data: Arc<DataAccessLayer>, cache: Arc<TtlCache>, config: &CacheConfig) -> Self {
        Self {
            data,
            cache,
            ttl: config.ttl_components(),
        }
    }

    pub async fn all_components(&self) -> StatusResult<Vec<Component>> {
        tracing::debug!("Getting all components");
        self.cache
            .get(ALL_COMPONENTS_KEY, self.ttl, || async {
                Ok(transform_components(self.data.get_components().await?))
            })
            .await
    }

    pub async fn by_id(&self, id: &str) -> StatusResult<Component> {
        self.all_components()
            .await?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Exact name match, ignoring case.
    pub async fn by_name(&self, name: &str) -> StatusResult<Component> {
        let wanted = name.to_lowercase();
        self.all_components()
            .await?
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted)
            .ok_or_else(|| not_found(name))
    }

    pub async fn by_status(&self, status: IndicatorLevel) -> StatusResult<Vec<Component>> {
        self.filtered(|c| c.status == status).await
    }

    pub async fn by_group(&self, group: &str) -> StatusResult<Vec<Component>> {
        self.filtered(|c| c.group.as_deref() == Some(group)).await
    }

    pub async fn degraded(&self) -> StatusResult<Vec<Component>> {
        self.filtered(|c| c.status != IndicatorLevel::None).await
    }

    pub async fn operational(&self) -> StatusResult<Vec<Component>> {
        self.filtered(|c| c.status == IndicatorLevel::None).await
    }

    /// Components grouped by group name, in order of first appearance.
    pub async fn groups(&self) -> StatusResult<Vec<ComponentGroup>> {
        let mut groups: Vec<ComponentGroup> = Vec::new();

        for component in self.all_components().await? {
            let name = component.group.as_deref().unwrap_or(UNGROUPED);
            match groups.iter_mut().find(|g| g.name == name) {
                Some(group) => group.components.push(component),
                None => {
                    let position = groups.len();
                    groups.push(ComponentGroup {
                        id: format!("group-{position}"),
                        name: name.to_string(),
                        position,
                        components: vec![component],
                    });
                }
            }
        }

        Ok(groups)
    }

    /// Components whose name matches `pattern`, case-insensitively.
    pub async fn search(&self, pattern: &str) -> StatusResult<Vec<Component>> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| StatusError::Validation(format!("Invalid search pattern: {e}")))?;
        self.filtered(|c| regex.is_match(&c.name)).await
    }

    /// Count per indicator level. Every level is present, even at zero.
    pub async fn count_by_status(&self) -> StatusResult<BTreeMap<IndicatorLevel, usize>> {
        let mut counts: BTreeMap<IndicatorLevel, usize> =
            IndicatorLevel::ALL.into_iter().map(|l| (l, 0)).collect();
        for component in self.all_components().await? {
            *counts.entry(component.status).or_default() += 1;
        }
        Ok(counts)
    }

    pub async fn is_operational(&self, id: &str) -> StatusResult<bool> {
        Ok(self.by_id(id).await?.status == IndicatorLevel::None)
    }

    pub fn invalidate_cache(&self) -> bool {
        let removed = self.cache.delete(ALL_COMPONENTS_KEY);
        tracing::info!("Components cache invalidated");
        removed
    }

    async fn filtered(&self, keep: impl Fn(&Component) -> bool) -> StatusResult<Vec<Component>> {
        let mut components = self.all_components().await?;
        components.retain(|c| keep(c));
        Ok(components)
    }
}

fn not_found(id: &str) -> StatusError {
    StatusError::NotFound {
        kind: "Component",
        id: id.to_string(),
    }
}
