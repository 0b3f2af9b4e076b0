//! Browser fallback that reads the rendered status page.
//!
//! Every fetch opens a fresh tab on a shared, lazily launched browser,
//! navigates to the page, waits for its readiness marker, evaluates an
//! extraction script and closes the tab again. Results are already in the
//! domain shape.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::config::ScraperConfig;
use crate::error::{StatusError, StatusResult};
use crate::renderer::{presence_script, BrowserLauncher, ChromiumLauncher, RenderContext, Renderer};
use crate::types::{
    Component, Incident, IncidentStatus, IncidentUpdate, IndicatorLevel, OverallStatus,
};

const GROUP_EXPAND_WAIT: Duration = Duration::from_secs(1);

const STATUS_SCRIPT: &str = r#"(() => {
    const status = document.querySelector('.page-status');
    const indicator = document.querySelector('.status');
    if (!status || !indicator) return null;
    return {
        description: (status.textContent || '').trim(),
        indicator_class: indicator.className || ''
    };
})()"#;

const EXPAND_GROUPS_SCRIPT: &str = r#"(() => {
    const buttons = document.querySelectorAll('.component-group-expand');
    buttons.forEach((button) => { if (button instanceof HTMLElement) button.click(); });
    return buttons.length;
})()"#;

const COMPONENTS_SCRIPT: &str = r#"(() => {
    const found = [];
    document.querySelectorAll('.component-inner-container').forEach((element, index) => {
        const name = element.querySelector('.name');
        const status = element.querySelector('.component-status');
        const groupEl = element.closest('.component-group');
        const group = groupEl ? groupEl.querySelector('.group-name') : null;
        if (!name || !status) return;
        found.push({
            index,
            name: (name.textContent || '').trim(),
            status_class: status.className || '',
            group: group ? (group.textContent || '').trim() : null
        });
    });
    return found;
})()"#;

const INCIDENTS_SCRIPT: &str = r#"(() => {
    const text = (root, selector) => {
        const el = root.querySelector(selector);
        return el ? (el.textContent || '').trim() : null;
    };
    const found = [];
    document.querySelectorAll('.incident-container').forEach((element, index) => {
        const name = text(element, '.incident-title');
        const status = text(element, '.incident-status');
        if (name === null || status === null) return;
        found.push({
            index,
            name,
            status,
            impact: text(element, '.impact-level'),
            updates: Array.from(element.querySelectorAll('.update')).map((update) => ({
                status: text(update, '.update-status'),
                body: text(update, '.update-body') || '',
                timestamp: text(update, '.update-timestamp')
            }))
        });
    });
    return found;
})()"#;

/// Secondary data source consulted when the API fails.
#[async_trait]
pub trait FallbackSource: Send + Sync {
    async fn scrape_status(&self) -> StatusResult<OverallStatus>;
    async fn scrape_components(&self) -> StatusResult<Vec<Component>>;
    async fn scrape_incidents(&self) -> StatusResult<Vec<Incident>>;
    /// Release any browser resources. Safe to call repeatedly.
    async fn close(&self) -> StatusResult<()>;
}

/// Everything [`WebScraper::scrape_all`] collects in one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedData {
    pub status: OverallStatus,
    pub components: Vec<Component>,
    pub incidents: Vec<Incident>,
}

#[derive(Debug, Deserialize)]
struct ScrapedStatus {
    description: String,
    indicator_class: String,
}

#[derive(Debug, Deserialize)]
struct ScrapedComponent {
    index: usize,
    name: String,
    status_class: String,
    group: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapedUpdate {
    status: Option<String>,
    body: String,
    timestamp: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ScrapedIncident {
    index: usize,
    name: String,
    status: String,
    impact: Option<String>,
    updates: Vec<ScrapedUpdate>,
}

/// Scrapes the rendered status page through a headless browser.
pub struct WebScraper {
    config: ScraperConfig,
    launcher: Arc<dyn BrowserLauncher>,
    browser: Mutex<Option<Arc<dyn Renderer>>>,
}

impl WebScraper {
    /// Scraper backed by a local Chromium install.
    pub fn new(config: ScraperConfig) -> Self {
        let launcher = Arc::new(ChromiumLauncher {
            headless: config.headless,
        });
        Self::with_launcher(config, launcher)
    }

    pub fn with_launcher(config: ScraperConfig, launcher: Arc<dyn BrowserLauncher>) -> Self {
        Self {
            config,
            launcher,
            browser: Mutex::new(None),
        }
    }

    /// Whether a browser has been launched and not yet closed.
    pub async fn is_browser_open(&self) -> bool {
        self.browser.lock().await.is_some()
    }

    /// Scrape status, components and incidents concurrently.
    pub async fn scrape_all(&self) -> StatusResult<ScrapedData> {
        // Each scrape runs to completion so every page gets closed.
        let (status, components, incidents) = tokio::join!(
            self.scrape_status(),
            self.scrape_components(),
            self.scrape_incidents(),
        );

        status
            .and_then(|status| {
                Ok(ScrapedData {
                    status,
                    components: components?,
                    incidents: incidents?,
                })
            })
            .map_err(|e| StatusError::scraper("Failed to scrape all data", e))
    }

    // The lock is held across the launch so concurrent first calls share one
    // browser.
    async fn browser(&self) -> StatusResult<Arc<dyn Renderer>> {
        let mut slot = self.browser.lock().await;
        if let Some(renderer) = slot.as_ref() {
            return Ok(Arc::clone(renderer));
        }

        tracing::debug!("Initializing browser for scraping");
        let renderer = self
            .launcher
            .launch()
            .await
            .map_err(|e| StatusError::scraper("Failed to launch browser", e))?;
        *slot = Some(Arc::clone(&renderer));
        Ok(renderer)
    }

    async fn open_page(&self, what: &str) -> StatusResult<Box<dyn RenderContext>> {
        let browser = self.browser().await?;
        browser
            .new_context()
            .await
            .map_err(|e| StatusError::scraper(format!("Failed to scrape {what}"), e))
    }

    /// Close the page whatever the outcome, then wrap any failure.
    async fn finish<T>(
        &self,
        what: &str,
        page: Box<dyn RenderContext>,
        result: anyhow::Result<T>,
    ) -> StatusResult<T> {
        if let Err(e) = page.close().await {
            tracing::warn!("Failed to close scraper page: {e}");
        }
        result.map_err(|e| StatusError::scraper(format!("Failed to scrape {what}"), e))
    }

    async fn load(&self, page: &mut dyn RenderContext) -> anyhow::Result<()> {
        let nav = page
            .navigate(&self.config.base_url, self.config.timeout_ms)
            .await?;
        tracing::debug!("Loaded {} in {}ms", nav.final_url, nav.load_time_ms);
        Ok(())
    }

    async fn extract_status(&self, page: &mut dyn RenderContext) -> anyhow::Result<OverallStatus> {
        self.load(page).await?;
        page.wait_for_selector(".page-status", self.config.timeout_ms)
            .await?;

        let value = page.execute_js(STATUS_SCRIPT).await?;
        let scraped: Option<ScrapedStatus> = serde_json::from_value(value)?;
        let scraped = scraped.ok_or_else(|| anyhow::anyhow!("Status elements not found"))?;

        let indicator = IndicatorLevel::from_class_list(&scraped.indicator_class);
        Ok(OverallStatus {
            status: indicator.status_level(),
            indicator,
            description: scraped.description,
            last_updated: Utc::now(),
        })
    }

    async fn extract_components(
        &self,
        page: &mut dyn RenderContext,
    ) -> anyhow::Result<Vec<Component>> {
        self.load(page).await?;
        page.wait_for_selector(".components-section", self.config.timeout_ms)
            .await?;

        let expanded = page.execute_js(EXPAND_GROUPS_SCRIPT).await?;
        tracing::debug!("Expanded {expanded} component groups");
        tokio::time::sleep(GROUP_EXPAND_WAIT).await;

        let value = page.execute_js(COMPONENTS_SCRIPT).await?;
        let scraped: Vec<ScrapedComponent> = serde_json::from_value(value)?;

        Ok(scraped
            .into_iter()
            .enumerate()
            .map(|(position, c)| Component {
                id: format!("component-{}", c.index),
                name: c.name,
                status: IndicatorLevel::from_class_list(&c.status_class),
                description: None,
                group: c.group.filter(|g| !g.is_empty()),
                position: position as i64,
                only_show_if_degraded: false,
            })
            .collect())
    }

    async fn extract_incidents(
        &self,
        page: &mut dyn RenderContext,
    ) -> anyhow::Result<Vec<Incident>> {
        self.load(page).await?;

        let present = page.execute_js(&presence_script(".incidents-list")).await?;
        if present.as_bool() != Some(true) {
            return Ok(Vec::new());
        }

        let value = page.execute_js(INCIDENTS_SCRIPT).await?;
        let scraped: Vec<ScrapedIncident> = serde_json::from_value(value)?;
        let now = Utc::now();

        Ok(scraped
            .into_iter()
            .map(|inc| {
                let id = format!("incident-{}", inc.index);
                let updates = inc
                    .updates
                    .into_iter()
                    .enumerate()
                    .map(|(j, update)| {
                        let at = update
                            .timestamp
                            .as_deref()
                            .and_then(parse_timestamp)
                            .unwrap_or(now);
                        IncidentUpdate {
                            id: format!("{id}-update-{j}"),
                            status: update
                                .status
                                .as_deref()
                                .and_then(IncidentStatus::from_label)
                                .unwrap_or(IncidentStatus::Investigating),
                            body: update.body,
                            created_at: at,
                            display_at: at,
                            affected_components: Vec::new(),
                        }
                    })
                    .collect();

                Incident {
                    id,
                    name: inc.name,
                    status: IncidentStatus::from_label(&inc.status)
                        .unwrap_or(IncidentStatus::Investigating),
                    impact: inc
                        .impact
                        .as_deref()
                        .and_then(parse_impact)
                        .unwrap_or(IndicatorLevel::Minor),
                    created_at: now,
                    updated_at: now,
                    resolved_at: None,
                    shortlink: String::new(),
                    updates,
                    affected_components: Vec::new(),
                }
            })
            .collect())
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn parse_impact(label: &str) -> Option<IndicatorLevel> {
    let label = label.trim().to_lowercase();
    IndicatorLevel::ALL
        .into_iter()
        .find(|level| level.as_str() == label)
}

#[async_trait]
impl FallbackSource for WebScraper {
    async fn scrape_status(&self) -> StatusResult<OverallStatus> {
        let mut page = self.open_page("status").await?;
        let result = self.extract_status(page.as_mut()).await;
        self.finish("status", page, result).await
    }

    async fn scrape_components(&self) -> StatusResult<Vec<Component>> {
        let mut page = self.open_page("components").await?;
        let result = self.extract_components(page.as_mut()).await;
        self.finish("components", page, result).await
    }

    async fn scrape_incidents(&self) -> StatusResult<Vec<Incident>> {
        let mut page = self.open_page("incidents").await?;
        let result = self.extract_incidents(page.as_mut()).await;
        self.finish("incidents", page, result).await
    }

    async fn close(&self) -> StatusResult<()> {
        let Some(renderer) = self.browser.lock().await.take() else {
            return Ok(());
        };

        tracing::debug!("Closing scraper browser");
        renderer
            .shutdown()
            .await
            .map_err(|e| StatusError::scraper("Failed to close browser", e))
    }
}
