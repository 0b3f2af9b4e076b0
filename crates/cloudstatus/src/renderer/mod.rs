//! Renderer abstraction for browser-based page scraping.
//!
//! Defines the `Renderer` and `RenderContext` traits that abstract over
//! the browser engine (currently Chromium via chromiumoxide), and the
//! `BrowserLauncher` used to start one lazily.

pub mod chromium;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use chromium::{find_chromium, ChromiumLauncher, ChromiumRenderer};

const SELECTOR_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Result of navigating to a URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationResult {
    /// The final URL after any redirects.
    pub final_url: String,
    /// Time taken to load the page in milliseconds.
    pub load_time_ms: u64,
}

/// A browser engine that can create rendering contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Create a new browser context (tab).
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently active contexts.
    fn active_contexts(&self) -> usize;
}

/// A single browser context (tab) for rendering pages.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL with a timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<NavigationResult>;
    /// Execute JavaScript in the page context and return the result.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Wait until `selector` matches an element, polling the page.
    async fn wait_for_selector(&self, selector: &str, timeout_ms: u64) -> Result<()> {
        let script = presence_script(selector);
        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);

        loop {
            if self.execute_js(&script).await?.as_bool() == Some(true) {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                bail!("timed out after {timeout_ms}ms waiting for selector {selector}");
            }
            tokio::time::sleep(SELECTOR_POLL_INTERVAL).await;
        }
    }

    /// Close this context.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// Script that evaluates to `true` when `selector` matches an element.
pub fn presence_script(selector: &str) -> String {
    format!(
        "document.querySelector({}) !== null",
        serde_json::Value::from(selector)
    )
}

/// Starts a browser engine on demand.
#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Arc<dyn Renderer>>;
}
