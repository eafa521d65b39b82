//! Renderer abstraction for browser-based page driving.
//!
//! Defines the `Renderer` and `RenderContext` traits that abstract over the
//! browser engine (currently Chromium via chromiumoxide). The extractor only
//! talks to these traits, which is also what lets the pipeline tests inject
//! failures at every step without a real browser.

pub mod chromium;

use anyhow::Result;
use async_trait::async_trait;

/// A browser engine that can create browsing contexts.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Create a new isolated browsing context (tab). One per search, never
    /// pooled or shared.
    async fn new_context(&self) -> Result<Box<dyn RenderContext>>;
    /// Shut down the browser engine.
    async fn shutdown(&self) -> Result<()>;
    /// Number of currently active contexts.
    fn active_contexts(&self) -> usize;
}

/// A single browsing context used to drive one search.
#[async_trait]
pub trait RenderContext: Send + Sync {
    /// Navigate to a URL and wait for the load to settle, bounded by the
    /// timeout.
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()>;

    /// Wait for an element matching the selector to exist. `Ok(false)` means
    /// the timeout elapsed; `Err` means the probe itself failed.
    async fn wait_for_element(&self, selector: &str, timeout_ms: u64) -> Result<bool>;

    /// Type text into the element keystroke-by-keystroke with the given
    /// inter-key delay, so client-side enabling logic sees each key.
    async fn type_into(&self, selector: &str, text: &str, keystroke_delay_ms: u64) -> Result<()>;

    /// Execute JavaScript in the page and return its JSON result.
    async fn execute_js(&self, script: &str) -> Result<serde_json::Value>;

    /// Get the full rendered page HTML.
    async fn html(&self) -> Result<String>;

    /// Capture a PNG screenshot of the current viewport.
    async fn screenshot(&self) -> Result<Vec<u8>>;

    /// Close this context. Must be called exactly once on every exit path.
    async fn close(self: Box<Self>) -> Result<()>;
}

/// A no-op renderer used when Chromium is unavailable at startup.
///
/// The HTTP surface stays up: `/health` keeps answering, and `/get-schemes`
/// fails with a pipeline error instead of taking the process down.
pub struct NoopRenderer;

#[async_trait]
impl Renderer for NoopRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        Err(anyhow::anyhow!(
            "browser not available — Chromium failed to initialize at startup"
        ))
    }
    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
    fn active_contexts(&self) -> usize {
        0
    }
}
