//! Chromium-based renderer using chromiumoxide.

use super::{RenderContext, Renderer};
use crate::config::SiteConfig;
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use rand::Rng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often `wait_for_element` probes the DOM.
const ELEMENT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Find the Chromium binary path.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. SCHEMESCOUT_CHROMIUM_PATH env
    if let Ok(p) = std::env::var("SCHEMESCOUT_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    if let Ok(path) = which::which("google-chrome") {
        return Some(path);
    }
    if let Ok(path) = which::which("chromium") {
        return Some(path);
    }
    if let Ok(path) = which::which("chromium-browser") {
        return Some(path);
    }

    // 3. Common macOS location
    if cfg!(target_os = "macos") {
        let common =
            PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome");
        if common.exists() {
            return Some(common);
        }
    }

    None
}

/// Chromium-based renderer. One headless browser process for the lifetime of
/// the service; each search gets its own page.
pub struct ChromiumRenderer {
    browser: Browser,
    active_count: Arc<AtomicUsize>,
}

impl ChromiumRenderer {
    /// Launch a headless Chromium instance configured for the target portal.
    pub async fn new(config: &SiteConfig) -> Result<Self> {
        let chrome_path = find_chromium().context(
            "Chromium not found. Install google-chrome or set SCHEMESCOUT_CHROMIUM_PATH.",
        )?;

        let browser_config = BrowserConfig::builder()
            .chrome_executable(chrome_path)
            .window_size(config.viewport_width, config.viewport_height)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-setuid-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg(format!("--user-agent={}", config.user_agent))
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .context("failed to launch Chromium")?;

        // Spawn the CDP handler task
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        Ok(Self {
            browser,
            active_count: Arc::new(AtomicUsize::new(0)),
        })
    }
}

#[async_trait]
impl Renderer for ChromiumRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;

        self.active_count.fetch_add(1, Ordering::Relaxed);

        Ok(Box::new(ChromiumContext {
            page,
            active_count: Arc::clone(&self.active_count),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        // Browser process is killed when ChromiumRenderer is dropped
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        self.active_count.load(Ordering::Relaxed)
    }
}

/// A single Chromium page driving one search.
pub struct ChromiumContext {
    page: Page,
    active_count: Arc<AtomicUsize>,
}

#[async_trait]
impl RenderContext for ChromiumContext {
    async fn navigate(&mut self, url: &str, timeout_ms: u64) -> Result<()> {
        let load = async {
            self.page.goto(url).await?;
            // goto resolves when the response arrives; wait for the load to
            // settle before the caller starts probing the DOM.
            self.page.wait_for_navigation().await?;
            Ok::<_, anyhow::Error>(())
        };

        match tokio::time::timeout(Duration::from_millis(timeout_ms), load).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => bail!("navigation failed: {e}"),
            Err(_) => bail!("navigation timed out after {timeout_ms}ms"),
        }
    }

    async fn wait_for_element(&self, selector: &str, timeout_ms: u64) -> Result<bool> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(ELEMENT_POLL_INTERVAL).await;
        }
    }

    async fn type_into(&self, selector: &str, text: &str, keystroke_delay_ms: u64) -> Result<()> {
        let element = self
            .page
            .find_element(selector)
            .await
            .with_context(|| format!("input element '{selector}' not found"))?;

        // Click to focus, then feed one key at a time so the portal's
        // client-side enabling logic sees each keystroke.
        element
            .click()
            .await
            .with_context(|| format!("failed to focus '{selector}'"))?;

        let mut buf = [0u8; 4];
        for ch in text.chars() {
            element
                .type_str(&*ch.encode_utf8(&mut buf))
                .await
                .with_context(|| format!("failed to type into '{selector}'"))?;

            if keystroke_delay_ms > 0 {
                let jitter = rand::thread_rng().gen_range(0..=keystroke_delay_ms / 4);
                tokio::time::sleep(Duration::from_millis(keystroke_delay_ms + jitter)).await;
            }
        }
        Ok(())
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(script)
            .await
            .context("JS execution failed")?;

        result
            .into_value()
            .map_err(|e| anyhow::anyhow!("failed to convert JS result: {e:?}"))
    }

    async fn html(&self) -> Result<String> {
        self.page
            .content()
            .await
            .context("failed to get page HTML")
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
            )
            .await
            .context("failed to capture screenshot")
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.active_count.fetch_sub(1, Ordering::Relaxed);
        let _ = self.page.close().await;
        Ok(())
    }
}
