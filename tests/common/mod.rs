//! Shared test doubles: a scripted renderer that stands in for Chromium so
//! the pipeline and the HTTP surface can be exercised without a browser.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use schemescout::config::SiteConfig;
use schemescout::renderer::{RenderContext, Renderer};
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

/// One result card matching the default selectors.
pub const FIXTURE_HTML: &str = r#"<html><body>
<div class="rounded-xl shadow-md bg-white">
  <h5>PM Kisan Samman Nidhi</h5>
  <p>Income support of Rs. 6000 per year</p>
  <a href="/schemes/pm-kisan">View scheme</a>
</div>
</body></html>"#;

/// Behavior knobs for a [`ScriptedRenderer`] run.
///
/// With everything off, a search performs this deterministic op sequence:
/// 1 navigate, 2 wait(input), 3 js(clear), 4 type, 5 js(event volley),
/// 6 js(button probe), 7 js(click), 8 wait(cards), 9 html.
#[derive(Clone, Default)]
pub struct Script {
    /// Return a hard error from the op with this 1-based index.
    pub fail_at: Option<usize>,
    /// The search input never appears (wait returns false).
    pub input_wait_times_out: bool,
    /// Result cards never appear (wait returns false).
    pub card_wait_times_out: bool,
    /// The search button never enables, forcing the Enter fallback.
    pub button_stays_disabled: bool,
}

pub struct ScriptedRenderer {
    script: Script,
    config: SiteConfig,
    pub close_count: Arc<AtomicUsize>,
    pub enter_dispatched: Arc<AtomicBool>,
}

impl ScriptedRenderer {
    pub fn new(script: Script, config: SiteConfig) -> Self {
        Self {
            script,
            config,
            close_count: Arc::new(AtomicUsize::new(0)),
            enter_dispatched: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn closes(&self) -> usize {
        self.close_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Renderer for ScriptedRenderer {
    async fn new_context(&self) -> Result<Box<dyn RenderContext>> {
        Ok(Box::new(ScriptedContext {
            script: self.script.clone(),
            config: self.config.clone(),
            ops: AtomicUsize::new(0),
            close_count: Arc::clone(&self.close_count),
            enter_dispatched: Arc::clone(&self.enter_dispatched),
        }))
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn active_contexts(&self) -> usize {
        0
    }
}

pub struct ScriptedContext {
    script: Script,
    config: SiteConfig,
    ops: AtomicUsize,
    close_count: Arc<AtomicUsize>,
    enter_dispatched: Arc<AtomicBool>,
}

impl ScriptedContext {
    /// Advance the op counter; error if this op is the scripted failure.
    fn step(&self, what: &str) -> Result<()> {
        let op = self.ops.fetch_add(1, Ordering::SeqCst) + 1;
        if self.script.fail_at == Some(op) {
            return Err(anyhow!("injected failure at op {op} ({what})"));
        }
        Ok(())
    }
}

#[async_trait]
impl RenderContext for ScriptedContext {
    async fn navigate(&mut self, _url: &str, _timeout_ms: u64) -> Result<()> {
        self.step("navigate")
    }

    async fn wait_for_element(&self, selector: &str, _timeout_ms: u64) -> Result<bool> {
        self.step("wait_for_element")?;
        if selector == self.config.input_selector && self.script.input_wait_times_out {
            return Ok(false);
        }
        if selector == self.config.card_selector && self.script.card_wait_times_out {
            return Ok(false);
        }
        Ok(true)
    }

    async fn type_into(&self, _selector: &str, _text: &str, _delay_ms: u64) -> Result<()> {
        self.step("type_into")
    }

    async fn execute_js(&self, script: &str) -> Result<serde_json::Value> {
        self.step("execute_js")?;
        if script.contains("btn.disabled") {
            // Button state probe
            return Ok(serde_json::json!({
                "found": true,
                "enabled": !self.script.button_stays_disabled,
            }));
        }
        if script.contains("'Enter'") {
            self.enter_dispatched.store(true, Ordering::SeqCst);
        }
        Ok(serde_json::json!({ "success": true }))
    }

    async fn html(&self) -> Result<String> {
        self.step("html")?;
        Ok(FIXTURE_HTML.to_string())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        // Diagnostics are best-effort and never consult the fail script.
        Ok(vec![0x89, b'P', b'N', b'G'])
    }

    async fn close(self: Box<Self>) -> Result<()> {
        self.close_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A config with timings short enough for tests and screenshots routed into
/// a scratch directory.
pub fn test_config(screenshot_dir: &Path) -> SiteConfig {
    SiteConfig {
        navigation_timeout_ms: 50,
        input_timeout_ms: 50,
        results_timeout_ms: 50,
        keystroke_delay_ms: 0,
        settle_delay_ms: 0,
        button_poll_timeout_ms: 10,
        button_poll_interval_ms: 1,
        screenshot_dir: screenshot_dir.to_path_buf(),
        ..SiteConfig::default()
    }
}
