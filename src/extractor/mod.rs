//! Scheme extractor — drives one browsing context through the fixed
//! navigate → wait → type → trigger → wait → extract sequence and maps the
//! rendered result cards into [`SchemeRecord`]s.
//!
//! Resource discipline: exactly one browsing context is acquired per search
//! and released exactly once on every exit path — success, empty result, or
//! error. `search` owns that guarantee; `drive` never touches the context's
//! lifecycle.

pub mod cards;
pub mod scripts;
pub mod snapshot;

pub use cards::SchemeRecord;

use crate::config::SiteConfig;
use crate::error::SchemeError;
use crate::renderer::{RenderContext, Renderer};
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct SchemeScraper {
    renderer: Arc<dyn Renderer>,
    config: SiteConfig,
}

impl SchemeScraper {
    pub fn new(renderer: Arc<dyn Renderer>, config: SiteConfig) -> Self {
        Self { renderer, config }
    }

    /// Run one search. Returns the extracted records — possibly empty, which
    /// is an outcome, not an error.
    pub async fn search(&self, query: &str) -> Result<Vec<SchemeRecord>, SchemeError> {
        let mut ctx = self.renderer.new_context().await?;

        let outcome = self.drive(ctx.as_mut(), query).await;

        if let Err(err) = &outcome {
            warn!(error = %err, "search pipeline failed");
            match snapshot::capture_failure(ctx.as_ref(), &self.config.screenshot_dir).await {
                Ok(path) => info!(path = %path.display(), "saved failure screenshot"),
                Err(snap_err) => warn!(error = %snap_err, "could not capture failure screenshot"),
            }
        }

        // The one unconditional step: the context is released here and only
        // here, whatever drive() did.
        if let Err(close_err) = ctx.close().await {
            warn!(error = %close_err, "failed to close browsing context");
        }

        outcome
    }

    /// The sequential pipeline. Each step's DOM state is a precondition for
    /// the next, so there is nothing to parallelize.
    async fn drive(
        &self,
        ctx: &mut dyn RenderContext,
        query: &str,
    ) -> Result<Vec<SchemeRecord>, SchemeError> {
        let cfg = &self.config;

        ctx.navigate(&cfg.search_url, cfg.navigation_timeout_ms)
            .await
            .map_err(|source| SchemeError::Navigation {
                url: cfg.search_url.clone(),
                source,
            })?;
        debug!(url = %cfg.search_url, "search page loaded");

        if !ctx
            .wait_for_element(&cfg.input_selector, cfg.input_timeout_ms)
            .await?
        {
            return Err(SchemeError::ElementNotFound {
                selector: cfg.input_selector.clone(),
                timeout_ms: cfg.input_timeout_ms,
            });
        }

        ctx.execute_js(&scripts::clear_input(&cfg.input_selector))
            .await?;
        ctx.type_into(&cfg.input_selector, query, cfg.keystroke_delay_ms)
            .await?;

        // Typing alone does not reliably reach a framework-controlled input's
        // reactive state; re-assert the value through the native setter and
        // fire the event volley the framework listens for.
        ctx.execute_js(&scripts::sync_input_events(&cfg.input_selector, query))
            .await?;
        tokio::time::sleep(Duration::from_millis(cfg.settle_delay_ms)).await;

        self.trigger_search(ctx, query).await?;

        if !ctx
            .wait_for_element(&cfg.card_selector, cfg.results_timeout_ms)
            .await?
        {
            info!(query, "no result cards appeared within the wait bound");
            return Ok(Vec::new());
        }

        let html = ctx.html().await?;
        let records = cards::parse_cards(&html, cfg, Utc::now().date_naive())?;
        info!(query, count = records.len(), "extracted scheme records");
        Ok(records)
    }

    /// Trigger the search: poll the button until its disabled state clears,
    /// then click it. If it never enables, fall back to an Enter dispatch on
    /// the input.
    async fn trigger_search(
        &self,
        ctx: &mut dyn RenderContext,
        query: &str,
    ) -> Result<(), SchemeError> {
        let cfg = &self.config;
        let deadline = Instant::now() + Duration::from_millis(cfg.button_poll_timeout_ms);

        loop {
            let probe = ctx.execute_js(&scripts::button_state(&cfg.button_selector)).await?;
            let enabled = probe.get("enabled").and_then(|v| v.as_bool()).unwrap_or(false);

            if enabled {
                let clicked = ctx
                    .execute_js(&scripts::click_button(&cfg.button_selector))
                    .await?;
                if scripts::succeeded(&clicked) {
                    debug!(query, "triggered search via button click");
                    return Ok(());
                }
                // Button vanished between probe and click; fall through to
                // the Enter fallback.
                break;
            }

            if Instant::now() >= deadline {
                break;
            }
            tokio::time::sleep(Duration::from_millis(cfg.button_poll_interval_ms)).await;
        }

        warn!(query, "search button not clickable, falling back to Enter dispatch");
        let pressed = ctx
            .execute_js(&scripts::press_enter(&cfg.input_selector))
            .await?;
        if !scripts::succeeded(&pressed) {
            return Err(SchemeError::Automation(anyhow::anyhow!(
                "search input '{}' disappeared before the search could be triggered",
                cfg.input_selector
            )));
        }
        Ok(())
    }
}
