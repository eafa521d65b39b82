//! Start the scheme-search HTTP service.

use crate::config::SiteConfig;
use crate::extractor::SchemeScraper;
use crate::renderer::chromium::ChromiumRenderer;
use crate::renderer::{NoopRenderer, Renderer};
use crate::rest;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Initialize tracing, bring up the browser engine, and serve until ctrl-c.
pub async fn run(port: u16) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("schemescout=info".parse().unwrap()),
        )
        .init();

    info!("starting schemescout v{}", env!("CARGO_PKG_VERSION"));

    let config = SiteConfig::from_env();

    let renderer: Arc<dyn Renderer> = match ChromiumRenderer::new(&config).await {
        Ok(renderer) => {
            info!("Chromium renderer initialized");
            Arc::new(renderer)
        }
        Err(e) => {
            warn!("failed to initialize Chromium: {e:#}");
            warn!("serving without a browser; /get-schemes will fail until Chromium is available");
            Arc::new(NoopRenderer)
        }
    };

    let scraper = Arc::new(SchemeScraper::new(renderer, config));
    rest::start(port, scraper).await
}
