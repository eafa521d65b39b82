//! Failure diagnostics — screenshot the page state when the pipeline dies.

use crate::renderer::RenderContext;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use std::path::{Path, PathBuf};

/// Capture a screenshot of the current page state into `dir`, named with a
/// filesystem-safe timestamp (`error-2026-08-06T10-15-30-123Z.png`).
pub async fn capture_failure(ctx: &dyn RenderContext, dir: &Path) -> Result<PathBuf> {
    let stamp = sanitize_timestamp(&Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
    let path = dir.join(format!("error-{stamp}.png"));

    let bytes = ctx.screenshot().await?;
    tokio::fs::write(&path, &bytes)
        .await
        .with_context(|| format!("failed to write screenshot to {}", path.display()))?;

    Ok(path)
}

/// Replace the characters in an RFC3339 timestamp that are unsafe in file
/// names (`:` and `.`).
fn sanitize_timestamp(stamp: &str) -> String {
    stamp.replace([':', '.'], "-")
}
