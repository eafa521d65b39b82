//! Error kinds for the scheme-search pipeline.
//!
//! Every error is local to one request: nothing here is retried and nothing
//! crashes the service process. An empty result set is an outcome, not an
//! error, and never appears in this enum.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemeError {
    /// The request carried no usable search criteria. Surfaced as 400.
    #[error("at least one search parameter is required (category, profession, state, or income)")]
    MissingCriteria,

    /// The target page did not load within bounds. Surfaced as 500.
    #[error("navigation to {url} failed: {source}")]
    Navigation {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    /// A required element never appeared in the DOM. Surfaced as 500.
    #[error("element '{selector}' did not appear within {timeout_ms}ms")]
    ElementNotFound { selector: String, timeout_ms: u64 },

    /// Any other automation step failure, caught once at the top of the
    /// pipeline. Surfaced as 500.
    #[error("browser automation failed: {0}")]
    Automation(#[from] anyhow::Error),
}
