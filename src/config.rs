//! Site configuration — the one place the external DOM contract lives.
//!
//! The target portal's markup is an external contract: if the site changes
//! its selectors, this module is the single edit point. Defaults can be
//! overridden per-field via `SCHEMESCOUT_*` environment variables.

use std::path::PathBuf;

/// Default HTTP port for `schemescout serve`.
pub const DEFAULT_PORT: u16 = 3000;

/// Search page of the myScheme portal.
pub const SEARCH_URL: &str = "https://www.myscheme.gov.in/search";

/// CSS selector for the search input.
/// The portal renders a single placeholder-labelled input.
pub const INPUT_SELECTOR: &str = "input[placeholder=\"Search\"]";

/// CSS selector for the search button.
/// The button is aria-labelled and stays `disabled` until the framework
/// registers a non-empty input value.
pub const BUTTON_SELECTOR: &str = "button[aria-label=\"Search\"]";

/// CSS selector for one scheme result card.
pub const CARD_SELECTOR: &str = "div.rounded-xl.shadow-md.bg-white";

/// Selector for the card title; first match in document order wins.
pub const TITLE_SELECTOR: &str = "h5, h4, h3";

/// Selector for the card benefit/description paragraph.
pub const BENEFIT_SELECTOR: &str = "p";

/// Selector for the card's outbound link.
pub const LINK_SELECTOR: &str = "a[href]";

/// Desktop Chrome user agent sent by the browsing context.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Everything the extractor needs to know about the target site and how
/// patiently to drive it.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub search_url: String,
    pub input_selector: String,
    pub button_selector: String,
    pub card_selector: String,
    pub title_selector: String,
    pub benefit_selector: String,
    pub link_selector: String,
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
    /// Bound on initial navigation (goto + load settle).
    pub navigation_timeout_ms: u64,
    /// Bound on the search input appearing.
    pub input_timeout_ms: u64,
    /// Bound on result cards appearing; expiry means "no results", not failure.
    pub results_timeout_ms: u64,
    /// Delay between simulated keystrokes.
    pub keystroke_delay_ms: u64,
    /// Pause after typing before the search is triggered.
    pub settle_delay_ms: u64,
    /// Bound on waiting for the search button's disabled state to clear.
    pub button_poll_timeout_ms: u64,
    pub button_poll_interval_ms: u64,
    /// Where failure screenshots land.
    pub screenshot_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_url: SEARCH_URL.to_string(),
            input_selector: INPUT_SELECTOR.to_string(),
            button_selector: BUTTON_SELECTOR.to_string(),
            card_selector: CARD_SELECTOR.to_string(),
            title_selector: TITLE_SELECTOR.to_string(),
            benefit_selector: BENEFIT_SELECTOR.to_string(),
            link_selector: LINK_SELECTOR.to_string(),
            user_agent: USER_AGENT.to_string(),
            viewport_width: 1280,
            viewport_height: 800,
            navigation_timeout_ms: 60_000,
            input_timeout_ms: 20_000,
            results_timeout_ms: 30_000,
            keystroke_delay_ms: 100,
            settle_delay_ms: 500,
            button_poll_timeout_ms: 5_000,
            button_poll_interval_ms: 200,
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl SiteConfig {
    /// Build a config from defaults plus `SCHEMESCOUT_*` environment overrides.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(v) = std::env::var("SCHEMESCOUT_SEARCH_URL") {
            cfg.search_url = v;
        }
        if let Ok(v) = std::env::var("SCHEMESCOUT_INPUT_SELECTOR") {
            cfg.input_selector = v;
        }
        if let Ok(v) = std::env::var("SCHEMESCOUT_BUTTON_SELECTOR") {
            cfg.button_selector = v;
        }
        if let Ok(v) = std::env::var("SCHEMESCOUT_CARD_SELECTOR") {
            cfg.card_selector = v;
        }
        if let Ok(v) = std::env::var("SCHEMESCOUT_SCREENSHOT_DIR") {
            cfg.screenshot_dir = PathBuf::from(v);
        }
        if let Some(v) = env_u64("SCHEMESCOUT_NAVIGATION_TIMEOUT_MS") {
            cfg.navigation_timeout_ms = v;
        }
        if let Some(v) = env_u64("SCHEMESCOUT_INPUT_TIMEOUT_MS") {
            cfg.input_timeout_ms = v;
        }
        if let Some(v) = env_u64("SCHEMESCOUT_RESULTS_TIMEOUT_MS") {
            cfg.results_timeout_ms = v;
        }
        if let Some(v) = env_u64("SCHEMESCOUT_KEYSTROKE_DELAY_MS") {
            cfg.keystroke_delay_ms = v;
        }
        cfg
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_portal_contract() {
        let cfg = SiteConfig::default();
        assert_eq!(cfg.search_url, "https://www.myscheme.gov.in/search");
        assert_eq!(cfg.card_selector, "div.rounded-xl.shadow-md.bg-white");
        assert_eq!(cfg.navigation_timeout_ms, 60_000);
        assert_eq!(cfg.input_timeout_ms, 20_000);
        assert_eq!(cfg.results_timeout_ms, 30_000);
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("SCHEMESCOUT_CARD_SELECTOR", "div.card");
        std::env::set_var("SCHEMESCOUT_KEYSTROKE_DELAY_MS", "5");
        let cfg = SiteConfig::from_env();
        assert_eq!(cfg.card_selector, "div.card");
        assert_eq!(cfg.keystroke_delay_ms, 5);
        std::env::remove_var("SCHEMESCOUT_CARD_SELECTOR");
        std::env::remove_var("SCHEMESCOUT_KEYSTROKE_DELAY_MS");
    }

    #[test]
    fn test_env_override_ignores_garbage_numbers() {
        std::env::set_var("SCHEMESCOUT_INPUT_TIMEOUT_MS", "soon");
        let cfg = SiteConfig::from_env();
        assert_eq!(cfg.input_timeout_ms, SiteConfig::default().input_timeout_ms);
        std::env::remove_var("SCHEMESCOUT_INPUT_TIMEOUT_MS");
    }
}
