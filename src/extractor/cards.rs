//! Result-card parsing — rendered HTML in, `SchemeRecord`s out.
//!
//! Runs entirely outside the browser so it can be tested against HTML
//! fixtures. Field semantics: title is the first heading in document order
//! (h5/h4/h3), benefit is the first paragraph, url is the first anchor's href
//! resolved against the page URL. Missing fields fall back to placeholders;
//! a missing link yields an empty url.

use crate::config::SiteConfig;
use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use url::Url;

pub const NO_TITLE: &str = "No title";
pub const NO_DESCRIPTION: &str = "No description";

/// One scheme entry scraped from a result card. Created transiently during
/// extraction and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemeRecord {
    pub name: String,
    pub benefit: String,
    pub url: String,
    pub last_updated: NaiveDate,
}

/// Parse all result cards out of the rendered page.
pub fn parse_cards(html: &str, config: &SiteConfig, stamp: NaiveDate) -> Result<Vec<SchemeRecord>> {
    let card_sel = parse_selector(&config.card_selector)?;
    let title_sel = parse_selector(&config.title_selector)?;
    let benefit_sel = parse_selector(&config.benefit_selector)?;
    let link_sel = parse_selector(&config.link_selector)?;
    let base = Url::parse(&config.search_url).ok();

    let document = Html::parse_document(html);
    let mut records = Vec::new();

    for card in document.select(&card_sel) {
        let name = card
            .select(&title_sel)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        let benefit = card
            .select(&benefit_sel)
            .next()
            .map(element_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());

        let url = card
            .select(&link_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_href(base.as_ref(), href))
            .unwrap_or_default();

        records.push(SchemeRecord {
            name,
            benefit,
            url,
            last_updated: stamp,
        });
    }

    Ok(records)
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("invalid selector '{selector}': {e}"))
}

fn element_text(el: scraper::ElementRef<'_>) -> String {
    el.text().collect::<Vec<_>>().join(" ").trim().to_string()
}

/// Resolve a possibly-relative href against the search page URL. Hrefs that
/// resolve nowhere are passed through as written.
fn resolve_href(base: Option<&Url>, href: &str) -> String {
    match base {
        Some(base) => base
            .join(href)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| href.to_string()),
        None => href.to_string(),
    }
}
