//! Pipeline resource-safety and outcome tests against the scripted renderer:
//! the browsing context is released exactly once on every exit path, and a
//! result-card timeout is an empty outcome rather than an error.

mod common;

use common::{test_config, Script, ScriptedRenderer};
use schemescout::error::SchemeError;
use schemescout::extractor::SchemeScraper;
use std::sync::Arc;
use tempfile::TempDir;

fn scraper_with(script: Script) -> (SchemeScraper, Arc<ScriptedRenderer>, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let config = test_config(dir.path());
    let renderer = Arc::new(ScriptedRenderer::new(script, config.clone()));
    let scraper = SchemeScraper::new(renderer.clone(), config);
    (scraper, renderer, dir)
}

#[tokio::test]
async fn test_success_closes_context_once() {
    let (scraper, renderer, _dir) = scraper_with(Script::default());

    let records = scraper.search("Schemes related to education").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "PM Kisan Samman Nidhi");
    assert_eq!(records[0].benefit, "Income support of Rs. 6000 per year");
    assert_eq!(records[0].url, "https://www.myscheme.gov.in/schemes/pm-kisan");
    assert_eq!(renderer.closes(), 1);
}

#[tokio::test]
async fn test_failure_at_every_step_closes_context_exactly_once() {
    // Ops 1-9: navigate, input wait, clear, type, event volley, button probe,
    // click, card wait, html. A hard failure injected at each must surface an
    // error and still release the context exactly once.
    for fail_at in 1..=9 {
        let (scraper, renderer, _dir) = scraper_with(Script {
            fail_at: Some(fail_at),
            ..Script::default()
        });

        let result = scraper.search("In Kerala").await;
        assert!(result.is_err(), "op {fail_at} should have failed the search");
        assert_eq!(
            renderer.closes(),
            1,
            "context not released exactly once when op {fail_at} fails"
        );
    }
}

#[tokio::test]
async fn test_card_wait_timeout_is_empty_result_not_error() {
    let (scraper, renderer, _dir) = scraper_with(Script {
        card_wait_times_out: true,
        ..Script::default()
    });

    let records = scraper.search("In Kerala").await.unwrap();
    assert!(records.is_empty());
    assert_eq!(renderer.closes(), 1);
}

#[tokio::test]
async fn test_input_wait_timeout_is_element_not_found() {
    let (scraper, renderer, dir) = scraper_with(Script {
        input_wait_times_out: true,
        ..Script::default()
    });

    let err = scraper.search("In Kerala").await.unwrap_err();
    assert!(matches!(err, SchemeError::ElementNotFound { .. }));
    assert_eq!(renderer.closes(), 1);

    // The failure left a diagnostic screenshot behind.
    let shots: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.starts_with("error-") && n.ends_with(".png"))
        .collect();
    assert_eq!(shots.len(), 1, "expected one failure screenshot, got {shots:?}");
}

#[tokio::test]
async fn test_navigation_failure_maps_to_navigation_error() {
    let (scraper, renderer, _dir) = scraper_with(Script {
        fail_at: Some(1),
        ..Script::default()
    });

    let err = scraper.search("In Kerala").await.unwrap_err();
    assert!(matches!(err, SchemeError::Navigation { .. }));
    assert!(err.to_string().contains("myscheme.gov.in"));
    assert_eq!(renderer.closes(), 1);
}

#[tokio::test]
async fn test_disabled_button_falls_back_to_enter_dispatch() {
    let (scraper, renderer, _dir) = scraper_with(Script {
        button_stays_disabled: true,
        ..Script::default()
    });

    let records = scraper.search("In Kerala").await.unwrap();
    assert_eq!(records.len(), 1);
    assert!(
        renderer.enter_dispatched.load(std::sync::atomic::Ordering::SeqCst),
        "Enter fallback was not dispatched"
    );
    assert_eq!(renderer.closes(), 1);
}
