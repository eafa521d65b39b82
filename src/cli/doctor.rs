//! Environment readiness check.

use crate::config::SiteConfig;
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability, the screenshot directory, and the configured
/// target URL.
pub async fn run() -> Result<()> {
    println!("Schemescout Doctor");
    println!("==================");
    println!();

    let os = std::env::consts::OS;
    let arch = std::env::consts::ARCH;
    println!("OS:   {os}");
    println!("Arch: {arch}");
    println!();

    // Check Chromium
    let chromium_path = find_chromium();
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install google-chrome or set SCHEMESCOUT_CHROMIUM_PATH."
        ),
    }

    // Check screenshot directory
    let config = SiteConfig::from_env();
    let dir = &config.screenshot_dir;
    let probe = dir.join(".schemescout-doctor");
    match std::fs::write(&probe, b"ok") {
        Ok(()) => {
            let _ = std::fs::remove_file(&probe);
            println!("[OK] Screenshot directory {} is writable", dir.display());
        }
        Err(e) => println!(
            "[!!] Screenshot directory {} is not writable: {e}",
            dir.display()
        ),
    }

    // Show the external contract in effect
    println!("[OK] Target search page: {}", config.search_url);
    println!("     input:  {}", config.input_selector);
    println!("     button: {}", config.button_selector);
    println!("     card:   {}", config.card_selector);

    println!();
    if chromium_path.is_some() {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
        println!("  The service will start, but /get-schemes will return 500 until Chromium is available.");
    }

    Ok(())
}
