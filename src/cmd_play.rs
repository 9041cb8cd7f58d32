//! `play` and `validate` command handlers.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use demoreel_browser_playwright::{PlaywrightBridgeConfig, PlaywrightLauncher};
use demoreel_runtime::{DemoPlayer, LineControl, PlayOptions, PlaybackReport, PlayerConfig, PlayerError};
use demoreel_script::{DemoScript, ScriptError, ScriptLoader};

/// Bridge settings for the Playwright backend.
pub(crate) fn bridge_config(config: &PlayerConfig) -> PlaywrightBridgeConfig {
    PlaywrightBridgeConfig {
        node_path: config.bridge.node_path.clone(),
        bridge_script_path: None,
        response_timeout_ms: config.bridge.response_timeout_secs.saturating_mul(1000),
    }
}

/// Play `script` in a Playwright-driven Chromium.
pub(crate) async fn play(
    config: PlayerConfig,
    loader: &ScriptLoader,
    script: &Path,
    options: PlayOptions,
) -> Result<PlaybackReport, PlayerError> {
    println!("\n🎬 demoreel\n");

    let launcher = Arc::new(PlaywrightLauncher::new(bridge_config(&config)));
    let control = Arc::new(LineControl::stdio());
    let player = DemoPlayer::with_config(launcher, control, config);

    let report = player.play_file(loader, script, &options).await?;

    println!("\n✅ Demo completed: {}", report.name);
    println!("   Steps:  {}", report.steps_executed);
    println!("   Video:  {}", report.video_path.display());
    if let Some(state) = &report.storage_state_saved {
        println!("   Session state: {}", state.display());
    }
    Ok(report)
}

/// Validate `script` and print a summary. Never opens a browser.
pub(crate) fn validate(loader: &ScriptLoader, script: &Path) -> Result<DemoScript, ScriptError> {
    println!("\n📋 Validating demo script...\n");
    let demo = loader.load(script)?;
    info!("Validated {} ({} steps)", script.display(), demo.steps.len());

    println!("✅ Script is valid!\n");
    println!("Demo:     {}", demo.name);
    println!("Steps:    {}", demo.steps.len());
    println!("Base URL: {}", demo.config.base_url);
    println!();
    Ok(demo)
}
