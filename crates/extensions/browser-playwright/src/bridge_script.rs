//! Bridge JavaScript shipped with the crate.

use std::path::{Path, PathBuf};

/// Embedded bridge script.
pub(crate) const BRIDGE_SCRIPT: &str = include_str!("bridge_script.js");

/// Write the embedded script into `dir` and return its path.
pub(crate) async fn write_bridge_script(dir: &Path) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("demoreel_playwright_bridge_{}.js", std::process::id()));
    tokio::fs::write(&path, BRIDGE_SCRIPT).await?;
    Ok(path)
}
