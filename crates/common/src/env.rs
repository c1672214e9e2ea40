//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::debug;

/// Create the parent directory of the contact data file if one is configured.
pub async fn ensure_data_dir(data_file: Option<&str>) -> anyhow::Result<()> {
    let Some(file) = data_file else {
        debug!("no data file configured; contacts are kept in memory");
        return Ok(());
    };
    let Some(dir) = Path::new(file).parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    Ok(())
}
