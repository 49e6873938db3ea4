use std::path::{Path, PathBuf};

use assessa_core::files;

/// Directory name under the platform data directory.
const APP_DIR: &str = "com.assessa.app";

/// Resolve the data directory: an explicit `--data-dir` (or
/// `ASSESSA_DATA_DIR`, which clap folds into the same flag) wins, otherwise
/// the platform data directory.
pub fn data_dir(explicit: Option<PathBuf>) -> eyre::Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join(APP_DIR))
}

pub fn document_path(data_dir: &Path) -> PathBuf {
    data_dir.join(files::DOCUMENT)
}
