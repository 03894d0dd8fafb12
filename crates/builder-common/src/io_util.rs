use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::constants;

/// Filesystem helpers for the generator tools.
pub struct IOUtil;

impl IOUtil {
    /// Returns true if the directory contains an action manifest under either
    /// recognized filename convention (`action.yml` or `action.yaml`).
    ///
    /// This is an existence check only; the manifest content is never read.
    pub fn contains_action_manifest(dir: &Path) -> bool {
        let yml = dir.join(constants::path::ACTION_MANIFEST_YML_FILE);
        if yml.is_file() {
            tracing::debug!("Found action manifest '{}'", yml.display());
            return true;
        }

        let yaml = dir.join(constants::path::ACTION_MANIFEST_YAML_FILE);
        if yaml.is_file() {
            tracing::debug!("Found action manifest '{}'", yaml.display());
            return true;
        }

        false
    }

    /// Create a directory and any missing parents. Succeeds if the directory
    /// already exists.
    pub fn ensure_directory(path: &Path) -> Result<()> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))
    }

    /// Write text to a file, truncating any prior content.
    pub fn write_text(path: &Path, content: &str) -> Result<()> {
        fs::write(path, content.as_bytes())
            .with_context(|| format!("Failed to write '{}'", path.display()))
    }
}
