//! Build artifact discovery
//!
//! Scans the build output directory (non-recursively) for emitted script and
//! stylesheet bundles.

use crate::errors::SyncError;
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

pub const SCRIPT_EXTENSION: &str = ".js";
pub const STYLESHEET_EXTENSION: &str = ".css";

/// Base file names of the artifacts found in one scan, each list sorted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifacts {
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
}

impl Artifacts {
    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty() && self.stylesheets.is_empty()
    }
}

/// Collect `*.js` and `*.css` files directly inside `output_path`.
///
/// Hidden files and sub-directories are skipped. An empty directory is not an
/// error; a missing or unreadable one is.
pub fn discover_artifacts(output_path: &Path) -> Result<Artifacts, SyncError> {
    let discovery_error = |source| SyncError::Discovery {
        path: output_path.to_path_buf(),
        source,
    };

    let mut artifacts = Artifacts::default();
    for entry in fs::read_dir(output_path).map_err(discovery_error)? {
        let entry = entry.map_err(discovery_error)?;
        if !entry.path().is_file() {
            continue;
        }

        let Ok(name) = entry.file_name().into_string() else {
            debug!("Skipping non UTF-8 file name: {:?}", entry.file_name());
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        if name.ends_with(SCRIPT_EXTENSION) {
            trace!("Found script bundle: {}", name);
            artifacts.scripts.push(name);
        } else if name.ends_with(STYLESHEET_EXTENSION) {
            trace!("Found stylesheet bundle: {}", name);
            artifacts.stylesheets.push(name);
        }
    }

    artifacts.scripts.sort();
    artifacts.stylesheets.sort();

    debug!(
        "Discovered {} script(s) and {} stylesheet(s) in {:?}",
        artifacts.scripts.len(),
        artifacts.stylesheets.len(),
        output_path
    );
    Ok(artifacts)
}
