//! Post-build synchronization
//!
//! [`LibrarySync`] runs discovery, key derivation, merge and persistence in
//! sequence. [`LibrarySync::on_build_complete`] is the hook a build tool calls;
//! it reports failures through logging and its return value, never by erroring,
//! so a manifest problem cannot fail an otherwise successful build.

use crate::discovery::discover_artifacts;
use crate::errors::SyncError;
use crate::manifest::ManifestDocument;
use crate::manifest_writer::{read_from_path, write_to_path, PersistStatus};
use crate::naming::derive_asset_keys;
use crate::types::LibraryDescriptor;
use bundlesync_config::SyncConfig;
use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info};

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Manifest entry that received the assets
    pub library: String,
    pub scripts: Vec<String>,
    pub stylesheets: Vec<String>,
    pub manifest_file: PathBuf,
    /// False when the manifest already had this content, or on a dry run
    pub written: bool,
}

/// Result of the build hook
#[derive(Debug)]
pub enum SyncOutcome {
    Synced(SyncReport),
    Failed(SyncError),
}

impl SyncOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SyncOutcome::Synced(_))
    }
}

/// Merged document that has not been written yet
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub document: ManifestDocument,
    pub report: SyncReport,
}

/// Synchronizes one build's artifacts into the library manifest
pub struct LibrarySync {
    config: SyncConfig,
}

impl LibrarySync {
    pub fn new(config: SyncConfig) -> Self {
        LibrarySync { config }
    }

    /// Discover, derive and merge without touching the manifest on disk
    pub fn plan(&self) -> Result<SyncPlan, SyncError> {
        let config = &self.config;

        let artifacts = discover_artifacts(config.output_path())?;
        let scripts = derive_asset_keys(
            &artifacts.scripts,
            config.hash_delimiter(),
            config.asset_prefix(),
        );
        let stylesheets = derive_asset_keys(
            &artifacts.stylesheets,
            config.hash_delimiter(),
            config.asset_prefix(),
        );
        debug!("Script keys: {:?}", scripts);
        debug!("Stylesheet keys: {:?}", stylesheets);

        let mut document = read_from_path(config.manifest_file())?;
        let descriptor = LibraryDescriptor::from_keys(&scripts, &stylesheets, config.css_group());
        let library = document.replace_entry(config.library(), &descriptor)?;

        Ok(SyncPlan {
            document,
            report: SyncReport {
                library,
                scripts,
                stylesheets,
                manifest_file: config.manifest_file().to_path_buf(),
                written: false,
            },
        })
    }

    /// Render the merged manifest without writing it
    pub fn preview(&self) -> Result<String, SyncError> {
        self.plan()?.document.to_yaml_string()
    }

    /// Run a full synchronization, propagating errors
    pub fn run(&self) -> Result<SyncReport, SyncError> {
        let SyncPlan { document, mut report } = self.plan()?;
        let status = write_to_path(&document, self.config.manifest_file())?;
        report.written = status == PersistStatus::Written;
        Ok(report)
    }

    /// Build-completion hook. Errors are logged and returned, never raised.
    pub fn on_build_complete(&self) -> SyncOutcome {
        let started = Instant::now();
        match self.run() {
            Ok(report) => {
                info!(
                    "Synced {} script(s), {} stylesheet(s) into '{}' ({}) in {}ms",
                    report.scripts.len(),
                    report.stylesheets.len(),
                    report.library,
                    if report.written { "updated" } else { "unchanged" },
                    started.elapsed().as_millis()
                );
                SyncOutcome::Synced(report)
            }
            Err(err) => {
                error!(
                    "Library manifest sync failed for {:?}: {}",
                    self.config.manifest_file(),
                    error_chain(&err)
                );
                SyncOutcome::Failed(err)
            }
        }
    }
}

/// `err: cause: cause` for logging
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
