//! Raw, unvalidated sync options and the TOML config file they come from
//!
//! Options arrive from three layers: the config file, environment variables
//! and command-line flags. Every field is optional; [`SyncOptions::merge`]
//! layers them so that the most specific source wins.

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "bundlesync.toml";

/// Environment variable holding an explicit config file path
pub const CONFIG_ENV_VAR: &str = "BUNDLESYNC_CONFIG";

/// Unvalidated options as written in `bundlesync.toml` or passed on the command line
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct SyncOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_delimiter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_group: Option<String>,
}

impl SyncOptions {
    /// Parse options from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        debug!("Reading sync options from {:?}", path);
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load options from the resolved config location.
    ///
    /// A missing default file yields empty options; a missing explicit file is an error.
    pub fn load(location: &ConfigLocation) -> Result<Self, ConfigError> {
        if !location.explicit && !location.path.exists() {
            debug!("No config file at {:?}, using defaults", location.path);
            return Ok(SyncOptions::default());
        }
        Self::load_from_path(&location.path)
    }

    /// Layer `overrides` on top of `self`; fields set in `overrides` win
    pub fn merge(self, overrides: SyncOptions) -> SyncOptions {
        SyncOptions {
            output_path: overrides.output_path.or(self.output_path),
            manifest_file: overrides.manifest_file.or(self.manifest_file),
            module_token: overrides.module_token.or(self.module_token),
            hash_delimiter: overrides.hash_delimiter.or(self.hash_delimiter),
            library: overrides.library.or(self.library),
            asset_prefix: overrides.asset_prefix.or(self.asset_prefix),
            css_group: overrides.css_group.or(self.css_group),
        }
    }
}

/// Where the config file is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocation {
    pub path: PathBuf,
    /// Set when the path was requested explicitly and therefore must exist
    pub explicit: bool,
}

impl ConfigLocation {
    /// Resolve the config file path; relative explicit paths are taken from `cwd`
    pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Self {
        match explicit {
            Some(path) => ConfigLocation {
                path: cwd.join(path),
                explicit: true,
            },
            None => ConfigLocation {
                path: cwd.join(CONFIG_FILE_NAME),
                explicit: false,
            },
        }
    }
}
