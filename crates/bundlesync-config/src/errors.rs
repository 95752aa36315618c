use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building a [`crate::SyncConfig`].
///
/// All of these are fatal: they surface before any synchronization run starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {0}: must be a non-empty string")]
    EmptyValue(&'static str),

    #[error("Could not determine the working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    #[error(
        "Cannot derive a default {field}: {} has no parent directory name",
        .cwd.display()
    )]
    NoParentName { field: &'static str, cwd: PathBuf },

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
