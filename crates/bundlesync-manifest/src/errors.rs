use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during a synchronization run
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to read output directory {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read manifest {}: {source}", .path.display())]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid manifest {}: {reason}", .path.display())]
    InvalidManifest { path: PathBuf, reason: String },

    #[error("Manifest has no library entry to update")]
    NoLibraryEntry,

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("Failed to write manifest {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Coarse classification of a [`SyncError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncErrorKind {
    Discovery,
    ManifestParse,
    Persist,
}

impl SyncError {
    pub fn kind(&self) -> SyncErrorKind {
        match self {
            SyncError::Discovery { .. } => SyncErrorKind::Discovery,
            SyncError::ManifestRead { .. }
            | SyncError::ManifestParse { .. }
            | SyncError::InvalidManifest { .. }
            | SyncError::NoLibraryEntry => SyncErrorKind::ManifestParse,
            SyncError::Serialize(_) | SyncError::Persist { .. } => SyncErrorKind::Persist,
        }
    }
}
