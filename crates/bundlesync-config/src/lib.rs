//! Configuration for bundlesync
//!
//! Options are read from an optional `bundlesync.toml`, layered with
//! environment variables and command-line flags by the caller, then validated
//! into an immutable [`SyncConfig`] that is passed explicitly to every run.

pub mod errors;
pub mod options;
pub mod sync_config;

pub use errors::ConfigError;
pub use options::{ConfigLocation, SyncOptions, CONFIG_ENV_VAR, CONFIG_FILE_NAME};
pub use sync_config::{SyncConfig, DEFAULT_OUTPUT_DIR, MANIFEST_SUFFIX};
