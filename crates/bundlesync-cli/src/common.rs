//! Common types and utilities shared across commands

use bundlesync_config::{ConfigError, ConfigLocation, SyncConfig, SyncOptions, CONFIG_ENV_VAR};
use clap::{Args, Parser};
use std::path::{Path, PathBuf};

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Only print errors")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        env = CONFIG_ENV_VAR,
        value_name = "FILE",
        help = "Config file (default: ./bundlesync.toml)"
    )]
    pub config: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: warn only (also when quiet)
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Sync options accepted as flags or environment variables
#[derive(Args, Debug, Clone, Default)]
pub struct SyncArgs {
    /// Directory containing the build output
    #[arg(long, env = "BUNDLESYNC_OUTPUT_PATH", value_name = "DIR")]
    pub output_path: Option<String>,

    /// Library manifest to update
    #[arg(long, env = "BUNDLESYNC_MANIFEST_FILE", value_name = "FILE")]
    pub manifest_file: Option<String>,

    /// Module identifier (default: name of the parent directory)
    #[arg(long, env = "BUNDLESYNC_MODULE_TOKEN", value_name = "NAME")]
    pub module_token: Option<String>,

    /// Token separating asset names from build hashes (default: module token)
    #[arg(long, env = "BUNDLESYNC_HASH_DELIMITER", value_name = "TOKEN")]
    pub hash_delimiter: Option<String>,

    /// Manifest entry to update (default: first entry)
    #[arg(long, env = "BUNDLESYNC_LIBRARY", value_name = "NAME")]
    pub library: Option<String>,

    /// Prefix for asset keys (default: output path as given)
    #[arg(long, env = "BUNDLESYNC_ASSET_PREFIX", value_name = "PREFIX")]
    pub asset_prefix: Option<String>,

    /// Nest stylesheets under this group, e.g. layout or theme
    #[arg(long, env = "BUNDLESYNC_CSS_GROUP", value_name = "GROUP")]
    pub css_group: Option<String>,
}

impl SyncArgs {
    pub fn to_options(&self) -> SyncOptions {
        SyncOptions {
            output_path: self.output_path.clone(),
            manifest_file: self.manifest_file.clone(),
            module_token: self.module_token.clone(),
            hash_delimiter: self.hash_delimiter.clone(),
            library: self.library.clone(),
            asset_prefix: self.asset_prefix.clone(),
            css_group: self.css_group.clone(),
        }
    }
}

/// Config file location for the current invocation
pub fn config_location(opts: &GlobalOpts, cwd: &Path) -> ConfigLocation {
    ConfigLocation::resolve(opts.config.as_deref(), cwd)
}

/// Process working directory; defaults and relative paths resolve against it
pub fn working_directory() -> Result<PathBuf, ConfigError> {
    std::env::current_dir().map_err(ConfigError::WorkingDirectory)
}

/// Layer config file, environment and flags into a validated config
pub fn resolve_config(opts: &GlobalOpts, args: &SyncArgs) -> anyhow::Result<SyncConfig> {
    let cwd = working_directory()?;
    resolve_config_in(opts, args, &cwd)
}

fn resolve_config_in(
    opts: &GlobalOpts,
    args: &SyncArgs,
    cwd: &Path,
) -> anyhow::Result<SyncConfig> {
    let location = config_location(opts, cwd);
    let file_options = SyncOptions::load(&location)?;
    let config = SyncConfig::from_options(&file_options.merge(args.to_options()), cwd)?;
    Ok(config)
}
