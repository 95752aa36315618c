use crate::common::{resolve_config, SyncArgs};
use crate::logger;
use crate::GlobalOpts;
use bundlesync_manifest::{LibrarySync, SyncOutcome, SyncReport};
use clap::Args;
use colored::Colorize;
use std::process::ExitCode;

/// Exit status for invalid configuration
pub const CONFIG_ERROR_EXIT: u8 = 2;

#[derive(Args, Debug, Clone)]
pub struct SyncCommand {
    #[command(flatten)]
    pub args: SyncArgs,

    /// Print the merged manifest instead of writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Exit with a failure status when synchronization fails
    #[arg(long)]
    pub strict: bool,
}

/// Post-build entry point.
///
/// A failed run is logged but exits successfully unless `--strict` is set,
/// so the build that invoked us is not marked as failed.
pub fn handle_sync(cmd: SyncCommand, opts: &GlobalOpts) -> ExitCode {
    let config = match resolve_config(opts, &cmd.args) {
        Ok(config) => config,
        Err(e) => {
            logger::error(&format!("Invalid configuration: {:#}", e));
            return ExitCode::from(CONFIG_ERROR_EXIT);
        }
    };

    logger::step(&format!(
        "Syncing {} into {}",
        config.output_path().display(),
        config.manifest_file().display()
    ));
    let sync = LibrarySync::new(config);

    if cmd.dry_run {
        return match sync.preview() {
            Ok(rendered) => {
                print!("{}", rendered);
                logger::info("Dry run: manifest not written");
                ExitCode::SUCCESS
            }
            Err(e) => {
                logger::error(&format!("Dry run failed: {}", e));
                failure_code(cmd.strict)
            }
        };
    }

    match sync.on_build_complete() {
        SyncOutcome::Synced(report) => {
            if report.scripts.is_empty() && report.stylesheets.is_empty() {
                logger::warn("No script or stylesheet bundles found in the output directory");
            }
            logger::success(&summary(&report));
            ExitCode::SUCCESS
        }
        SyncOutcome::Failed(e) => {
            // The hook already logged the failure with its full cause chain
            tracing::debug!("Sync error kind: {:?}", e.kind());
            if opts.verbosity_level() > 0 {
                logger::show_log_path();
            }
            failure_code(cmd.strict)
        }
    }
}

fn failure_code(strict: bool) -> ExitCode {
    if strict {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn summary(report: &SyncReport) -> String {
    let manifest = report
        .manifest_file
        .file_name()
        .map_or_else(|| report.manifest_file.display().to_string(), |n| {
            n.to_string_lossy().to_string()
        });
    let status = if report.written {
        "updated".normal()
    } else {
        "already up to date".dimmed()
    };
    format!(
        "Synced {} script(s), {} stylesheet(s) into '{}' in {} ({})",
        report.scripts.len(),
        report.stylesheets.len(),
        report.library,
        manifest,
        status
    )
}
