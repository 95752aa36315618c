use bundlesync::{
    commands::{
        config::{self, ConfigAction},
        sync::{self, SyncCommand},
    },
    logger, GlobalOpts,
};
use clap::{Parser, Subcommand};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "bundlesync")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Library manifest sync for front-end builds",
    long_about = "bundlesync registers the script and stylesheet bundles of a front-end build in the module's libraries manifest. Run it once after every build."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sync build output into the libraries manifest (post-build hook)
    Sync(SyncCommand),
    /// Inspect bundlesync configuration
    #[command(subcommand_required = true, arg_required_else_help = true)]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.quiet) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }

    match cli.command {
        Commands::Sync(cmd) => sync::handle_sync(cmd, &cli.global),
        Commands::Config { action } => config::handle_config(action, &cli.global),
    }
}
