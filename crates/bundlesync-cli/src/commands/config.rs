use crate::commands::sync::CONFIG_ERROR_EXIT;
use crate::common::{config_location, resolve_config, working_directory, SyncArgs};
use crate::logger;
use crate::GlobalOpts;
use clap::Subcommand;
use colored::*;
use std::process::ExitCode;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Print the resolved configuration
    Show {
        #[command(flatten)]
        args: SyncArgs,
    },
    /// Print the path of the config file in use
    Path,
}

pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) -> ExitCode {
    match action {
        ConfigAction::Show { args } => match resolve_config(opts, &args) {
            Ok(config) => {
                println!("{}", "Configuration:".bold().green());
                for (key, value) in config.entries() {
                    println!("  {}: {}", key.cyan(), value);
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                logger::error(&format!("Invalid configuration: {:#}", e));
                ExitCode::from(CONFIG_ERROR_EXIT)
            }
        },
        ConfigAction::Path => match working_directory() {
            Ok(cwd) => {
                let location = config_location(opts, &cwd);
                logger::debug(&format!(
                    "Config location resolved from {}",
                    if location.explicit { "--config" } else { "default" }
                ));
                if location.path.exists() {
                    println!("{}", location.path.display());
                } else {
                    println!("{} {}", location.path.display(), "(not found)".dimmed());
                    if location.explicit {
                        logger::warn(&format!(
                            "Config file {} does not exist",
                            location.path.display()
                        ));
                    }
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                logger::error(&e.to_string());
                ExitCode::from(CONFIG_ERROR_EXIT)
            }
        },
    }
}
