// SPDX-FileCopyrightText: 2026 Taskgate Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Taskgate - a conversational Telegram front-end for a workforce-management
//! task API.
//!
//! This is the binary entry point for the bot.

mod serve;

use clap::{Parser, Subcommand};

/// Taskgate - task completion and forwarding over Telegram.
#[derive(Parser, Debug)]
#[command(name = "taskgate", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the bot (long polling).
    Serve,
    /// Load and validate the configuration, then exit.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match taskgate_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            taskgate_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(err) = serve::run(config).await {
                eprintln!("taskgate serve: {err}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            println!(
                "taskgate: config is valid (agent.name={}, cache.snapshot_ttl_secs={})",
                config.agent.name, config.cache.snapshot_ttl_secs
            );
        }
        None => {
            println!("taskgate: use --help for available commands");
        }
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn binary_loads_config_defaults() {
        let config = taskgate_config::load_and_validate()
            .expect("default config should be valid");
        assert_eq!(config.agent.name, "taskgate");
    }
}
