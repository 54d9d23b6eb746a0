// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Haru - a reflection journal and AI scheduling service.
//!
//! Binary entry point: parses the CLI, loads configuration, and dispatches
//! to the serve loop.

mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Haru - a reflection journal and AI scheduling service.
#[derive(Parser, Debug)]
#[command(name = "haru", version, about, long_about = None)]
struct Cli {
    /// Path to an explicit config file (otherwise the XDG hierarchy is used).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Haru HTTP server.
    Serve,
    /// Load and validate configuration, then exit.
    ConfigCheck,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                eprintln!("haru: {error}");
            }
            std::process::exit(1);
        }
    };

    init_tracing(&config.agent.log_level);

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run(config).await {
                tracing::error!(error = %e, "server exited with error");
                std::process::exit(1);
            }
        }
        Some(Commands::ConfigCheck) => {
            println!(
                "haru: config ok (agent.name={}, gateway={}:{})",
                config.agent.name, config.gateway.host, config.gateway.port
            );
        }
        None => {
            println!("haru: use --help for available commands");
        }
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<haru_config::HaruConfig, Vec<haru_core::HaruError>> {
    match path {
        Some(path) => {
            let config = haru_config::load_config_from_path(path)
                .map_err(|e| vec![haru_core::HaruError::Config(e.to_string())])?;
            haru_config::validate_config(&config)?;
            Ok(config)
        }
        None => haru_config::load_and_validate(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("haru={log_level},tower_http=warn")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
