// SPDX-FileCopyrightText: 2026 Prachar Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prachar - AI marketing content generation for small Indian businesses.
//!
//! This is the CLI entry point: it loads and validates configuration,
//! initializes tracing, and dispatches to the subcommand modules.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod doctor;
mod generate;
mod history;
mod profile;

/// Prachar - AI marketing content generation for small Indian businesses.
#[derive(Parser, Debug)]
#[command(name = "prachar", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate marketing content for a feature.
    Generate(generate::GenerateArgs),
    /// Browse or delete saved generations.
    History {
        #[command(subcommand)]
        action: history::HistoryAction,
    },
    /// Show or update the business profile.
    Profile {
        #[command(subcommand)]
        action: profile::ProfileAction,
    },
    /// Check configuration, store, and capability wiring.
    Doctor,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match prachar_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            prachar_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.app.log_level.clone()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => generate::run(&config, args).await,
        Commands::History { action } => history::run(&config, action).await,
        Commands::Profile { action } => profile::run(&config, action).await,
        Commands::Doctor => doctor::run(&config).await,
    };

    if let Err(e) = result {
        eprintln!("prachar: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = prachar_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.app.name, "prachar");
        assert_eq!(config.limits.free_daily_quota, 5);
    }
}
