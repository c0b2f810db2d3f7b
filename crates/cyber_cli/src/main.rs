//! CLI entry point for cyberagent.

mod cli;
mod commands;
mod output;
mod state;

use std::path::{Path, PathBuf};

use clap::Parser;
use cyber_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Nearest `name` walking up from `start`.
fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .take(32)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.exists())
}

/// Load env files. Variables already set in the process win, and the first
/// file to set a variable wins over later ones.
/// Order: 1) ~/.cyberagent/env  2) nearest .env walking up from cwd
fn load_env_files() {
    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(".cyberagent").join("env");
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        if let Some(env_file) = find_upwards(&cwd, ".env") {
            let _ = dotenvy::from_path(&env_file);
        }
    }
}

fn init_tracing(verbose: bool) {
    let mut config = ObservabilityConfig::from_env();
    if verbose {
        config = config.with_log_level("cyber_policy=debug,cyber_llms=debug,info");
    }
    if let Err(e) = cyber_observability::init(config) {
        output::warning(&e.to_string());
    }
}

#[tokio::main]
async fn main() {
    load_env_files();
    let cli = Cli::parse();
    output::init(cli.output);
    init_tracing(cli.verbose);

    let result = commands::handle(cli).await;
    cyber_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
