//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect and step the LLM action-selection policy
#[derive(Parser)]
#[command(name = "cyberagent", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging for the policy and client
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List supported model identifiers
    Models,
    /// Print the messages that would be sent for a state
    Prompt {
        /// File holding the network state description (`-` for stdin)
        #[arg(short, long)]
        state: PathBuf,
        /// Optional observation file appended to the state
        #[arg(long)]
        observation: Option<PathBuf>,
    },
    /// Parse candidate completions and report the first valid action
    Parse {
        /// Candidate completion strings, in the order the model returned them
        #[arg(required = true)]
        candidates: Vec<String>,
    },
    /// Ask the model for the preferred action (one request)
    Exploit {
        /// File holding the network state description (`-` for stdin)
        #[arg(short, long)]
        state: PathBuf,
        /// File holding the latest observation
        #[arg(long)]
        observation: Option<PathBuf>,
        /// Model to use (e.g. gpt-4). Uses CYBERAGENT_MODEL if not set.
        #[arg(short, long)]
        model: Option<String>,
        /// Number of candidate completions to request
        #[arg(short = 'n', long)]
        candidates: Option<u32>,
    },
    /// Sample an exploratory action among valid candidates (one request)
    Explore {
        /// File holding the network state description (`-` for stdin)
        #[arg(short, long)]
        state: PathBuf,
        /// Model to use (e.g. gpt-4). Uses CYBERAGENT_MODEL if not set.
        #[arg(short, long)]
        model: Option<String>,
        /// Seed for the exploration RNG
        #[arg(long)]
        seed: Option<u64>,
    },
}
