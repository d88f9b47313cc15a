//! CLI argument definitions.

use clap::{Parser, Subcommand};

/// Switchboard - durable multi-user conversation relay agent
#[derive(Parser, Debug)]
#[command(name = "switchboard", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resume or begin a conversation thread
    Start(StartArgs),
    /// Initialize the checkpoint store (idempotent)
    Setup,
}

/// Arguments for the `start` subcommand.
#[derive(Parser, Debug)]
pub struct StartArgs {
    /// Thread id to resume - a random one is generated if omitted
    #[arg(long)]
    pub thread_id: Option<String>,

    /// Model to use
    #[arg(long, default_value = "gemini-2.0-flash")]
    pub model: String,
}
