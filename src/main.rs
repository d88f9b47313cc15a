//! Switchboard CLI binary entry point.

use clap::Parser;

use switchboard::agent::{drive_thread, ConsolePrompt};
use switchboard::checkpoint::{CheckpointStore, FileCheckpointStore};
use switchboard::cli::{Cli, Commands, StartArgs};
use switchboard::config::SwitchboardConfig;
use switchboard::diag::Diag;
use switchboard::error::Result;
use switchboard::models::ModelName;
use switchboard::provider::OpenRouterProvider;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Start(args) => handle_start(args).await,
        Commands::Setup => handle_setup().await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_start(args: StartArgs) -> Result<()> {
    let config = SwitchboardConfig::from_env();

    let model: ModelName = args.model.parse().map_err(|_| {
        switchboard::error::SwitchboardError::Configuration(format!(
            "Invalid model name: '{}'. Known models: gemini-2.0-flash, gemini-2.5-flash, \
             gemini-2.5-pro, claude-sonnet-4",
            args.model
        ))
    })?;

    let thread_id = args
        .thread_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    println!("Thread: {thread_id}");

    let api_key = config.require_api_key()?.to_string();
    let provider = OpenRouterProvider::new(model, api_key, config.base_url.clone());
    let store = FileCheckpointStore::new(&config.state_dir);
    let diag = Diag::new(&config.dump_dir);
    let mut prompt = ConsolePrompt;

    drive_thread(&store, &provider, &diag, &thread_id, &mut prompt).await
}

async fn handle_setup() -> Result<()> {
    let config = SwitchboardConfig::from_env();
    let store = FileCheckpointStore::new(&config.state_dir);
    store.setup().await?;
    println!("Checkpoint store ready at {}", config.state_dir.display());
    Ok(())
}
