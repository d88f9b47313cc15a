//! Environment-driven configuration.

use std::path::PathBuf;

use crate::error::{Result, SwitchboardError};

/// Runtime configuration, resolved once at startup from the process
/// environment (a `.env` file is loaded first if present).
#[derive(Debug, Clone)]
pub struct SwitchboardConfig {
    /// OpenRouter API key.
    pub api_key: Option<String>,
    /// Base URL override for the OpenRouter API.
    pub base_url: Option<String>,
    /// Directory holding per-thread checkpoint files.
    pub state_dir: PathBuf,
    /// Directory for best-effort diagnostic dumps.
    pub dump_dir: PathBuf,
}

impl SwitchboardConfig {
    /// Load from environment variables.
    ///
    /// `OPENROUTER_API_KEY` is the canonical key variable;
    /// `OPEN_ROUTER_API_KEY` is accepted as an alias.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = std::env::var("OPENROUTER_API_KEY")
            .or_else(|_| std::env::var("OPEN_ROUTER_API_KEY"))
            .ok();
        let base_url = std::env::var("OPENROUTER_BASE_URL").ok();
        let state_dir = std::env::var("SWITCHBOARD_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_state_dir());
        let dump_dir = std::env::var("SWITCHBOARD_DUMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("out"));

        Self {
            api_key,
            base_url,
            state_dir,
            dump_dir,
        }
    }

    /// The API key, or an authentication error naming the missing variable.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SwitchboardError::Authentication("Missing OPENROUTER_API_KEY".into()))
    }
}

fn default_state_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "switchboard")
        .map(|dirs| dirs.data_dir().join("threads"))
        .unwrap_or_else(|| PathBuf::from("threads"))
}
