//! Model selection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Models reachable through OpenRouter, with their routed API identifiers.
///
/// Selected once at startup via the CLI `--model` flag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum ModelName {
    #[strum(serialize = "gemini-2.0-flash")]
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,
    #[strum(serialize = "gemini-2.5-flash")]
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
    #[strum(serialize = "gemini-2.5-pro")]
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,
    #[strum(serialize = "claude-sonnet-4")]
    #[serde(rename = "claude-sonnet-4")]
    ClaudeSonnet4,
}

impl ModelName {
    /// The identifier sent to the OpenRouter API.
    pub fn api_id(&self) -> &'static str {
        match self {
            Self::Gemini20Flash => "google/gemini-2.0-flash-001",
            Self::Gemini25Flash => "google/gemini-2.5-flash",
            Self::Gemini25Pro => "google/gemini-2.5-pro-preview-05-06",
            Self::ClaudeSonnet4 => "anthropic/claude-sonnet-4",
        }
    }
}

impl Default for ModelName {
    fn default() -> Self {
        Self::Gemini20Flash
    }
}
