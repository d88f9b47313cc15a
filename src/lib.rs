//! Switchboard -- durable multi-user conversation relay agent.
//!
//! A CLI agent that relays messages between multiple users and a hosted
//! language model. Conversation state is persisted as an explicit state
//! machine record in a checkpoint store keyed by thread id, so a session
//! can be suspended and resumed across process restarts. Each inbound
//! message drives a tool-calling loop against the model until the model
//! stops requesting tool calls.

pub mod agent;
pub mod checkpoint;
pub mod cli;
pub mod config;
pub mod diag;
pub mod error;
pub mod models;
pub mod provider;
pub mod state;
pub mod types;
