//! The conversation loop and its collaborators.

pub mod driver;
pub mod prompt;
pub mod tools;
pub mod turn;

pub use driver::{drive_thread, ConsolePrompt, ResumePrompt};
pub use tools::{ToolInvocation, ToolOutcome};
pub use turn::{run_turn, TurnOutcome};
