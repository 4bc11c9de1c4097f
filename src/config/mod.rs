//! Configuration module for Byline.
//!
//! Handles loading and managing application settings and the agent
//! instruction templates.

mod prompts;
mod settings;

pub use prompts::{InstructionPrompts, Prompts};
pub use settings::{
    GeneralSettings, GuardrailSettings, McpSettings, ModelSettings, PromptSettings, Settings,
};
