//! CLI module for Byline.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand, ValueEnum};

/// Byline - An agent-driven newsroom CLI
///
/// Runs a small pipeline of cooperating AI agents that research a topic
/// and draft a citation-aware commentary script, with guardrail
/// validation on inputs and outputs.
#[derive(Parser, Debug)]
#[command(name = "byline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Built-in smoke-test prompts for exercising the pipeline end to end.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "lowercase")]
pub enum SmokeMode {
    /// Plain assistant sanity check (no tools).
    Haiku,
    /// Run the Research Summarizer on a fixed sample topic.
    Research,
    /// Run the Script Drafter on a fixed sample topic.
    Script,
    /// Run the Orchestrator over a full sample task.
    Pipeline,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an agent: a smoke-test mode, or a custom topic through the Orchestrator
    Run {
        /// Custom topic to research and draft (validated before any model call)
        #[arg(short, long)]
        topic: Option<String>,

        /// Smoke-test mode when no topic is given (ignored when --topic is set)
        #[arg(short, long, value_enum, env = "BYLINE_MODE", default_value = "haiku")]
        mode: SmokeMode,

        /// LLM model to use
        #[arg(long)]
        model: Option<String>,
    },

    /// Validate a task input and print the guardrail report
    Validate {
        /// Inline JSON task, or a path to a JSON file with --file
        input: String,

        /// Treat the input as a file path
        #[arg(short, long)]
        file: bool,
    },

    /// Check credentials, directories, and MCP tool-server health
    Doctor,

    /// List the agent descriptors (instructions summary, tools, handoffs)
    Agents,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
