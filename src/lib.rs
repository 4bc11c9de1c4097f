//! Byline - A CLI newsroom of cooperating AI agents.
//!
//! Byline wires a small multi-agent pipeline for producing sources-backed
//! research briefs and citation-aware commentary scripts, with guardrail
//! validation on the way in and on the way out.
//!
//! # Overview
//!
//! Byline allows you to:
//! - Submit a topic and get a research brief with a numbered sources register
//! - Draft a commentary script from a vetted brief, in house style
//! - Validate task inputs and agent outputs against guardrail policy
//! - Check the health of the external MCP tool servers the agents rely on
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration and prompt template management
//! - `guardrails` - Input/output validation and report formatting
//! - `agents` - Agent descriptors, tool shims, and the tool-calling runner
//! - `artifacts` - Markdown deliverable persistence
//! - `mcp` - MCP tool-server health checks (JSON-RPC 2.0 client)
//!
//! # Example
//!
//! ```rust,no_run
//! use byline::agents::{descriptors, Agent, ToolContext};
//! use byline::config::{Prompts, Settings};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
//!     let descriptor = descriptors::orchestrator(&prompts, &settings);
//!     let tools = ToolContext::new(settings.clone()).with_prompts(prompts);
//!
//!     let agent = Agent::new(descriptor, tools, &settings.model.default_model);
//!     let response = agent.run("Topic: Market trends in solar energy", None).await?;
//!     println!("{}", response.content);
//!
//!     Ok(())
//! }
//! ```

pub mod agents;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod error;
pub mod guardrails;
pub mod mcp;
pub mod openai;

pub use error::{BylineError, Result};
