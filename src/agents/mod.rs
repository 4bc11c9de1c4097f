//! Agent system: descriptors, tool shims, and the tool-calling runner.
//!
//! The three newsroom agents (Orchestrator, Research Summarizer, Script
//! Drafter) are plain [`AgentDescriptor`] values; the runner executes
//! whichever descriptor it is given and resolves tool calls through the
//! shared [`ToolContext`].

mod descriptor;
mod runner;
mod tools;

pub use descriptor::{descriptors, AgentDescriptor};
pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_definitions, ToolCall, ToolContext, ToolName};
