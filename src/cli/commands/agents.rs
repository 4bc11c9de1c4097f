//! Agents command implementation.

use crate::agents::descriptors;
use crate::cli::Output;
use crate::config::{Prompts, Settings};
use anyhow::Result;

/// List the agent descriptors.
pub fn run_agents(settings: &Settings) -> Result<()> {
    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;

    for descriptor in descriptors::all(&prompts, settings) {
        Output::header(&descriptor.name);

        let summary = descriptor
            .instructions
            .lines()
            .find(|line| !line.trim().is_empty())
            .unwrap_or("");
        Output::kv("role", summary.trim());

        let tools = if descriptor.tools.is_empty() {
            "(none)".to_string()
        } else {
            descriptor
                .tools
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        Output::kv("tools", &tools);

        let handoffs = if descriptor.handoffs.is_empty() {
            "(leaf agent)".to_string()
        } else {
            descriptor.handoffs.join(", ")
        };
        Output::kv("handoffs", &handoffs);
    }
    println!();

    Ok(())
}
