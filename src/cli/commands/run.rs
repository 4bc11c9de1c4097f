//! Run command implementation.

use crate::agents::{descriptors, Agent, AgentDescriptor, AgentResponse, ToolContext};
use crate::cli::preflight::{self, Operation};
use crate::cli::{Output, SmokeMode};
use crate::config::{Prompts, Settings};
use crate::guardrails::{format_validation_report, validate_task_input};
use anyhow::Result;
use serde_json::json;

/// Fixed prompt for the plain-assistant sanity check.
const HAIKU_PROMPT: &str = "Write a haiku about recursion in programming.";

/// Fixed sample topic for the specialist smoke tests.
const SAMPLE_TOPIC: &str = "Market trends in solar energy";

/// Fixed end-to-end task for the pipeline smoke test.
const PIPELINE_PROMPT: &str = "Topic: Market trends in solar energy\n\n\
    Geo Focus: US\n\n\
    Time Window: 2024-01-01 to 2025-09-06\n\n\
    Must-Hits:\n- utility-scale capacity additions\n- module pricing\n\n\
    Red Lines:\n- no investment advice\n\n\
    Research the topic, then draft a commentary script from the brief, \
    and save both deliverables.";

/// Run the run command.
pub async fn run_run(
    topic: Option<&str>,
    mode: SmokeMode,
    model: Option<String>,
    settings: Settings,
) -> Result<()> {
    // Pre-flight checks
    if let Err(e) = preflight::check(Operation::Run) {
        Output::error(&format!("{}", e));
        Output::info("Run 'byline doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let prompts = Prompts::load(settings.prompts.custom_dir.as_deref())?;
    let model = model.unwrap_or_else(|| settings.model.default_model.clone());

    let (descriptor, prompt) = match topic {
        Some(topic) => {
            // Guard the input before spending a model call on it.
            let task = json!({ "topic": topic });
            let result = validate_task_input(&task, &settings.guardrails);
            if !result.is_valid {
                println!("{}", format_validation_report(&result, "Task Input"));
                anyhow::bail!("task input failed validation");
            }
            (
                descriptors::orchestrator(&prompts, &settings),
                format!(
                    "Topic: {}\n\nResearch the topic, then draft a commentary script \
                     from the brief, and save both deliverables.",
                    topic.trim()
                ),
            )
        }
        None => smoke_run(mode, &prompts, &settings),
    };

    let tools = ToolContext::new(settings.clone())
        .with_prompts(prompts)
        .with_model(&model);
    let agent = Agent::new(descriptor, tools, &model);

    let spinner = Output::spinner("Agent working...");

    match agent.run(&prompt, None).await {
        Ok(response) => {
            spinner.finish_and_clear();
            print_response(&response);
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Agent failed: {}", e));
            return Err(e.into());
        }
    }

    Ok(())
}

/// Pick the descriptor and hard-coded prompt for a smoke-test mode.
fn smoke_run(
    mode: SmokeMode,
    prompts: &Prompts,
    settings: &Settings,
) -> (AgentDescriptor, String) {
    match mode {
        SmokeMode::Haiku => (
            AgentDescriptor {
                name: "Assistant".to_string(),
                instructions: "You are a helpful assistant".to_string(),
                tools: Vec::new(),
                handoffs: Vec::new(),
            },
            HAIKU_PROMPT.to_string(),
        ),
        SmokeMode::Research => (
            descriptors::research_summarizer(prompts, settings),
            format!("Topic: {}\n\nTime Window: 2024-01-01 to 2025-09-06", SAMPLE_TOPIC),
        ),
        SmokeMode::Script => (
            descriptors::script_drafter(prompts, settings),
            format!(
                "Topic: {}\n\nAudience: general news viewers\n\nTone: clear, direct, no fluff",
                SAMPLE_TOPIC
            ),
        ),
        SmokeMode::Pipeline => (
            descriptors::orchestrator(prompts, settings),
            PIPELINE_PROMPT.to_string(),
        ),
    }
}

fn print_response(response: &AgentResponse) {
    println!("\n{}\n", response.content);

    if !response.tool_calls.is_empty() {
        Output::header(&format!("Tool calls ({})", response.tool_calls.len()));
        for call in &response.tool_calls {
            Output::tool_call(&call.name, &call.arguments);
        }
        println!();
    }

    Output::info(&format!(
        "{} completed in {} iteration(s)",
        response.agent_name, response.iterations
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke_modes_pick_expected_agents() {
        let settings = Settings::default();
        let prompts = Prompts::default();

        let (descriptor, prompt) = smoke_run(SmokeMode::Haiku, &prompts, &settings);
        assert_eq!(descriptor.name, "Assistant");
        assert!(descriptor.tools.is_empty());
        assert_eq!(prompt, HAIKU_PROMPT);

        let (descriptor, prompt) = smoke_run(SmokeMode::Research, &prompts, &settings);
        assert_eq!(descriptor.name, descriptors::RESEARCH_SUMMARIZER);
        assert!(prompt.starts_with("Topic: Market trends in solar energy"));

        let (descriptor, _) = smoke_run(SmokeMode::Pipeline, &prompts, &settings);
        assert_eq!(descriptor.name, descriptors::ORCHESTRATOR);
    }
}
