//! Declarative agent descriptors.
//!
//! A descriptor is plain configuration: a name, rendered instructions,
//! the tools the agent may call, and the handoff targets it may delegate
//! to. The runner consumes descriptors; nothing here talks to the model.

use super::tools::ToolName;
use crate::config::{Prompts, Settings};
use std::collections::HashMap;

/// A named capability bundle consumed by the agent runner.
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    pub name: String,
    pub instructions: String,
    pub tools: Vec<ToolName>,
    pub handoffs: Vec<String>,
}

impl AgentDescriptor {
    /// Whether the descriptor declares the given tool.
    pub fn declares(&self, tool: ToolName) -> bool {
        self.tools.contains(&tool)
    }
}

/// Builders for the three newsroom agents.
pub mod descriptors {
    use super::*;

    pub const ORCHESTRATOR: &str = "Orchestrator";
    pub const RESEARCH_SUMMARIZER: &str = "Research Summarizer";
    pub const SCRIPT_DRAFTER: &str = "Script Drafter";

    fn template_vars(settings: &Settings) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("brand".to_string(), settings.general.brand.clone());
        vars.insert(
            "min_sources".to_string(),
            settings.guardrails.min_sources.to_string(),
        );
        vars
    }

    /// The Orchestrator: interprets intent, validates input, delegates to
    /// the specialists, and assembles the final answer.
    pub fn orchestrator(prompts: &Prompts, settings: &Settings) -> AgentDescriptor {
        AgentDescriptor {
            name: ORCHESTRATOR.to_string(),
            instructions: prompts.render_with_custom(
                &prompts.instructions.orchestrator,
                &template_vars(settings),
            ),
            tools: vec![
                ToolName::ValidateTask,
                ToolName::RunResearchSummarizer,
                ToolName::RunScriptDrafter,
                ToolName::SaveMarkdown,
            ],
            handoffs: vec![
                RESEARCH_SUMMARIZER.to_string(),
                SCRIPT_DRAFTER.to_string(),
            ],
        }
    }

    /// The Research Summarizer: gathers dated, credible sources and
    /// returns a brief plus a source-tagged outline for scripting.
    pub fn research_summarizer(prompts: &Prompts, settings: &Settings) -> AgentDescriptor {
        AgentDescriptor {
            name: RESEARCH_SUMMARIZER.to_string(),
            instructions: prompts.render_with_custom(
                &prompts.instructions.research_summarizer,
                &template_vars(settings),
            ),
            tools: vec![ToolName::SaveMarkdown],
            handoffs: Vec::new(),
        }
    }

    /// The Script Drafter: turns vetted research artifacts into a
    /// citation-aware commentary script. Leaf agent, no further handoffs.
    pub fn script_drafter(prompts: &Prompts, settings: &Settings) -> AgentDescriptor {
        AgentDescriptor {
            name: SCRIPT_DRAFTER.to_string(),
            instructions: prompts.render_with_custom(
                &prompts.instructions.script_drafter,
                &template_vars(settings),
            ),
            tools: vec![ToolName::SaveMarkdown],
            handoffs: Vec::new(),
        }
    }

    /// All descriptors, for listing and diagnostics.
    pub fn all(prompts: &Prompts, settings: &Settings) -> Vec<AgentDescriptor> {
        vec![
            orchestrator(prompts, settings),
            research_summarizer(prompts, settings),
            script_drafter(prompts, settings),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::descriptors;
    use super::*;

    #[test]
    fn test_orchestrator_declares_delegation_tools() {
        let descriptor =
            descriptors::orchestrator(&Prompts::default(), &Settings::default());
        assert!(descriptor.declares(ToolName::ValidateTask));
        assert!(descriptor.declares(ToolName::RunResearchSummarizer));
        assert!(descriptor.declares(ToolName::RunScriptDrafter));
        assert_eq!(descriptor.handoffs.len(), 2);
    }

    #[test]
    fn test_specialists_are_leaves() {
        let settings = Settings::default();
        let prompts = Prompts::default();
        for descriptor in [
            descriptors::research_summarizer(&prompts, &settings),
            descriptors::script_drafter(&prompts, &settings),
        ] {
            assert!(descriptor.handoffs.is_empty());
            assert_eq!(descriptor.tools, vec![ToolName::SaveMarkdown]);
        }
    }

    #[test]
    fn test_instructions_rendered_with_brand() {
        let settings = Settings::default();
        let descriptor =
            descriptors::research_summarizer(&Prompts::default(), &settings);
        assert!(descriptor.instructions.contains(&settings.general.brand));
        assert!(!descriptor.instructions.contains("{{brand}}"));
        assert!(!descriptor.instructions.contains("{{min_sources}}"));
    }
}
