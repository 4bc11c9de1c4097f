//! Tool shims exposed to the agents.
//!
//! Each shim forwards to in-repo logic: the guardrail validator, the
//! markdown artifact helper, or a delegated run of a specialist agent.

use super::descriptors;
use super::runner::{Agent, AgentResponse};
use crate::artifacts::save_markdown;
use crate::config::{Prompts, Settings};
use crate::error::{BylineError, Result};
use crate::guardrails::{format_validation_report, validate_task_input};
use serde_json::Value;

/// Identity of a callable tool, used in agent descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolName {
    ValidateTask,
    SaveMarkdown,
    RunResearchSummarizer,
    RunScriptDrafter,
}

impl ToolName {
    /// Wire name seen by the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::ValidateTask => "validate_task",
            ToolName::SaveMarkdown => "save_markdown",
            ToolName::RunResearchSummarizer => "run_research_summarizer",
            ToolName::RunScriptDrafter => "run_script_drafter",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed tool invocation.
#[derive(Debug, Clone)]
pub enum ToolCall {
    /// Run the input guardrail over a candidate task.
    ValidateTask { task: Value },

    /// Persist a markdown deliverable.
    SaveMarkdown {
        path: String,
        contents: String,
        overwrite: bool,
    },

    /// Delegate to the Research Summarizer agent.
    RunResearchSummarizer {
        topic: String,
        geo_focus: Option<String>,
        time_window: Option<String>,
        must_hits: Option<Vec<String>>,
        red_lines: Option<Vec<String>>,
    },

    /// Delegate to the Script Drafter agent.
    RunScriptDrafter {
        topic: String,
        audience: Option<String>,
        tone: Option<String>,
        red_lines: Option<Vec<String>>,
        research_brief: Option<String>,
    },
}

impl ToolCall {
    /// Which declared tool this call maps to.
    pub fn kind(&self) -> ToolName {
        match self {
            ToolCall::ValidateTask { .. } => ToolName::ValidateTask,
            ToolCall::SaveMarkdown { .. } => ToolName::SaveMarkdown,
            ToolCall::RunResearchSummarizer { .. } => ToolName::RunResearchSummarizer,
            ToolCall::RunScriptDrafter { .. } => ToolName::RunScriptDrafter,
        }
    }
}

/// Tool execution context shared by all agents.
#[derive(Clone)]
pub struct ToolContext {
    settings: Settings,
    prompts: Prompts,
    model: String,
}

impl ToolContext {
    /// Create a tool context with default prompts and the configured model.
    pub fn new(settings: Settings) -> Self {
        let model = settings.model.default_model.clone();
        Self {
            settings,
            prompts: Prompts::default(),
            model,
        }
    }

    /// Use custom prompt templates.
    pub fn with_prompts(mut self, prompts: Prompts) -> Self {
        self.prompts = prompts;
        self
    }

    /// Use a specific model for delegated agent runs.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn prompts(&self) -> &Prompts {
        &self.prompts
    }

    /// Execute a tool call and return the result as a string.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::ValidateTask { task } => self.execute_validate_task(task),
            ToolCall::SaveMarkdown {
                path,
                contents,
                overwrite,
            } => self.execute_save_markdown(path, contents, *overwrite),
            ToolCall::RunResearchSummarizer {
                topic,
                geo_focus,
                time_window,
                must_hits,
                red_lines,
            } => {
                let prompt = delegation_prompt(
                    topic,
                    &[
                        ("Geo Focus", geo_focus.as_deref()),
                        ("Time Window", time_window.as_deref()),
                    ],
                    &[
                        ("Must-Hits", must_hits.as_deref()),
                        ("Red Lines", red_lines.as_deref()),
                    ],
                    None,
                );
                let descriptor =
                    descriptors::research_summarizer(&self.prompts, &self.settings);
                self.run_delegate(descriptor, prompt).await
            }
            ToolCall::RunScriptDrafter {
                topic,
                audience,
                tone,
                red_lines,
                research_brief,
            } => {
                let prompt = delegation_prompt(
                    topic,
                    &[("Audience", audience.as_deref()), ("Tone", tone.as_deref())],
                    &[("Red Lines", red_lines.as_deref())],
                    research_brief.as_deref(),
                );
                let descriptor = descriptors::script_drafter(&self.prompts, &self.settings);
                self.run_delegate(descriptor, prompt).await
            }
        }
    }

    fn execute_validate_task(&self, task: &Value) -> Result<String> {
        let result = validate_task_input(task, &self.settings.guardrails);
        Ok(format_validation_report(&result, "Task Input"))
    }

    fn execute_save_markdown(&self, path: &str, contents: &str, overwrite: bool) -> Result<String> {
        let written = save_markdown(&self.settings.output_dir(), path, contents, overwrite)?;
        Ok(written.display().to_string())
    }

    /// Run a leaf agent and hand back its final text.
    async fn run_delegate(
        &self,
        descriptor: super::AgentDescriptor,
        prompt: String,
    ) -> Result<String> {
        let agent = Agent::new(descriptor, self.clone(), &self.model);

        // Boxed to break the async recursion between runner and shims.
        let fut: std::pin::Pin<
            Box<dyn std::future::Future<Output = Result<AgentResponse>> + '_>,
        > = Box::pin(agent.run(&prompt, None));

        let response = fut.await?;
        Ok(response.content)
    }
}

/// Build a structured delegation prompt from the optional task fields.
fn delegation_prompt(
    topic: &str,
    scalars: &[(&str, Option<&str>)],
    lists: &[(&str, Option<&[String]>)],
    research_brief: Option<&str>,
) -> String {
    let mut parts = vec![format!("Topic: {}", topic)];

    for (label, value) in scalars {
        if let Some(value) = value {
            parts.push(format!("{}: {}", label, value));
        }
    }

    for (label, items) in lists {
        if let Some(items) = items {
            if !items.is_empty() {
                parts.push(format!("{}:\n- {}", label, items.join("\n- ")));
            }
        }
    }

    if let Some(brief) = research_brief {
        parts.push(format!("Research Brief:\n{}", brief));
    }

    parts.join("\n\n")
}

/// Get OpenAI function/tool definitions for the given declared tools.
pub fn tool_definitions(tools: &[ToolName]) -> Vec<async_openai::types::ChatCompletionTool> {
    use async_openai::types::{ChatCompletionTool, ChatCompletionToolType, FunctionObject};

    tools
        .iter()
        .map(|tool| {
            let (description, parameters) = match tool {
                ToolName::ValidateTask => (
                    "Validate a candidate task before acting on it. Returns a validation \
                     report listing any issues with the task input.",
                    serde_json::json!({
                        "type": "object",
                        "properties": {
                            "task": {
                                "type": "object",
                                "description": "The task object, containing at least a 'topic' string"
                            }
                        },
                        "required": ["task"]
                    }),
                ),
                ToolName::SaveMarkdown => (
                    "Save markdown contents to a file under the artifact directory. \
                     Returns the absolute path written.",
                    serde_json::json!({
                        "type": "object",
                        "properties": {
                            "path": {
                                "type": "string",
                                "description": "File path; '.md' is appended if missing"
                            },
                            "contents": {
                                "type": "string",
                                "description": "Markdown text to write"
                            },
                            "overwrite": {
                                "type": "boolean",
                                "description": "Replace an existing file (default: false)",
                                "default": false
                            }
                        },
                        "required": ["path", "contents"]
                    }),
                ),
                ToolName::RunResearchSummarizer => (
                    "Run the Research Summarizer agent to produce a sources-backed research \
                     brief with a Sources Register, Key Findings with [S#] citations, and a \
                     7-part outline.",
                    serde_json::json!({
                        "type": "object",
                        "properties": {
                            "topic": {
                                "type": "string",
                                "description": "The topic or question to research"
                            },
                            "geo_focus": {
                                "type": "string",
                                "description": "Geographic focus (e.g., 'US', 'NYC')"
                            },
                            "time_window": {
                                "type": "string",
                                "description": "Absolute range (e.g., '2023-01-01 to 2025-09-06')"
                            },
                            "must_hits": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Key points that MUST be addressed"
                            },
                            "red_lines": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Prohibitions the output must respect"
                            }
                        },
                        "required": ["topic"]
                    }),
                ),
                ToolName::RunScriptDrafter => (
                    "Run the Script Drafter agent to produce an outline-following commentary \
                     script with a VO beat map and asset hints.",
                    serde_json::json!({
                        "type": "object",
                        "properties": {
                            "topic": {
                                "type": "string",
                                "description": "The topic of the script"
                            },
                            "audience": {
                                "type": "string",
                                "description": "Target audience (e.g., 'general news viewers')"
                            },
                            "tone": {
                                "type": "string",
                                "description": "Voice/tone guidance (e.g., 'clear, direct, no fluff')"
                            },
                            "red_lines": {
                                "type": "array",
                                "items": {"type": "string"},
                                "description": "Prohibitions the output must respect"
                            },
                            "research_brief": {
                                "type": "string",
                                "description": "Full research brief text, including the Sources Register"
                            }
                        },
                        "required": ["topic"]
                    }),
                ),
            };

            ChatCompletionTool {
                r#type: ChatCompletionToolType::Function,
                function: FunctionObject {
                    name: tool.as_str().to_string(),
                    description: Some(description.to_string()),
                    parameters: Some(parameters),
                    strict: None,
                },
            }
        })
        .collect()
}

fn required_str(args: &Value, key: &str) -> Result<String> {
    args[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| BylineError::Agent(format!("Missing '{}' argument", key)))
}

fn optional_str(args: &Value, key: &str) -> Option<String> {
    args[key].as_str().map(str::to_string)
}

fn optional_str_list(args: &Value, key: &str) -> Option<Vec<String>> {
    args[key].as_array().map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    })
}

/// Parse a tool call from the OpenAI response format.
pub fn parse_tool_call(name: &str, arguments: &str) -> Result<ToolCall> {
    let args: Value = serde_json::from_str(arguments)
        .map_err(|e| BylineError::Agent(format!("Invalid tool arguments: {}", e)))?;

    match name {
        "validate_task" => Ok(ToolCall::ValidateTask {
            task: args["task"].clone(),
        }),
        "save_markdown" => Ok(ToolCall::SaveMarkdown {
            path: required_str(&args, "path")?,
            contents: required_str(&args, "contents")?,
            overwrite: args["overwrite"].as_bool().unwrap_or(false),
        }),
        "run_research_summarizer" => Ok(ToolCall::RunResearchSummarizer {
            topic: required_str(&args, "topic")?,
            geo_focus: optional_str(&args, "geo_focus"),
            time_window: optional_str(&args, "time_window"),
            must_hits: optional_str_list(&args, "must_hits"),
            red_lines: optional_str_list(&args, "red_lines"),
        }),
        "run_script_drafter" => Ok(ToolCall::RunScriptDrafter {
            topic: required_str(&args, "topic")?,
            audience: optional_str(&args, "audience"),
            tone: optional_str(&args, "tone"),
            red_lines: optional_str_list(&args, "red_lines"),
            research_brief: optional_str(&args, "research_brief"),
        }),
        _ => Err(BylineError::Agent(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_validate_task_tool() {
        let tool =
            parse_tool_call("validate_task", r#"{"task": {"topic": "solar"}}"#).unwrap();
        match tool {
            ToolCall::ValidateTask { task } => {
                assert_eq!(task["topic"], "solar");
            }
            _ => panic!("Expected ValidateTask tool"),
        }
    }

    #[test]
    fn test_parse_save_markdown_defaults_overwrite() {
        let tool = parse_tool_call(
            "save_markdown",
            r##"{"path": "brief", "contents": "# Brief"}"##,
        )
        .unwrap();
        match tool {
            ToolCall::SaveMarkdown { path, overwrite, .. } => {
                assert_eq!(path, "brief");
                assert!(!overwrite);
            }
            _ => panic!("Expected SaveMarkdown tool"),
        }
    }

    #[test]
    fn test_parse_run_research_summarizer() {
        let tool = parse_tool_call(
            "run_research_summarizer",
            r#"{"topic": "solar", "must_hits": ["capacity", "pricing"]}"#,
        )
        .unwrap();
        match tool {
            ToolCall::RunResearchSummarizer {
                topic, must_hits, geo_focus, ..
            } => {
                assert_eq!(topic, "solar");
                assert_eq!(must_hits.unwrap().len(), 2);
                assert!(geo_focus.is_none());
            }
            _ => panic!("Expected RunResearchSummarizer tool"),
        }
    }

    #[test]
    fn test_parse_missing_topic_errors() {
        let err = parse_tool_call("run_script_drafter", r#"{"audience": "everyone"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("launch_rocket", "{}").is_err());
    }

    #[test]
    fn test_delegation_prompt_layout() {
        let prompt = delegation_prompt(
            "solar",
            &[("Geo Focus", Some("US")), ("Time Window", None)],
            &[("Must-Hits", Some(&["capacity".to_string(), "pricing".to_string()][..]))],
            None,
        );
        assert_eq!(
            prompt,
            "Topic: solar\n\nGeo Focus: US\n\nMust-Hits:\n- capacity\n- pricing"
        );
    }

    #[test]
    fn test_delegation_prompt_includes_brief_last() {
        let prompt = delegation_prompt("solar", &[], &[], Some("Sources Register..."));
        assert!(prompt.ends_with("Research Brief:\nSources Register..."));
    }

    #[test]
    fn test_tool_definitions_filtered_by_declaration() {
        let defs = tool_definitions(&[ToolName::SaveMarkdown]);
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].function.name, "save_markdown");
    }

    #[tokio::test]
    async fn test_execute_validate_task_reports_issues() {
        let context = ToolContext::new(crate::config::Settings::default());
        let report = context
            .execute(&ToolCall::ValidateTask {
                task: serde_json::json!({}),
            })
            .await
            .unwrap();
        assert!(report.contains("Status: FAILED"));
        assert!(report.contains("missing topic"));
    }
}
