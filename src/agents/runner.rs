//! Agent runner with tool calling loop.

use super::descriptor::AgentDescriptor;
use super::tools::{parse_tool_call, tool_definitions, ToolContext};
use crate::error::{BylineError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionMessageToolCall, ChatCompletionRequestAssistantMessageArgs,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestToolMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs,
};
use tracing::{debug, info, warn};

/// Executes one agent descriptor against the chat-completions API,
/// resolving tool calls through the shared [`ToolContext`].
pub struct Agent {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    descriptor: AgentDescriptor,
    tools: ToolContext,
    max_iterations: usize,
}

impl Agent {
    /// Create an agent from a descriptor and tool context.
    pub fn new(descriptor: AgentDescriptor, tools: ToolContext, model: &str) -> Self {
        let model_settings = &tools.settings().model;
        let client = create_client(model_settings);
        let max_iterations = model_settings.max_iterations;
        Self {
            client,
            model: model.to_string(),
            descriptor,
            tools,
            max_iterations,
        }
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent with a user prompt and optional extra context.
    pub async fn run(&self, prompt: &str, context: Option<&str>) -> Result<AgentResponse> {
        let mut messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.descriptor.instructions.clone())
                .build()
                .map_err(|e| BylineError::Agent(e.to_string()))?
                .into(),
        ];

        let user_message = match context {
            Some(ctx) => format!("Context: {}\n\n{}", ctx, prompt),
            None => prompt.to_string(),
        };

        messages.push(
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_message)
                .build()
                .map_err(|e| BylineError::Agent(e.to_string()))?
                .into(),
        );

        let definitions = tool_definitions(&self.descriptor.tools);
        let mut iterations = 0;
        let mut tool_calls_made = Vec::new();

        loop {
            iterations += 1;
            if iterations > self.max_iterations {
                return Err(BylineError::Agent(format!(
                    "{} exceeded maximum iterations ({})",
                    self.descriptor.name, self.max_iterations
                )));
            }

            debug!("{} iteration {}", self.descriptor.name, iterations);

            let mut request = CreateChatCompletionRequestArgs::default();
            request.model(&self.model).messages(messages.clone());
            if !definitions.is_empty() {
                request.tools(definitions.clone());
            }
            let request = request
                .build()
                .map_err(|e| BylineError::Agent(e.to_string()))?;

            let response = self
                .client
                .chat()
                .create(request)
                .await
                .map_err(|e| BylineError::OpenAI(format!("Agent API error: {}", e)))?;

            let choice = response
                .choices
                .first()
                .ok_or_else(|| BylineError::Agent("No response from model".to_string()))?;

            match &choice.message.tool_calls {
                Some(tool_calls) if !tool_calls.is_empty() => {
                    let assistant_msg = ChatCompletionRequestAssistantMessageArgs::default()
                        .tool_calls(tool_calls.clone())
                        .build()
                        .map_err(|e| BylineError::Agent(e.to_string()))?;
                    messages.push(assistant_msg.into());

                    for tool_call in tool_calls {
                        let record = self.execute_tool_call(tool_call).await;

                        let tool_msg = ChatCompletionRequestToolMessageArgs::default()
                            .tool_call_id(&tool_call.id)
                            .content(record.result.clone())
                            .build()
                            .map_err(|e| BylineError::Agent(e.to_string()))?;
                        messages.push(tool_msg.into());

                        tool_calls_made.push(record);
                    }
                }
                _ => {
                    // No tool calls, the model is done.
                    return Ok(AgentResponse {
                        agent_name: self.descriptor.name.clone(),
                        content: choice.message.content.clone().unwrap_or_default(),
                        tool_calls: tool_calls_made,
                        iterations,
                    });
                }
            }
        }
    }

    /// Execute a single tool call and return a record of it.
    ///
    /// Failures degrade to a textual tool result so the loop keeps going.
    async fn execute_tool_call(&self, tool_call: &ChatCompletionMessageToolCall) -> ToolCallRecord {
        let name = &tool_call.function.name;
        let arguments = &tool_call.function.arguments;

        info!("{} calling tool: {} with args: {}", self.descriptor.name, name, arguments);

        let result = match parse_tool_call(name, arguments) {
            Ok(tool) if !self.descriptor.declares(tool.kind()) => {
                warn!("{} requested undeclared tool {}", self.descriptor.name, name);
                format!("Tool '{}' is not available to this agent.", name)
            }
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.clone(),
            arguments: arguments.clone(),
            result,
        }
    }
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// Name of the agent that produced the response.
    pub agent_name: String,
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by an agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// JSON arguments passed to the tool.
    pub arguments: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_record_display() {
        let record = ToolCallRecord {
            name: "validate_task".to_string(),
            arguments: r#"{"task": {"topic": "solar"}}"#.to_string(),
            result: "Status: PASSED".to_string(),
        };
        assert_eq!(
            format!("{}", record),
            r#"validate_task({"task": {"topic": "solar"}})"#
        );
    }
}
