//! Core agent loop implementation.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::error::LookupError;
use crate::llm::{ChatMessage, ChatResponse, LlmClient, Role, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;

/// Where the loop is between model turns.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentState {
    /// Waiting on the model
    Thinking,
    /// The model asked for these tool calls
    ToolCall(Vec<ToolCall>),
    /// The model produced its final text
    FinalAnswer(String),
    /// The run cannot produce an answer
    Failed(String),
}

/// Kinds of transcript entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Thinking,
    ToolCall,
    ToolResult,
    Answer,
}

/// A single entry in the run transcript.
#[derive(Debug, Clone)]
pub struct AgentStep {
    /// Timestamp (RFC 3339)
    pub timestamp: String,
    pub kind: StepKind,
    pub content: String,
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct AgentRun {
    /// Final answer text
    pub output: String,
    /// Model calls made
    pub iterations: usize,
    pub steps: Vec<AgentStep>,
}

/// Tool-calling agent over a chat-completion model.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl Agent {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        model: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            model: model.into(),
            max_iterations,
        }
    }

    /// Run the loop on `input` until the model answers or the run fails.
    ///
    /// Errors from the model provider and from registered tools abort the run
    /// unchanged. A call to an unregistered tool is reported back to the model.
    pub async fn run(&self, input: &str) -> Result<AgentRun, LookupError> {
        let run_id = Uuid::new_v4();
        let tool_schemas = self.tools.get_tool_schemas();
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(input),
        ];
        let mut steps = Vec::new();
        let mut iterations = 0;
        let mut state = AgentState::Thinking;

        tracing::debug!(run_id = %run_id, model = %self.model, "Agent run started");

        loop {
            state = match state {
                AgentState::Thinking => {
                    if iterations >= self.max_iterations {
                        AgentState::Failed(format!(
                            "Max iterations ({}) reached without a final answer",
                            self.max_iterations
                        ))
                    } else {
                        iterations += 1;
                        tracing::debug!(run_id = %run_id, iteration = iterations, "Agent iteration");

                        let response = self
                            .llm
                            .chat_completion(&self.model, &messages, Some(tool_schemas.as_slice()))
                            .await?;
                        transition(response, &mut messages, &mut steps)
                    }
                }
                AgentState::ToolCall(calls) => {
                    for call in &calls {
                        let observation = self.call_tool(call, &mut steps).await?;
                        messages.push(ChatMessage::tool_result(call.id.clone(), observation));
                    }
                    AgentState::Thinking
                }
                AgentState::FinalAnswer(output) => {
                    tracing::debug!(run_id = %run_id, iterations, "Agent run finished");
                    return Ok(AgentRun {
                        output,
                        iterations,
                        steps,
                    });
                }
                AgentState::Failed(reason) => {
                    tracing::warn!(run_id = %run_id, iterations, reason = %reason, "Agent run failed");
                    return Err(LookupError::AgentFailure(reason));
                }
            };
        }
    }

    async fn call_tool(&self, call: &ToolCall, steps: &mut Vec<AgentStep>) -> Result<String, LookupError> {
        let name = &call.function.name;
        let args = parse_arguments(&call.function.arguments);

        tracing::info!(tool = %name, args = %args, "Calling tool");
        steps.push(step(
            StepKind::ToolCall,
            format!("Calling tool: {} with args: {}", name, args),
        ));

        let observation = match self.tools.execute(name, args).await {
            Some(Ok(output)) => output,
            Some(Err(e)) => {
                return Err(LookupError::ToolFailed {
                    name: name.clone(),
                    message: format!("{:#}", e),
                })
            }
            None => {
                tracing::warn!(tool = %name, "Model requested an unknown tool");
                let known = self
                    .tools
                    .list_tools()
                    .into_iter()
                    .map(|t| t.name)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} is not a valid tool, try one of [{}].", name, known)
            }
        };

        steps.push(step(StepKind::ToolResult, truncate_for_log(&observation, 1000)));
        Ok(observation)
    }
}

/// Decide the next state from a model turn, recording it in the conversation.
fn transition(
    response: ChatResponse,
    messages: &mut Vec<ChatMessage>,
    steps: &mut Vec<AgentStep>,
) -> AgentState {
    let content = response
        .content
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    match response.tool_calls {
        Some(calls) if !calls.is_empty() => {
            if let Some(thought) = &content {
                steps.push(step(StepKind::Thinking, truncate_for_log(thought, 2000)));
            }
            messages.push(ChatMessage {
                role: Role::Assistant,
                content: response.content,
                tool_calls: Some(calls.clone()),
                tool_call_id: None,
            });
            AgentState::ToolCall(calls)
        }
        _ => match content {
            Some(answer) => {
                steps.push(step(StepKind::Answer, truncate_for_log(&answer, 2000)));
                AgentState::FinalAnswer(answer)
            }
            None => AgentState::Failed("LLM returned empty response".to_string()),
        },
    }
}

/// Tool arguments arrive JSON-encoded; anything else is passed on as a string.
fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn step(kind: StepKind, content: String) -> AgentStep {
    AgentStep {
        timestamp: chrono::Utc::now().to_rfc3339(),
        kind,
        content,
    }
}

/// Truncate a string for logging purposes.
fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!("{}... [truncated]", &s[..idx]),
    }
}
