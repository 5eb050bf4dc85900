//! Agent module - the tool-calling loop that finds a profile URL.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt and the lookup instruction
//! 2. Call the LLM with available tools
//! 3. If the LLM requests a tool call, execute it and feed the result back
//! 4. Repeat until the LLM produces a final answer or the budget is spent

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, AgentRun, AgentState, AgentStep, StepKind};
pub use prompt::build_system_prompt;
