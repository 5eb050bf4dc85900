//! System prompt template for the lookup agent.

use crate::tools::ToolRegistry;

/// Build the reason-then-act system prompt listing the available tools.
pub fn build_system_prompt(tools: &ToolRegistry) -> String {
    let tool_descriptions = tools
        .list_tools()
        .iter()
        .map(|t| format!("- {}: {}", t.name, t.description))
        .collect::<Vec<_>>()
        .join("\n");

    let tool_names = tools
        .list_tools()
        .iter()
        .map(|t| t.name.clone())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"Answer the following questions as best you can. You have access to the following tools:

{tool_descriptions}

Work step by step:
1. Think about what you need to find out.
2. Call one of [{tool_names}] when you need information you do not have. Never invent a URL; use the tool result.
3. Read the tool result and decide whether you know the final answer.
4. When you know the final answer, reply with it and nothing else.

If a tool result does not answer the question, refine the query and call the tool again."#,
        tool_descriptions = tool_descriptions,
        tool_names = tool_names
    )
}
