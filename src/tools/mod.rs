//! Tools the agent may call during its run loop.

mod linkedin;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionDefinition, ToolSchema};

pub use linkedin::{LinkedInSearch, TOOL_DESCRIPTION, TOOL_NAME};

/// A named capability exposed to the model.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Tools available to one agent run.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    pub fn with(mut self, tool: Arc<dyn Tool>) -> Self {
        self.register(tool);
        self
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Schemas in the format the chat-completion API expects.
    pub fn get_tool_schemas(&self) -> Vec<ToolSchema> {
        self.tools
            .values()
            .map(|t| ToolSchema {
                tool_type: "function".to_string(),
                function: FunctionDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    /// Run the named tool. Returns `None` when no such tool is registered.
    pub async fn execute(&self, name: &str, args: Value) -> Option<anyhow::Result<String>> {
        let tool = self.tools.get(name)?;
        Some(tool.execute(args).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Tool for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echo the text argument."
        }

        fn parameters_schema(&self) -> Value {
            json!({"type": "object", "properties": {"text": {"type": "string"}}})
        }

        async fn execute(&self, args: Value) -> anyhow::Result<String> {
            args["text"]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow::anyhow!("Missing 'text' argument"))
        }
    }

    #[test]
    fn schemas_use_function_format() {
        let registry = ToolRegistry::new().with(Arc::new(Echo));
        let schemas = registry.get_tool_schemas();
        assert_eq!(schemas.len(), 1);
        assert_eq!(schemas[0].tool_type, "function");
        assert_eq!(schemas[0].function.name, "echo");
        assert_eq!(registry.list_tools()[0].description, "Echo the text argument.");
    }

    #[tokio::test]
    async fn executes_registered_tool() {
        let registry = ToolRegistry::new().with(Arc::new(Echo));
        let out = registry.execute("echo", json!({"text": "hi"})).await.unwrap();
        assert_eq!(out.unwrap(), "hi");
        assert!(registry.execute("echo", json!({})).await.unwrap().is_err());
    }

    #[tokio::test]
    async fn unknown_tool_is_none() {
        let registry = ToolRegistry::new();
        assert!(registry.list_tools().is_empty());
        assert!(registry.execute("missing", Value::Null).await.is_none());
    }
}
