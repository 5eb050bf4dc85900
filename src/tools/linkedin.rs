//! The `LinkedIn` tool: profile search exposed to the agent.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;
use crate::error::LookupError;
use crate::search::ProfileSearch;

pub const TOOL_NAME: &str = "LinkedIn";
pub const TOOL_DESCRIPTION: &str = "Search for the LinkedIn profile of the person.";

/// Resolves a name or description to a profile URL through a search backend.
pub struct LinkedInSearch {
    search: Arc<dyn ProfileSearch>,
}

impl LinkedInSearch {
    pub fn new(search: Arc<dyn ProfileSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for LinkedInSearch {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Name of the person, or a short description of who they are"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        // Some models send the bare query string instead of an object.
        let query = args["query"]
            .as_str()
            .or_else(|| args.as_str())
            .ok_or_else(|| anyhow::anyhow!("Missing 'query' argument"))?;

        tracing::info!(backend = %self.search.name(), query = %query, "Searching for profile");

        // A miss is an observation the model can act on; provider failures are not.
        match self.search.search(query).await {
            Ok(url) => Ok(url),
            Err(e @ LookupError::NoProfileFound { .. }) => {
                tracing::info!(query = %query, "No profile in search results");
                Ok(e.to_string())
            }
            Err(e) => Err(e.into()),
        }
    }
}
