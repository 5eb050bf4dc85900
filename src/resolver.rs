//! Profile resolution: query → LinkedIn URL → normalized profile record.

use std::sync::Arc;

use serde::Serialize;

use crate::agent::Agent;
use crate::config::Config;
use crate::error::LookupError;
use crate::llm::{LlmClient, OpenAiClient};
use crate::profile::{ProfileClient, ProfileRecord};
use crate::query::SearchQuery;
use crate::search::{self, first_profile_url, profile_urls_in_text, ProfileSearch};
use crate::tools::{LinkedInSearch, ToolRegistry};

/// URL plus the cleaned record fetched for it.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedProfile {
    pub url: String,
    pub profile: ProfileRecord,
}

/// Finds profile URLs with the lookup agent and fetches their data.
pub struct ProfileResolver {
    llm: Arc<dyn LlmClient>,
    search: Arc<dyn ProfileSearch>,
    profiles: ProfileClient,
    model: String,
    max_iterations: usize,
}

impl ProfileResolver {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        search: Arc<dyn ProfileSearch>,
        profiles: ProfileClient,
        model: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            search,
            profiles,
            model: model.into(),
            max_iterations,
        }
    }

    /// Wire the OpenAI client, the configured search backend and the profile client.
    pub fn from_config(config: &Config) -> Result<Self, LookupError> {
        let llm = Arc::new(OpenAiClient::new(config.api_key.clone(), config.llm_base_url.clone()));
        let search = search::from_backend(&config.search);
        let profiles = ProfileClient::new(config.profile.clone())?;
        Ok(Self::new(
            llm,
            search,
            profiles,
            config.model.clone(),
            config.max_iterations,
        ))
    }

    /// Default mock flag from configuration.
    pub fn mock_by_default(&self) -> bool {
        self.profiles.config().mock
    }

    /// Ask the agent for the profile URL matching `query`.
    ///
    /// A fresh agent and tool list are built for every call.
    pub async fn lookup_url(&self, query: &SearchQuery) -> Result<String, LookupError> {
        let tools = ToolRegistry::new().with(Arc::new(LinkedInSearch::new(self.search.clone())));
        let agent = Agent::new(self.llm.clone(), tools, self.model.clone(), self.max_iterations);

        let run = agent.run(&query.instruction()).await?;
        for step in &run.steps {
            tracing::debug!(kind = ?step.kind, at = %step.timestamp, "{}", step.content);
        }
        let url = extract_profile_url(&run.output);

        tracing::info!(
            mode = ?query.mode(),
            iterations = run.iterations,
            url = %url,
            "Profile URL resolved"
        );
        Ok(url)
    }

    /// Fetch and normalize the record for `linkedin_profile_url`.
    pub async fn fetch_profile(
        &self,
        linkedin_profile_url: &str,
        mock: bool,
    ) -> Result<ProfileRecord, LookupError> {
        self.profiles.fetch(linkedin_profile_url, mock).await
    }

    /// Look up the URL, then fetch its profile.
    pub async fn resolve(&self, query: &SearchQuery, mock: bool) -> Result<ResolvedProfile, LookupError> {
        let url = self.lookup_url(query).await?;
        let profile = self.fetch_profile(&url, mock).await?;
        Ok(ResolvedProfile { url, profile })
    }
}

/// First profile URL in the agent's answer without query or fragment,
/// or the trimmed answer itself.
pub fn extract_profile_url(answer: &str) -> String {
    first_profile_url(profile_urls_in_text(answer)).unwrap_or_else(|| answer.trim().to_string())
}
