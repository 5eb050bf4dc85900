//! Error taxonomy shared by the lookup pipeline.

use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("{provider} request timed out after {timeout_secs}s")]
    ProviderTimeout {
        provider: &'static str,
        timeout_secs: u64,
    },

    #[error("{provider} returned HTTP {status}: {body}")]
    ProviderStatus {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned a malformed response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} request failed: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Agent failed: {0}")]
    AgentFailure(String),

    #[error("Tool '{name}' failed: {message}")]
    ToolFailed { name: String, message: String },

    #[error("No LinkedIn profile found for: {query}")]
    NoProfileFound { query: String },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl LookupError {
    /// Classify a reqwest failure, separating timeouts from other transport errors.
    pub(crate) fn from_reqwest(provider: &'static str, timeout: Option<Duration>, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LookupError::ProviderTimeout {
                provider,
                timeout_secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }
        } else if err.is_decode() {
            LookupError::MalformedResponse {
                provider,
                message: err.to_string(),
            }
        } else {
            LookupError::Transport { provider, source: err }
        }
    }
}
