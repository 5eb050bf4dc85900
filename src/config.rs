//! Configuration management for linkedin_lookup.
//!
//! Configuration is read once from environment variables:
//! - `OPENAI_API_KEY` - Required. Key for the chat-completion provider.
//! - `OPENAI_BASE_URL` - Optional. Defaults to `https://api.openai.com/v1`.
//! - `LOOKUP_MODEL` - Optional. Model identifier. Defaults to `gpt-3.5-turbo`.
//! - `MAX_ITERATIONS` - Optional. Agent loop budget. Defaults to `15`.
//! - `PROXYCURL_API_KEY` - Optional. Bearer token for the profile-data provider.
//! - `PROFILE_API_ENDPOINT` - Optional. Profile-data endpoint. Defaults to Proxycurl.
//! - `PROFILE_MOCK` - Optional. Serve the static mock document instead. Defaults to `false`.
//! - `SEARCH_BACKEND` - Optional. `duckduckgo` (default) or `brave`.
//! - `BRAVE_API_KEY` - Required when `SEARCH_BACKEND=brave`.

use std::time::Duration;

use thiserror::Error;

/// Default chat-completion base URL.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Default agent iteration budget.
pub const DEFAULT_MAX_ITERATIONS: usize = 15;

/// Proxycurl person-profile endpoint.
pub const DEFAULT_PROFILE_ENDPOINT: &str = "https://nubela.co/proxycurl/api/v2/linkedin";

/// Static profile document served in mock mode.
pub const MOCK_PROFILE_URL: &str = "https://gist.githubusercontent.com/emarco177/0d6a3f93dd06634d95e46a2782ed7490/raw/fad4d7a87e3e934ad52ba2a968bad9eb45128665/eden-marco.json";

/// Bound on a single profile-data request.
pub const PROFILE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Profile-data provider configuration.
#[derive(Debug, Clone)]
pub struct ProfileApiConfig {
    /// Provider endpoint queried with `?url=<profile url>`
    pub endpoint: String,

    /// Bearer token; only required outside mock mode
    pub api_key: Option<String>,

    /// Document fetched when mock mode is requested
    pub mock_url: String,

    /// Default for the per-call mock flag
    pub mock: bool,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for ProfileApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_PROFILE_ENDPOINT.to_string(),
            api_key: None,
            mock_url: MOCK_PROFILE_URL.to_string(),
            mock: false,
            timeout: PROFILE_TIMEOUT,
        }
    }
}

/// Which web search provider backs the `LinkedIn` tool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchBackend {
    /// DuckDuckGo HTML endpoint (no key needed)
    #[default]
    DuckDuckGo,
    /// Brave Search API
    Brave { api_key: String },
}

/// Lookup configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Chat-completion provider API key
    pub api_key: String,

    /// Chat-completion provider base URL
    pub llm_base_url: String,

    /// Model identifier
    pub model: String,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,

    /// Profile-data provider configuration
    pub profile: ProfileApiConfig,

    /// Search backend for profile discovery
    pub search: SearchBackend,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set, or
    /// if the Brave backend is selected without `BRAVE_API_KEY`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key =
            var("OPENAI_API_KEY").ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let llm_base_url = var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_string());

        let model = var("LOOKUP_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let max_iterations = var("MAX_ITERATIONS")
            .map(|v| {
                v.parse::<usize>()
                    .map_err(|e| ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e)))
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_ITERATIONS);

        if max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let mock = var("PROFILE_MOCK")
            .map(|v| parse_bool(&v).map_err(|e| ConfigError::InvalidValue("PROFILE_MOCK".to_string(), e)))
            .transpose()?
            .unwrap_or(false);

        let profile = ProfileApiConfig {
            endpoint: var("PROFILE_API_ENDPOINT").unwrap_or_else(|| DEFAULT_PROFILE_ENDPOINT.to_string()),
            api_key: var("PROXYCURL_API_KEY").filter(|k| !k.trim().is_empty()),
            mock,
            ..ProfileApiConfig::default()
        };

        let search = match var("SEARCH_BACKEND").as_deref().map(|s| s.trim().to_lowercase()) {
            None => SearchBackend::DuckDuckGo,
            Some(name) if name == "duckduckgo" || name == "ddg" => SearchBackend::DuckDuckGo,
            Some(name) if name == "brave" => {
                let api_key = var("BRAVE_API_KEY")
                    .ok_or_else(|| ConfigError::MissingEnvVar("BRAVE_API_KEY".to_string()))?;
                SearchBackend::Brave { api_key }
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue(
                    "SEARCH_BACKEND".to_string(),
                    format!("expected duckduckgo or brave, got: {}", other),
                ))
            }
        };

        Ok(Self {
            api_key,
            llm_base_url,
            model,
            max_iterations,
            profile,
            search,
        })
    }

    /// Create a config with default values (useful for testing).
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            profile: ProfileApiConfig::default(),
            search: SearchBackend::default(),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}
