//! Profile-data provider client.

use serde_json::Value;

use super::{normalize, ProfileRecord};
use crate::config::{ConfigError, ProfileApiConfig};
use crate::error::LookupError;

const PROVIDER: &str = "profile-data";

/// Resolved request for one fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchTarget<'a> {
    /// Static mock document, fetched without parameters or credentials.
    Mock { url: &'a str },
    /// Provider endpoint with `?url=<profile>` and bearer auth.
    Provider {
        endpoint: &'a str,
        profile_url: &'a str,
        api_key: &'a str,
    },
}

/// Fetches and normalizes profile records.
#[derive(Debug, Clone)]
pub struct ProfileClient {
    http: reqwest::Client,
    config: ProfileApiConfig,
}

impl ProfileClient {
    pub fn new(config: ProfileApiConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LookupError::from_reqwest(PROVIDER, Some(config.timeout), e))?;
        Ok(Self { http, config })
    }

    /// Use a caller-built HTTP client; its own timeout settings apply.
    pub fn with_http_client(config: ProfileApiConfig, http: reqwest::Client) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &ProfileApiConfig {
        &self.config
    }

    /// Pick the request target. In mock mode the profile URL is ignored.
    pub fn target<'a>(&'a self, profile_url: &'a str, mock: bool) -> Result<FetchTarget<'a>, LookupError> {
        if mock {
            return Ok(FetchTarget::Mock {
                url: &self.config.mock_url,
            });
        }

        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("PROXYCURL_API_KEY".to_string()))?;

        Ok(FetchTarget::Provider {
            endpoint: &self.config.endpoint,
            profile_url,
            api_key,
        })
    }

    /// Fetch the record for `profile_url` (or the mock document) and normalize it.
    ///
    /// One GET bounded by the configured timeout. Non-2xx, non-JSON and
    /// non-object bodies are errors; nothing is retried.
    pub async fn fetch(&self, profile_url: &str, mock: bool) -> Result<ProfileRecord, LookupError> {
        let request = match self.target(profile_url, mock)? {
            FetchTarget::Mock { url } => {
                tracing::info!(url = %url, "Fetching mock profile document");
                self.http.get(url)
            }
            FetchTarget::Provider {
                endpoint,
                profile_url,
                api_key,
            } => {
                tracing::info!(endpoint = %endpoint, profile_url = %profile_url, "Fetching profile data");
                self.http
                    .get(endpoint)
                    .query(&[("url", profile_url)])
                    .bearer_auth(api_key)
            }
        };

        let timeout = Some(self.config.timeout);
        let response = request
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, timeout, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Profile-data request rejected");
            return Err(LookupError::ProviderStatus {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, timeout, e))?;

        let raw: Value = serde_json::from_str(&body).map_err(|e| LookupError::MalformedResponse {
            provider: PROVIDER,
            message: e.to_string(),
        })?;

        match raw {
            Value::Object(map) => {
                let record = normalize(&map);
                tracing::debug!(raw_fields = map.len(), fields = record.len(), "Profile normalized");
                Ok(record)
            }
            other => Err(LookupError::MalformedResponse {
                provider: PROVIDER,
                message: format!("expected a JSON object, got {}", json_kind(&other)),
            }),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
