use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::{first_profile_url, ProfileSearch};
use crate::error::LookupError;

const PROVIDER: &str = "brave";
const BRAVE_API_BASE: &str = "https://api.search.brave.com/res/v1";
const TIMEOUT: Duration = Duration::from_secs(30);

/// Brave Search API backend.
pub struct BraveSearch {
    api_key: String,
    base_url: String,
}

impl BraveSearch {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: BRAVE_API_BASE.to_string(),
        }
    }

    fn client(&self) -> Result<reqwest::Client, LookupError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let token = reqwest::header::HeaderValue::from_str(&self.api_key).map_err(|e| {
            LookupError::Config(crate::config::ConfigError::InvalidValue(
                "BRAVE_API_KEY".to_string(),
                e.to_string(),
            ))
        })?;
        headers.insert("X-Subscription-Token", token);

        reqwest::Client::builder()
            .user_agent("linkedin_lookup/0.1")
            .default_headers(headers)
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| LookupError::from_reqwest(PROVIDER, Some(TIMEOUT), e))
    }
}

#[async_trait]
impl ProfileSearch for BraveSearch {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn search(&self, query: &str) -> Result<String, LookupError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LookupError::NoProfileFound {
                query: query.to_string(),
            });
        }

        let scoped = format!("site:linkedin.com/in {}", query);
        let response = self
            .client()?
            .get(format!("{}/web/search", self.base_url))
            .query(&[("q", scoped.as_str()), ("count", "10"), ("text_decorations", "false")])
            .send()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, Some(TIMEOUT), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::ProviderStatus {
                provider: PROVIDER,
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, Some(TIMEOUT), e))?;

        first_profile_url(result_urls(&data)).ok_or_else(|| LookupError::NoProfileFound {
            query: query.to_string(),
        })
    }
}

/// `web.results[].url` from a Brave response.
fn result_urls(data: &Value) -> Vec<&str> {
    data["web"]["results"]
        .as_array()
        .map(|results| results.iter().filter_map(|r| r["url"].as_str()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_result_urls() {
        let data = json!({
            "web": {"results": [
                {"title": "Acme", "url": "https://www.linkedin.com/company/acme"},
                {"title": "Jane Roe", "url": "https://www.linkedin.com/in/janeroe"},
                {"title": "no url"}
            ]}
        });
        assert_eq!(
            result_urls(&data),
            vec![
                "https://www.linkedin.com/company/acme",
                "https://www.linkedin.com/in/janeroe"
            ]
        );
        assert_eq!(
            first_profile_url(result_urls(&data)).as_deref(),
            Some("https://www.linkedin.com/in/janeroe")
        );
    }

    #[test]
    fn missing_web_section_yields_nothing() {
        assert!(result_urls(&json!({"query": {}})).is_empty());
    }

    #[test]
    fn invalid_key_is_a_config_error() {
        let search = BraveSearch::new("bad\nkey".to_string());
        assert!(matches!(search.client(), Err(LookupError::Config(_))));
    }
}
