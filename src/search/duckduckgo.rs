//! DuckDuckGo HTML search (no API key needed).

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;

use super::{first_profile_url, profile_urls_in_text, ProfileSearch};
use crate::error::LookupError;

const PROVIDER: &str = "duckduckgo";
const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";
const TIMEOUT: Duration = Duration::from_secs(30);

pub struct DuckDuckGoSearch {
    base_url: String,
}

impl DuckDuckGoSearch {
    pub fn new() -> Self {
        Self::with_base_url(SEARCH_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for DuckDuckGoSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProfileSearch for DuckDuckGoSearch {
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
        let url = format!("{}?q={}", self.base_url, urlencoding::encode(&scoped));

        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; linkedin_lookup/0.1)")
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| LookupError::from_reqwest(PROVIDER, Some(TIMEOUT), e))?;

        let response = client
            .get(&url)
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

        let html = response
            .text()
            .await
            .map_err(|e| LookupError::from_reqwest(PROVIDER, Some(TIMEOUT), e))?;

        let candidates = extract_result_urls(&html);
        tracing::debug!(query = %query, candidates = candidates.len(), "DuckDuckGo results parsed");

        first_profile_url(&candidates).ok_or_else(|| LookupError::NoProfileFound {
            query: query.to_string(),
        })
    }
}

fn redirect_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"uddg=([^&"'\s>]+)"#).expect("redirect pattern is valid"))
}

/// Result URLs from a DuckDuckGo HTML page, in page order.
///
/// Result links are wrapped in `/l/?uddg=<percent-encoded target>` redirects;
/// bare profile URLs in snippets are picked up as well.
fn extract_result_urls(html: &str) -> Vec<String> {
    let mut urls: Vec<String> = redirect_regex()
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .filter_map(|m| urlencoding::decode(m.as_str()).ok())
        .map(|decoded| decoded.into_owned())
        .collect();

    for url in profile_urls_in_text(html) {
        if !urls.contains(&url) {
            urls.push(url);
        }
    }

    urls
}
