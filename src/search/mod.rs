//! Profile discovery: turn a name or description into a LinkedIn profile URL.
//!
//! Backends query a web search provider restricted to `linkedin.com/in/`
//! pages and return the first result that looks like a member profile.

mod brave;
mod duckduckgo;

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use regex::Regex;
use url::Url;

use crate::config::SearchBackend;
use crate::error::LookupError;

pub use brave::BraveSearch;
pub use duckduckgo::DuckDuckGoSearch;

/// `search(query) -> URL` capability used by the `LinkedIn` tool.
#[async_trait]
pub trait ProfileSearch: Send + Sync {
    /// Backend name for logs.
    fn name(&self) -> &str;

    /// Return the best-matching profile URL for `query`.
    async fn search(&self, query: &str) -> Result<String, LookupError>;
}

/// Build the search backend selected in configuration.
pub fn from_backend(backend: &SearchBackend) -> Arc<dyn ProfileSearch> {
    match backend {
        SearchBackend::DuckDuckGo => Arc::new(DuckDuckGoSearch::new()),
        SearchBackend::Brave { api_key } => Arc::new(BraveSearch::new(api_key.clone())),
    }
}

fn profile_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"https?://(?:[A-Za-z0-9-]+\.)?linkedin\.com/in/[^\s"'<>()\[\]]+"#)
            .expect("profile URL pattern is valid")
    })
}

/// Whether `candidate` is an http(s) URL of a LinkedIn member profile.
pub fn is_profile_url(candidate: &str) -> bool {
    let Ok(url) = Url::parse(candidate) else {
        return false;
    };
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }
    let host_matches = url
        .host_str()
        .map(|h| h == "linkedin.com" || h.ends_with(".linkedin.com"))
        .unwrap_or(false);
    let slug = url.path().strip_prefix("/in/").unwrap_or("");
    host_matches && !slug.trim_matches('/').is_empty()
}

/// First profile URL among `candidates`, with query and fragment dropped.
pub fn first_profile_url<I, S>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    candidates
        .into_iter()
        .map(|c| c.as_ref().trim().to_string())
        .filter(|c| is_profile_url(c))
        .find_map(|c| {
            let mut url = Url::parse(&c).ok()?;
            url.set_query(None);
            url.set_fragment(None);
            Some(url.to_string())
        })
}

/// Every LinkedIn profile URL mentioned in free text, in order.
pub fn profile_urls_in_text(text: &str) -> Vec<String> {
    profile_url_regex()
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', '*', '`']).to_string())
        .collect()
}
