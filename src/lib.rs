//! # linkedin_lookup
//!
//! Find a person's LinkedIn profile with a tool-calling agent, then fetch and
//! clean the profile record from a profile-data provider.
//!
//! This library provides:
//! - Instruction formatting for name and description lookups
//! - A tool-based agent loop over an OpenAI-compatible chat API
//! - A `LinkedIn` search tool backed by a web search provider
//! - Profile fetching with a bounded timeout and record normalization
//!
//! ## Example
//!
//! ```rust,ignore
//! use linkedin_lookup::{Config, ProfileResolver, SearchQuery};
//!
//! let config = Config::from_env()?;
//! let resolver = ProfileResolver::from_config(&config)?;
//! let url = resolver.lookup_url(&SearchQuery::by_name("John Doe")).await?;
//! let profile = resolver.fetch_profile(&url, false).await?;
//! ```

pub mod agent;
pub mod config;
pub mod error;
pub mod llm;
pub mod profile;
pub mod query;
pub mod resolver;
pub mod search;
pub mod tools;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::LookupError;
pub use profile::{normalize, ProfileRecord};
pub use query::{format_instruction, QueryMode, SearchQuery};
pub use resolver::{ProfileResolver, ResolvedProfile};
