//! Profile records: fetching from the profile-data provider and cleanup.

mod client;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use client::{FetchTarget, ProfileClient};

/// Keys dropped from every record.
pub const EXCLUDED_KEYS: [&str; 2] = ["people_also_viewed", "certifications"];

/// Profile fields keyed by name, as returned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileRecord(Map<String, Value>);

impl ProfileRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ProfileRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Clean a raw provider record.
///
/// Keeps every top-level entry whose value is not null, `""` or `[]` and whose
/// key is not in [`EXCLUDED_KEYS`], then strips `profile_pic_url` from each
/// object under `groups`. Nested values are otherwise left untouched.
pub fn normalize(raw: &Map<String, Value>) -> ProfileRecord {
    let mut cleaned: Map<String, Value> = raw
        .iter()
        .filter(|(key, value)| !EXCLUDED_KEYS.contains(&key.as_str()) && !is_blank(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if let Some(Value::Array(groups)) = cleaned.get_mut("groups") {
        for group in groups.iter_mut() {
            if let Value::Object(fields) = group {
                fields.remove("profile_pic_url");
            }
        }
    }

    ProfileRecord(cleaned)
}
