use std::collections::BTreeMap;

use serde::Deserialize;

/// Values accepted from `volley.toml` / `volley.json`. Anything set on the
/// command line wins over the file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub requests: Option<u64>,
    pub concurrency: Option<usize>,
    /// Seconds.
    pub timeout: Option<u64>,
    /// Milliseconds, 0 disables.
    pub delay: Option<u64>,
    pub debug: Option<bool>,
    pub headers: Option<Vec<String>>,
    pub content_type: Option<String>,
    pub auth_token: Option<String>,
    pub query: Option<QueryConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    pub from: Option<String>,
    pub to: Option<String>,
    pub category: Option<String>,
    pub keywords: Option<String>,
    pub presets: Option<Vec<String>>,
    pub location: Option<String>,
    pub limit: Option<u64>,
    pub after: Option<String>,
    /// Additional `key = value` pairs appended after the named filters.
    pub extra: Option<BTreeMap<String, String>>,
}
