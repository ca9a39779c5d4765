use std::time::Duration;

use crate::args::{DEFAULT_CONTENT_TYPE, SearchArgs, TesterArgs};
use crate::error::ValidationError;

/// Immutable configuration shared by every dispatcher of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSettings {
    pub url: String,
    pub requests: u64,
    pub concurrency: usize,
    pub timeout: Duration,
    pub delay: Option<Duration>,
    pub debug: bool,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub content_type: String,
    pub auth_token: Option<String>,
}

impl RunSettings {
    /// Resolves run settings from fully merged CLI/config arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when no target URL was provided.
    pub fn from_args(args: &TesterArgs) -> Result<Self, ValidationError> {
        let url = args.url.clone().ok_or(ValidationError::MissingUrl)?;
        let delay = match args.delay_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        };

        let mut query = search_query(&args.search);
        query.extend(args.query.iter().cloned());

        Ok(Self {
            url,
            requests: args.requests.get(),
            concurrency: args.concurrency.get(),
            timeout: Duration::from_secs(args.timeout_secs.get()),
            delay,
            debug: args.debug,
            headers: args.headers.clone(),
            query,
            content_type: args
                .content_type
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
            auth_token: args.auth_token.clone(),
        })
    }
}

fn search_query(search: &SearchArgs) -> Vec<(String, String)> {
    let presets = if search.presets.is_empty() {
        None
    } else {
        Some(search.presets.join(","))
    };
    let limit = search.limit.map(|limit| limit.to_string());

    [
        ("from", search.from.clone()),
        ("to", search.to.clone()),
        ("category", search.category.clone()),
        ("keywords", search.keywords.clone()),
        ("presets", presets),
        ("location", search.location.clone()),
        ("limit", limit),
        ("after", search.after.clone()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|value| (key.to_owned(), value)))
    .collect()
}
