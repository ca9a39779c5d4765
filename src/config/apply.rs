use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{PositiveU64, PositiveUsize, SearchArgs, TesterArgs, parse_header};
use crate::error::ConfigError;

use super::types::{ConfigFile, QueryConfig};

/// Applies configuration values to CLI arguments.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> Result<(), ConfigError> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = ensure_positive_u64(requests, "requests")?;
    }

    if !is_cli(matches, "concurrency")
        && let Some(concurrency) = config.concurrency
    {
        args.concurrency = ensure_positive_usize(concurrency, "concurrency")?;
    }

    if !is_cli(matches, "timeout_secs")
        && let Some(timeout) = config.timeout
    {
        args.timeout_secs = ensure_positive_u64(timeout, "timeout")?;
    }

    if !is_cli(matches, "delay_ms")
        && let Some(delay) = config.delay
    {
        args.delay_ms = delay;
    }

    if !is_cli(matches, "debug")
        && let Some(debug) = config.debug
    {
        args.debug = debug;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(
                parse_header(header)
                    .map_err(|source| ConfigError::InvalidHeader { source })?,
            );
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "content_type")
        && let Some(content_type) = config.content_type.clone()
    {
        args.content_type = Some(content_type);
    }

    // The token may also come from VOLLEY_AUTH_TOKEN, which outranks the file.
    if !is_explicit(matches, "auth_token")
        && let Some(token) = config.auth_token.clone()
    {
        args.auth_token = Some(token);
    }

    if let Some(query) = config.query.as_ref() {
        apply_query(args, matches, query);
    }

    Ok(())
}

fn apply_query(args: &mut TesterArgs, matches: &ArgMatches, query: &QueryConfig) {
    let search: &mut SearchArgs = &mut args.search;
    apply_opt(matches, "from", &mut search.from, query.from.as_ref());
    apply_opt(matches, "to", &mut search.to, query.to.as_ref());
    apply_opt(
        matches,
        "category",
        &mut search.category,
        query.category.as_ref(),
    );
    apply_opt(
        matches,
        "keywords",
        &mut search.keywords,
        query.keywords.as_ref(),
    );
    apply_opt(
        matches,
        "location",
        &mut search.location,
        query.location.as_ref(),
    );
    apply_opt(matches, "after", &mut search.after, query.after.as_ref());

    if !is_cli(matches, "limit")
        && let Some(limit) = query.limit
    {
        search.limit = Some(limit);
    }

    if !is_cli(matches, "presets")
        && let Some(presets) = query.presets.as_ref()
    {
        search.presets = presets.clone();
    }

    if !is_cli(matches, "query")
        && let Some(extra) = query.extra.as_ref()
    {
        args.query = extra
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
    }
}

fn apply_opt(
    matches: &ArgMatches,
    name: &str,
    target: &mut Option<String>,
    value: Option<&String>,
) {
    if !is_cli(matches, name)
        && let Some(value) = value
    {
        *target = Some(value.clone());
    }
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn is_explicit(matches: &ArgMatches, name: &str) -> bool {
    matches!(
        matches.value_source(name),
        Some(ValueSource::CommandLine | ValueSource::EnvVariable)
    )
}

fn ensure_positive_u64(value: u64, field: &str) -> Result<PositiveU64, ConfigError> {
    PositiveU64::try_from(value).map_err(|source| ConfigError::FieldMustBePositive {
        field: field.to_owned(),
        source,
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> Result<PositiveUsize, ConfigError> {
    PositiveUsize::try_from(value).map_err(|source| ConfigError::FieldMustBePositive {
        field: field.to_owned(),
        source,
    })
}
