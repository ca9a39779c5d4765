use clap::{Args, Parser, Subcommand};

use super::parsers::{parse_header, parse_positive_u64, parse_positive_usize, parse_query_param};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Pretty-print JSON from a file or stdin (unwraps quoted/escaped payloads)
    FormatJson(FormatJsonArgs),
}

#[derive(Debug, Args, Clone)]
pub struct FormatJsonArgs {
    /// Input file; omit or pass '-' to read stdin
    pub input: Option<String>,
}

/// Well-known search filters appended to the query string when set.
#[derive(Debug, Args, Clone, Default)]
pub struct SearchArgs {
    /// Start of the time range (query param `from`)
    #[arg(long)]
    pub from: Option<String>,

    /// End of the time range (query param `to`)
    #[arg(long)]
    pub to: Option<String>,

    /// Category filter (query param `category`)
    #[arg(long)]
    pub category: Option<String>,

    /// Free-text keyword filter (query param `keywords`)
    #[arg(long)]
    pub keywords: Option<String>,

    /// Preset categories, comma-separated or repeated (query param `presets`)
    #[arg(long, value_delimiter = ',')]
    pub presets: Vec<String>,

    /// Location filter (query param `location`)
    #[arg(long)]
    pub location: Option<String>,

    /// Result limit (query param `limit`)
    #[arg(long)]
    pub limit: Option<u64>,

    /// Pagination cursor (query param `after`)
    #[arg(long)]
    pub after: Option<String>,
}

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async HTTP GET load tester - bounded concurrency, per-attempt error classification, status histograms, and a plain-text summary."
)]
pub struct TesterArgs {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Target URL for the load test
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of requests to send
    #[arg(
        long = "requests",
        short = 'n',
        default_value = "100",
        value_parser = parse_positive_u64
    )]
    pub requests: PositiveU64,

    /// Maximum number of requests in flight at once
    #[arg(
        long = "concurrency",
        short = 'c',
        default_value = "10",
        value_parser = parse_positive_usize
    )]
    pub concurrency: PositiveUsize,

    /// Per-request timeout (seconds)
    #[arg(
        long = "timeout",
        short = 't',
        default_value = "5",
        value_parser = parse_positive_u64
    )]
    pub timeout_secs: PositiveU64,

    /// Delay before each request except the first, per task (milliseconds, 0 disables)
    #[arg(long = "delay", short = 'd', default_value = "0")]
    pub delay_ms: u64,

    /// Keep every response body and print the first captured sample
    #[arg(long)]
    pub debug: bool,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Extra query parameters in 'key=value' format (repeatable)
    #[arg(long = "query", short = 'q', value_parser = parse_query_param)]
    pub query: Vec<(String, String)>,

    #[command(flatten)]
    pub search: SearchArgs,

    /// Bearer token sent in the Authorization header
    #[arg(long = "auth-token", env = "VOLLEY_AUTH_TOKEN", hide_env_values = true)]
    pub auth_token: Option<String>,

    /// Content-Type header
    #[arg(long = "content-type", short = 'T')]
    pub content_type: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./volley.toml or ./volley.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by VOLLEY_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
