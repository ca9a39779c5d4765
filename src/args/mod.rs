//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
mod parsers;
mod types;


pub use cli::{Command, FormatJsonArgs, SearchArgs, TesterArgs};
pub use types::{PositiveU64, PositiveUsize};

pub(crate) use defaults::{DEFAULT_CONTENT_TYPE, DEFAULT_USER_AGENT};
pub(crate) use parsers::parse_header;
