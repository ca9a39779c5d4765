//! Pretty-printer for JSON payloads copied out of logs or API consoles,
//! where the document is often wrapped in quotes and escaped once.
use std::io::Read;
use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::args::FormatJsonArgs;
use crate::error::{AppResult, FormatError};

/// Reads the input named by `args`, formats it, and prints the result.
///
/// # Errors
///
/// Returns an error when the input cannot be read or is not JSON even after
/// unescaping.
pub fn run_format_json(args: &FormatJsonArgs) -> AppResult<()> {
    let input = read_input(args.input.as_deref())?;
    let formatted = format_json(&input)?;
    println!("{}", formatted);
    Ok(())
}

/// Formats `input` as two-space indented JSON.
///
/// Surrounding whitespace and one layer of enclosing double quotes are
/// removed first. If the result does not parse, `\"` and `\\` escapes are
/// undone once and parsing is retried.
///
/// # Errors
///
/// Returns `FormatError::Parse` when neither attempt parses.
pub fn format_json(input: &str) -> Result<String, FormatError> {
    let trimmed = strip_enclosing_quotes(input.trim());

    let value = match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => value,
        Err(err) => {
            debug!("Direct parse failed, retrying unescaped: {}", err);
            let unescaped = trimmed.replace("\\\"", "\"").replace("\\\\", "\\");
            serde_json::from_str::<Value>(&unescaped)
                .map_err(|source| FormatError::Parse { source })?
        }
    };

    serde_json::to_string_pretty(&value).map_err(|source| FormatError::Serialize { source })
}

fn strip_enclosing_quotes(input: &str) -> &str {
    input
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(input)
}

fn read_input(path: Option<&str>) -> Result<String, FormatError> {
    match path {
        None | Some("-") => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| FormatError::ReadStdin { source })?;
            Ok(buffer)
        }
        Some(path) => {
            let path = PathBuf::from(path);
            std::fs::read_to_string(&path).map_err(|source| FormatError::ReadFile { path, source })
        }
    }
}
