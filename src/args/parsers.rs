use super::types::{PositiveU64, PositiveUsize};
use crate::error::ValidationError;

pub(crate) fn parse_header(s: &str) -> Result<(String, String), ValidationError> {
    match s.split_once(':') {
        Some((key, value)) => Ok((key.trim().to_owned(), value.trim().to_owned())),
        None => Err(ValidationError::InvalidHeaderFormat {
            value: s.to_owned(),
        }),
    }
}

/// Parses `key=value`. The value may be empty (`after=`), the key may not.
pub(crate) fn parse_query_param(s: &str) -> Result<(String, String), ValidationError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ValidationError::InvalidQueryFormat {
            value: s.to_owned(),
        })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ValidationError::EmptyQueryName {
            value: s.to_owned(),
        });
    }
    Ok((key.to_owned(), value.to_owned()))
}

pub(super) fn parse_positive_u64(s: &str) -> Result<PositiveU64, ValidationError> {
    s.parse::<PositiveU64>()
}

pub(super) fn parse_positive_usize(s: &str) -> Result<PositiveUsize, ValidationError> {
    s.parse::<PositiveUsize>()
}
