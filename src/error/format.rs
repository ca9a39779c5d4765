use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("Failed to read file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read from stdin: {source}")]
    ReadStdin {
        #[source]
        source: std::io::Error,
    },
    #[error("Error parsing JSON: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error("Error formatting JSON: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },
}
