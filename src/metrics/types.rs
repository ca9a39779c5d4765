use std::fmt;
use std::time::Duration;

/// Why an attempt produced no HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The base URL could not be parsed.
    MalformedUrl,
    /// The request could not be assembled (bad header name/value).
    Build,
    /// The call exceeded the configured deadline.
    Timeout,
    /// The peer reset or hung up the connection.
    ConnectionReset,
    /// Any other transport failure (DNS, refused connection, TLS, ...).
    Other,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::MalformedUrl => "malformed url",
            FailureKind::Build => "build error",
            FailureKind::Timeout => "timeout",
            FailureKind::ConnectionReset => "connection reset",
            FailureKind::Other => "transport error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one request attempt, consumed once by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// An HTTP response arrived, whatever its status code.
    Success {
        status: u16,
        duration: Duration,
        body: Option<String>,
    },
    Failure {
        kind: FailureKind,
        duration: Duration,
        message: String,
    },
}
