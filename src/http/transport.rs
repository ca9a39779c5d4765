use std::error::Error as StdError;
use std::io::ErrorKind;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::{Client, Request, Response};
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::HttpError;
use crate::metrics::FailureKind;

use super::settings::RunSettings;

/// Fragments that mark a deadline failure. Checked before the reset list.
const TIMEOUT_MARKERS: [&str; 3] = ["timeout", "timed out", "deadline exceeded"];
const RESET_MARKERS: [&str; 6] = [
    "connection reset",
    "socket hang up",
    "econnreset",
    "broken pipe",
    "connection aborted",
    "connection closed before message completed",
];

/// A received HTTP response. `body` is only populated when capture was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<String>,
}

/// A call that produced no HTTP response, already classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

impl TransportError {
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let message = error_chain_message(err);
        let kind = classify_reqwest_error(err, &message);
        Self { kind, message }
    }
}

/// Executes one built request. Implementations enforce their own deadline.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: Request,
        capture_body: bool,
    ) -> Result<TransportResponse, TransportError>;
}

pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: Request,
        capture_body: bool,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(|err| TransportError::from_reqwest(&err))?;
        let status = response.status().as_u16();

        // The status already arrived; body read errors do not change the outcome.
        let body = if capture_body {
            match response.text().await {
                Ok(text) => Some(text),
                Err(err) => {
                    debug!("Failed to read response body: {}", err);
                    None
                }
            }
        } else {
            if let Err(err) = drain_response_body(response).await {
                debug!("Failed to drain response body: {}", err);
            }
            None
        };

        Ok(TransportResponse { status, body })
    }
}

/// Builds the shared HTTP client for a run.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(settings: &RunSettings) -> Result<Client, HttpError> {
    Client::builder()
        .timeout(settings.timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .pool_max_idle_per_host(settings.concurrency)
        .build()
        .map_err(|err| HttpError::BuildClientFailed { source: err })
}

/// Heuristic classification of a rendered transport error.
///
/// Only used when the error carries no structured signal. A message that
/// mentions both a timeout and a reset counts as a timeout. Unrelated text
/// containing these words will be misclassified.
#[must_use]
pub fn classify_message(message: &str) -> FailureKind {
    let lowered = message.to_ascii_lowercase();
    if TIMEOUT_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return FailureKind::Timeout;
    }
    if RESET_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return FailureKind::ConnectionReset;
    }
    FailureKind::Other
}

fn classify_reqwest_error(err: &reqwest::Error, message: &str) -> FailureKind {
    if err.is_timeout() {
        return FailureKind::Timeout;
    }
    classify_io_source(err).unwrap_or_else(|| classify_message(message))
}

fn classify_io_source(err: &(dyn StdError + 'static)) -> Option<FailureKind> {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(error) = current {
        let Some(io_error) = error.downcast_ref::<std::io::Error>() else {
            current = error.source();
            continue;
        };
        let kind = io_error.kind();
        if kind == ErrorKind::TimedOut {
            return Some(FailureKind::Timeout);
        }
        if matches!(
            kind,
            ErrorKind::ConnectionReset | ErrorKind::ConnectionAborted | ErrorKind::BrokenPipe
        ) {
            return Some(FailureKind::ConnectionReset);
        }
        // io::Error::source skips its own payload, so descend into it directly.
        current = match io_error.get_ref() {
            Some(inner) => Some(inner as &(dyn StdError + 'static)),
            None => error.source(),
        };
    }
    None
}

fn error_chain_message(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut current = err.source();
    while let Some(source) = current {
        message.push_str(": ");
        message.push_str(&source.to_string());
        current = source.source();
    }
    message
}

async fn drain_response_body(response: Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
