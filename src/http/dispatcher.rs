use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::error::HttpError;
use crate::metrics::{Aggregator, AttemptOutcome, FailureKind};
use crate::report::attempt_line;

use super::limiter::ConcurrencyLimiter;
use super::request::build_request;
use super::settings::RunSettings;
use super::transport::Transport;

/// Everything a single attempt needs, borrowed from the runner's shared state.
pub(super) struct DispatchContext<'ctx, T: ?Sized> {
    pub(super) settings: &'ctx RunSettings,
    pub(super) transport: &'ctx T,
    pub(super) limiter: &'ctx ConcurrencyLimiter,
    pub(super) aggregator: &'ctx Aggregator,
}

/// Runs attempt `index` end to end and records exactly one outcome.
pub(super) async fn dispatch_attempt<T>(index: u64, context: &DispatchContext<'_, T>)
where
    T: Transport + ?Sized,
{
    let _permit = match context.limiter.acquire().await {
        Ok(permit) => permit,
        Err(err) => {
            let outcome = AttemptOutcome::Failure {
                kind: FailureKind::Other,
                duration: std::time::Duration::ZERO,
                message: format!("admission gate closed: {}", err),
            };
            report_outcome(index, outcome, context.aggregator);
            return;
        }
    };
    trace!(
        request = index,
        in_flight = context.limiter.in_flight(),
        "Admitted"
    );

    if let Some(delay) = context.settings.delay
        && index > 0
    {
        sleep(delay).await;
    }

    let outcome = match build_request(context.settings) {
        Ok(request) => {
            let capture_body = index == 0 || context.settings.debug;
            let started = Instant::now();
            let result = context.transport.send(request, capture_body).await;
            let duration = started.elapsed();
            match result {
                Ok(response) => AttemptOutcome::Success {
                    status: response.status,
                    duration,
                    body: response.body,
                },
                Err(err) => AttemptOutcome::Failure {
                    kind: err.kind,
                    duration,
                    message: err.message,
                },
            }
        }
        Err(err) => AttemptOutcome::Failure {
            kind: build_failure_kind(&err),
            duration: std::time::Duration::ZERO,
            message: err.to_string(),
        },
    };

    report_outcome(index, outcome, context.aggregator);
}

fn report_outcome(index: u64, outcome: AttemptOutcome, aggregator: &Aggregator) {
    if let AttemptOutcome::Failure { kind, message, .. } = &outcome {
        debug!(request = index, kind = %kind, "Attempt failed: {}", message);
    }
    println!("{}", attempt_line(index, &outcome));
    aggregator.record(outcome);
}

const fn build_failure_kind(err: &HttpError) -> FailureKind {
    match err {
        HttpError::MalformedUrl { .. } => FailureKind::MalformedUrl,
        HttpError::InvalidHeaderName { .. }
        | HttpError::InvalidHeaderValue { .. }
        | HttpError::BuildClientFailed { .. } => FailureKind::Build,
    }
}
