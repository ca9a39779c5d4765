use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error};

use crate::metrics::{Aggregator, AttemptOutcome, FailureKind};
use crate::report::RunReport;

use super::dispatcher::{DispatchContext, dispatch_attempt};
use super::limiter::ConcurrencyLimiter;
use super::settings::RunSettings;
use super::transport::Transport;

/// Spawns one task per request index, waits for all of them, and returns
/// the final statistics with the run timing.
pub async fn run_load_test<T>(settings: Arc<RunSettings>, transport: Arc<T>) -> RunReport
where
    T: Transport + ?Sized + 'static,
{
    let limiter = Arc::new(ConcurrencyLimiter::new(settings.concurrency));
    let aggregator = Arc::new(Aggregator::new());
    debug!(
        requests = settings.requests,
        concurrency = limiter.capacity(),
        "Dispatching requests"
    );

    let started = Instant::now();
    let mut tasks = JoinSet::new();
    for index in 0..settings.requests {
        let settings = Arc::clone(&settings);
        let transport = Arc::clone(&transport);
        let limiter = Arc::clone(&limiter);
        let aggregator = Arc::clone(&aggregator);
        tasks.spawn(async move {
            let context = DispatchContext {
                settings: &settings,
                transport: transport.as_ref(),
                limiter: &limiter,
                aggregator: &aggregator,
            };
            dispatch_attempt(index, &context).await;
        });
    }

    while let Some(joined) = tasks.join_next().await {
        if let Err(err) = joined {
            // The task died before recording; count it so totals still add up.
            error!("Dispatch task failed: {}", err);
            aggregator.record(AttemptOutcome::Failure {
                kind: FailureKind::Other,
                duration: Duration::ZERO,
                message: err.to_string(),
            });
        }
    }
    let elapsed = started.elapsed();
    // Every task has joined, so the runner normally holds the last handle.
    let snapshot = Arc::try_unwrap(aggregator)
        .map_or_else(|shared| shared.snapshot(), Aggregator::into_snapshot);

    RunReport {
        snapshot,
        elapsed,
        total_requests: settings.requests,
        concurrency: limiter.capacity(),
        peak_in_flight: limiter.peak_in_flight(),
    }
}
