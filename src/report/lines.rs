use std::time::Duration;

use crate::metrics::{AttemptOutcome, FailureKind};

use super::RunReport;
use super::stats::{HUNDREDTHS_SCALE, PERCENT_SCALE, compute_report_stats, secs_x100};

/// One console line for a completed attempt.
#[must_use]
pub fn attempt_line(index: u64, outcome: &AttemptOutcome) -> String {
    match outcome {
        AttemptOutcome::Success {
            status, duration, ..
        } => format!(
            "Request {} completed in {} with status: {}",
            index,
            format_secs(*duration),
            status
        ),
        AttemptOutcome::Failure {
            kind,
            duration,
            message,
        } => match kind {
            FailureKind::Timeout => format!(
                "Request {} timed out after {}: {}",
                index,
                format_secs(*duration),
                message
            ),
            FailureKind::ConnectionReset => format!(
                "Request {} connection reset after {}: {}",
                index,
                format_secs(*duration),
                message
            ),
            FailureKind::MalformedUrl | FailureKind::Build => {
                format!("Request {} could not be built: {}", index, message)
            }
            FailureKind::Other => format!(
                "Request {} failed after {}: {}",
                index,
                format_secs(*duration),
                message
            ),
        },
    }
}

/// Renders the end-of-run summary in display order.
#[must_use]
pub fn report_lines(report: &RunReport, show_sample: bool) -> Vec<String> {
    let mut lines = vec![
        "--- Test Results ---".to_owned(),
        format!("Total time: {}", format_secs(report.elapsed)),
    ];

    let Some(stats) = compute_report_stats(report) else {
        lines.push("No requests were issued.".to_owned());
        return lines;
    };
    let snapshot = &report.snapshot;

    lines.push(format!(
        "Successful requests: {} ({})",
        snapshot.successful,
        format_pct(stats.success_pct_x10)
    ));
    lines.push(format!(
        "Failed requests: {} ({})",
        snapshot.failed,
        format_pct(stats.failure_pct_x10)
    ));
    lines.push(format!("  - Timeouts: {}", snapshot.timeouts));
    lines.push(format!(
        "  - Connection resets: {}",
        snapshot.connection_resets
    ));
    lines.push(format!("  - Build errors: {}", snapshot.build_errors));
    lines.push(format!(
        "Requests per second: {}.{:02}",
        stats.rps_x100 / HUNDREDTHS_SCALE,
        stats.rps_x100 % HUNDREDTHS_SCALE
    ));
    lines.push(format!(
        "Peak in-flight: {} (limit {})",
        report.peak_in_flight, report.concurrency
    ));

    lines.push(String::new());
    lines.push("--- Status Code Distribution ---".to_owned());
    if stats.status_shares.is_empty() {
        lines.push("  (no responses)".to_owned());
    }
    for share in &stats.status_shares {
        lines.push(format!(
            "  {}: {} ({})",
            share.status,
            share.count,
            format_pct(share.pct_x10)
        ));
    }

    if show_sample
        && let Some(body) = snapshot
            .sample_body
            .as_deref()
            .filter(|body| !body.is_empty())
    {
        lines.push(String::new());
        lines.push("--- First Response Data ---".to_owned());
        lines.push(body.to_owned());
    }

    lines
}

fn format_secs(duration: Duration) -> String {
    let value = secs_x100(duration);
    format!(
        "{}.{:02}s",
        value / HUNDREDTHS_SCALE,
        value % HUNDREDTHS_SCALE
    )
}

fn format_pct(value_x10: u64) -> String {
    format!("{}.{}%", value_x10 / PERCENT_SCALE, value_x10 % PERCENT_SCALE)
}
