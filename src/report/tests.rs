use std::collections::BTreeMap;
use std::time::Duration;

use super::*;
use crate::metrics::{AggregateSnapshot, AttemptOutcome, FailureKind};

fn report_with(snapshot: AggregateSnapshot, total: u64, elapsed: Duration) -> RunReport {
    RunReport {
        snapshot,
        elapsed,
        total_requests: total,
        concurrency: 4,
        peak_in_flight: 4,
    }
}

fn all_ok(total: u64) -> AggregateSnapshot {
    AggregateSnapshot {
        successful: total,
        status_codes: BTreeMap::from([(200, total)]),
        ..AggregateSnapshot::default()
    }
}

fn has_line(lines: &[String], expected: &str) -> Result<(), String> {
    if lines.iter().any(|line| line == expected) {
        Ok(())
    } else {
        Err(format!("Missing line '{}' in {:?}", expected, lines))
    }
}

#[test]
fn all_successful_run_reports_full_success() -> Result<(), String> {
    let report = report_with(all_ok(50), 50, Duration::from_secs(2));
    let lines = report_lines(&report, false);

    has_line(&lines, "Successful requests: 50 (100.0%)")?;
    has_line(&lines, "Failed requests: 0 (0.0%)")?;
    has_line(&lines, "Requests per second: 25.00")?;
    has_line(&lines, "Total time: 2.00s")?;
    has_line(&lines, "  200: 50 (100.0%)")?;
    Ok(())
}

#[test]
fn zero_requests_skips_derived_values() -> Result<(), String> {
    let report = report_with(AggregateSnapshot::default(), 0, Duration::ZERO);
    if compute_report_stats(&report).is_some() {
        return Err("Expected no stats for an empty run".to_owned());
    }
    let lines = report_lines(&report, true);
    has_line(&lines, "No requests were issued.")?;
    if lines.iter().any(|line| line.contains('%')) {
        return Err(format!("Unexpected percentage in {:?}", lines));
    }
    Ok(())
}

#[test]
fn percentages_round_to_one_decimal() -> Result<(), String> {
    let snapshot = AggregateSnapshot {
        successful: 2,
        failed: 1,
        timeouts: 1,
        status_codes: BTreeMap::from([(200, 1), (404, 1)]),
        ..AggregateSnapshot::default()
    };
    let report = report_with(snapshot, 3, Duration::from_millis(1_500));
    let stats = compute_report_stats(&report).ok_or("Expected stats")?;

    if stats.success_pct_x10 != 667 || stats.failure_pct_x10 != 333 {
        return Err(format!(
            "Unexpected percentages: {}/{}",
            stats.success_pct_x10, stats.failure_pct_x10
        ));
    }
    if stats.rps_x100 != 200 {
        return Err(format!("Unexpected rps: {}", stats.rps_x100));
    }
    let codes: Vec<u16> = stats.status_shares.iter().map(|share| share.status).collect();
    if codes != [200, 404] {
        return Err(format!("Status codes out of order: {:?}", codes));
    }
    let lines = report_lines(&report, false);
    has_line(&lines, "  - Timeouts: 1")?;
    has_line(&lines, "  404: 1 (33.3%)")?;
    Ok(())
}

#[test]
fn sample_is_only_shown_when_requested() -> Result<(), String> {
    let mut snapshot = all_ok(1);
    snapshot.sample_body = Some("{\"ok\":true}".to_owned());
    let report = report_with(snapshot, 1, Duration::from_millis(10));

    let hidden = report_lines(&report, false);
    if hidden.iter().any(|line| line == "--- First Response Data ---") {
        return Err("Sample should be hidden without debug".to_owned());
    }
    let shown = report_lines(&report, true);
    has_line(&shown, "--- First Response Data ---")?;
    has_line(&shown, "{\"ok\":true}")?;
    Ok(())
}

#[test]
fn attempt_lines_describe_outcome() -> Result<(), String> {
    let ok = attempt_line(
        3,
        &AttemptOutcome::Success {
            status: 201,
            duration: Duration::from_millis(1_234),
            body: None,
        },
    );
    if ok != "Request 3 completed in 1.23s with status: 201" {
        return Err(format!("Unexpected success line: {}", ok));
    }

    let timeout = attempt_line(
        7,
        &AttemptOutcome::Failure {
            kind: FailureKind::Timeout,
            duration: Duration::from_secs(5),
            message: "operation timed out".to_owned(),
        },
    );
    if timeout != "Request 7 timed out after 5.00s: operation timed out" {
        return Err(format!("Unexpected timeout line: {}", timeout));
    }

    let build = attempt_line(
        0,
        &AttemptOutcome::Failure {
            kind: FailureKind::MalformedUrl,
            duration: Duration::ZERO,
            message: "relative URL without a base".to_owned(),
        },
    );
    if !build.starts_with("Request 0 could not be built") {
        return Err(format!("Unexpected build line: {}", build));
    }
    Ok(())
}
