//! End-of-run statistics and console rendering.
mod lines;
mod stats;

#[cfg(test)]
mod tests;

use std::time::Duration;

use crate::metrics::AggregateSnapshot;

pub use lines::{attempt_line, report_lines};
pub use stats::{ReportStats, StatusShare, compute_report_stats};

/// Final aggregate state plus run timing, produced once every task has joined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub snapshot: AggregateSnapshot,
    pub elapsed: Duration,
    pub total_requests: u64,
    pub concurrency: usize,
    pub peak_in_flight: usize,
}

pub fn print_report(report: &RunReport, show_sample: bool) {
    for line in report_lines(report, show_sample) {
        println!("{}", line);
    }
}
