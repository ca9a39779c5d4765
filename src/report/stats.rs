use std::time::Duration;

use super::RunReport;

/// Scale for one-decimal percentages (`987` renders as `98.7`).
pub(super) const PERCENT_SCALE: u64 = 10;
/// Scale for two-decimal values (`12345` renders as `123.45`).
pub(super) const HUNDREDTHS_SCALE: u64 = 100;
const MICROS_PER_SEC: u128 = 1_000_000;
/// Microseconds in one hundredth of a second.
const MICROS_PER_HUNDREDTH: u128 = 10_000;

/// Derived report values in fixed point. Only exists when requests were issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportStats {
    pub success_pct_x10: u64,
    pub failure_pct_x10: u64,
    pub rps_x100: u64,
    pub status_shares: Vec<StatusShare>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusShare {
    pub status: u16,
    pub count: u64,
    pub pct_x10: u64,
}

/// Computes percentages and throughput for a finished run.
///
/// Returns `None` when no requests were issued; nothing is divided then.
#[must_use]
pub fn compute_report_stats(report: &RunReport) -> Option<ReportStats> {
    let total = report.total_requests;
    if total == 0 {
        return None;
    }
    let snapshot = &report.snapshot;

    let status_shares = snapshot
        .status_codes
        .iter()
        .map(|(status, count)| StatusShare {
            status: *status,
            count: *count,
            pct_x10: percent_x10(*count, total),
        })
        .collect();

    Some(ReportStats {
        success_pct_x10: percent_x10(snapshot.successful, total),
        failure_pct_x10: percent_x10(snapshot.failed, total),
        rps_x100: rps_x100(total, report.elapsed),
        status_shares,
    })
}

/// Elapsed seconds with two decimals, rounded.
pub(super) fn secs_x100(duration: Duration) -> u64 {
    let hundredths = duration
        .as_micros()
        .saturating_add(MICROS_PER_HUNDREDTH / 2)
        .checked_div(MICROS_PER_HUNDREDTH)
        .unwrap_or(0);
    u64::try_from(hundredths).unwrap_or(u64::MAX)
}

fn percent_x10(count: u64, total: u64) -> u64 {
    let total = u128::from(total);
    let scaled = u128::from(count)
        .saturating_mul(1_000)
        .saturating_add(total / 2)
        .checked_div(total)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}

fn rps_x100(total: u64, elapsed: Duration) -> u64 {
    let micros = elapsed.as_micros().max(1);
    let scaled = u128::from(total)
        .saturating_mul(u128::from(HUNDREDTHS_SCALE))
        .saturating_mul(MICROS_PER_SEC)
        .saturating_add(micros / 2)
        .checked_div(micros)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
