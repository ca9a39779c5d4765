//! Attempt outcomes and the shared aggregate statistics.
mod aggregator;
mod types;


pub use aggregator::{AggregateSnapshot, Aggregator};
pub use types::{AttemptOutcome, FailureKind};
