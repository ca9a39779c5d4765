//! Core library for the `volley` CLI.
//!
//! `volley` fires a fixed number of HTTP GET requests at one endpoint
//! through a bounded admission gate, classifies every attempt, and
//! summarises the run. The library exposes the building blocks: argument
//! and config handling, the request builder and transport seam, the
//! dispatch loop, the aggregate statistics, and the report renderer. It
//! also carries the `format-json` helper used to inspect captured bodies.
pub mod args;
pub mod config;
pub mod entry;
pub mod error;
pub mod format;
pub mod http;
mod logger;
pub mod metrics;
pub mod report;
