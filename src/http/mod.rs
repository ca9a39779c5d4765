//! Request construction, transport, admission control, and the dispatch loop.
mod dispatcher;
mod limiter;
mod request;
mod runner;
mod settings;
mod transport;


pub use limiter::{ConcurrencyLimiter, LimiterPermit};
pub use request::build_request;
pub use runner::run_load_test;
pub use settings::RunSettings;
pub use transport::{
    ReqwestTransport, Transport, TransportError, TransportResponse, build_client, classify_message,
};
