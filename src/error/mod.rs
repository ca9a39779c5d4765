mod app;
mod config;
mod format;
mod http;
mod validation;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use format::FormatError;
pub use http::HttpError;
pub use validation::ValidationError;
