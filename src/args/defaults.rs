pub(crate) const DEFAULT_USER_AGENT: &str =
    concat!("volley-loadtest/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_CONTENT_TYPE: &str = "application/json";
