use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Method, Request};
use url::Url;

use crate::error::HttpError;

use super::settings::RunSettings;

/// Builds one GET request from the run settings.
///
/// Query parameters are appended after any query already present in the
/// base URL, in configured order.
///
/// # Errors
///
/// Returns `HttpError::MalformedUrl` when the base URL does not parse and a
/// header error when a configured header name or value is invalid.
pub fn build_request(settings: &RunSettings) -> Result<Request, HttpError> {
    let mut url = Url::parse(&settings.url).map_err(|err| HttpError::MalformedUrl {
        url: settings.url.clone(),
        source: err,
    })?;
    if !settings.query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &settings.query {
            pairs.append_pair(key, value);
        }
    }

    let mut request = Request::new(Method::GET, url);
    let headers = request.headers_mut();

    if let Some(token) = settings.auth_token.as_deref() {
        let mut value = header_value(AUTHORIZATION.as_str(), &format!("Bearer {}", token))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }
    headers.insert(
        CONTENT_TYPE,
        header_value(CONTENT_TYPE.as_str(), &settings.content_type)?,
    );

    for (key, value) in &settings.headers {
        let name =
            HeaderName::from_bytes(key.as_bytes()).map_err(|err| HttpError::InvalidHeaderName {
                name: key.clone(),
                source: err,
            })?;
        let value = header_value(key, value)?;
        headers.append(name, value);
    }

    Ok(request)
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue, HttpError> {
    HeaderValue::from_str(value).map_err(|err| HttpError::InvalidHeaderValue {
        name: name.to_owned(),
        source: err,
    })
}
