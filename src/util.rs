use reqwest::Response;

use crate::errors::{Error, RequestError, Result};

/// Convert non-2xx responses into a structured error carrying the server body.
///
/// Successful (2xx) responses pass through untouched. Anything else consumes
/// the body to build a [`RequestError::Server`] so callers never have to
/// distinguish a failed fetch from an empty payload by inspecting a sentinel.
pub(crate) async fn check_http_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response.text().await.unwrap_or_else(|_| {
        status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string()
    });

    Err(Error::from(RequestError::Server { status, message }))
}
