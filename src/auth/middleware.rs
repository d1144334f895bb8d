//! Middleware that checks the shared API key before a request reaches its route handler.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::{Error, auth::ApiKey};

/// The header clients use to send the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Middleware function that checks the [API key header](API_KEY_HEADER) against `api_key`.
///
/// The request is executed normally if the header value is exactly the
/// configured key. Otherwise the response is 401 Unauthorized when the header
/// is missing or empty, and 403 Forbidden when it holds any other value.
///
/// **Note**: Install with `middleware::from_fn_with_state(api_key, access_guard)`.
pub async fn access_guard(State(api_key): State<ApiKey>, request: Request, next: Next) -> Response {
    match check_api_key(request.headers(), &api_key) {
        Ok(()) => next.run(request).await,
        Err(error) => {
            tracing::warn!(
                "Rejected {} {}: {error}",
                request.method(),
                request.uri().path()
            );
            error.into_response()
        }
    }
}

fn check_api_key(headers: &HeaderMap, api_key: &ApiKey) -> Result<(), Error> {
    let candidate = headers
        .get(API_KEY_HEADER)
        .map(|value| value.as_bytes())
        .filter(|value| !value.is_empty())
        .ok_or(Error::MissingApiKey)?;

    if api_key.matches(candidate) {
        Ok(())
    } else {
        Err(Error::InvalidApiKey)
    }
}
