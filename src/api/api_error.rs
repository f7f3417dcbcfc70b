use crate::error::Error;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// A pipeline failure on its way out as an HTTP response. Constructed
/// exactly once per request, at the end of the pipeline, so no handler
/// ever writes a partial response before an error surfaces.
pub(crate) struct APIError(Error);

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::EmptyField
            | Error::InvalidType
            | Error::InvalidAddress(_)
            | Error::InvalidName => StatusCode::BAD_REQUEST,
            Error::AuthFailed => StatusCode::UNAUTHORIZED,
            Error::RecordMissing | Error::LookupFailed(_) => StatusCode::NOT_FOUND,
            Error::EditFailed(_) => StatusCode::FAILED_DEPENDENCY,
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::ConfigInvalid(_) | Error::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut response = (status, format!("{}\n", self.0)).into_response();
        if let Error::RateLimited { retry_after } = &self.0 {
            if let Ok(value) = HeaderValue::from_str(&retry_after.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<Error> for APIError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}
