use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use gourmet_core::error::GourmetError;
use serde::Serialize;

const INTERNAL_ERROR: &str = "Internal Server Error";

/// `{ "error": message }` with a status.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Geocoding blames the caller for upstream rejections (bad address,
    /// zero results).
    pub fn from_geocode(err: GourmetError) -> Self {
        log_failure("geocode", &err);
        match err {
            GourmetError::InvalidInput(m) => Self::new(StatusCode::BAD_REQUEST, m),
            GourmetError::Upstream { message, .. } => Self::new(StatusCode::BAD_REQUEST, message),
            GourmetError::Configuration(m) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, m),
            GourmetError::Unexpected(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        }
    }

    pub fn from_search(err: GourmetError) -> Self {
        log_failure("restaurants", &err);
        match err {
            GourmetError::InvalidInput(m) => Self::new(StatusCode::BAD_REQUEST, m),
            GourmetError::Upstream { message, .. } => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
            GourmetError::Configuration(m) => Self::new(StatusCode::INTERNAL_SERVER_ERROR, m),
            GourmetError::Unexpected(_) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        }
    }
}

/// Plain-text failure for the photo proxy, which never answers with JSON.
#[derive(Debug)]
pub struct PhotoError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for PhotoError {
    fn into_response(self) -> Response {
        (self.status, self.message).into_response()
    }
}

impl From<GourmetError> for PhotoError {
    fn from(err: GourmetError) -> Self {
        log_failure("photo", &err);
        let (status, message) = match err {
            GourmetError::InvalidInput(m) | GourmetError::Configuration(m) => {
                (StatusCode::BAD_REQUEST, m)
            }
            GourmetError::Upstream { status, message } => (
                status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::BAD_GATEWAY),
                message,
            ),
            GourmetError::Unexpected(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        };
        Self { status, message }
    }
}

fn log_failure(endpoint: &'static str, err: &GourmetError) {
    match err {
        GourmetError::InvalidInput(_) => {
            tracing::info!(endpoint, kind = err.kind(), error = %err, "rejected request");
        }
        GourmetError::Upstream { status, .. } => {
            tracing::warn!(endpoint, kind = err.kind(), upstream_status = ?status, error = %err, "upstream failure");
        }
        GourmetError::Configuration(_) => {
            tracing::error!(endpoint, kind = err.kind(), error = %err, "misconfigured");
        }
        GourmetError::Unexpected(inner) => {
            sentry_anyhow::capture_anyhow(inner);
            tracing::error!(endpoint, kind = err.kind(), error = ?inner, "request failed");
        }
    }
}
