use http::StatusCode;
use thiserror::Error;

/// Body sent to callers for every server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error. Please check server logs for details.";

/// Errors that can occur while proxying a chat request
#[derive(Debug, Error)]
pub enum ChatError {
    /// A required request field is absent, empty, or badly shaped
    #[error("Missing '{field}' in request body.")]
    MissingField { field: &'static str },

    /// The body could not be decoded as a chat payload
    #[error("invalid JSON in request body: {detail}")]
    InvalidJson { detail: String },

    /// The body exceeded the configured size limit
    #[error("request body too large")]
    PayloadTooLarge,

    /// The upstream call failed or returned nothing usable
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Unexpected internal error
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ChatError {
    /// The `contents` field failed validation
    pub const fn missing_contents() -> Self {
        Self::MissingField { field: "contents" }
    }

    /// HTTP status code for this error
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingField { .. } | Self::InvalidJson { .. } => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to expose to callers
    ///
    /// Server-side failures collapse to [`INTERNAL_ERROR_MESSAGE`]; their
    /// detail only ever reaches the log.
    pub fn client_message(&self) -> String {
        match self {
            Self::MissingField { .. } => self.to_string(),
            Self::InvalidJson { .. } => "Invalid JSON in request body.".to_owned(),
            Self::PayloadTooLarge => "Request body too large.".to_owned(),
            Self::Upstream(_) | Self::Internal(_) => INTERNAL_ERROR_MESSAGE.to_owned(),
        }
    }
}

#[cfg(feature = "http")]
mod http_impl {
    use axum::Json;
    use axum::extract::rejection::JsonRejection;
    use axum::response::{IntoResponse, Response};
    use http::StatusCode;
    use serde::Serialize;

    use super::ChatError;

    #[derive(Serialize)]
    struct ErrorBody {
        error: String,
    }

    impl From<JsonRejection> for ChatError {
        fn from(rejection: JsonRejection) -> Self {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                Self::PayloadTooLarge
            } else {
                Self::InvalidJson {
                    detail: rejection.body_text(),
                }
            }
        }
    }

    impl IntoResponse for ChatError {
        fn into_response(self) -> Response {
            let status = self.status_code();

            if status.is_server_error() {
                tracing::error!(error = %self, "chat request failed");
            } else {
                tracing::debug!(error = %self, %status, "chat request rejected");
            }

            (status, Json(ErrorBody {
                error: self.client_message(),
            }))
                .into_response()
        }
    }
}
