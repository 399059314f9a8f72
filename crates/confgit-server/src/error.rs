use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use confgit_render::RenderError;
use confgit_source::SourceError;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("invalid request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServerResult<T> = Result<T, ServerError>;

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Source(SourceError::EnvironmentNotFound { .. })
            | ServerError::Source(SourceError::FileNotFound { .. })
            | ServerError::Render(RenderError::ImportNotFound { .. }) => StatusCode::NOT_FOUND,

            ServerError::Source(SourceError::InvalidEnvironment { .. })
            | ServerError::Render(RenderError::UnsupportedFormat { .. })
            | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,

            // A cold cache with an unreachable remote, or a failed
            // materialization: the upstream is at fault, not the request.
            ServerError::Source(SourceError::FetchFailed { .. })
            | ServerError::Source(SourceError::CheckoutFailed { .. }) => StatusCode::BAD_GATEWAY,

            ServerError::Render(_) | ServerError::Io(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_not_found_is_404() {
        let err = ServerError::Source(SourceError::EnvironmentNotFound {
            environment: "nope".into(),
        });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unsupported_format_is_400() {
        let err = ServerError::Render(RenderError::UnsupportedFormat {
            format: confgit_types::ContentType::Yaml,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_is_500() {
        assert_eq!(
            ServerError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
