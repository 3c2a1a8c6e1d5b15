use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::editors::RequestRejected;
use crate::session::SessionError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {message}")]
    Conflict { code: &'static str, message: String },

    #[error("Suggestion service error: {0}")]
    Upstream(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        let message = err.to_string();
        match err {
            SessionError::SectorNotSelected => AppError::Conflict {
                code: "SECTOR_NOT_SELECTED",
                message,
            },
            SessionError::SectorAlreadySelected => AppError::Conflict {
                code: "SECTOR_ALREADY_SELECTED",
                message,
            },
            SessionError::Superseded => AppError::Conflict {
                code: "SUPERSEDED",
                message,
            },
            SessionError::ExportInProgress => AppError::Conflict {
                code: "EXPORT_IN_PROGRESS",
                message,
            },
            SessionError::Rejected(RequestRejected::InvalidInput(message)) => {
                AppError::Validation(message)
            }
            SessionError::Rejected(RequestRejected::InFlight(_)) => AppError::Conflict {
                code: "REQUEST_IN_FLIGHT",
                message,
            },
            SessionError::Suggestion { message, .. } => AppError::Upstream(message),
            SessionError::Export(e) => AppError::Export(e.to_string()),
            SessionError::Render(e) => AppError::Internal(e.into()),
            SessionError::Task(e) => AppError::Internal(e.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict { code, message } => (StatusCode::CONFLICT, *code, message.clone()),
            AppError::Upstream(msg) => {
                tracing::error!("Suggestion error: {msg}");
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", msg.clone())
            }
            AppError::Export(msg) => {
                tracing::error!("Export error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_FAILED",
                    "Failed to export the resume. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestions::SuggestionError;

    #[test]
    fn test_session_errors_map_to_statuses() {
        let cases = [
            (SessionError::SectorNotSelected, StatusCode::CONFLICT),
            (SessionError::ExportInProgress, StatusCode::CONFLICT),
            (
                SessionError::Rejected(RequestRejected::InvalidInput("Please enter a job role first".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                SessionError::Suggestion {
                    message: "Failed to generate skills. Please try again.".into(),
                    source: SuggestionError::Upstream("503".into()),
                },
                StatusCode::BAD_GATEWAY,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }
}
