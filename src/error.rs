use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use thiserror::Error;

use crate::gate::runner::GateFailure;
use crate::guard::Busy;
use crate::supabase::SupabaseError;
use crate::validation::{FieldErrors, FileRejection};

const RETRY_MESSAGE: &str = "Something went wrong. Please try again.";

/// Every failure a handler can return. Client-caused errors carry the
/// message the front end shows; backend errors are logged and replaced
/// with a generic retry message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("{0}")]
    File(FileRejection),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("backend error: {0}")]
    Backend(#[from] SupabaseError),
    #[error(transparent)]
    Gate(#[from] GateFailure),
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<FileRejection> for ApiError {
    fn from(rejection: FileRejection) -> Self {
        ApiError::File(rejection)
    }
}

impl From<Busy> for ApiError {
    fn from(_: Busy) -> Self {
        ApiError::Conflict("This request is already being processed".to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::File(FileRejection::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::File(FileRejection::UnsupportedType { .. }) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Database(DbErr::RecordNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Backend(e) if e.user_message().is_some() => StatusCode::BAD_REQUEST,
            ApiError::Backend(_) => StatusCode::BAD_GATEWAY,
            ApiError::Gate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            ApiError::Validation(errors) => serde_json::json!({
                "error": errors.first_message(),
                "fields": errors,
            }),
            ApiError::Backend(e) if e.user_message().is_some() => serde_json::json!({
                "error": e.user_message(),
            }),
            ApiError::Database(DbErr::RecordNotFound(what)) => serde_json::json!({
                "error": what,
            }),
            ApiError::Database(_) | ApiError::Backend(_) => {
                tracing::error!(error = %self, "request failed");
                serde_json::json!({ "error": RETRY_MESSAGE })
            }
            ApiError::Gate(GateFailure::CreateRole { role, state, .. }) => {
                tracing::error!(error = %self, "role creation failed");
                serde_json::json!({
                    "error": format!("Could not enable the {} role. Please try again.", role.as_str()),
                    "gate": state,
                })
            }
            ApiError::Gate(_) => {
                tracing::error!(error = %self, "dashboard gate failed");
                serde_json::json!({ "error": RETRY_MESSAGE })
            }
            _ => serde_json::json!({ "error": self.to_string() }),
        };

        HttpResponse::build(status).json(body)
    }
}
