use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;
use crate::errors::AppError;

// Converts AppError into a JSON body the presentation layer can show as a toast.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::DuplicateUsername => StatusCode::CONFLICT,

            AppError::UsernameTooShort(_)
            | AppError::PasswordTooShort(_)
            | AppError::PasswordMismatch => StatusCode::UNPROCESSABLE_ENTITY,

            AppError::InvalidCredentials | AppError::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // Backend failures are internal server errors
            AppError::Storage(e) => {
                tracing::error!("Storage failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::PasswordHash(e) => {
                tracing::error!("Password hashing failure: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}
