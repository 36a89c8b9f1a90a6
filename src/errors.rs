use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GymError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("Enrollment inactive, check-in not allowed")]
    EnrollmentInactive,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Email already registered")]
    EmailAlreadyExists,
    #[error("Churn model error: {0}")]
    Model(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl GymError {
    pub fn member_not_found(member_id: i64) -> Self {
        GymError::NotFound(format!("Member {}", member_id))
    }

    pub fn checkin_not_found(checkin_id: i64) -> Self {
        GymError::NotFound(format!("Check-in {}", checkin_id))
    }
}

impl IntoResponse for GymError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            GymError::NotFound(_) => (StatusCode::NOT_FOUND, "Not found"),
            GymError::EnrollmentInactive => (StatusCode::BAD_REQUEST, "Enrollment inactive"),
            GymError::InvalidInput(_) => (StatusCode::BAD_REQUEST, "Invalid input"),
            GymError::EmailAlreadyExists => (StatusCode::BAD_REQUEST, "Email already registered"),
            GymError::Model(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Churn model error"),
            GymError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Database error"),
            GymError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {:?}", self);
        }

        let body = Json(json!({
            "error": error_message,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type GymResult<T> = Result<T, GymError>;
