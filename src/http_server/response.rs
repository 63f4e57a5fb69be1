//! Response shapes and error-to-response mapping shared by all routes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::observability::{Event, Logger};
use crate::posts::PostError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn ok() -> Self {
        Self {
            message: "Ok".to_string(),
        }
    }
}

fn json_error(status: StatusCode, error: String) -> Response {
    (
        status,
        Json(ErrorResponse {
            error,
            code: status.as_u16(),
        }),
    )
        .into_response()
}

fn status_of(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        if self.is_client_error() {
            Logger::warn(Event::AuthRejected.as_str(), &[("reason", &message)]);
        } else {
            Logger::error(Event::RequestFailed.as_str(), &[("error", &message)]);
        }
        json_error(status_of(self.status_code()), message)
    }
}

impl IntoResponse for PostError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            // Plain-text body
            PostError::Forbidden => (StatusCode::FORBIDDEN, message).into_response(),
            err if err.is_client_error() => json_error(status_of(err.status_code()), message),
            err => {
                Logger::error(Event::RequestFailed.as_str(), &[("error", &message)]);
                json_error(status_of(err.status_code()), message)
            }
        }
    }
}
