// src/shared/api/response.rs
use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;

/// Error body for every failure response: a short human-readable message.
#[derive(Serialize, Clone, ToSchema)]
pub struct ApiMessage {
    pub message: String,
}

pub struct ApiResponse;

impl ApiResponse {
    pub fn error(status: StatusCode, message: &str) -> HttpResponse {
        HttpResponse::build(status).json(ApiMessage {
            message: message.to_string(),
        })
    }

    pub fn no_content() -> HttpResponse {
        HttpResponse::NoContent().finish()
    }

    pub fn bad_request(message: &str) -> HttpResponse {
        Self::error(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized() -> HttpResponse {
        Self::error(StatusCode::UNAUTHORIZED, "Unauthorized")
    }

    pub fn not_found(message: &str) -> HttpResponse {
        Self::error(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: &str) -> HttpResponse {
        Self::error(StatusCode::CONFLICT, message)
    }

    pub fn internal_error() -> HttpResponse {
        Self::error(StatusCode::INTERNAL_SERVER_ERROR, "Server error")
    }
}
