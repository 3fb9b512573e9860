use actix_web::{post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::modules::auth::adapter::incoming::web::cookies::{session_cookie, SessionCookieOptions};
use crate::modules::auth::application::use_cases::login_user::UserInfo;
use crate::modules::auth::application::use_cases::register_user::{RegisterError, RegisterRequest};
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// Registration payload from the client
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequestDto {
    /// Email address
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Password (minimum 6 characters)
    #[schema(example = "hunter22")]
    pub password: String,
}

/// Register a new account
///
/// Creates a user and starts a session: the response carries the session
/// cookie alongside the created user.
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "User registered", body = UserInfo),
        (status = 400, description = "Validation failed", body = ApiMessage),
        (status = 409, description = "Email already in use", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[post("/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterRequestDto>,
    data: web::Data<AppState>,
    cookie_options: web::Data<SessionCookieOptions>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Registration attempt");

    let request = match RegisterRequest::new(dto.email, dto.password) {
        Ok(request) => request,
        Err(e) => return ApiResponse::bad_request(&e.to_string()),
    };

    match data.register_user_use_case.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User registered");

            HttpResponse::Created()
                .cookie(session_cookie(&response.session_token, &cookie_options))
                .json(response.user)
        }

        Err(RegisterError::EmailTaken) => {
            warn!("Registration failed: email already in use");
            ApiResponse::conflict("Email already in use")
        }

        Err(e) => {
            error!(error = %e, "Registration failed");
            ApiResponse::internal_error()
        }
    }
}
