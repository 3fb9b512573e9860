use actix_web::{http::StatusCode, post, web, HttpResponse, Responder};
use serde::Deserialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::modules::auth::adapter::incoming::web::cookies::{session_cookie, SessionCookieOptions};
use crate::modules::auth::application::use_cases::login_user::{LoginError, LoginRequest, UserInfo};
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// Login payload from the client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "hunter22")]
    pub password: String,
}

/// Log in
///
/// Verifies credentials and starts a session via the session cookie.
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = UserInfo),
        (status = 400, description = "Validation failed", body = ApiMessage),
        (status = 401, description = "Invalid credentials", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[post("/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
    cookie_options: web::Data<SessionCookieOptions>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(request) => request,
        Err(e) => return ApiResponse::bad_request(&e.to_string()),
    };

    match data.login_user_use_case.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User logged in");

            HttpResponse::Ok()
                .cookie(session_cookie(&response.session_token, &cookie_options))
                .json(response.user)
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            ApiResponse::error(StatusCode::UNAUTHORIZED, "Invalid credentials")
        }

        Err(e) => {
            error!(error = %e, "Login failed");
            ApiResponse::internal_error()
        }
    }
}
