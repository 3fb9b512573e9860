use actix_web::{get, web, HttpResponse, Responder};
use tracing::{error, warn};

use crate::modules::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::auth::application::use_cases::current_user::CurrentUserError;
use crate::modules::auth::application::use_cases::login_user::UserInfo;
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// Current session
///
/// Returns the user behind the session cookie. A session pointing at a
/// user that no longer exists counts as unauthenticated.
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Authenticated user", body = UserInfo),
        (status = 401, description = "Missing or invalid session", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[get("/auth/me")]
pub async fn current_user_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.current_user_use_case.execute(user.user_id).await {
        Ok(info) => HttpResponse::Ok().json(info),

        Err(CurrentUserError::NotFound) => {
            warn!(user_id = %user.user_id, "Session points at a deleted user");
            ApiResponse::unauthorized()
        }

        Err(CurrentUserError::RepositoryError(ref e)) => {
            error!(error = %e, "Current user lookup failed");
            ApiResponse::internal_error()
        }
    }
}
