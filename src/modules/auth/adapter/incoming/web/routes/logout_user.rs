use actix_web::{post, web, HttpResponse, Responder};
use tracing::info;

use crate::modules::auth::adapter::incoming::web::cookies::{
    expired_session_cookie, SessionCookieOptions,
};
use crate::shared::api::ApiMessage;

/// Log out
///
/// Sessions are stateless, so logout just tells the browser to drop the
/// cookie. Succeeds whether or not a session was present.
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Logged out", body = ApiMessage),
    )
)]
#[post("/auth/logout")]
pub async fn logout_user_handler(cookie_options: web::Data<SessionCookieOptions>) -> impl Responder {
    info!("Logout");

    HttpResponse::Ok()
        .cookie(expired_session_cookie(&cookie_options))
        .json(ApiMessage {
            message: "Logged out".to_string(),
        })
}
