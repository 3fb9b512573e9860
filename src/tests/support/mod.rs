pub mod app_state_builder;
pub mod auth_helper;
pub mod stubs;

use actix_web::cookie::SameSite;
use actix_web::web;

use crate::modules::auth::adapter::incoming::web::cookies::SessionCookieOptions;

/// Cookie options matching a development environment.
pub fn test_cookie_options() -> web::Data<SessionCookieOptions> {
    web::Data::new(SessionCookieOptions {
        secure: false,
        same_site: SameSite::Lax,
        max_age_seconds: 604_800,
    })
}
