use actix_web::cookie::Cookie;
use actix_web::web;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::cookies::SESSION_COOKIE;
use crate::modules::auth::adapter::outgoing::session::session_config::SessionConfig;
use crate::modules::auth::adapter::outgoing::session::session_service::SessionService;
use crate::modules::auth::application::ports::outgoing::TokenProvider;

fn test_session_service() -> SessionService {
    SessionService::new(SessionConfig {
        secret_key: "test_secret_key_at_least_32_characters!!".to_string(),
        ttl_seconds: 3600,
    })
}

/// Token provider app data, keyed with the same secret as
/// [`session_cookie_for`].
pub fn test_token_provider() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(test_session_service());
    web::Data::new(provider)
}

/// A valid session cookie for the given user.
pub fn session_cookie_for(user_id: Uuid) -> Cookie<'static> {
    let token = test_session_service()
        .issue(user_id)
        .expect("test token should issue");
    Cookie::new(SESSION_COOKIE, token)
}
