use actix_web::{dev::Payload, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::cookies::SESSION_COOKIE;
use crate::modules::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::shared::api::ApiResponse;

/// Request guard for routes that require a live session. Reads the session
/// cookie and verifies it against the token provider registered in app data.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token_provider =
            match req.app_data::<actix_web::web::Data<Arc<dyn TokenProvider + Send + Sync>>>() {
                Some(provider) => provider,
                None => {
                    return ready(Err(create_api_error(ApiResponse::internal_error())));
                }
            };

        let token = match req.cookie(SESSION_COOKIE) {
            Some(cookie) => cookie.value().to_string(),
            None => {
                return ready(Err(create_api_error(ApiResponse::unauthorized())));
            }
        };

        match token_provider.verify(&token) {
            Ok(user_id) => ready(Ok(AuthenticatedUser { user_id })),
            Err(e) => {
                tracing::debug!(error = %e, "Session cookie rejected");
                ready(Err(create_api_error(ApiResponse::unauthorized())))
            }
        }
    }
}
