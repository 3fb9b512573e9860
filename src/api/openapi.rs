use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::OpenApi;

use crate::health::{HealthResponse, PingResponse};
use crate::modules::auth::adapter::incoming::web::routes::login_user::LoginRequestDto;
use crate::modules::auth::adapter::incoming::web::routes::register_user::RegisterRequestDto;
use crate::modules::auth::application::use_cases::login_user::UserInfo;
use crate::modules::lead::adapter::incoming::web::routes::create_lead::CreateLeadRequestDto;
use crate::modules::lead::adapter::incoming::web::routes::update_lead::UpdateLeadRequestDto;
use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRecord;
use crate::modules::lead::application::use_cases::list_leads::ListLeadsResponse;
use crate::shared::api::ApiMessage;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lead Manager API",
        version = "1.0.0",
        description = "Lead management backend with cookie-based sessions",
    ),
    paths(
        // Auth endpoints
        crate::modules::auth::adapter::incoming::web::routes::register_user::register_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::logout_user::logout_user_handler,
        crate::modules::auth::adapter::incoming::web::routes::current_user::current_user_handler,

        // Lead endpoints
        crate::modules::lead::adapter::incoming::web::routes::create_lead::create_lead_handler,
        crate::modules::lead::adapter::incoming::web::routes::list_leads::list_leads_handler,
        crate::modules::lead::adapter::incoming::web::routes::get_lead::get_lead_handler,
        crate::modules::lead::adapter::incoming::web::routes::update_lead::update_lead_handler,
        crate::modules::lead::adapter::incoming::web::routes::delete_lead::delete_lead_handler,

        // Health endpoints
        crate::health::health,
        crate::health::ping,
    ),
    components(
        schemas(
            ApiMessage,

            // Auth DTOs
            RegisterRequestDto,
            LoginRequestDto,
            UserInfo,

            // Lead DTOs
            CreateLeadRequestDto,
            UpdateLeadRequestDto,
            LeadRecord,
            ListLeadsResponse,
            LeadSource,
            LeadStatus,

            // Health DTOs
            HealthResponse,
            PingResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration and session endpoints"),
        (name = "leads", description = "Lead management endpoints"),
        (name = "health", description = "Liveness and connectivity probes"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "SessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "token",
                    "Session token issued on login",
                ))),
            )
        }
    }
}
