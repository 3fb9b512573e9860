use actix_web::{delete, web, Responder};
use tracing::{error, info};
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::lead::application::use_cases::delete_lead::DeleteLeadError;
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// Delete a lead
#[utoipa::path(
    delete,
    path = "/leads/{id}",
    tag = "leads",
    params(
        ("id" = Uuid, Path, description = "Lead identifier"),
    ),
    responses(
        (status = 204, description = "Lead deleted"),
        (status = 401, description = "Missing or invalid session", body = ApiMessage),
        (status = 404, description = "No lead with this id", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[delete("/leads/{id}")]
pub async fn delete_lead_handler(
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.delete_lead_use_case.execute(id).await {
        Ok(()) => {
            info!(lead_id = %id, "Lead deleted");
            ApiResponse::no_content()
        }

        Err(DeleteLeadError::NotFound) => ApiResponse::not_found("Lead not found"),

        Err(DeleteLeadError::RepositoryError(ref e)) => {
            error!(error = %e, lead_id = %id, "Lead deletion failed");
            ApiResponse::internal_error()
        }
    }
}
