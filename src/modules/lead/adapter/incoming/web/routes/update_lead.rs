use actix_web::{put, web, HttpResponse, Responder};
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRecord;
use crate::modules::lead::application::use_cases::update_lead::{UpdateLeadError, UpdateLeadRequest};
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// Partial update payload; documentation mirror of the validated request
/// type. Omitted fields keep their stored value.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UpdateLeadRequestDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    pub score: Option<i32>,
    pub lead_value: Option<f64>,
    pub last_activity_at: Option<String>,
    pub is_qualified: Option<bool>,
}

/// Update a lead
///
/// Fields absent from the body are left untouched; an explicit `null`
/// is rejected.
#[utoipa::path(
    put,
    path = "/leads/{id}",
    tag = "leads",
    params(
        ("id" = Uuid, Path, description = "Lead identifier"),
    ),
    request_body = UpdateLeadRequestDto,
    responses(
        (status = 200, description = "The updated lead", body = LeadRecord),
        (status = 400, description = "Validation failed", body = ApiMessage),
        (status = 401, description = "Missing or invalid session", body = ApiMessage),
        (status = 404, description = "No lead with this id", body = ApiMessage),
        (status = 409, description = "Email already used by another lead", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[put("/leads/{id}")]
pub async fn update_lead_handler(
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateLeadRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data
        .update_lead_use_case
        .execute(id, req.into_inner())
        .await
    {
        Ok(lead) => {
            info!(lead_id = %lead.id, "Lead updated");
            HttpResponse::Ok().json(lead)
        }

        Err(UpdateLeadError::NotFound) => ApiResponse::not_found("Lead not found"),

        Err(UpdateLeadError::DuplicateEmail) => {
            warn!(lead_id = %id, "Lead update rejected: duplicate email");
            ApiResponse::conflict("A lead with this email already exists")
        }

        Err(UpdateLeadError::RepositoryError(ref e)) => {
            error!(error = %e, lead_id = %id, "Lead update failed");
            ApiResponse::internal_error()
        }
    }
}
