use actix_web::{post, web, HttpResponse, Responder};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::modules::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRecord;
use crate::modules::lead::application::use_cases::create_lead::{CreateLeadError, CreateLeadRequest};
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// New lead payload; documentation mirror of the validated request type.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct CreateLeadRequestDto {
    /// First name
    #[schema(example = "Jane")]
    pub first_name: String,

    /// Last name
    #[schema(example = "Doe")]
    pub last_name: String,

    /// Email address, unique across all leads
    #[schema(example = "jane.doe@example.com")]
    pub email: String,

    pub phone: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,

    /// Where the lead came from
    pub source: LeadSource,

    /// Pipeline status, defaults to `new`
    pub status: Option<LeadStatus>,

    /// Score between 0 and 100
    #[schema(example = 75)]
    pub score: Option<i32>,

    /// Estimated deal value, non-negative
    #[schema(example = 12000.0)]
    pub lead_value: Option<f64>,

    pub last_activity_at: Option<String>,
    pub is_qualified: Option<bool>,
}

/// Create a lead
///
/// The authenticated user becomes the owner of the new lead.
#[utoipa::path(
    post,
    path = "/leads",
    tag = "leads",
    request_body = CreateLeadRequestDto,
    responses(
        (status = 201, description = "Lead created", body = LeadRecord),
        (status = 400, description = "Validation failed", body = ApiMessage),
        (status = 401, description = "Missing or invalid session", body = ApiMessage),
        (status = 409, description = "Email already used by another lead", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[post("/leads")]
pub async fn create_lead_handler(
    user: AuthenticatedUser,
    req: web::Json<CreateLeadRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .create_lead_use_case
        .execute(req.into_inner(), user.user_id)
        .await
    {
        Ok(lead) => {
            info!(lead_id = %lead.id, owner_id = %user.user_id, "Lead created");
            HttpResponse::Created().json(lead)
        }

        Err(CreateLeadError::DuplicateEmail) => {
            warn!("Lead creation rejected: duplicate email");
            ApiResponse::conflict("A lead with this email already exists")
        }

        Err(CreateLeadError::RepositoryError(ref e)) => {
            error!(error = %e, "Lead creation failed");
            ApiResponse::internal_error()
        }
    }
}
