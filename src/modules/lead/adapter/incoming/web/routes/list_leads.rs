use actix_web::{get, web, HttpResponse, Responder};
use tracing::{error, warn};

use crate::modules::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::lead::application::domain::filter::ListLeadsQuery;
use crate::modules::lead::application::use_cases::list_leads::{ListLeadsError, ListLeadsResponse};
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// List leads
///
/// Paginated listing with per-field filters. Operators for the same field
/// collapse into a single clause; all clauses are combined with AND.
#[utoipa::path(
    get,
    path = "/leads",
    tag = "leads",
    params(ListLeadsQuery),
    responses(
        (status = 200, description = "A page of leads", body = ListLeadsResponse),
        (status = 400, description = "Invalid filter or pagination parameter", body = ApiMessage),
        (status = 401, description = "Missing or invalid session", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[get("/leads")]
pub async fn list_leads_handler(
    _user: AuthenticatedUser,
    query: web::Query<ListLeadsQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.list_leads_use_case.execute(query.into_inner()).await {
        Ok(response) => HttpResponse::Ok().json(response),

        Err(ListLeadsError::InvalidQuery(ref e)) => {
            warn!(error = %e, "Lead listing rejected");
            ApiResponse::bad_request(&e.to_string())
        }

        Err(ListLeadsError::RepositoryError(ref e)) => {
            error!(error = %e, "Lead listing failed");
            ApiResponse::internal_error()
        }
    }
}
