use actix_web::{get, web, HttpResponse, Responder};
use tracing::error;
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRecord;
use crate::modules::lead::application::use_cases::get_lead::GetLeadError;
use crate::shared::api::{ApiMessage, ApiResponse};
use crate::AppState;

/// Fetch a lead
#[utoipa::path(
    get,
    path = "/leads/{id}",
    tag = "leads",
    params(
        ("id" = Uuid, Path, description = "Lead identifier"),
    ),
    responses(
        (status = 200, description = "The lead", body = LeadRecord),
        (status = 401, description = "Missing or invalid session", body = ApiMessage),
        (status = 404, description = "No lead with this id", body = ApiMessage),
        (status = 500, description = "Internal server error", body = ApiMessage),
    )
)]
#[get("/leads/{id}")]
pub async fn get_lead_handler(
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();

    match data.get_lead_use_case.execute(id).await {
        Ok(lead) => HttpResponse::Ok().json(lead),

        Err(GetLeadError::NotFound) => ApiResponse::not_found("Lead not found"),

        Err(GetLeadError::RepositoryError(ref e)) => {
            error!(error = %e, lead_id = %id, "Lead lookup failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
    use crate::modules::lead::application::use_cases::get_lead::IGetLeadUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{session_cookie_for, test_token_provider};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use chrono::Utc;

    #[derive(Clone)]
    struct MockGetFound;

    #[async_trait]
    impl IGetLeadUseCase for MockGetFound {
        async fn execute(&self, id: Uuid) -> Result<LeadRecord, GetLeadError> {
            Ok(LeadRecord {
                id,
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane.doe@example.com".to_string(),
                phone: None,
                company: Some("Acme".to_string()),
                city: None,
                state: None,
                source: LeadSource::Referral,
                status: LeadStatus::Contacted,
                score: Some(60),
                lead_value: None,
                last_activity_at: None,
                is_qualified: Some(false),
                created_at: Utc::now(),
                owner_id: None,
            })
        }
    }

    #[derive(Clone)]
    struct MockGetMissing;

    #[async_trait]
    impl IGetLeadUseCase for MockGetMissing {
        async fn execute(&self, _id: Uuid) -> Result<LeadRecord, GetLeadError> {
            Err(GetLeadError::NotFound)
        }
    }

    #[actix_web::test]
    async fn test_get_lead_found() {
        let lead_id = Uuid::new_v4();
        let app_state = TestAppStateBuilder::default()
            .with_get_lead(MockGetFound)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(test_token_provider())
                .service(get_lead_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/leads/{}", lead_id))
            .cookie(session_cookie_for(Uuid::new_v4()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["id"], lead_id.to_string());
        assert_eq!(body["status"], "contacted");
        assert_eq!(body["source"], "referral");
    }

    #[actix_web::test]
    async fn test_get_lead_missing() {
        let app_state = TestAppStateBuilder::default()
            .with_get_lead(MockGetMissing)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(test_token_provider())
                .service(get_lead_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/leads/{}", Uuid::new_v4()))
            .cookie(session_cookie_for(Uuid::new_v4()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Lead not found");
    }

    #[actix_web::test]
    async fn test_get_lead_without_session() {
        let app_state = TestAppStateBuilder::default()
            .with_get_lead(MockGetFound)
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(test_token_provider())
                .service(get_lead_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/leads/{}", Uuid::new_v4()))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }
}
