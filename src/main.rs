pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

#[cfg(test)]
mod tests;

use crate::modules::auth::adapter::incoming::web::cookies::SessionCookieOptions;
use crate::modules::auth::adapter::outgoing::security::bcrypt_hasher::BcryptHasher;
use crate::modules::auth::adapter::outgoing::session::{SessionConfig, SessionService};
use crate::modules::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::modules::auth::application::ports::outgoing::TokenProvider;
use crate::modules::auth::application::use_cases::{
    current_user::{CurrentUserUseCase, ICurrentUserUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    register_user::{IRegisterUserUseCase, RegisterUserUseCase},
};
use crate::modules::lead::adapter::outgoing::lead_repository_postgres::LeadRepositoryPostgres;
use crate::modules::lead::application::use_cases::{
    create_lead::{CreateLeadUseCase, ICreateLeadUseCase},
    delete_lead::{DeleteLeadUseCase, IDeleteLeadUseCase},
    get_lead::{GetLeadUseCase, IGetLeadUseCase},
    list_leads::{IListLeadsUseCase, ListLeadsUseCase},
    update_lead::{IUpdateLeadUseCase, UpdateLeadUseCase},
};
use crate::shared::api::{custom_json_config, custom_query_config};

use actix_cors::Cors;
use actix_web::{http, web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Clone)]
pub struct AppState {
    pub register_user_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub current_user_use_case: Arc<dyn ICurrentUserUseCase + Send + Sync>,
    pub create_lead_use_case: Arc<dyn ICreateLeadUseCase + Send + Sync>,
    pub list_leads_use_case: Arc<dyn IListLeadsUseCase + Send + Sync>,
    pub get_lead_use_case: Arc<dyn IGetLeadUseCase + Send + Sync>,
    pub update_lead_use_case: Arc<dyn IUpdateLeadUseCase + Send + Sync>,
    pub delete_lead_use_case: Arc<dyn IDeleteLeadUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environment variable loading
    let environment = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", environment);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let cors_origins = env::var("CORS_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:5173".to_string());

    let session_config = SessionConfig::from_env();
    let cookie_options = SessionCookieOptions::from_env(session_config.ttl_seconds);

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Repositories and services
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let lead_repo = LeadRepositoryPostgres::new(Arc::clone(&db_arc));
    let session_service = SessionService::new(session_config);

    // Use cases
    let register_user_use_case = RegisterUserUseCase::new(
        user_repo.clone(),
        BcryptHasher,
        session_service.clone(),
    );
    let login_user_use_case = LoginUserUseCase::new(
        user_repo.clone(),
        BcryptHasher,
        session_service.clone(),
    );
    let current_user_use_case = CurrentUserUseCase::new(user_repo);

    let create_lead_use_case = CreateLeadUseCase::new(lead_repo.clone());
    let list_leads_use_case = ListLeadsUseCase::new(lead_repo.clone());
    let get_lead_use_case = GetLeadUseCase::new(lead_repo.clone());
    let update_lead_use_case = UpdateLeadUseCase::new(lead_repo.clone());
    let delete_lead_use_case = DeleteLeadUseCase::new(lead_repo);

    let state = AppState {
        register_user_use_case: Arc::new(register_user_use_case),
        login_user_use_case: Arc::new(login_user_use_case),
        current_user_use_case: Arc::new(current_user_use_case),
        create_lead_use_case: Arc::new(create_lead_use_case),
        list_leads_use_case: Arc::new(list_leads_use_case),
        get_lead_use_case: Arc::new(get_lead_use_case),
        update_lead_use_case: Arc::new(update_lead_use_case),
        delete_lead_use_case: Arc::new(delete_lead_use_case),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(session_service);
    let started_at = health::StartedAt(Instant::now());

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
            .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
            .supports_credentials()
            .max_age(3600);
        for origin in cors_origins.split(',').map(str::trim).filter(|o| !o.is_empty()) {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(cookie_options.clone()))
            .app_data(web::Data::new(started_at))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/docs/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::ping);
    // Auth
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::register_user::register_user_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::login_user::login_user_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::logout_user::logout_user_handler);
    cfg.service(crate::modules::auth::adapter::incoming::web::routes::current_user::current_user_handler);
    // Leads
    cfg.service(crate::modules::lead::adapter::incoming::web::routes::create_lead::create_lead_handler);
    cfg.service(crate::modules::lead::adapter::incoming::web::routes::list_leads::list_leads_handler);
    cfg.service(crate::modules::lead::adapter::incoming::web::routes::get_lead::get_lead_handler);
    cfg.service(crate::modules::lead::adapter::incoming::web::routes::update_lead::update_lead_handler);
    cfg.service(crate::modules::lead::adapter::incoming::web::routes::delete_lead::delete_lead_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
