use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde::Serialize;
use std::time::Instant;
use utoipa::ToSchema;

/// Process start time, captured once at boot.
#[derive(Clone, Copy, Debug)]
pub struct StartedAt(pub Instant);

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    ok: bool,
    /// Current server time, RFC 3339
    timestamp: String,
    /// Seconds since the process started
    uptime: u64,
}

#[derive(Serialize, ToSchema)]
pub struct PingResponse {
    pong: bool,
    timestamp: String,
}

/// LIVENESS PROBE
/// - No I/O
/// - No DB
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse),
    )
)]
#[get("/health")]
pub async fn health(started_at: web::Data<StartedAt>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        timestamp: Utc::now().to_rfc3339(),
        uptime: started_at.0.elapsed().as_secs(),
    })
}

/// Connectivity check for clients
#[utoipa::path(
    get,
    path = "/ping",
    tag = "health",
    responses(
        (status = 200, description = "Pong", body = PingResponse),
    )
)]
#[get("/ping")]
pub async fn ping() -> impl Responder {
    HttpResponse::Ok().json(PingResponse {
        pong: true,
        timestamp: Utc::now().to_rfc3339(),
    })
}
