// src/shared/api/extractor_config.rs
use crate::shared::api::ApiResponse;
use actix_web::web::{JsonConfig, QueryConfig};

/// Malformed or invalid JSON bodies become a 400 with the standard error body.
pub fn custom_json_config() -> JsonConfig {
    JsonConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(err, ApiResponse::bad_request("Invalid input"))
            .into()
    })
}

/// Query strings that fail typed extraction become a 400 with the standard
/// error body (e.g. a non-numeric `page` or an unknown `status` value).
pub fn custom_query_config() -> QueryConfig {
    QueryConfig::default().error_handler(|err, _req| {
        actix_web::error::InternalError::from_response(err, ApiResponse::bad_request("Invalid query"))
            .into()
    })
}
