pub mod extractor_config;
mod response;

pub use extractor_config::{custom_json_config, custom_query_config};
pub use response::{ApiMessage, ApiResponse};
