pub mod session_config;
pub mod session_service;

pub use session_config::SessionConfig;
pub use session_service::SessionService;
