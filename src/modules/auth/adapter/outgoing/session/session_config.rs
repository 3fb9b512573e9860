use std::env;

/// One week, matching the cookie lifetime handed to clients.
const DEFAULT_TTL_SECONDS: i64 = 604_800;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret_key: String,
    /// Session lifetime in seconds.
    pub ttl_seconds: i64,
}

impl SessionConfig {
    /// Load session configuration from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let secret_key = env::var("SESSION_SECRET").expect("SESSION_SECRET must be set");

        // HS256 needs a key of at least 32 bytes
        if secret_key.len() < 32 {
            panic!("SESSION_SECRET must be at least 32 characters long for HS256 algorithm");
        }

        let ttl_seconds = env::var("SESSION_TTL_SECONDS")
            .unwrap_or_else(|_| DEFAULT_TTL_SECONDS.to_string())
            .parse::<i64>()
            .unwrap_or_else(|_| panic!("Invalid SESSION_TTL_SECONDS value"));

        if ttl_seconds <= 0 {
            panic!("SESSION_TTL_SECONDS must be positive");
        }

        Self {
            secret_key,
            ttl_seconds,
        }
    }
}
