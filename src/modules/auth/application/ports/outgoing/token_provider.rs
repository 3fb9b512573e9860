use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id.
    pub sub: Uuid,
    /// Expiry as a unix timestamp (seconds).
    pub exp: i64,
}

#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Session has expired")]
    Expired,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Malformed token")]
    Malformed,
    #[error("Token encoding failed: {0}")]
    EncodingError(String),
}

/// Issues and verifies opaque session tokens for the cookie carrier.
pub trait TokenProvider {
    /// Mint a session token for the given user.
    fn issue(&self, user_id: Uuid) -> Result<String, TokenError>;

    /// Verify a token and return the user id it was issued for.
    fn verify(&self, token: &str) -> Result<Uuid, TokenError>;
}
