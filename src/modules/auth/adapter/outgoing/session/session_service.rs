use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::token_provider::{
    SessionClaims, TokenError, TokenProvider,
};

use super::session_config::SessionConfig;

/// Stateless session tokens signed with HS256. Nothing is stored server
/// side, so a token stays valid until its expiry.
#[derive(Clone)]
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("ttl_seconds", &self.config.ttl_seconds)
            .finish()
    }
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }
}

impl TokenProvider for SessionService {
    fn issue(&self, user_id: Uuid) -> Result<String, TokenError> {
        let expiration = Utc::now() + Duration::seconds(self.config.ttl_seconds);

        let claims = SessionClaims {
            sub: user_id,
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingError(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 30;

        let decoded = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;

                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Session verification failed: token expired");
                        TokenError::Expired
                    }
                    ErrorKind::InvalidSignature => {
                        tracing::warn!("Session verification failed: invalid signature");
                        TokenError::InvalidSignature
                    }
                    ErrorKind::InvalidToken | ErrorKind::InvalidAlgorithm => {
                        TokenError::Malformed
                    }
                    ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                        TokenError::Malformed
                    }
                    _ => {
                        tracing::warn!("Session verification failed: unknown error");
                        TokenError::Malformed
                    }
                }
            })?;

        Ok(decoded.claims.sub)
    }
}
