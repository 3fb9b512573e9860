use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HashError {
    #[error("Password hashing failed: {0}")]
    HashFailed(String),
    #[error("Password verification failed: {0}")]
    VerifyFailed(String),
}

/// Password hashing seam so use cases never touch a concrete algorithm.
pub trait PasswordHasher {
    fn hash_password(&self, password: &str) -> Result<String, HashError>;

    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
