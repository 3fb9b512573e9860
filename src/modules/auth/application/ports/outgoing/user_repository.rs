use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// A user row as stored in the database.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, Error)]
pub enum UserRepositoryError {
    #[error("Email already in use")]
    EmailTaken,
    #[error("User not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait UserRepository {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserRepositoryError>;

    async fn find_by_email(&self, email: &str)
        -> Result<Option<UserRecord>, UserRepositoryError>;

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserRepositoryError>;
}
