use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, UserRepository,
};

// ========================= Login Request =========================
/// Validated login request - can be deserialized directly from JSON
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
pub enum LoginRequestError {
    EmptyEmail,
    InvalidEmailFormat,
    EmptyPassword,
}

impl std::fmt::Display for LoginRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            LoginRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            LoginRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
        }
    }
}

impl std::error::Error for LoginRequestError {}

impl LoginRequest {
    /// Create a validated LoginRequest. The email is matched exactly as
    /// stored, so no case folding happens here.
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }

        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self { email, password })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// Custom deserialization that validates during parsing
impl<'de> Deserialize<'de> for LoginRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct LoginRequestHelper {
            email: String,
            password: String,
        }

        let helper = LoginRequestHelper::deserialize(deserializer)?;
        LoginRequest::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone)]
pub enum LoginError {
    InvalidCredentials,
    PasswordVerificationFailed(String),
    TokenGenerationFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginError::InvalidCredentials => write!(f, "Invalid credentials"),
            LoginError::PasswordVerificationFailed(msg) => {
                write!(f, "Password verification failed: {}", msg)
            }
            LoginError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            LoginError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for LoginError {}

// ====================== Login Response ==========================
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    pub id: uuid::Uuid,
    pub email: String,
}

/// The session token travels to the client as a cookie, never in the body,
/// so it stays out of the serialized response.
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
    pub user: UserInfo,
    pub session_token: String,
}

// ====================== Login User Use Case =====================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Debug, Clone)]
pub struct LoginUserUseCase<R, H, T>
where
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    repository: R,
    password_hasher: H,
    token_provider: T,
}

impl<R, H, T> LoginUserUseCase<R, H, T>
where
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    pub fn new(repository: R, password_hasher: H, token_provider: T) -> Self {
        Self {
            repository,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl<R, H, T> ILoginUserUseCase for LoginUserUseCase<R, H, T>
where
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .repository
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::RepositoryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        let session_token = self
            .token_provider
            .issue(user.id)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginUserResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
            },
            session_token,
        })
    }
}
