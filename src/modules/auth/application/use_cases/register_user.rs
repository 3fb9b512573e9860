use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};

use crate::modules::auth::application::ports::outgoing::user_repository::{
    NewUser, UserRepositoryError,
};
use crate::modules::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, UserRepository,
};
use crate::modules::auth::application::use_cases::login_user::UserInfo;

const MIN_PASSWORD_LENGTH: usize = 6;

// ======================= Register Request =======================
/// Validated registration payload.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone)]
pub enum RegisterRequestError {
    EmptyEmail,
    InvalidEmailFormat,
    PasswordTooShort,
}

impl std::fmt::Display for RegisterRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            RegisterRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            RegisterRequestError::PasswordTooShort => {
                write!(f, "Password must be at least {} characters", MIN_PASSWORD_LENGTH)
            }
        }
    }
}

impl std::error::Error for RegisterRequestError {}

impl RegisterRequest {
    /// Syntax checks only; the address is stored exactly as submitted.
    pub fn new(email: String, password: String) -> Result<Self, RegisterRequestError> {
        if email.is_empty() {
            return Err(RegisterRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(RegisterRequestError::InvalidEmailFormat);
        }

        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegisterRequestError::PasswordTooShort);
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

impl<'de> Deserialize<'de> for RegisterRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RegisterRequestHelper {
            email: String,
            password: String,
        }

        let helper = RegisterRequestHelper::deserialize(deserializer)?;
        RegisterRequest::new(helper.email, helper.password).map_err(serde::de::Error::custom)
    }
}

// ======================= Register Error =========================
#[derive(Debug, Clone)]
pub enum RegisterError {
    EmailTaken,
    HashingFailed(String),
    TokenGenerationFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for RegisterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterError::EmailTaken => write!(f, "Email already in use"),
            RegisterError::HashingFailed(msg) => write!(f, "Password hashing failed: {}", msg),
            RegisterError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            RegisterError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RegisterError {}

// ======================= Register Response ======================
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
    pub user: UserInfo,
    pub session_token: String,
}

// ===================== Register User Use Case ===================
#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(&self, request: RegisterRequest)
        -> Result<RegisterUserResponse, RegisterError>;
}

#[derive(Debug, Clone)]
pub struct RegisterUserUseCase<R, H, T>
where
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    repository: R,
    password_hasher: H,
    token_provider: T,
}

impl<R, H, T> RegisterUserUseCase<R, H, T>
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
impl<R, H, T> IRegisterUserUseCase for RegisterUserUseCase<R, H, T>
where
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    async fn execute(
        &self,
        request: RegisterRequest,
    ) -> Result<RegisterUserResponse, RegisterError> {
        // Cheap pre-check; the unique index still backs this up under races.
        let existing = self
            .repository
            .find_by_email(request.email())
            .await
            .map_err(|e| RegisterError::RepositoryError(e.to_string()))?;
        if existing.is_some() {
            return Err(RegisterError::EmailTaken);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .map_err(|e| RegisterError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .insert(NewUser {
                email: request.email().to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::EmailTaken => RegisterError::EmailTaken,
                other => RegisterError::RepositoryError(other.to_string()),
            })?;

        let session_token = self
            .token_provider
            .issue(user.id)
            .map_err(|e| RegisterError::TokenGenerationFailed(e.to_string()))?;

        Ok(RegisterUserResponse {
            user: UserInfo {
                id: user.id,
                email: user.email,
            },
            session_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::ports::outgoing::password_hasher::HashError;
    use crate::modules::auth::application::ports::outgoing::token_provider::TokenError;
    use crate::modules::auth::application::ports::outgoing::user_repository::UserRecord;
    use serde_json::json;
    use std::sync::Mutex;
    use uuid::Uuid;

    // ==================== RegisterRequest Tests ====================
    #[test]
    fn test_register_request_valid() {
        let request =
            RegisterRequest::new("new@example.com".to_string(), "secret1".to_string()).unwrap();
        assert_eq!(request.email(), "new@example.com");
        assert_eq!(request.password(), "secret1");
    }

    #[test]
    fn test_register_request_keeps_email_casing() {
        let request =
            RegisterRequest::new("New@Example.COM".to_string(), "secret1".to_string()).unwrap();
        assert_eq!(request.email(), "New@Example.COM");
    }

    #[test]
    fn test_register_request_short_password() {
        let result = RegisterRequest::new("new@example.com".to_string(), "12345".to_string());
        assert!(matches!(result, Err(RegisterRequestError::PasswordTooShort)));
    }

    #[test]
    fn test_register_request_invalid_email() {
        let result = RegisterRequest::new("not-an-email".to_string(), "secret1".to_string());
        assert!(matches!(result, Err(RegisterRequestError::InvalidEmailFormat)));
    }

    #[test]
    fn test_register_request_deserialize_short_password() {
        let json = json!({
            "email": "new@example.com",
            "password": "123"
        });

        let result: Result<RegisterRequest, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    // ==================== RegisterUserUseCase Tests ====================
    #[derive(Default)]
    struct MockUserRepository {
        existing_email: Option<String>,
        insert_fails_with_duplicate: bool,
        inserted: Mutex<Vec<NewUser>>,
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn insert(&self, user: NewUser) -> Result<UserRecord, UserRepositoryError> {
            if self.insert_fails_with_duplicate {
                return Err(UserRepositoryError::EmailTaken);
            }
            let record = UserRecord {
                id: Uuid::new_v4(),
                email: user.email.clone(),
                password_hash: user.password_hash.clone(),
                created_at: chrono::Utc::now(),
            };
            self.inserted.lock().unwrap().push(user);
            Ok(record)
        }

        async fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<UserRecord>, UserRepositoryError> {
            if self.existing_email.as_deref() == Some(email) {
                return Ok(Some(UserRecord {
                    id: Uuid::new_v4(),
                    email: email.to_string(),
                    password_hash: "hash".to_string(),
                    created_at: chrono::Utc::now(),
                }));
            }
            Ok(None)
        }

        async fn find_by_id(
            &self,
            _user_id: Uuid,
        ) -> Result<Option<UserRecord>, UserRepositoryError> {
            Ok(None)
        }
    }

    struct StubPasswordHasher;

    impl PasswordHasher for StubPasswordHasher {
        fn hash_password(&self, password: &str) -> Result<String, HashError> {
            Ok(format!("hashed::{}", password))
        }

        fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
            Ok(true)
        }
    }

    struct StubTokenProvider;

    impl TokenProvider for StubTokenProvider {
        fn issue(&self, _user_id: Uuid) -> Result<String, TokenError> {
            Ok("stub.session.token".to_string())
        }

        fn verify(&self, _token: &str) -> Result<Uuid, TokenError> {
            Err(TokenError::Malformed)
        }
    }

    #[tokio::test]
    async fn test_register_success_stores_hash_not_password() {
        let use_case = RegisterUserUseCase::new(
            MockUserRepository::default(),
            StubPasswordHasher,
            StubTokenProvider,
        );

        let request =
            RegisterRequest::new("new@example.com".to_string(), "secret1".to_string()).unwrap();

        let response = use_case.execute(request).await.expect("register should pass");
        assert_eq!(response.user.email, "new@example.com");
        assert_eq!(response.session_token, "stub.session.token");

        let inserted = use_case.repository.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].password_hash, "hashed::secret1");
    }

    #[tokio::test]
    async fn test_register_email_taken_pre_check() {
        let repository = MockUserRepository {
            existing_email: Some("taken@example.com".to_string()),
            ..Default::default()
        };
        let use_case = RegisterUserUseCase::new(repository, StubPasswordHasher, StubTokenProvider);

        let request =
            RegisterRequest::new("taken@example.com".to_string(), "secret1".to_string()).unwrap();

        let result = use_case.execute(request).await;
        assert!(
            matches!(result, Err(RegisterError::EmailTaken)),
            "Expected EmailTaken, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_register_email_taken_on_insert() {
        let repository = MockUserRepository {
            insert_fails_with_duplicate: true,
            ..Default::default()
        };
        let use_case = RegisterUserUseCase::new(repository, StubPasswordHasher, StubTokenProvider);

        let request =
            RegisterRequest::new("raced@example.com".to_string(), "secret1".to_string()).unwrap();

        let result = use_case.execute(request).await;
        assert!(
            matches!(result, Err(RegisterError::EmailTaken)),
            "Expected EmailTaken, got {:?}",
            result
        );
    }

    #[tokio::test]
    async fn test_register_hashing_failure() {
        struct FailingHasher;

        impl PasswordHasher for FailingHasher {
            fn hash_password(&self, _password: &str) -> Result<String, HashError> {
                Err(HashError::HashFailed("bcrypt exploded".to_string()))
            }

            fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
                Ok(false)
            }
        }

        let use_case = RegisterUserUseCase::new(
            MockUserRepository::default(),
            FailingHasher,
            StubTokenProvider,
        );

        let request =
            RegisterRequest::new("new@example.com".to_string(), "secret1".to_string()).unwrap();

        let result = use_case.execute(request).await;
        assert!(
            matches!(result, Err(RegisterError::HashingFailed(_))),
            "Expected HashingFailed, got {:?}",
            result
        );
    }
}
