use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::UserRepository;
use crate::modules::auth::application::use_cases::login_user::UserInfo;

// ====================== Current User Error ======================
#[derive(Debug, Clone)]
pub enum CurrentUserError {
    NotFound,
    RepositoryError(String),
}

impl std::fmt::Display for CurrentUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrentUserError::NotFound => write!(f, "User not found"),
            CurrentUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CurrentUserError {}

// ===================== Current User Use Case ====================
/// Resolves the user behind an already-verified session.
#[async_trait]
pub trait ICurrentUserUseCase: Send + Sync {
    async fn execute(&self, user_id: Uuid) -> Result<UserInfo, CurrentUserError>;
}

#[derive(Debug, Clone)]
pub struct CurrentUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    repository: R,
}

impl<R> CurrentUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ICurrentUserUseCase for CurrentUserUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, user_id: Uuid) -> Result<UserInfo, CurrentUserError> {
        let user = self
            .repository
            .find_by_id(user_id)
            .await
            .map_err(|e| CurrentUserError::RepositoryError(e.to_string()))?
            .ok_or(CurrentUserError::NotFound)?;

        Ok(UserInfo {
            id: user.id,
            email: user.email,
        })
    }
}
