use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRepositoryError;
use crate::modules::lead::application::ports::outgoing::LeadRepository;

#[derive(Debug, Clone)]
pub enum DeleteLeadError {
    NotFound,
    RepositoryError(String),
}

impl std::fmt::Display for DeleteLeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeleteLeadError::NotFound => write!(f, "Lead not found"),
            DeleteLeadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for DeleteLeadError {}

#[async_trait]
pub trait IDeleteLeadUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<(), DeleteLeadError>;
}

#[derive(Debug, Clone)]
pub struct DeleteLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    repository: R,
}

impl<R> DeleteLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IDeleteLeadUseCase for DeleteLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    async fn execute(&self, id: Uuid) -> Result<(), DeleteLeadError> {
        self.repository.delete(id).await.map_err(|e| match e {
            LeadRepositoryError::NotFound => DeleteLeadError::NotFound,
            other => DeleteLeadError::RepositoryError(other.to_string()),
        })
    }
}
