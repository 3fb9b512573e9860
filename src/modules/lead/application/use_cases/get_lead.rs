use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::lead::application::ports::outgoing::lead_repository::{
    LeadRecord, LeadRepositoryError,
};
use crate::modules::lead::application::ports::outgoing::LeadRepository;

#[derive(Debug, Clone)]
pub enum GetLeadError {
    NotFound,
    RepositoryError(String),
}

impl std::fmt::Display for GetLeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetLeadError::NotFound => write!(f, "Lead not found"),
            GetLeadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetLeadError {}

#[async_trait]
pub trait IGetLeadUseCase: Send + Sync {
    async fn execute(&self, id: Uuid) -> Result<LeadRecord, GetLeadError>;
}

#[derive(Debug, Clone)]
pub struct GetLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    repository: R,
}

impl<R> GetLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IGetLeadUseCase for GetLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    async fn execute(&self, id: Uuid) -> Result<LeadRecord, GetLeadError> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(|e| match e {
                LeadRepositoryError::NotFound => GetLeadError::NotFound,
                other => GetLeadError::RepositoryError(other.to_string()),
            })?
            .ok_or(GetLeadError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
    use crate::modules::lead::application::domain::filter::{LeadFilter, Page};
    use crate::modules::lead::application::ports::outgoing::lead_repository::{
        LeadPatch, NewLead,
    };

    #[derive(Default)]
    struct MockLeadRepository {
        row: Option<LeadRecord>,
        fail: bool,
    }

    #[async_trait]
    impl LeadRepository for MockLeadRepository {
        async fn insert(&self, _lead: NewLead) -> Result<LeadRecord, LeadRepositoryError> {
            Err(LeadRepositoryError::Database("not implemented".to_string()))
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<LeadRecord>, LeadRepositoryError> {
            if self.fail {
                return Err(LeadRepositoryError::Database("connection lost".to_string()));
            }
            Ok(self.row.clone().filter(|r| r.id == id))
        }

        async fn update(
            &self,
            _id: Uuid,
            _patch: LeadPatch,
        ) -> Result<LeadRecord, LeadRepositoryError> {
            Err(LeadRepositoryError::Database("not implemented".to_string()))
        }

        async fn delete(&self, _id: Uuid) -> Result<(), LeadRepositoryError> {
            Err(LeadRepositoryError::Database("not implemented".to_string()))
        }

        async fn count(&self, _filter: &LeadFilter) -> Result<u64, LeadRepositoryError> {
            Ok(0)
        }

        async fn find_page(
            &self,
            _filter: &LeadFilter,
            _page: &Page,
        ) -> Result<Vec<LeadRecord>, LeadRepositoryError> {
            Ok(vec![])
        }
    }

    fn lead() -> LeadRecord {
        LeadRecord {
            id: Uuid::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            company: None,
            city: None,
            state: None,
            source: LeadSource::Website,
            status: LeadStatus::New,
            score: Some(75),
            lead_value: None,
            last_activity_at: None,
            is_qualified: None,
            created_at: chrono::Utc::now(),
            owner_id: None,
        }
    }

    #[tokio::test]
    async fn test_get_found() {
        let row = lead();
        let use_case = GetLeadUseCase::new(MockLeadRepository {
            row: Some(row.clone()),
            fail: false,
        });

        let found = use_case.execute(row.id).await.expect("should find");
        assert_eq!(found.id, row.id);
        assert_eq!(found.score, Some(75));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let use_case = GetLeadUseCase::new(MockLeadRepository::default());

        let result = use_case.execute(Uuid::new_v4()).await;
        assert!(matches!(result, Err(GetLeadError::NotFound)));
    }

    #[tokio::test]
    async fn test_get_repository_error() {
        let use_case = GetLeadUseCase::new(MockLeadRepository {
            row: None,
            fail: true,
        });

        let result = use_case.execute(Uuid::new_v4()).await;
        assert!(matches!(result, Err(GetLeadError::RepositoryError(_))));
    }
}
