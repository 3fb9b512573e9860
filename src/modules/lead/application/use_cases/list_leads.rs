use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::lead::application::domain::filter::{self, FilterError, ListLeadsQuery};
use crate::modules::lead::application::ports::outgoing::lead_repository::LeadRecord;
use crate::modules::lead::application::ports::outgoing::LeadRepository;

// ======================= List Leads Response ====================
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListLeadsResponse {
    pub data: Vec<LeadRecord>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    #[serde(rename = "totalPages")]
    pub total_pages: u64,
}

// ======================== List Leads Error ======================
#[derive(Debug, Clone)]
pub enum ListLeadsError {
    InvalidQuery(FilterError),
    RepositoryError(String),
}

impl std::fmt::Display for ListLeadsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListLeadsError::InvalidQuery(e) => write!(f, "{}", e),
            ListLeadsError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListLeadsError {}

// ======================= List Leads Use Case ====================
#[async_trait]
pub trait IListLeadsUseCase: Send + Sync {
    async fn execute(&self, query: ListLeadsQuery) -> Result<ListLeadsResponse, ListLeadsError>;
}

#[derive(Debug, Clone)]
pub struct ListLeadsUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    repository: R,
}

impl<R> ListLeadsUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IListLeadsUseCase for ListLeadsUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    async fn execute(&self, query: ListLeadsQuery) -> Result<ListLeadsResponse, ListLeadsError> {
        let (filter, page) = filter::compile(&query).map_err(ListLeadsError::InvalidQuery)?;

        // Count and page fetch run concurrently against the pool
        let (total, data) = futures::try_join!(
            self.repository.count(&filter),
            self.repository.find_page(&filter, &page),
        )
        .map_err(|e| ListLeadsError::RepositoryError(e.to_string()))?;

        // An empty result still reports one page
        let total_pages = (total.div_ceil(page.limit)).max(1);

        Ok(ListLeadsResponse {
            data,
            page: page.page,
            limit: page.limit,
            total,
            total_pages,
        })
    }
}
