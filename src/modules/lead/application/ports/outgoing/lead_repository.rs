use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::domain::filter::{LeadFilter, Page};

/// A lead row as served over the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LeadRecord {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub score: Option<i32>,
    pub lead_value: Option<f64>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub is_qualified: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub owner_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub source: LeadSource,
    pub status: LeadStatus,
    pub score: Option<i32>,
    pub lead_value: Option<f64>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub is_qualified: Option<bool>,
    pub owner_id: Option<Uuid>,
}

/// Partial update. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct LeadPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub source: Option<LeadSource>,
    pub status: Option<LeadStatus>,
    pub score: Option<i32>,
    pub lead_value: Option<f64>,
    pub last_activity_at: Option<DateTime<Utc>>,
    pub is_qualified: Option<bool>,
}

impl LeadPatch {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.company.is_none()
            && self.city.is_none()
            && self.state.is_none()
            && self.source.is_none()
            && self.status.is_none()
            && self.score.is_none()
            && self.lead_value.is_none()
            && self.last_activity_at.is_none()
            && self.is_qualified.is_none()
    }
}

#[derive(Debug, Clone, Error)]
pub enum LeadRepositoryError {
    #[error("A lead with this email already exists")]
    DuplicateEmail,
    #[error("Lead not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
}

#[async_trait]
pub trait LeadRepository {
    async fn insert(&self, lead: NewLead) -> Result<LeadRecord, LeadRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeadRecord>, LeadRepositoryError>;

    async fn update(&self, id: Uuid, patch: LeadPatch) -> Result<LeadRecord, LeadRepositoryError>;

    async fn delete(&self, id: Uuid) -> Result<(), LeadRepositoryError>;

    async fn count(&self, filter: &LeadFilter) -> Result<u64, LeadRepositoryError>;

    async fn find_page(
        &self,
        filter: &LeadFilter,
        page: &Page,
    ) -> Result<Vec<LeadRecord>, LeadRepositoryError>;
}
