use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::ports::outgoing::lead_repository::{
    LeadPatch, LeadRecord, LeadRepositoryError,
};
use crate::modules::lead::application::ports::outgoing::LeadRepository;

use super::create_lead::{
    normalize_text, validate_email, validate_lead_value, validate_name, validate_score,
    LeadValidationError,
};

// ====================== Update Lead Request =====================
/// Validated partial update. Absent fields keep the stored value;
/// an explicit JSON `null` is rejected, no field can be cleared.
#[derive(Debug, Clone)]
pub struct UpdateLeadRequest {
    patch: LeadPatch,
}

#[derive(Debug, Clone)]
pub enum UpdateLeadRequestError {
    NullField(&'static str),
    Invalid(LeadValidationError),
}

impl std::fmt::Display for UpdateLeadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateLeadRequestError::NullField(field) => {
                write!(f, "Field '{}' cannot be null", field)
            }
            UpdateLeadRequestError::Invalid(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for UpdateLeadRequestError {}

impl From<LeadValidationError> for UpdateLeadRequestError {
    fn from(e: LeadValidationError) -> Self {
        UpdateLeadRequestError::Invalid(e)
    }
}

impl UpdateLeadRequest {
    pub fn into_patch(self) -> LeadPatch {
        self.patch
    }

    pub fn is_empty(&self) -> bool {
        self.patch.is_empty()
    }
}

/// Distinguishes an absent key from an explicit `null`: missing stays
/// `None` via the field default, while any present value (null included)
/// lands in `Some(..)`.
fn explicit<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required<T>(
    field: &'static str,
    value: Option<T>,
) -> Result<T, UpdateLeadRequestError> {
    value.ok_or(UpdateLeadRequestError::NullField(field))
}

impl<'de> Deserialize<'de> for UpdateLeadRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Default, Deserialize)]
        #[serde(default)]
        struct UpdateLeadHelper {
            #[serde(deserialize_with = "explicit")]
            first_name: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            last_name: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            email: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            phone: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            company: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            city: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            state: Option<Option<String>>,
            #[serde(deserialize_with = "explicit")]
            source: Option<Option<LeadSource>>,
            #[serde(deserialize_with = "explicit")]
            status: Option<Option<LeadStatus>>,
            #[serde(deserialize_with = "explicit")]
            score: Option<Option<i32>>,
            #[serde(deserialize_with = "explicit")]
            lead_value: Option<Option<f64>>,
            #[serde(deserialize_with = "explicit")]
            last_activity_at: Option<Option<DateTime<Utc>>>,
            #[serde(deserialize_with = "explicit")]
            is_qualified: Option<Option<bool>>,
        }

        let helper = UpdateLeadHelper::deserialize(deserializer)?;

        let build = || -> Result<LeadPatch, UpdateLeadRequestError> {
            let mut patch = LeadPatch::default();

            if let Some(value) = helper.first_name {
                patch.first_name = Some(validate_name(
                    required("first_name", value)?,
                    LeadValidationError::EmptyFirstName,
                )?);
            }
            if let Some(value) = helper.last_name {
                patch.last_name = Some(validate_name(
                    required("last_name", value)?,
                    LeadValidationError::EmptyLastName,
                )?);
            }
            if let Some(value) = helper.email {
                patch.email = Some(validate_email(required("email", value)?)?);
            }
            if let Some(value) = helper.phone {
                patch.phone = normalize_text(Some(required("phone", value)?));
            }
            if let Some(value) = helper.company {
                patch.company = normalize_text(Some(required("company", value)?));
            }
            if let Some(value) = helper.city {
                patch.city = normalize_text(Some(required("city", value)?));
            }
            if let Some(value) = helper.state {
                patch.state = normalize_text(Some(required("state", value)?));
            }
            if let Some(value) = helper.source {
                patch.source = Some(required("source", value)?);
            }
            if let Some(value) = helper.status {
                patch.status = Some(required("status", value)?);
            }
            if let Some(value) = helper.score {
                patch.score = Some(validate_score(required("score", value)?)?);
            }
            if let Some(value) = helper.lead_value {
                patch.lead_value = Some(validate_lead_value(required("lead_value", value)?)?);
            }
            if let Some(value) = helper.last_activity_at {
                patch.last_activity_at = Some(required("last_activity_at", value)?);
            }
            if let Some(value) = helper.is_qualified {
                patch.is_qualified = Some(required("is_qualified", value)?);
            }

            Ok(patch)
        };

        let patch = build().map_err(serde::de::Error::custom)?;
        Ok(UpdateLeadRequest { patch })
    }
}

// ======================= Update Lead Error ======================
#[derive(Debug, Clone)]
pub enum UpdateLeadError {
    NotFound,
    DuplicateEmail,
    RepositoryError(String),
}

impl std::fmt::Display for UpdateLeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateLeadError::NotFound => write!(f, "Lead not found"),
            UpdateLeadError::DuplicateEmail => write!(f, "A lead with this email already exists"),
            UpdateLeadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateLeadError {}

// ====================== Update Lead Use Case ====================
#[async_trait]
pub trait IUpdateLeadUseCase: Send + Sync {
    async fn execute(
        &self,
        id: Uuid,
        request: UpdateLeadRequest,
    ) -> Result<LeadRecord, UpdateLeadError>;
}

#[derive(Debug, Clone)]
pub struct UpdateLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    repository: R,
}

impl<R> UpdateLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IUpdateLeadUseCase for UpdateLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    async fn execute(
        &self,
        id: Uuid,
        request: UpdateLeadRequest,
    ) -> Result<LeadRecord, UpdateLeadError> {
        self.repository
            .update(id, request.into_patch())
            .await
            .map_err(|e| match e {
                LeadRepositoryError::NotFound => UpdateLeadError::NotFound,
                LeadRepositoryError::DuplicateEmail => UpdateLeadError::DuplicateEmail,
                other => UpdateLeadError::RepositoryError(other.to_string()),
            })
    }
}
