use async_trait::async_trait;
use chrono::{DateTime, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::ports::outgoing::lead_repository::{
    LeadRecord, LeadRepositoryError, NewLead,
};
use crate::modules::lead::application::ports::outgoing::LeadRepository;

// ====================== Create Lead Request =====================
/// Validated lead payload - can be deserialized directly from JSON.
#[derive(Debug, Clone)]
pub struct CreateLeadRequest {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    city: Option<String>,
    state: Option<String>,
    source: LeadSource,
    status: LeadStatus,
    score: Option<i32>,
    lead_value: Option<f64>,
    last_activity_at: Option<DateTime<Utc>>,
    is_qualified: Option<bool>,
}

#[derive(Debug, Clone)]
pub enum LeadValidationError {
    EmptyFirstName,
    EmptyLastName,
    InvalidEmailFormat,
    ScoreOutOfRange,
    NegativeLeadValue,
}

impl std::fmt::Display for LeadValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LeadValidationError::EmptyFirstName => write!(f, "First name cannot be empty"),
            LeadValidationError::EmptyLastName => write!(f, "Last name cannot be empty"),
            LeadValidationError::InvalidEmailFormat => write!(f, "Invalid email format"),
            LeadValidationError::ScoreOutOfRange => {
                write!(f, "Score must be between 0 and 100")
            }
            LeadValidationError::NegativeLeadValue => {
                write!(f, "Lead value must be non-negative")
            }
        }
    }
}

impl std::error::Error for LeadValidationError {}

pub(crate) fn validate_name(
    raw: String,
    empty_err: LeadValidationError,
) -> Result<String, LeadValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(empty_err);
    }
    Ok(trimmed.to_string())
}

/// Syntax check only. The address is stored exactly as submitted; the
/// unique index treats casing as significant.
pub(crate) fn validate_email(raw: String) -> Result<String, LeadValidationError> {
    if !EmailAddress::is_valid(&raw) {
        return Err(LeadValidationError::InvalidEmailFormat);
    }
    Ok(raw)
}

pub(crate) fn validate_score(score: i32) -> Result<i32, LeadValidationError> {
    if !(0..=100).contains(&score) {
        return Err(LeadValidationError::ScoreOutOfRange);
    }
    Ok(score)
}

pub(crate) fn validate_lead_value(value: f64) -> Result<f64, LeadValidationError> {
    if value < 0.0 || !value.is_finite() {
        return Err(LeadValidationError::NegativeLeadValue);
    }
    Ok(value)
}

/// Blank free-text fields collapse to NULL.
pub(crate) fn normalize_text(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl CreateLeadRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        company: Option<String>,
        city: Option<String>,
        state: Option<String>,
        source: LeadSource,
        status: Option<LeadStatus>,
        score: Option<i32>,
        lead_value: Option<f64>,
        last_activity_at: Option<DateTime<Utc>>,
        is_qualified: Option<bool>,
    ) -> Result<Self, LeadValidationError> {
        Ok(Self {
            first_name: validate_name(first_name, LeadValidationError::EmptyFirstName)?,
            last_name: validate_name(last_name, LeadValidationError::EmptyLastName)?,
            email: validate_email(email)?,
            phone: normalize_text(phone),
            company: normalize_text(company),
            city: normalize_text(city),
            state: normalize_text(state),
            source,
            status: status.unwrap_or_default(),
            score: score.map(validate_score).transpose()?,
            lead_value: lead_value.map(validate_lead_value).transpose()?,
            last_activity_at,
            is_qualified,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn into_new_lead(self, owner_id: Uuid) -> NewLead {
        NewLead {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            company: self.company,
            city: self.city,
            state: self.state,
            source: self.source,
            status: self.status,
            score: self.score,
            lead_value: self.lead_value,
            last_activity_at: self.last_activity_at,
            is_qualified: self.is_qualified,
            owner_id: Some(owner_id),
        }
    }
}

impl<'de> Deserialize<'de> for CreateLeadRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct CreateLeadHelper {
            first_name: String,
            last_name: String,
            email: String,
            #[serde(default)]
            phone: Option<String>,
            #[serde(default)]
            company: Option<String>,
            #[serde(default)]
            city: Option<String>,
            #[serde(default)]
            state: Option<String>,
            source: LeadSource,
            #[serde(default)]
            status: Option<LeadStatus>,
            #[serde(default)]
            score: Option<i32>,
            #[serde(default)]
            lead_value: Option<f64>,
            #[serde(default)]
            last_activity_at: Option<DateTime<Utc>>,
            #[serde(default)]
            is_qualified: Option<bool>,
        }

        let helper = CreateLeadHelper::deserialize(deserializer)?;
        CreateLeadRequest::new(
            helper.first_name,
            helper.last_name,
            helper.email,
            helper.phone,
            helper.company,
            helper.city,
            helper.state,
            helper.source,
            helper.status,
            helper.score,
            helper.lead_value,
            helper.last_activity_at,
            helper.is_qualified,
        )
        .map_err(serde::de::Error::custom)
    }
}

// ======================= Create Lead Error ======================
#[derive(Debug, Clone)]
pub enum CreateLeadError {
    DuplicateEmail,
    RepositoryError(String),
}

impl std::fmt::Display for CreateLeadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateLeadError::DuplicateEmail => write!(f, "A lead with this email already exists"),
            CreateLeadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CreateLeadError {}

// ====================== Create Lead Use Case ====================
#[async_trait]
pub trait ICreateLeadUseCase: Send + Sync {
    /// The caller becomes the owner of the new lead.
    async fn execute(
        &self,
        request: CreateLeadRequest,
        owner_id: Uuid,
    ) -> Result<LeadRecord, CreateLeadError>;
}

#[derive(Debug, Clone)]
pub struct CreateLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    repository: R,
}

impl<R> CreateLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> ICreateLeadUseCase for CreateLeadUseCase<R>
where
    R: LeadRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: CreateLeadRequest,
        owner_id: Uuid,
    ) -> Result<LeadRecord, CreateLeadError> {
        self.repository
            .insert(request.into_new_lead(owner_id))
            .await
            .map_err(|e| match e {
                LeadRepositoryError::DuplicateEmail => CreateLeadError::DuplicateEmail,
                other => CreateLeadError::RepositoryError(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::lead::application::domain::filter::{LeadFilter, Page};
    use crate::modules::lead::application::ports::outgoing::lead_repository::LeadPatch;
    use serde_json::json;

    // ==================== CreateLeadRequest Tests ====================
    fn valid_json() -> serde_json::Value {
        json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "email": "Ada@Example.COM",
            "source": "website"
        })
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let request: CreateLeadRequest = serde_json::from_value(valid_json()).unwrap();
        assert_eq!(request.status, LeadStatus::New);
        assert!(request.score.is_none());
    }

    #[test]
    fn test_email_kept_exactly_as_submitted() {
        let request: CreateLeadRequest = serde_json::from_value(valid_json()).unwrap();
        assert_eq!(request.email(), "Ada@Example.COM");
    }

    #[test]
    fn test_names_are_trimmed() {
        let request = CreateLeadRequest::new(
            "  Ada ".to_string(),
            " Lovelace ".to_string(),
            "ada@example.com".to_string(),
            None,
            None,
            None,
            None,
            LeadSource::Referral,
            None,
            None,
            None,
            None,
            None,
        )
        .unwrap();
        assert_eq!(request.first_name, "Ada");
        assert_eq!(request.last_name, "Lovelace");
    }

    #[test]
    fn test_empty_first_name_rejected() {
        let mut body = valid_json();
        body["first_name"] = json!("   ");
        let result: Result<CreateLeadRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut body = valid_json();
        body["email"] = json!("nope");
        let result: Result<CreateLeadRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_source_rejected() {
        let mut body = valid_json();
        body["source"] = json!("cold_call");
        let result: Result<CreateLeadRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let mut body = valid_json();
        body["score"] = json!(101);
        let result: Result<CreateLeadRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());

        let mut body = valid_json();
        body["score"] = json!(-1);
        let result: Result<CreateLeadRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_score_boundaries_accepted() {
        for score in [0, 100] {
            let mut body = valid_json();
            body["score"] = json!(score);
            let request: CreateLeadRequest = serde_json::from_value(body).unwrap();
            assert_eq!(request.score, Some(score));
        }
    }

    #[test]
    fn test_negative_lead_value_rejected() {
        let mut body = valid_json();
        body["lead_value"] = json!(-0.5);
        let result: Result<CreateLeadRequest, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_company_becomes_none() {
        let mut body = valid_json();
        body["company"] = json!("   ");
        let request: CreateLeadRequest = serde_json::from_value(body).unwrap();
        assert!(request.company.is_none());
    }

    // ==================== CreateLeadUseCase Tests ====================
    struct MockLeadRepository {
        duplicate: bool,
    }

    #[async_trait]
    impl LeadRepository for MockLeadRepository {
        async fn insert(&self, lead: NewLead) -> Result<LeadRecord, LeadRepositoryError> {
            if self.duplicate {
                return Err(LeadRepositoryError::DuplicateEmail);
            }
            Ok(LeadRecord {
                id: Uuid::new_v4(),
                first_name: lead.first_name,
                last_name: lead.last_name,
                email: lead.email,
                phone: lead.phone,
                company: lead.company,
                city: lead.city,
                state: lead.state,
                source: lead.source,
                status: lead.status,
                score: lead.score,
                lead_value: lead.lead_value,
                last_activity_at: lead.last_activity_at,
                is_qualified: lead.is_qualified,
                created_at: Utc::now(),
                owner_id: lead.owner_id,
            })
        }

        async fn find_by_id(&self, _id: Uuid) -> Result<Option<LeadRecord>, LeadRepositoryError> {
            Ok(None)
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

    #[tokio::test]
    async fn test_create_sets_owner() {
        let use_case = CreateLeadUseCase::new(MockLeadRepository { duplicate: false });
        let owner = Uuid::new_v4();
        let request: CreateLeadRequest = serde_json::from_value(valid_json()).unwrap();

        let lead = use_case.execute(request, owner).await.expect("should insert");
        assert_eq!(lead.owner_id, Some(owner));
        assert_eq!(lead.email, "Ada@Example.COM");
        assert_eq!(lead.status, LeadStatus::New);
    }

    #[tokio::test]
    async fn test_create_duplicate_email() {
        let use_case = CreateLeadUseCase::new(MockLeadRepository { duplicate: true });
        let request: CreateLeadRequest = serde_json::from_value(valid_json()).unwrap();

        let result = use_case.execute(request, Uuid::new_v4()).await;
        assert!(
            matches!(result, Err(CreateLeadError::DuplicateEmail)),
            "Expected DuplicateEmail, got {:?}",
            result
        );
    }
}
