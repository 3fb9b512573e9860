use async_trait::async_trait;
use chrono::{Duration, NaiveTime};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::lead::application::domain::entities::{LeadSource, LeadStatus};
use crate::modules::lead::application::domain::filter::{FieldClause, FilterField, LeadFilter, Page};
use crate::modules::lead::application::ports::outgoing::lead_repository::{
    LeadPatch, LeadRecord, LeadRepository, LeadRepositoryError, NewLead,
};

use super::sea_orm_entity::leads::{
    ActiveModel as LeadActiveModel, Column as LeadColumn, Entity as LeadEntity, Model as LeadModel,
};

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone, Debug)]
pub struct LeadRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl LeadRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LeadRepository for LeadRepositoryPostgres {
    async fn insert(&self, lead: NewLead) -> Result<LeadRecord, LeadRepositoryError> {
        let active_lead = LeadActiveModel {
            id: Set(Uuid::new_v4()),
            first_name: Set(lead.first_name),
            last_name: Set(lead.last_name),
            email: Set(lead.email),
            phone: Set(lead.phone),
            company: Set(lead.company),
            city: Set(lead.city),
            state: Set(lead.state),
            source: Set(lead.source.as_str().to_string()),
            status: Set(lead.status.as_str().to_string()),
            score: Set(lead.score),
            lead_value: Set(lead.lead_value),
            last_activity_at: Set(lead.last_activity_at.map(Into::into)),
            is_qualified: Set(lead.is_qualified),
            created_at: NotSet,
            owner_id: Set(lead.owner_id),
        };

        let inserted = active_lead
            .insert(&*self.db)
            .await
            .map_err(map_write_err)?;

        model_to_record(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<LeadRecord>, LeadRepositoryError> {
        let found = LeadEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| LeadRepositoryError::Database(e.to_string()))?;

        found.map(model_to_record).transpose()
    }

    async fn update(&self, id: Uuid, patch: LeadPatch) -> Result<LeadRecord, LeadRepositoryError> {
        let current = LeadEntity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(|e| LeadRepositoryError::Database(e.to_string()))?
            .ok_or(LeadRepositoryError::NotFound)?;

        // Nothing to write; serve the row as-is
        if patch.is_empty() {
            return model_to_record(current);
        }

        let mut active: LeadActiveModel = current.into();
        if let Some(v) = patch.first_name {
            active.first_name = Set(v);
        }
        if let Some(v) = patch.last_name {
            active.last_name = Set(v);
        }
        if let Some(v) = patch.email {
            active.email = Set(v);
        }
        if let Some(v) = patch.phone {
            active.phone = Set(Some(v));
        }
        if let Some(v) = patch.company {
            active.company = Set(Some(v));
        }
        if let Some(v) = patch.city {
            active.city = Set(Some(v));
        }
        if let Some(v) = patch.state {
            active.state = Set(Some(v));
        }
        if let Some(v) = patch.source {
            active.source = Set(v.as_str().to_string());
        }
        if let Some(v) = patch.status {
            active.status = Set(v.as_str().to_string());
        }
        if let Some(v) = patch.score {
            active.score = Set(Some(v));
        }
        if let Some(v) = patch.lead_value {
            active.lead_value = Set(Some(v));
        }
        if let Some(v) = patch.last_activity_at {
            active.last_activity_at = Set(Some(v.into()));
        }
        if let Some(v) = patch.is_qualified {
            active.is_qualified = Set(Some(v));
        }

        let updated = active.update(&*self.db).await.map_err(map_write_err)?;

        model_to_record(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), LeadRepositoryError> {
        let result = LeadEntity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(|e| LeadRepositoryError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(LeadRepositoryError::NotFound);
        }
        Ok(())
    }

    async fn count(&self, filter: &LeadFilter) -> Result<u64, LeadRepositoryError> {
        LeadEntity::find()
            .filter(build_condition(filter))
            .count(&*self.db)
            .await
            .map_err(|e| LeadRepositoryError::Database(e.to_string()))
    }

    async fn find_page(
        &self,
        filter: &LeadFilter,
        page: &Page,
    ) -> Result<Vec<LeadRecord>, LeadRepositoryError> {
        let models = LeadEntity::find()
            .filter(build_condition(filter))
            .order_by_desc(LeadColumn::CreatedAt)
            .order_by_asc(LeadColumn::Id)
            .offset(page.skip())
            .limit(page.take())
            .all(&*self.db)
            .await
            .map_err(|e| LeadRepositoryError::Database(e.to_string()))?;

        models.into_iter().map(model_to_record).collect()
    }
}

// ============================================================================
// Filter Lowering
// ============================================================================

fn column_for(field: FilterField) -> LeadColumn {
    match field {
        FilterField::Email => LeadColumn::Email,
        FilterField::Company => LeadColumn::Company,
        FilterField::City => LeadColumn::City,
        FilterField::Status => LeadColumn::Status,
        FilterField::Source => LeadColumn::Source,
        FilterField::Score => LeadColumn::Score,
        FilterField::LeadValue => LeadColumn::LeadValue,
        FilterField::CreatedAt => LeadColumn::CreatedAt,
        FilterField::LastActivityAt => LeadColumn::LastActivityAt,
        FilterField::IsQualified => LeadColumn::IsQualified,
    }
}

/// Lowers the compiled filter into a SQL condition, one AND-ed term per
/// clause.
fn build_condition(filter: &LeadFilter) -> Condition {
    let mut condition = Condition::all();

    for (field, clause) in filter.iter() {
        let col = column_for(*field);
        condition = match clause {
            FieldClause::Equals(v) => condition.add(col.eq(v.clone())),
            FieldClause::ContainsInsensitive(v) => {
                condition.add(Expr::col(col).ilike(format!("%{}%", v)))
            }
            FieldClause::OneOf(values) => condition.add(col.is_in(values.clone())),
            FieldClause::NumberIs(v) => condition.add(col.eq(*v)),
            FieldClause::NumberCompare { gt, lt } => {
                if let Some(v) = gt {
                    condition = condition.add(col.gt(*v));
                }
                if let Some(v) = lt {
                    condition = condition.add(col.lt(*v));
                }
                condition
            }
            FieldClause::NumberBetween { low, high } => {
                condition.add(col.between(*low, *high))
            }
            FieldClause::OnDay(day) => {
                // Half-open window covering the whole UTC day
                let start = day.and_time(NaiveTime::MIN).and_utc();
                let end = start + Duration::days(1);
                condition.add(col.gte(start)).add(col.lt(end))
            }
            FieldClause::DateCompare { after, before } => {
                if let Some(v) = after {
                    condition = condition.add(col.gt(*v));
                }
                if let Some(v) = before {
                    condition = condition.add(col.lt(*v));
                }
                condition
            }
            FieldClause::DateWindow { start, end } => {
                condition.add(col.gte(*start)).add(col.lt(*end))
            }
            FieldClause::DateBetween { start, end } => {
                condition.add(col.between(*start, *end))
            }
            FieldClause::Is(b) => condition.add(col.eq(*b)),
        };
    }

    condition
}

// ============================================================================
// Helper Functions
// ============================================================================

fn model_to_record(model: LeadModel) -> Result<LeadRecord, LeadRepositoryError> {
    let source = LeadSource::from_str(&model.source).map_err(LeadRepositoryError::Database)?;
    let status = LeadStatus::from_str(&model.status).map_err(LeadRepositoryError::Database)?;

    Ok(LeadRecord {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        email: model.email,
        phone: model.phone,
        company: model.company,
        city: model.city,
        state: model.state,
        source,
        status,
        score: model.score,
        lead_value: model.lead_value,
        last_activity_at: model.last_activity_at.map(Into::into),
        is_qualified: model.is_qualified,
        created_at: model.created_at.into(),
        owner_id: model.owner_id,
    })
}

fn map_write_err(e: sea_orm::DbErr) -> LeadRepositoryError {
    let err_str = e.to_string().to_lowercase();
    if err_str.contains("23505")
        || err_str.contains("duplicate key")
        || err_str.contains("unique constraint")
    {
        return LeadRepositoryError::DuplicateEmail;
    }
    LeadRepositoryError::Database(e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
