use sea_orm::entity::prelude::*;
use uuid::Uuid;

/// `source` and `status` are stored as plain text and parsed at the
/// repository boundary.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub source: String,
    pub status: String,
    pub score: Option<i32>,
    #[sea_orm(column_type = "Double", nullable)]
    pub lead_value: Option<f64>,
    pub last_activity_at: Option<DateTimeWithTimeZone>,
    pub is_qualified: Option<bool>,
    pub created_at: DateTimeWithTimeZone,
    pub owner_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Entity",
        from = "Column::OwnerId",
        to = "crate::modules::auth::adapter::outgoing::sea_orm_entity::users::Column::Id"
    )]
    Owner,
}

impl ActiveModelBehavior for ActiveModel {}
