use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::user_repository::{
    NewUser, UserRecord, UserRepository, UserRepositoryError,
};

use super::sea_orm_entity::users::{
    ActiveModel as UserActiveModel, Column as UserColumn, Entity as UserEntity, Model as UserModel,
};

#[derive(Clone, Debug)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_to_record(model: UserModel) -> UserRecord {
        UserRecord {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
            created_at: model.created_at.into(),
        }
    }
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn insert(&self, user: NewUser) -> Result<UserRecord, UserRepositoryError> {
        let active_user = UserActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: NotSet,
        };

        let inserted = active_user.insert(&*self.db).await.map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            if err_str.contains("23505")
                || err_str.contains("duplicate key")
                || err_str.contains("unique constraint")
            {
                return UserRepositoryError::EmailTaken;
            }
            UserRepositoryError::Database(e.to_string())
        })?;

        Ok(Self::map_to_record(inserted))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserRecord>, UserRepositoryError> {
        let found = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::Database(e.to_string()))?;

        Ok(found.map(Self::map_to_record))
    }

    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserRepositoryError> {
        let found = UserEntity::find_by_id(user_id)
            .one(&*self.db)
            .await
            .map_err(|e| UserRepositoryError::Database(e.to_string()))?;

        Ok(found.map(Self::map_to_record))
    }
}
