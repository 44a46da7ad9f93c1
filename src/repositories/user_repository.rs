use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};

use crate::entities::sea_orm_active_enums::{UserRole, UserStatus};
use crate::entities::user;

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

pub struct UserRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, user_id: i32) -> Result<Option<user::Model>> {
        let user = user::Entity::find_by_id(user_id).one(self.db).await?;
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db)
            .await?;
        Ok(user)
    }

    /// Only `Active` accounts may sign in.
    pub async fn find_active_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let user = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Status.eq(UserStatus::Active))
            .one(self.db)
            .await?;
        Ok(user)
    }

    pub async fn find_by_ids(&self, user_ids: Vec<i32>) -> Result<Vec<user::Model>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let users = user::Entity::find()
            .filter(user::Column::Id.is_in(user_ids))
            .all(self.db)
            .await?;
        Ok(users)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn email_taken_by_other(&self, email: &str, user_id: i32) -> Result<bool> {
        let count = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::Id.ne(user_id))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, new_user: NewUser) -> Result<user::Model> {
        let now = chrono::Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            name: Set(new_user.name),
            email: Set(new_user.email),
            password: Set(new_user.password_hash),
            role: Set(new_user.role),
            status: Set(UserStatus::Active),
            created_at: Set(now),
            ..Default::default()
        };

        let result = user_model.insert(self.db).await?;
        Ok(result)
    }

    /// Updates name and/or email; `None` keeps the stored value.
    pub async fn update_identity(
        &self,
        user_id: i32,
        name: Option<String>,
        email: Option<String>,
    ) -> Result<()> {
        if name.is_none() && email.is_none() {
            return Ok(());
        }
        let mut active_user = user::ActiveModel {
            id: Set(user_id),
            ..Default::default()
        };
        if let Some(name) = name {
            active_user.name = Set(name);
        }
        if let Some(email) = email {
            active_user.email = Set(email);
        }
        active_user.update(self.db).await?;
        Ok(())
    }

    pub async fn delete(&self, user_id: i32) -> Result<u64> {
        let result = user::Entity::delete_by_id(user_id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}
