use anyhow::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};

use crate::entities::company_advisor;

pub struct CompanyAdvisorRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyAdvisorRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<company_advisor::Model>> {
        let supervisor = company_advisor::Entity::find_by_id(id).one(self.db).await?;
        Ok(supervisor)
    }

    pub async fn find_all(&self) -> Result<Vec<company_advisor::Model>> {
        let supervisors = company_advisor::Entity::find()
            .order_by_desc(company_advisor::Column::Id)
            .all(self.db)
            .await?;
        Ok(supervisors)
    }

    pub async fn create(
        &self,
        user_id: i32,
        company_id: Option<i32>,
        position: Option<String>,
    ) -> Result<company_advisor::Model> {
        let supervisor_model = company_advisor::ActiveModel {
            user_id: Set(user_id),
            company_id: Set(company_id),
            position: Set(position),
            ..Default::default()
        };
        let result = supervisor_model.insert(self.db).await?;
        Ok(result)
    }

    /// Outer `None` keeps the column, `Some(None)` clears it.
    pub async fn update(
        &self,
        id: i32,
        company_id: Option<Option<i32>>,
        position: Option<Option<String>>,
    ) -> Result<()> {
        if company_id.is_none() && position.is_none() {
            return Ok(());
        }
        let mut supervisor_model = company_advisor::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(company_id) = company_id {
            supervisor_model.company_id = Set(company_id);
        }
        if let Some(position) = position {
            supervisor_model.position = Set(position);
        }
        supervisor_model.update(self.db).await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let result = company_advisor::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}
