use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::ojt_advisor;

pub struct OjtAdvisorRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OjtAdvisorRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, advisor_id: i32) -> Result<Option<ojt_advisor::Model>> {
        let advisor = ojt_advisor::Entity::find_by_id(advisor_id).one(self.db).await?;
        Ok(advisor)
    }

    pub async fn find_by_ids(&self, advisor_ids: Vec<i32>) -> Result<Vec<ojt_advisor::Model>> {
        if advisor_ids.is_empty() {
            return Ok(Vec::new());
        }
        let advisors = ojt_advisor::Entity::find()
            .filter(ojt_advisor::Column::Id.is_in(advisor_ids))
            .all(self.db)
            .await?;
        Ok(advisors)
    }

    pub async fn find_all(&self) -> Result<Vec<ojt_advisor::Model>> {
        let advisors = ojt_advisor::Entity::find()
            .order_by_desc(ojt_advisor::Column::Id)
            .all(self.db)
            .await?;
        Ok(advisors)
    }

    pub async fn create(&self, user_id: i32, department: Option<String>) -> Result<ojt_advisor::Model> {
        let advisor_model = ojt_advisor::ActiveModel {
            user_id: Set(user_id),
            department: Set(department),
            ..Default::default()
        };
        let result = advisor_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update_department(&self, advisor_id: i32, department: Option<String>) -> Result<()> {
        let advisor_model = ojt_advisor::ActiveModel {
            id: Set(advisor_id),
            department: Set(department),
            ..Default::default()
        };
        advisor_model.update(self.db).await?;
        Ok(())
    }

    pub async fn delete(&self, advisor_id: i32) -> Result<u64> {
        let result = ojt_advisor::Entity::delete_by_id(advisor_id).exec(self.db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_all(&self) -> Result<u64> {
        let count = ojt_advisor::Entity::find().count(self.db).await?;
        Ok(count)
    }
}
