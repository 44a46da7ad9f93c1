use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::placement;
use crate::entities::sea_orm_active_enums::PlacementStatus;

#[derive(Debug, Clone)]
pub struct PlacementFields {
    pub student_id: i32,
    pub company_id: i32,
    pub advisor_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub status: PlacementStatus,
}

pub struct PlacementRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PlacementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, placement_id: i32) -> Result<Option<placement::Model>> {
        let placement = placement::Entity::find_by_id(placement_id).one(self.db).await?;
        Ok(placement)
    }

    pub async fn find_all(&self) -> Result<Vec<placement::Model>> {
        let placements = placement::Entity::find()
            .order_by_desc(placement::Column::Id)
            .all(self.db)
            .await?;
        Ok(placements)
    }

    pub async fn count_by_company(&self, company_id: i32) -> Result<u64> {
        let count = placement::Entity::find()
            .filter(placement::Column::CompanyId.eq(company_id))
            .count(self.db)
            .await?;
        Ok(count)
    }

    pub async fn create(&self, fields: PlacementFields) -> Result<placement::Model> {
        let placement_model = placement::ActiveModel {
            student_id: Set(fields.student_id),
            company_id: Set(fields.company_id),
            advisor_id: Set(fields.advisor_id),
            start_date: Set(fields.start_date),
            end_date: Set(fields.end_date),
            remarks: Set(fields.remarks),
            status: Set(fields.status),
            ..Default::default()
        };
        let result = placement_model.insert(self.db).await?;
        Ok(result)
    }

    /// Full replacement of the editable columns.
    pub async fn update(&self, placement_id: i32, fields: PlacementFields) -> Result<placement::Model> {
        let placement_model = placement::ActiveModel {
            id: Set(placement_id),
            student_id: Set(fields.student_id),
            company_id: Set(fields.company_id),
            advisor_id: Set(fields.advisor_id),
            start_date: Set(fields.start_date),
            end_date: Set(fields.end_date),
            remarks: Set(fields.remarks),
            status: Set(fields.status),
        };
        let result = placement_model.update(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, placement_id: i32) -> Result<u64> {
        let result = placement::Entity::delete_by_id(placement_id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
