use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::entities::attendance;
use crate::entities::sea_orm_active_enums::AttendanceStatus;

pub struct AttendanceRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AttendanceRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Most recent first.
    pub async fn find_by_student(&self, student_id: i32) -> Result<Vec<attendance::Model>> {
        let rows = attendance::Entity::find()
            .filter(attendance::Column::StudentId.eq(student_id))
            .order_by_desc(attendance::Column::Date)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    /// Records a `pending` entry for the day. Returns `false` if one already exists.
    pub async fn record(&self, student_id: i32, date: NaiveDate) -> Result<bool> {
        let row = attendance::ActiveModel {
            student_id: Set(student_id),
            date: Set(date),
            status: Set(AttendanceStatus::Pending),
            created_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };

        let inserted = attendance::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([attendance::Column::StudentId, attendance::Column::Date])
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;
        Ok(inserted > 0)
    }
}
