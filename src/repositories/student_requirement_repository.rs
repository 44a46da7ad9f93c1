use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::sea_orm_active_enums::RequirementStatus;
use crate::entities::student_requirement;

fn student_requirement_conflict() -> OnConflict {
    OnConflict::columns([
        student_requirement::Column::StudentId,
        student_requirement::Column::RequirementId,
    ])
    .to_owned()
}

/// Column values written by a status transition.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: RequirementStatus,
    pub submitted_at: Option<NaiveDateTime>,
    /// `Some` only for transitions that stamp a verification.
    pub verification: Option<(NaiveDateTime, i32)>,
}

pub struct StudentRequirementRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRequirementRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_student(&self, student_id: i32) -> Result<Vec<student_requirement::Model>> {
        let rows = student_requirement::Entity::find()
            .filter(student_requirement::Column::StudentId.eq(student_id))
            .order_by_asc(student_requirement::Column::RequirementId)
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_students(
        &self,
        student_ids: Vec<i32>,
    ) -> Result<Vec<student_requirement::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows = student_requirement::Entity::find()
            .filter(student_requirement::Column::StudentId.is_in(student_ids))
            .all(self.db)
            .await?;
        Ok(rows)
    }

    pub async fn find_by_pair(
        &self,
        student_id: i32,
        requirement_id: i32,
    ) -> Result<Option<student_requirement::Model>> {
        let row = student_requirement::Entity::find()
            .filter(student_requirement::Column::StudentId.eq(student_id))
            .filter(student_requirement::Column::RequirementId.eq(requirement_id))
            .one(self.db)
            .await?;
        Ok(row)
    }

    /// Looks a submission up by row id, but only within one student's rows.
    pub async fn find_for_student(
        &self,
        submission_id: i32,
        student_id: i32,
    ) -> Result<Option<student_requirement::Model>> {
        let row = student_requirement::Entity::find_by_id(submission_id)
            .filter(student_requirement::Column::StudentId.eq(student_id))
            .one(self.db)
            .await?;
        Ok(row)
    }

    /// Inserts a `Pending` row for each requirement the student lacks.
    /// Existing rows are left untouched. Returns the number of rows created.
    pub async fn insert_missing(&self, student_id: i32, requirement_ids: &[i32]) -> Result<u64> {
        if requirement_ids.is_empty() {
            return Ok(0);
        }

        let rows = requirement_ids
            .iter()
            .map(|requirement_id| student_requirement::ActiveModel {
                student_id: Set(student_id),
                requirement_id: Set(*requirement_id),
                status: Set(RequirementStatus::Pending),
                file_path: Set(None),
                uploaded_at: Set(None),
                submitted_at: Set(None),
                verified_at: Set(None),
                verified_by: Set(None),
                ..Default::default()
            });

        let inserted = student_requirement::Entity::insert_many(rows)
            .on_conflict(student_requirement_conflict().do_nothing().to_owned())
            .exec_without_returning(self.db)
            .await?;
        Ok(inserted)
    }

    /// Writes a status transition, creating the row when it does not exist yet.
    pub async fn upsert_status(
        &self,
        student_id: i32,
        requirement_id: i32,
        change: StatusChange,
    ) -> Result<()> {
        let mut row = student_requirement::ActiveModel {
            student_id: Set(student_id),
            requirement_id: Set(requirement_id),
            status: Set(change.status),
            submitted_at: Set(change.submitted_at),
            ..Default::default()
        };
        let mut update_columns = vec![
            student_requirement::Column::Status,
            student_requirement::Column::SubmittedAt,
        ];
        if let Some((verified_at, verified_by)) = change.verification {
            row.verified_at = Set(Some(verified_at));
            row.verified_by = Set(Some(verified_by));
            update_columns.push(student_requirement::Column::VerifiedAt);
            update_columns.push(student_requirement::Column::VerifiedBy);
        }

        student_requirement::Entity::insert(row)
            .on_conflict(
                student_requirement_conflict()
                    .update_columns(update_columns)
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }

    /// Points the row at a freshly uploaded file and marks it `Submitted`.
    pub async fn upsert_upload(
        &self,
        student_id: i32,
        requirement_id: i32,
        file_path: String,
        uploaded_at: NaiveDateTime,
    ) -> Result<()> {
        let row = student_requirement::ActiveModel {
            student_id: Set(student_id),
            requirement_id: Set(requirement_id),
            status: Set(RequirementStatus::Submitted),
            file_path: Set(Some(file_path)),
            uploaded_at: Set(Some(uploaded_at)),
            ..Default::default()
        };

        student_requirement::Entity::insert(row)
            .on_conflict(
                student_requirement_conflict()
                    .update_columns([
                        student_requirement::Column::FilePath,
                        student_requirement::Column::Status,
                        student_requirement::Column::UploadedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(self.db)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<u64> {
        let result = student_requirement::Entity::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Sets every row for the given requirements back to `Pending` and clears `submitted_at`.
    pub async fn reset_to_pending(&self, requirement_ids: Vec<i32>) -> Result<u64> {
        if requirement_ids.is_empty() {
            return Ok(0);
        }
        let result = student_requirement::Entity::update_many()
            .set(student_requirement::ActiveModel {
                status: Set(RequirementStatus::Pending),
                submitted_at: Set(None),
                ..Default::default()
            })
            .filter(student_requirement::Column::RequirementId.is_in(requirement_ids))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Uploaded files that have not been verified yet.
    pub async fn count_awaiting_review(&self) -> Result<u64> {
        let count = student_requirement::Entity::find()
            .filter(student_requirement::Column::Status.eq(RequirementStatus::Submitted))
            .filter(student_requirement::Column::FilePath.is_not_null())
            .count(self.db)
            .await?;
        Ok(count)
    }
}
