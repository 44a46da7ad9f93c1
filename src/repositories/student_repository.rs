use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TryIntoModel,
};

use crate::entities::sea_orm_active_enums::DeploymentStatus;
use crate::entities::student;

pub struct NewStudent {
    pub user_id: i32,
    pub student_no: String,
    pub course: String,
    pub year_level: String,
    pub section: String,
    pub contact_no: String,
    pub address: String,
    pub company_id: Option<i32>,
    pub deployment_status: DeploymentStatus,
}

/// Partial update; `None` leaves the column alone.
#[derive(Debug, Default)]
pub struct StudentUpdate {
    pub course: Option<String>,
    pub year_level: Option<String>,
    pub section: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    pub company_id: Option<Option<i32>>,
    pub deployment_status: Option<DeploymentStatus>,
}

pub struct StudentRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> StudentRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_ids(&self, student_ids: Vec<i32>) -> Result<Vec<student::Model>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }
        let students = student::Entity::find()
            .filter(student::Column::Id.is_in(student_ids))
            .all(self.db)
            .await?;
        Ok(students)
    }

    /// Newest first.
    pub async fn find_all(&self) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .order_by_desc(student::Column::Id)
            .all(self.db)
            .await?;
        Ok(students)
    }

    pub async fn student_no_exists(&self, student_no: &str) -> Result<bool> {
        let count = student::Entity::find()
            .filter(student::Column::StudentNo.eq(student_no))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn create(&self, new_student: NewStudent) -> Result<student::Model> {
        let student_model = student::ActiveModel {
            user_id: Set(new_student.user_id),
            student_no: Set(new_student.student_no),
            course: Set(new_student.course),
            year_level: Set(new_student.year_level),
            section: Set(new_student.section),
            contact_no: Set(new_student.contact_no),
            address: Set(new_student.address),
            company_id: Set(new_student.company_id),
            deployment_status: Set(new_student.deployment_status),
            ..Default::default()
        };

        let result = student_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(&self, existing: student::Model, updates: StudentUpdate) -> Result<student::Model> {
        let mut active_student: student::ActiveModel = existing.into();

        if let Some(course) = updates.course {
            active_student.course = Set(course);
        }
        if let Some(year_level) = updates.year_level {
            active_student.year_level = Set(year_level);
        }
        if let Some(section) = updates.section {
            active_student.section = Set(section);
        }
        if let Some(contact_no) = updates.contact_no {
            active_student.contact_no = Set(contact_no);
        }
        if let Some(address) = updates.address {
            active_student.address = Set(address);
        }
        if let Some(company_id) = updates.company_id {
            active_student.company_id = Set(company_id);
        }
        if let Some(deployment_status) = updates.deployment_status {
            active_student.deployment_status = Set(deployment_status);
        }

        if !active_student.is_changed() {
            return Ok(active_student.try_into_model()?);
        }
        let result = active_student.update(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, student_id: i32) -> Result<u64> {
        let result = student::Entity::delete_by_id(student_id).exec(self.db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_all(&self) -> Result<u64> {
        let count = student::Entity::find().count(self.db).await?;
        Ok(count)
    }

    pub async fn count_by_deployment(&self, status: DeploymentStatus) -> Result<u64> {
        let count = student::Entity::find()
            .filter(student::Column::DeploymentStatus.eq(status))
            .count(self.db)
            .await?;
        Ok(count)
    }
}
