//! `SeaORM` Entity for student_requirements table

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::RequirementStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "student_requirements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub requirement_id: i32,
    pub status: RequirementStatus,
    /// Relative to the storage root, e.g. `uploads/student_requirements/cv.pdf`.
    pub file_path: Option<String>,
    pub uploaded_at: Option<DateTime>,
    pub submitted_at: Option<DateTime>,
    pub verified_at: Option<DateTime>,
    pub verified_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::requirement::Entity",
        from = "Column::RequirementId",
        to = "super::requirement::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Requirement,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::requirement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requirement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
