//! `SeaORM` Entity for placements table

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::PlacementStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "placements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub company_id: i32,
    pub advisor_id: Option<i32>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub status: PlacementStatus,
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
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::ojt_advisor::Entity",
        from = "Column::AdvisorId",
        to = "super::ojt_advisor::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    OjtAdvisor,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::ojt_advisor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OjtAdvisor.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
