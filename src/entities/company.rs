//! `SeaORM` Entity for companies table

use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::CompanyStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub contact_no: String,
    pub email: String,
    pub status: CompanyStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
