use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TryIntoModel,
};

use crate::entities::company;
use crate::entities::sea_orm_active_enums::CompanyStatus;

pub struct NewCompany {
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub contact_no: String,
    pub email: String,
    pub status: CompanyStatus,
}

#[derive(Debug, Default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub status: Option<CompanyStatus>,
}

pub struct CompanyRepository<'a, C> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CompanyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, company_id: i32) -> Result<Option<company::Model>> {
        let company = company::Entity::find_by_id(company_id).one(self.db).await?;
        Ok(company)
    }

    pub async fn find_by_ids(&self, company_ids: Vec<i32>) -> Result<Vec<company::Model>> {
        if company_ids.is_empty() {
            return Ok(Vec::new());
        }
        let companies = company::Entity::find()
            .filter(company::Column::Id.is_in(company_ids))
            .all(self.db)
            .await?;
        Ok(companies)
    }

    pub async fn find_all(&self) -> Result<Vec<company::Model>> {
        let companies = company::Entity::find()
            .order_by_desc(company::Column::Id)
            .all(self.db)
            .await?;
        Ok(companies)
    }

    pub async fn exists(&self, company_id: i32) -> Result<bool> {
        Ok(self.find_by_id(company_id).await?.is_some())
    }

    pub async fn create(&self, new_company: NewCompany) -> Result<company::Model> {
        let company_model = company::ActiveModel {
            name: Set(new_company.name),
            address: Set(new_company.address),
            contact_person: Set(new_company.contact_person),
            contact_no: Set(new_company.contact_no),
            email: Set(new_company.email),
            status: Set(new_company.status),
            ..Default::default()
        };
        let result = company_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn update(&self, company_id: i32, updates: CompanyUpdate) -> Result<company::Model> {
        let company = self
            .find_by_id(company_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Company not found."))?;
        let mut active_company: company::ActiveModel = company.into();

        if let Some(name) = updates.name {
            active_company.name = Set(name);
        }
        if let Some(address) = updates.address {
            active_company.address = Set(address);
        }
        if let Some(contact_person) = updates.contact_person {
            active_company.contact_person = Set(contact_person);
        }
        if let Some(contact_no) = updates.contact_no {
            active_company.contact_no = Set(contact_no);
        }
        if let Some(email) = updates.email {
            active_company.email = Set(email);
        }
        if let Some(status) = updates.status {
            active_company.status = Set(status);
        }

        if !active_company.is_changed() {
            return Ok(active_company.try_into_model()?);
        }
        let result = active_company.update(self.db).await?;
        Ok(result)
    }

    pub async fn delete(&self, company_id: i32) -> Result<u64> {
        let result = company::Entity::delete_by_id(company_id).exec(self.db).await?;
        Ok(result.rows_affected)
    }

    pub async fn count_all(&self) -> Result<u64> {
        let count = company::Entity::find().count(self.db).await?;
        Ok(count)
    }
}
