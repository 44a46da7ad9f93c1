use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::company;
use crate::entities::sea_orm_active_enums::CompanyStatus;
use crate::utils::deserialize::lenient_id;

#[derive(Debug, Serialize, ToSchema)]
pub struct CompanyItem {
    pub id: i32,
    #[schema(example = "Acme Corp")]
    pub name: String,
    pub address: String,
    pub contact_person: String,
    pub contact_no: String,
    pub email: String,
    pub status: CompanyStatus,
}

impl From<company::Model> for CompanyItem {
    fn from(model: company::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            contact_person: model.contact_person,
            contact_no: model.contact_no,
            email: model.email,
            status: model.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCompanyRequest {
    #[schema(example = "Acme Corp")]
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    /// Defaults to `Active`.
    pub status: Option<CompanyStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCompanyRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,
    pub contact_no: Option<String>,
    pub email: Option<String>,
    pub status: Option<CompanyStatus>,
}
