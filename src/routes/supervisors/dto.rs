use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::UserStatus;
use crate::utils::deserialize::{lenient_id, present_nullable_id, present_nullable_string};

#[derive(Debug, Serialize, ToSchema)]
pub struct SupervisorItem {
    pub id: i32,
    pub position: Option<String>,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub user_status: UserStatus,
    pub company_id: Option<i32>,
    pub company_name: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSupervisorRequest {
    #[schema(example = "Pedro Reyes")]
    pub name: Option<String>,
    #[schema(example = "pedro@acme.example")]
    pub email: Option<String>,
    /// Defaults to `supervisor123`.
    pub password: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub company_id: Option<i32>,
    #[schema(example = "HR Manager")]
    pub position: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSupervisorRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "present_nullable_id")]
    #[schema(value_type = Option<i32>)]
    pub company_id: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present_nullable_string")]
    #[schema(value_type = Option<String>)]
    pub position: Option<Option<String>>,
}
