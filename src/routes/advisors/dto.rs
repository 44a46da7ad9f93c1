use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::UserStatus;
use crate::utils::deserialize::{lenient_id, present_nullable_string};

#[derive(Debug, Serialize, ToSchema)]
pub struct AdvisorItem {
    pub advisor_id: i32,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub user_status: UserStatus,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAdvisorRequest {
    #[schema(example = "Maria Santos")]
    pub name: Option<String>,
    #[schema(example = "maria@example.com")]
    pub email: Option<String>,
    /// Defaults to `advisor123`.
    pub password: Option<String>,
    #[schema(example = "College of Computing")]
    pub department: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAdvisorRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub id: Option<i32>,
    /// Blank or `null` clears the department.
    #[serde(default, deserialize_with = "present_nullable_string")]
    #[schema(value_type = Option<String>)]
    pub department: Option<Option<String>>,
    pub name: Option<String>,
    pub email: Option<String>,
}
