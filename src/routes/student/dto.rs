use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::attendance;
use crate::entities::sea_orm_active_enums::{AttendanceStatus, DeploymentStatus};
use crate::utils::deserialize::lenient_id;

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentProfileItem {
    pub student_id: i32,
    pub user_id: i32,
    #[schema(example = "Juan Dela Cruz")]
    pub name: String,
    pub email: String,
    #[schema(example = "2021-00123")]
    pub student_no: String,
    pub course: String,
    pub year_level: String,
    pub section: String,
    pub contact_no: String,
    pub address: String,
    pub deployment_status: DeploymentStatus,
    pub company_name: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileQuery {
    /// Student id.
    #[serde(default, deserialize_with = "lenient_id")]
    #[param(value_type = Option<i32>)]
    pub id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudentIdQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    #[param(value_type = Option<i32>)]
    pub student_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserIdQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    #[param(value_type = Option<i32>)]
    pub user_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentIdResponse {
    #[schema(example = true)]
    pub success: bool,
    pub student_id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = true)]
    pub success: bool,
    pub message: String,
    #[schema(example = "uploads/student_requirements/resume.pdf")]
    pub file_path: String,
    pub file_url: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct AttendanceRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub student_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttendanceItem {
    pub id: i32,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub created_at: NaiveDateTime,
}

impl From<attendance::Model> for AttendanceItem {
    fn from(model: attendance::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            status: model.status,
            created_at: model.created_at,
        }
    }
}
