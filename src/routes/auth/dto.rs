use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::UserRole;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: Option<String>,

    #[schema(example = "admin123")]
    pub password: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginUser {
    pub id: i32,
    /// Set only for students.
    pub student_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: LoginUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUserInfo {
    pub id: i32,
    pub name: String,
    pub role: UserRole,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifySessionResponse {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUserInfo>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "Juan Dela Cruz")]
    pub name: Option<String>,

    #[schema(example = "juan@example.com")]
    pub email: Option<String>,

    #[schema(example = "changeme")]
    pub password: Option<String>,

    #[schema(example = "Student")]
    pub role: Option<UserRole>,
}
