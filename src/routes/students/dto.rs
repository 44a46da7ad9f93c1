use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::{DeploymentStatus, UserStatus};
use crate::utils::deserialize::{lenient_id, present_nullable_id};

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentListItem {
    pub student_id: i32,
    pub student_no: String,
    pub course: String,
    pub year_level: String,
    pub section: String,
    pub contact_no: String,
    pub address: String,
    pub deployment_status: DeploymentStatus,
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub user_status: UserStatus,
    pub company_id: Option<i32>,
    pub company_name: Option<String>,
    /// Uploaded files still waiting for review.
    pub pending_files: usize,
    pub submitted_mandatory: usize,
    pub total_mandatory: usize,
    /// Percent of the whole catalog satisfied.
    pub progress: u32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateStudentRequest {
    #[schema(example = "Juan Dela Cruz")]
    pub name: Option<String>,
    #[schema(example = "juan@example.com")]
    pub email: Option<String>,
    /// Defaults to `student123`.
    pub password: Option<String>,
    #[schema(example = "2021-00123")]
    pub student_no: Option<String>,
    #[schema(example = "BSIT")]
    pub course: Option<String>,
    #[schema(example = "4")]
    pub year_level: Option<String>,
    #[schema(example = "A")]
    pub section: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub company_id: Option<i32>,
    pub deployment_status: Option<DeploymentStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateStudentResponse {
    pub success: bool,
    #[schema(example = "Student added successfully.")]
    pub message: String,
    pub student_id: i32,
}

/// Only the fields present change. Blank name/email keep the stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStudentRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub year_level: Option<String>,
    pub section: Option<String>,
    pub contact_no: Option<String>,
    pub address: Option<String>,
    /// `null` detaches the student from its company.
    #[serde(default, deserialize_with = "present_nullable_id")]
    #[schema(value_type = Option<i32>)]
    pub company_id: Option<Option<i32>>,
    pub deployment_status: Option<DeploymentStatus>,
}

impl UpdateStudentRequest {
    /// True when the payload carries nothing but the id and a deployment status.
    pub fn is_deployment_only(&self) -> bool {
        self.deployment_status.is_some()
            && self.name.is_none()
            && self.email.is_none()
            && self.course.is_none()
            && self.year_level.is_none()
            && self.section.is_none()
            && self.contact_no.is_none()
            && self.address.is_none()
            && self.company_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_only_payload_is_detected() {
        let req: UpdateStudentRequest =
            serde_json::from_str(r#"{"id": "4", "deployment_status": "Deployed"}"#).unwrap();
        assert_eq!(req.id, Some(4));
        assert!(req.is_deployment_only());

        let req: UpdateStudentRequest = serde_json::from_str(
            r#"{"id": 4, "deployment_status": "Deployed", "company_id": null}"#,
        )
        .unwrap();
        assert_eq!(req.company_id, Some(None));
        assert!(!req.is_deployment_only());
    }

    #[test]
    fn create_accepts_string_company_id() {
        let req: CreateStudentRequest = serde_json::from_str(
            r#"{"name": "A", "email": "a@x.com", "student_no": "1", "company_id": "",
                "deployment_status": "Not Deployed"}"#,
        )
        .unwrap();
        assert_eq!(req.company_id, None);
        assert_eq!(req.deployment_status, Some(DeploymentStatus::NotDeployed));
    }
}
