use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::sea_orm_active_enums::RequirementStatus;
use crate::error::{ApiError, ApiResult};
use crate::services::requirement_tracking::{Progress, StudentRequirementView};
use crate::utils::deserialize::lenient_id;
use crate::utils::upload::public_url;

/// One catalog requirement as seen by a single student.
#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRequirementItem {
    pub requirement_id: i32,
    #[schema(example = "Medical Certificate")]
    pub requirement_name: String,
    pub description: String,
    pub is_required: bool,
    pub status: RequirementStatus,
    #[schema(example = "uploads/student_requirements/medical.pdf")]
    pub file_path: Option<String>,
    pub file_url: Option<String>,
    pub uploaded_at: Option<NaiveDateTime>,
    pub submitted_at: Option<NaiveDateTime>,
    pub verified_at: Option<NaiveDateTime>,
    pub verified_by: Option<i32>,
    pub submission_id: Option<i32>,
}

impl StudentRequirementItem {
    pub fn from_view(view: StudentRequirementView, public_base_url: &str) -> Self {
        let file_url = view
            .file_path
            .as_deref()
            .map(|path| public_url(public_base_url, path));
        Self {
            requirement_id: view.requirement_id,
            requirement_name: view.requirement_name,
            description: view.description,
            is_required: view.is_required,
            status: view.status,
            file_path: view.file_path,
            file_url,
            uploaded_at: view.uploaded_at,
            submitted_at: view.submitted_at,
            verified_at: view.verified_at,
            verified_by: view.verified_by,
            submission_id: view.submission_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRequirementsResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<StudentRequirementItem>,
    pub progress: Progress,
}

impl StudentRequirementsResponse {
    pub fn new(views: Vec<StudentRequirementView>, progress: Progress, public_base_url: &str) -> Self {
        Self {
            success: true,
            data: views
                .into_iter()
                .map(|view| StudentRequirementItem::from_view(view, public_base_url))
                .collect(),
            progress,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ManageRequirementsQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    #[param(value_type = Option<i32>)]
    pub student_id: Option<i32>,
    /// Only `reset_weekly_report` is recognised on POST.
    pub action: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRequirementStatusRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub student_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 2)]
    pub requirement_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub submission_id: Option<i32>,
    #[schema(example = "Completed")]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResetWeeklyReportsResponse {
    #[schema(example = true)]
    pub success: bool,
    pub message: String,
    /// Tracking rows moved back to Pending.
    pub affected: u64,
}

/// Case-insensitive status name.
pub fn parse_status(raw: &str) -> ApiResult<RequirementStatus> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pending" => Ok(RequirementStatus::Pending),
        "submitted" => Ok(RequirementStatus::Submitted),
        "rejected" => Ok(RequirementStatus::Rejected),
        "completed" => Ok(RequirementStatus::Completed),
        _ => Err(ApiError::validation("Invalid status.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_ignore_case() {
        assert_eq!(parse_status("Completed").unwrap(), RequirementStatus::Completed);
        assert_eq!(parse_status(" rejected ").unwrap(), RequirementStatus::Rejected);
        assert_eq!(parse_status("PENDING").unwrap(), RequirementStatus::Pending);
        assert_eq!(parse_status("approved").unwrap_err().to_string(), "Invalid status.");
    }

    #[test]
    fn ids_accept_strings() {
        let req: UpdateRequirementStatusRequest = serde_json::from_str(
            r#"{"student_id":"4","requirement_id":2,"status":"Submitted"}"#,
        )
        .unwrap();
        assert_eq!(req.student_id, Some(4));
        assert_eq!(req.requirement_id, Some(2));
        assert_eq!(req.submission_id, None);
    }

    #[test]
    fn file_url_follows_file_path() {
        let view = StudentRequirementView {
            requirement_id: 1,
            requirement_name: "Resume".into(),
            description: String::new(),
            is_required: true,
            status: RequirementStatus::Submitted,
            file_path: Some("uploads/student_requirements/cv.pdf".into()),
            uploaded_at: None,
            submitted_at: None,
            verified_at: None,
            verified_by: None,
            submission_id: Some(7),
        };
        let item = StudentRequirementItem::from_view(view, "https://ojt.example.edu");
        assert_eq!(
            item.file_url.as_deref(),
            Some("https://ojt.example.edu/uploads/student_requirements/cv.pdf")
        );
    }
}
