use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use super::dto::{
    ManageRequirementsQuery, ResetWeeklyReportsResponse, StudentRequirementsResponse,
    UpdateRequirementStatusRequest, parse_status,
};
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::routes::response::{ErrorResponse, MessageResponse};
use crate::services::requirement_tracking::{
    self, StatusUpdate, get_requirements_for_student, progress_of, set_requirement_status,
};
use crate::state::AppState;

const RESET_WEEKLY_REPORT_ACTION: &str = "reset_weekly_report";

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/admin/manage_requirements",
            get(get_student_requirements)
                .put(update_requirement_status)
                .post(run_requirement_action)
                .fallback(method_not_allowed),
        )
        .route(
            "/api/v1/admin/reset_weekly_reports",
            post(reset_weekly_reports).fallback(method_not_allowed),
        )
}

/// One student's requirements, materializing missing rows first
#[utoipa::path(
    get,
    path = "/api/v1/admin/manage_requirements",
    params(ManageRequirementsQuery),
    responses(
        (status = 200, description = "Requirements in catalog order with progress", body = StudentRequirementsResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirement Tracking"
)]
pub async fn get_student_requirements(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ManageRequirementsQuery>,
) -> ApiResult<Json<StudentRequirementsResponse>> {
    let student_id = query
        .student_id
        .ok_or_else(|| ApiError::validation("Missing student_id"))?;

    let views = get_requirements_for_student(&state.db, student_id).await?;
    let progress = progress_of(&views);
    Ok(Json(StudentRequirementsResponse::new(
        views,
        progress,
        &state.config.public_base_url,
    )))
}

/// Move a student's requirement to Pending, Submitted, Completed or Rejected
#[utoipa::path(
    put,
    path = "/api/v1/admin/manage_requirements",
    request_body = UpdateRequirementStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirement Tracking"
)]
pub async fn update_requirement_status(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateRequirementStatusRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(student_id), Some(requirement_id), Some(status)) =
        (payload.student_id, payload.requirement_id, payload.status)
    else {
        return Err(ApiError::validation(
            "Missing fields (student_id, requirement_id, status)",
        ));
    };
    let status = parse_status(&status)?;

    set_requirement_status(
        &state.db,
        &state.storage,
        StatusUpdate {
            student_id,
            requirement_id,
            submission_id: payload.submission_id,
            status,
            acting_user_id: admin.user_id,
        },
    )
    .await?;

    Ok(Json(MessageResponse::ok(
        "Requirement status updated successfully.",
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/manage_requirements",
    params(ManageRequirementsQuery),
    responses(
        (status = 200, description = "Weekly reports reset", body = ResetWeeklyReportsResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirement Tracking"
)]
pub async fn run_requirement_action(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ManageRequirementsQuery>,
) -> ApiResult<Json<ResetWeeklyReportsResponse>> {
    if query.action.as_deref() != Some(RESET_WEEKLY_REPORT_ACTION) {
        return Err(ApiError::validation("Invalid action."));
    }

    let affected =
        requirement_tracking::reset_weekly_reports(&state.db, &state.config.weekly_report_slug)
            .await?;
    Ok(Json(ResetWeeklyReportsResponse {
        success: true,
        message: "Weekly report statuses reset successfully.".to_string(),
        affected,
    }))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/reset_weekly_reports",
    responses(
        (status = 200, description = "Weekly reports reset", body = ResetWeeklyReportsResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirement Tracking"
)]
pub async fn reset_weekly_reports(
    AdminSession(admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<ResetWeeklyReportsResponse>> {
    let affected =
        requirement_tracking::reset_weekly_reports(&state.db, &state.config.weekly_report_slug)
            .await?;
    tracing::info!("admin {} reset weekly reports", admin.user_id);
    Ok(Json(ResetWeeklyReportsResponse {
        success: true,
        message: "Weekly reports reset successfully.".to_string(),
        affected,
    }))
}
