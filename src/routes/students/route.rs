use std::collections::HashMap;

use axum::{Json, Router, extract::State, routing::get};

use super::dto::{CreateStudentRequest, CreateStudentResponse, StudentListItem, UpdateStudentRequest};
use crate::entities::sea_orm_active_enums::{DeploymentStatus, RequirementStatus};
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::repositories::{
    CompanyRepository, RequirementRepository, StudentRepository, StudentRequirementRepository,
    StudentUpdate, UserRepository,
};
use crate::routes::response::{
    DataResponse, ErrorResponse, IdQuery, IdRequest, MessageResponse, non_blank, resolve_id,
};
use crate::services::accounts::{self, AccountInput, StudentProfile};
use crate::services::requirement_tracking::compute_progress;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/manage_students",
        get(list_students)
            .post(create_student)
            .put(update_student)
            .delete(delete_student)
            .fallback(method_not_allowed),
    )
}

/// List students with their user, company and requirement progress
#[utoipa::path(
    get,
    path = "/api/v1/admin/manage_students",
    responses(
        (status = 200, description = "Students, newest first", body = DataResponse<Vec<StudentListItem>>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn list_students(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<StudentListItem>>>> {
    let db = &state.db;
    let students = StudentRepository::new(db).find_all().await?;

    let user_ids = students.iter().map(|s| s.user_id).collect();
    let users: HashMap<i32, _> = UserRepository::new(db)
        .find_by_ids(user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let company_ids = students.iter().filter_map(|s| s.company_id).collect();
    let company_names: HashMap<i32, String> = CompanyRepository::new(db)
        .find_by_ids(company_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let catalog = RequirementRepository::new(db).find_all().await?;
    let mut statuses: HashMap<(i32, i32), (RequirementStatus, bool)> = HashMap::new();
    let student_ids = students.iter().map(|s| s.id).collect();
    for row in StudentRequirementRepository::new(db)
        .find_by_students(student_ids)
        .await?
    {
        let has_file = row.file_path.is_some();
        statuses.insert((row.student_id, row.requirement_id), (row.status, has_file));
    }

    let mut items = Vec::with_capacity(students.len());
    for student in students {
        let Some(user) = users.get(&student.user_id) else {
            tracing::warn!("student {} has no user {}", student.id, student.user_id);
            continue;
        };

        let tracked: Vec<(RequirementStatus, bool, bool)> = catalog
            .iter()
            .map(|r| {
                let (status, has_file) = statuses
                    .get(&(student.id, r.id))
                    .copied()
                    .unwrap_or((RequirementStatus::Pending, false));
                (status, r.is_required, has_file)
            })
            .collect();

        let progress = compute_progress(tracked.iter().map(|(s, required, _)| (*s, *required)));
        let pending_files = tracked
            .iter()
            .filter(|(s, _, has_file)| *s == RequirementStatus::Submitted && *has_file)
            .count();

        items.push(StudentListItem {
            student_id: student.id,
            student_no: student.student_no,
            course: student.course,
            year_level: student.year_level,
            section: student.section,
            contact_no: student.contact_no,
            address: student.address,
            deployment_status: student.deployment_status,
            user_id: user.id,
            full_name: user.name.clone(),
            email: user.email.clone(),
            user_status: user.status,
            company_id: student.company_id,
            company_name: student
                .company_id
                .and_then(|id| company_names.get(&id).cloned()),
            pending_files,
            submitted_mandatory: progress.mandatory_satisfied,
            total_mandatory: progress.mandatory_total,
            progress: progress.percent,
        });
    }

    Ok(Json(DataResponse::ok(items)))
}

/// Create a student together with its user account
#[utoipa::path(
    post,
    path = "/api/v1/admin/manage_students",
    request_body = CreateStudentRequest,
    responses(
        (status = 200, description = "Student created, or `success: false` with the reason", body = CreateStudentResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn create_student(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateStudentRequest>,
) -> ApiResult<Json<CreateStudentResponse>> {
    let (Some(name), Some(email), Some(student_no)) = (
        non_blank(payload.name),
        non_blank(payload.email),
        non_blank(payload.student_no),
    ) else {
        return Err(ApiError::validation(
            "Missing required fields: name, email, or student_no.",
        ));
    };

    let student = accounts::create_student(
        &state.db,
        state.config.password_hash_cost,
        AccountInput {
            name,
            email,
            password: payload.password.filter(|p| !p.is_empty()),
        },
        StudentProfile {
            student_no,
            course: payload.course.unwrap_or_default(),
            year_level: payload.year_level.unwrap_or_default(),
            section: payload.section.unwrap_or_default(),
            contact_no: payload.contact_no.unwrap_or_default(),
            address: payload.address.unwrap_or_default(),
            company_id: payload.company_id,
            deployment_status: payload
                .deployment_status
                .unwrap_or(DeploymentStatus::NotDeployed),
        },
    )
    .await?;

    Ok(Json(CreateStudentResponse {
        success: true,
        message: "Student added successfully.".to_string(),
        student_id: student.id,
    }))
}

/// Update a student and its user; only the fields sent change
#[utoipa::path(
    put,
    path = "/api/v1/admin/manage_students",
    request_body = UpdateStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn update_student(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateStudentRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::validation("Missing student ID."))?;
    let deployment_only = payload.is_deployment_only();

    let updates = StudentUpdate {
        course: payload.course,
        year_level: payload.year_level,
        section: payload.section,
        contact_no: payload.contact_no,
        address: payload.address,
        company_id: payload.company_id,
        deployment_status: payload.deployment_status,
    };
    accounts::update_student(&state.db, id, payload.name, payload.email, updates).await?;

    let message = if deployment_only {
        "Deployment status updated successfully."
    } else {
        "Student and user updated successfully."
    };
    Ok(Json(MessageResponse::ok(message)))
}

/// Delete a student and its user account
#[utoipa::path(
    delete,
    path = "/api/v1/admin/manage_students",
    params(IdQuery),
    request_body = IdRequest,
    responses(
        (status = 200, description = "Student deleted", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Students"
)]
pub async fn delete_student(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ApiJson(body): ApiJson<IdRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = resolve_id(body, query, "Missing student ID.")?;
    accounts::delete_student(&state.db, id).await?;
    Ok(Json(MessageResponse::ok("Student deleted successfully.")))
}
