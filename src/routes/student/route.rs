use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    routing::{get, post},
};
use bytes::Bytes;

use super::dto::{
    AttendanceItem, AttendanceRequest, ProfileQuery, StudentIdQuery, StudentIdResponse,
    StudentProfileItem, UploadResponse, UserIdQuery,
};
use crate::entities::sea_orm_active_enums::UserRole;
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{ApiJson, ApiQuery, CurrentSession};
use crate::repositories::{AttendanceRepository, CompanyRepository, StudentRepository, UserRepository};
use crate::routes::response::{DataResponse, ErrorResponse, MessageResponse};
use crate::routes::student_requirements::dto::StudentRequirementsResponse;
use crate::services::requirement_tracking::{
    get_requirements_for_student, progress_of, upload_requirement_file,
};
use crate::state::AppState;
use crate::utils::upload::public_url;

pub fn create_route(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/student/get_profile",
            get(get_profile).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/student/get_requirements",
            get(get_requirements).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/student/get_student_id",
            get(get_student_id).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/student/upload_requirement",
            post(upload_requirement)
                .fallback(method_not_allowed)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/api/v1/student/attendance",
            get(list_attendance)
                .post(log_attendance)
                .fallback(method_not_allowed),
        )
}

#[utoipa::path(
    get,
    path = "/api/v1/student/get_profile",
    params(ProfileQuery),
    responses(
        (status = 200, description = "Student profile", body = DataResponse<StudentProfileItem>),
        (status = 403, description = "Not logged in or not the owner", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn get_profile(
    session: CurrentSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProfileQuery>,
) -> ApiResult<Json<DataResponse<StudentProfileItem>>> {
    let student_id = query
        .id
        .ok_or_else(|| ApiError::validation("Missing student ID."))?;
    session.ensure_student_access(&state.db, student_id).await?;

    let db = &state.db;
    let student = StudentRepository::new(db)
        .find_by_id(student_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found."))?;
    let user = UserRepository::new(db)
        .find_by_id(student.user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found."))?;

    let company_name = match student.company_id {
        Some(company_id) => CompanyRepository::new(db)
            .find_by_id(company_id)
            .await?
            .map(|c| c.name),
        None => None,
    };

    Ok(Json(DataResponse::ok(StudentProfileItem {
        student_id: student.id,
        user_id: user.id,
        name: user.name,
        email: user.email,
        student_no: student.student_no,
        course: student.course,
        year_level: student.year_level,
        section: student.section,
        contact_no: student.contact_no,
        address: student.address,
        deployment_status: student.deployment_status,
        company_name,
    })))
}

/// The caller's requirement checklist with progress
#[utoipa::path(
    get,
    path = "/api/v1/student/get_requirements",
    params(StudentIdQuery),
    responses(
        (status = 200, description = "Requirements in catalog order", body = StudentRequirementsResponse),
        (status = 403, description = "Not logged in or not the owner", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn get_requirements(
    session: CurrentSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StudentIdQuery>,
) -> ApiResult<Json<StudentRequirementsResponse>> {
    let student_id = query
        .student_id
        .ok_or_else(|| ApiError::validation("Missing student_id"))?;
    session.ensure_student_access(&state.db, student_id).await?;

    let views = get_requirements_for_student(&state.db, student_id).await?;
    let progress = progress_of(&views);
    Ok(Json(StudentRequirementsResponse::new(
        views,
        progress,
        &state.config.public_base_url,
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/student/get_student_id",
    params(UserIdQuery),
    responses(
        (status = 200, description = "Student id for a user", body = StudentIdResponse),
        (status = 403, description = "Not logged in or not the owner", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn get_student_id(
    session: CurrentSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<UserIdQuery>,
) -> ApiResult<Json<StudentIdResponse>> {
    let user_id = query
        .user_id
        .ok_or_else(|| ApiError::validation("Missing user_id"))?;
    if session.user.role == UserRole::Student && session.user.user_id != user_id {
        return Err(ApiError::forbidden("Access denied."));
    }

    let student = StudentRepository::new(&state.db)
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Student not found"))?;

    Ok(Json(StudentIdResponse {
        success: true,
        student_id: student.id,
    }))
}

struct UploadForm {
    student_id: Option<i32>,
    requirement_id: Option<i32>,
    file: Option<(String, Bytes)>,
}

fn multipart_error(status: StatusCode, detail: String) -> ApiError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::validation("File too large.");
    }
    ApiError::validation(format!("Failed to read multipart: {}", detail))
}

async fn read_upload_form(mut multipart: Multipart) -> ApiResult<UploadForm> {
    let mut form = UploadForm {
        student_id: None,
        requirement_id: None,
        file: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e.status(), e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "student_id" | "requirement_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e.status(), e.body_text()))?;
                let value = text.trim().parse::<i32>().ok();
                if name == "student_id" {
                    form.student_id = value;
                } else {
                    form.requirement_id = value;
                }
            }
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e.status(), e.body_text()))?;
                form.file = Some((file_name, data));
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Store a requirement file and mark it Submitted
#[utoipa::path(
    post,
    path = "/api/v1/student/upload_requirement",
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart form data with fields: student_id (string), requirement_id (string), file (binary)"),
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 403, description = "Not logged in or not the owner", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn upload_requirement(
    session: CurrentSession,
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let Ok(multipart) = multipart else {
        return Err(ApiError::validation("Missing required fields."));
    };
    let form = read_upload_form(multipart).await?;

    let (Some(student_id), Some(requirement_id), Some((file_name, data))) =
        (form.student_id, form.requirement_id, form.file)
    else {
        return Err(ApiError::validation("Missing required fields."));
    };
    session.ensure_student_access(&state.db, student_id).await?;

    let file_path = upload_requirement_file(
        &state.db,
        &state.storage,
        student_id,
        requirement_id,
        &file_name,
        &data,
    )
    .await?;

    let file_url = public_url(&state.config.public_base_url, &file_path);
    Ok(Json(UploadResponse {
        success: true,
        message: "File uploaded successfully.".to_string(),
        file_path,
        file_url,
    }))
}

#[utoipa::path(
    get,
    path = "/api/v1/student/attendance",
    params(StudentIdQuery),
    responses(
        (status = 200, description = "Attendance log, most recent first", body = DataResponse<Vec<AttendanceItem>>),
        (status = 403, description = "Not logged in or not the owner", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn list_attendance(
    session: CurrentSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<StudentIdQuery>,
) -> ApiResult<Json<DataResponse<Vec<AttendanceItem>>>> {
    let student_id = query
        .student_id
        .ok_or_else(|| ApiError::validation("Student ID required"))?;
    session.ensure_student_access(&state.db, student_id).await?;

    let entries = AttendanceRepository::new(&state.db)
        .find_by_student(student_id)
        .await?;
    Ok(Json(DataResponse::ok(
        entries.into_iter().map(AttendanceItem::from).collect(),
    )))
}

/// Log today's attendance; at most one entry per day
#[utoipa::path(
    post,
    path = "/api/v1/student/attendance",
    request_body = AttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded", body = MessageResponse),
        (status = 403, description = "Not logged in or not the owner", body = ErrorResponse)
    ),
    tag = "Student"
)]
pub async fn log_attendance(
    session: CurrentSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<AttendanceRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let student_id = payload
        .student_id
        .ok_or_else(|| ApiError::validation("Student ID required"))?;
    session.ensure_student_access(&state.db, student_id).await?;

    if StudentRepository::new(&state.db)
        .find_by_id(student_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation("Invalid student_id."));
    }

    let today = chrono::Local::now().date_naive();
    let recorded = AttendanceRepository::new(&state.db)
        .record(student_id, today)
        .await?;
    if !recorded {
        return Err(ApiError::validation("Already logged today"));
    }

    tracing::info!("student {} logged attendance for {}", student_id, today);
    Ok(Json(MessageResponse::ok("Attendance recorded")))
}
