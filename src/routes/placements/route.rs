use std::collections::HashMap;

use axum::{Json, Router, extract::State, routing::get};
use sea_orm::ConnectionTrait;

use super::dto::{PlacementItem, PlacementRequest};
use crate::entities::sea_orm_active_enums::PlacementStatus;
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::repositories::{
    CompanyRepository, OjtAdvisorRepository, PlacementFields, PlacementRepository,
    StudentRepository, UserRepository,
};
use crate::routes::response::{
    DataResponse, ErrorResponse, IdQuery, IdRequest, MessageResponse, non_blank,
    parse_optional_date, resolve_id,
};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/manage_placements",
        get(list_placements)
            .post(create_placement)
            .put(update_placement)
            .delete(delete_placement)
            .fallback(method_not_allowed),
    )
}

/// Validates references and dates, producing the columns to write.
async fn placement_fields<C: ConnectionTrait>(
    db: &C,
    payload: PlacementRequest,
) -> ApiResult<PlacementFields> {
    let (Some(student_id), Some(company_id)) = (payload.student_id, payload.company_id) else {
        return Err(ApiError::validation("Student and company are required."));
    };

    if StudentRepository::new(db).find_by_id(student_id).await?.is_none() {
        return Err(ApiError::validation("Invalid student_id."));
    }
    if !CompanyRepository::new(db).exists(company_id).await? {
        return Err(ApiError::validation("Invalid company ID."));
    }
    if let Some(advisor_id) = payload.advisor_id {
        if OjtAdvisorRepository::new(db).find_by_id(advisor_id).await?.is_none() {
            return Err(ApiError::validation("Invalid advisor_id."));
        }
    }

    let start_date = parse_optional_date(payload.start_date.as_deref(), "start_date")?;
    let end_date = parse_optional_date(payload.end_date.as_deref(), "end_date")?;
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(ApiError::validation("End date cannot be before start date."));
        }
    }

    Ok(PlacementFields {
        student_id,
        company_id,
        advisor_id: payload.advisor_id,
        start_date,
        end_date,
        remarks: non_blank(payload.remarks),
        status: payload.status.unwrap_or(PlacementStatus::Pending),
    })
}

/// List placements, newest first, with student, company and advisor names
#[utoipa::path(
    get,
    path = "/api/v1/admin/manage_placements",
    responses(
        (status = 200, description = "Placements", body = DataResponse<Vec<PlacementItem>>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Placements"
)]
pub async fn list_placements(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<PlacementItem>>>> {
    let db = &state.db;
    let placements = PlacementRepository::new(db).find_all().await?;

    let students: HashMap<i32, i32> = StudentRepository::new(db)
        .find_by_ids(placements.iter().map(|p| p.student_id).collect())
        .await?
        .into_iter()
        .map(|s| (s.id, s.user_id))
        .collect();

    let advisors: HashMap<i32, i32> = OjtAdvisorRepository::new(db)
        .find_by_ids(placements.iter().filter_map(|p| p.advisor_id).collect())
        .await?
        .into_iter()
        .map(|a| (a.id, a.user_id))
        .collect();

    let companies: HashMap<i32, String> = CompanyRepository::new(db)
        .find_by_ids(placements.iter().map(|p| p.company_id).collect())
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let user_ids = students.values().chain(advisors.values()).copied().collect();
    let user_names: HashMap<i32, String> = UserRepository::new(db)
        .find_by_ids(user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u.name))
        .collect();

    let name_of = |user_id: Option<&i32>| user_id.and_then(|id| user_names.get(id).cloned());

    let items = placements
        .into_iter()
        .map(|p| PlacementItem {
            id: p.id,
            start_date: p.start_date,
            end_date: p.end_date,
            remarks: p.remarks,
            status: p.status,
            student_id: p.student_id,
            student_name: name_of(students.get(&p.student_id)),
            company_id: p.company_id,
            company_name: companies.get(&p.company_id).cloned(),
            advisor_id: p.advisor_id,
            advisor_name: name_of(p.advisor_id.as_ref().and_then(|id| advisors.get(id))),
        })
        .collect();

    Ok(Json(DataResponse::ok(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/manage_placements",
    request_body = PlacementRequest,
    responses(
        (status = 200, description = "Placement created", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Placements"
)]
pub async fn create_placement(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PlacementRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let fields = placement_fields(&state.db, payload).await?;
    let placement = PlacementRepository::new(&state.db).create(fields).await?;
    tracing::info!(
        "placed student {} at company {} (placement {})",
        placement.student_id,
        placement.company_id,
        placement.id
    );
    Ok(Json(MessageResponse::ok("Placement added successfully.")))
}

/// Replace every editable column of a placement
#[utoipa::path(
    put,
    path = "/api/v1/admin/manage_placements",
    request_body = PlacementRequest,
    responses(
        (status = 200, description = "Placement updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Placements"
)]
pub async fn update_placement(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<PlacementRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::validation("Missing placement ID."))?;

    let placement_repo = PlacementRepository::new(&state.db);
    if placement_repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Placement not found."));
    }

    let fields = placement_fields(&state.db, payload).await?;
    placement_repo.update(id, fields).await?;
    Ok(Json(MessageResponse::ok("Placement updated successfully.")))
}

#[utoipa::path(
    delete,
    path = "/api/v1/admin/manage_placements",
    params(IdQuery),
    request_body = IdRequest,
    responses(
        (status = 200, description = "Placement deleted", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Placements"
)]
pub async fn delete_placement(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ApiJson(body): ApiJson<IdRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = resolve_id(body, query, "Missing placement ID.")?;
    if PlacementRepository::new(&state.db).delete(id).await? == 0 {
        return Err(ApiError::not_found("Placement not found."));
    }
    Ok(Json(MessageResponse::ok("Placement deleted successfully.")))
}
