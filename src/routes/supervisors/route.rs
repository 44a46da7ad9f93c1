use std::collections::HashMap;

use axum::{Json, Router, extract::State, routing::get};

use super::dto::{CreateSupervisorRequest, SupervisorItem, UpdateSupervisorRequest};
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::repositories::{CompanyAdvisorRepository, CompanyRepository, UserRepository};
use crate::routes::response::{
    DataResponse, ErrorResponse, IdQuery, IdRequest, MessageResponse, non_blank, resolve_id,
};
use crate::services::accounts::{self, AccountInput};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/manage_supervisors",
        get(list_supervisors)
            .post(create_supervisor)
            .put(update_supervisor)
            .delete(delete_supervisor)
            .fallback(method_not_allowed),
    )
}

/// List company advisors with their user and company
#[utoipa::path(
    get,
    path = "/api/v1/admin/manage_supervisors",
    responses(
        (status = 200, description = "Company advisors, newest first", body = DataResponse<Vec<SupervisorItem>>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Supervisors"
)]
pub async fn list_supervisors(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<SupervisorItem>>>> {
    let supervisors = CompanyAdvisorRepository::new(&state.db).find_all().await?;

    let user_ids = supervisors.iter().map(|s| s.user_id).collect();
    let users: HashMap<i32, _> = UserRepository::new(&state.db)
        .find_by_ids(user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let company_ids = supervisors.iter().filter_map(|s| s.company_id).collect();
    let company_names: HashMap<i32, String> = CompanyRepository::new(&state.db)
        .find_by_ids(company_ids)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let items = supervisors
        .into_iter()
        .filter_map(|supervisor| {
            let user = users.get(&supervisor.user_id)?;
            Some(SupervisorItem {
                id: supervisor.id,
                position: supervisor.position,
                user_id: user.id,
                full_name: user.name.clone(),
                email: user.email.clone(),
                user_status: user.status,
                company_id: supervisor.company_id,
                company_name: supervisor
                    .company_id
                    .and_then(|id| company_names.get(&id).cloned()),
            })
        })
        .collect();

    Ok(Json(DataResponse::ok(items)))
}

/// Create a company advisor together with its user account
#[utoipa::path(
    post,
    path = "/api/v1/admin/manage_supervisors",
    request_body = CreateSupervisorRequest,
    responses(
        (status = 200, description = "Company advisor created", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Supervisors"
)]
pub async fn create_supervisor(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateSupervisorRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(name), Some(email)) = (non_blank(payload.name), non_blank(payload.email)) else {
        return Err(ApiError::validation("Missing required fields (name, email)."));
    };

    accounts::create_supervisor(
        &state.db,
        state.config.password_hash_cost,
        AccountInput {
            name,
            email,
            password: payload.password.filter(|p| !p.is_empty()),
        },
        payload.company_id,
        non_blank(payload.position),
    )
    .await?;

    Ok(Json(MessageResponse::ok("Company advisor added successfully.")))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/manage_supervisors",
    request_body = UpdateSupervisorRequest,
    responses(
        (status = 200, description = "Company advisor updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Supervisors"
)]
pub async fn update_supervisor(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateSupervisorRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::validation("Missing company advisor ID."))?;

    accounts::update_supervisor(&state.db, id, payload.company_id, payload.position).await?;
    Ok(Json(MessageResponse::ok("Company advisor updated successfully.")))
}

/// Delete a company advisor and its user account
#[utoipa::path(
    delete,
    path = "/api/v1/admin/manage_supervisors",
    params(IdQuery),
    request_body = IdRequest,
    responses(
        (status = 200, description = "Company advisor deleted", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Supervisors"
)]
pub async fn delete_supervisor(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ApiJson(body): ApiJson<IdRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = resolve_id(body, query, "Missing company advisor ID.")?;
    accounts::delete_supervisor(&state.db, id).await?;
    Ok(Json(MessageResponse::ok("Company advisor deleted successfully.")))
}
