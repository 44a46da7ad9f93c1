use std::collections::HashMap;

use axum::{Json, Router, extract::State, routing::get};

use super::dto::{AdvisorItem, CreateAdvisorRequest, UpdateAdvisorRequest};
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::repositories::{OjtAdvisorRepository, UserRepository};
use crate::routes::response::{
    DataResponse, ErrorResponse, IdQuery, IdRequest, MessageResponse, non_blank, resolve_id,
};
use crate::services::accounts::{self, AccountInput};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/manage_advisors",
        get(list_advisors)
            .post(create_advisor)
            .put(update_advisor)
            .delete(delete_advisor)
            .fallback(method_not_allowed),
    )
}

/// List OJT advisors with their user accounts
#[utoipa::path(
    get,
    path = "/api/v1/admin/manage_advisors",
    responses(
        (status = 200, description = "Advisors, newest first", body = DataResponse<Vec<AdvisorItem>>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Advisors"
)]
pub async fn list_advisors(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<AdvisorItem>>>> {
    let advisors = OjtAdvisorRepository::new(&state.db).find_all().await?;
    let user_ids = advisors.iter().map(|a| a.user_id).collect();
    let users: HashMap<i32, _> = UserRepository::new(&state.db)
        .find_by_ids(user_ids)
        .await?
        .into_iter()
        .map(|u| (u.id, u))
        .collect();

    let items = advisors
        .into_iter()
        .filter_map(|advisor| {
            let user = users.get(&advisor.user_id)?;
            Some(AdvisorItem {
                advisor_id: advisor.id,
                user_id: user.id,
                full_name: user.name.clone(),
                email: user.email.clone(),
                user_status: user.status,
                department: advisor.department,
            })
        })
        .collect();

    Ok(Json(DataResponse::ok(items)))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/manage_advisors",
    request_body = CreateAdvisorRequest,
    responses(
        (status = 200, description = "Advisor created", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Advisors"
)]
pub async fn create_advisor(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateAdvisorRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(name), Some(email)) = (non_blank(payload.name), non_blank(payload.email)) else {
        return Err(ApiError::validation("Missing required fields (name, email)."));
    };

    accounts::create_advisor(
        &state.db,
        state.config.password_hash_cost,
        AccountInput {
            name,
            email,
            password: payload.password.filter(|p| !p.is_empty()),
        },
        non_blank(payload.department),
    )
    .await?;

    Ok(Json(MessageResponse::ok("Advisor added successfully.")))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/manage_advisors",
    request_body = UpdateAdvisorRequest,
    responses(
        (status = 200, description = "Advisor updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Advisors"
)]
pub async fn update_advisor(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateAdvisorRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::validation("Missing advisor ID."))?;

    accounts::update_advisor(&state.db, id, payload.department, payload.name, payload.email).await?;
    Ok(Json(MessageResponse::ok("Advisor updated successfully.")))
}

/// Delete an advisor and its user account
#[utoipa::path(
    delete,
    path = "/api/v1/admin/manage_advisors",
    params(IdQuery),
    request_body = IdRequest,
    responses(
        (status = 200, description = "Advisor deleted", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Advisors"
)]
pub async fn delete_advisor(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ApiJson(body): ApiJson<IdRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = resolve_id(body, query, "Missing advisor ID.")?;
    accounts::delete_advisor(&state.db, id).await?;
    Ok(Json(MessageResponse::ok("Advisor deleted successfully.")))
}
