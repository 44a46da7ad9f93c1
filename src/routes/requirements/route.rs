use axum::{Json, Router, extract::State, routing::get};

use super::dto::{CreateRequirementRequest, RequirementItem, UpdateRequirementRequest};
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::repositories::{NewRequirement, RequirementRepository, RequirementUpdate};
use crate::routes::response::{
    DataResponse, ErrorResponse, IdQuery, IdRequest, MessageResponse, non_blank, resolve_id,
};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/requirements_crud",
        get(list_requirements)
            .post(create_requirement)
            .put(update_requirement)
            .delete(delete_requirement)
            .fallback(method_not_allowed),
    )
}

/// List the requirement catalog in id order
#[utoipa::path(
    get,
    path = "/api/v1/admin/requirements_crud",
    responses(
        (status = 200, description = "Requirement catalog", body = DataResponse<Vec<RequirementItem>>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirements"
)]
pub async fn list_requirements(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<RequirementItem>>>> {
    let requirements = RequirementRepository::new(&state.db).find_all().await?;
    Ok(Json(DataResponse::ok(
        requirements.into_iter().map(RequirementItem::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/requirements_crud",
    request_body = CreateRequirementRequest,
    responses(
        (status = 200, description = "Requirement created", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirements"
)]
pub async fn create_requirement(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateRequirementRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let name = non_blank(payload.name)
        .ok_or_else(|| ApiError::validation("Requirement name is required."))?;

    let requirement_repo = RequirementRepository::new(&state.db);
    let slug = non_blank(payload.slug);
    if let Some(slug) = &slug {
        if requirement_repo.slug_taken(slug, None).await? {
            return Err(ApiError::validation("Slug already in use."));
        }
    }

    let requirement = requirement_repo
        .create(NewRequirement {
            name,
            description: payload.description.unwrap_or_default().trim().to_string(),
            is_required: payload.is_required.unwrap_or(false),
            slug,
        })
        .await?;
    tracing::info!("created requirement {} '{}'", requirement.id, requirement.name);

    Ok(Json(MessageResponse::ok("Requirement added successfully.")))
}

#[utoipa::path(
    put,
    path = "/api/v1/admin/requirements_crud",
    request_body = UpdateRequirementRequest,
    responses(
        (status = 200, description = "Requirement updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirements"
)]
pub async fn update_requirement(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateRequirementRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(id), Some(name)) = (payload.id, non_blank(payload.name)) else {
        return Err(ApiError::validation("ID and Name are required."));
    };

    let requirement_repo = RequirementRepository::new(&state.db);
    if requirement_repo.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found("Requirement not found."));
    }
    if let Some(Some(slug)) = &payload.slug {
        if requirement_repo.slug_taken(slug, Some(id)).await? {
            return Err(ApiError::validation("Slug already in use."));
        }
    }

    requirement_repo
        .update(
            id,
            RequirementUpdate {
                name: Some(name),
                description: payload.description.map(|d| d.trim().to_string()),
                is_required: payload.is_required,
                slug: payload.slug,
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok("Requirement updated successfully.")))
}

/// Delete a catalog entry; its per-student rows go with it
#[utoipa::path(
    delete,
    path = "/api/v1/admin/requirements_crud",
    params(IdQuery),
    request_body = IdRequest,
    responses(
        (status = 200, description = "Requirement deleted", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Requirements"
)]
pub async fn delete_requirement(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ApiJson(body): ApiJson<IdRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = resolve_id(body, query, "Requirement ID missing.")?;
    let deleted = RequirementRepository::new(&state.db).delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::not_found("Requirement not found."));
    }
    tracing::info!("deleted requirement {}", id);
    Ok(Json(MessageResponse::ok("Requirement deleted successfully.")))
}
