use axum::{Json, Router, extract::State, routing::get};

use super::dto::{CompanyItem, CreateCompanyRequest, UpdateCompanyRequest};
use crate::entities::sea_orm_active_enums::CompanyStatus;
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::{AdminSession, ApiJson, ApiQuery};
use crate::repositories::{CompanyRepository, CompanyUpdate, NewCompany};
use crate::routes::response::{
    DataResponse, ErrorResponse, IdQuery, IdRequest, MessageResponse, non_blank, resolve_id,
};
use crate::services::companies;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/manage_companies",
        get(list_companies)
            .post(create_company)
            .put(update_company)
            .delete(delete_company)
            .fallback(method_not_allowed),
    )
}

/// List companies, newest first
#[utoipa::path(
    get,
    path = "/api/v1/admin/manage_companies",
    responses(
        (status = 200, description = "Companies", body = DataResponse<Vec<CompanyItem>>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Companies"
)]
pub async fn list_companies(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<Vec<CompanyItem>>>> {
    let companies = CompanyRepository::new(&state.db).find_all().await?;
    Ok(Json(DataResponse::ok(
        companies.into_iter().map(CompanyItem::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/admin/manage_companies",
    request_body = CreateCompanyRequest,
    responses(
        (status = 200, description = "Company created", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Companies"
)]
pub async fn create_company(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreateCompanyRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let name = non_blank(payload.name)
        .ok_or_else(|| ApiError::validation("Company name is required."))?;

    let company = CompanyRepository::new(&state.db)
        .create(NewCompany {
            name,
            address: payload.address.unwrap_or_default(),
            contact_person: payload.contact_person.unwrap_or_default(),
            contact_no: payload.contact_no.unwrap_or_default(),
            email: payload.email.unwrap_or_default(),
            status: payload.status.unwrap_or(CompanyStatus::Active),
        })
        .await?;
    tracing::info!("created company {}", company.id);

    Ok(Json(MessageResponse::ok("Company added successfully.")))
}

/// Update a company; only the fields sent change
#[utoipa::path(
    put,
    path = "/api/v1/admin/manage_companies",
    request_body = UpdateCompanyRequest,
    responses(
        (status = 200, description = "Company updated", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Companies"
)]
pub async fn update_company(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdateCompanyRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = payload
        .id
        .ok_or_else(|| ApiError::validation("Missing company ID."))?;

    let company_repo = CompanyRepository::new(&state.db);
    if !company_repo.exists(id).await? {
        return Err(ApiError::not_found("Company not found."));
    }

    let name = match payload.name {
        Some(name) => Some(
            non_blank(Some(name)).ok_or_else(|| ApiError::validation("Company name is required."))?,
        ),
        None => None,
    };

    company_repo
        .update(
            id,
            CompanyUpdate {
                name,
                address: payload.address,
                contact_person: payload.contact_person,
                contact_no: payload.contact_no,
                email: payload.email,
                status: payload.status,
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok("Company updated successfully.")))
}

/// Delete a company; refused while placements reference it
#[utoipa::path(
    delete,
    path = "/api/v1/admin/manage_companies",
    params(IdQuery),
    request_body = IdRequest,
    responses(
        (status = 200, description = "Company deleted, or `success: false` while placements reference it", body = MessageResponse),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Companies"
)]
pub async fn delete_company(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<IdQuery>,
    ApiJson(body): ApiJson<IdRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let id = resolve_id(body, query, "Missing company ID.")?;
    companies::delete_company(&state.db, id).await?;
    Ok(Json(MessageResponse::ok("Company deleted successfully.")))
}
