use axum::{Json, Router, extract::State, routing::get};

use super::dto::DashboardStats;
use crate::entities::sea_orm_active_enums::DeploymentStatus;
use crate::error::{ApiResult, method_not_allowed};
use crate::extractor::AdminSession;
use crate::repositories::{
    CompanyRepository, OjtAdvisorRepository, StudentRepository, StudentRequirementRepository,
};
use crate::routes::response::{DataResponse, ErrorResponse};
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new().route(
        "/api/v1/admin/stats",
        get(get_dashboard_stats).fallback(method_not_allowed),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1/admin/stats",
    responses(
        (status = 200, description = "Dashboard statistics", body = DataResponse<DashboardStats>),
        (status = 403, description = "Admins only", body = ErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_dashboard_stats(
    AdminSession(_admin): AdminSession,
    State(state): State<AppState>,
) -> ApiResult<Json<DataResponse<DashboardStats>>> {
    let db = &state.db;
    let student_repo = StudentRepository::new(db);

    let stats = DashboardStats {
        students: student_repo.count_all().await?,
        advisors: OjtAdvisorRepository::new(db).count_all().await?,
        companies: CompanyRepository::new(db).count_all().await?,
        deployed_students: student_repo
            .count_by_deployment(DeploymentStatus::Deployed)
            .await?,
        completed_students: student_repo
            .count_by_deployment(DeploymentStatus::Completed)
            .await?,
        pending_reviews: StudentRequirementRepository::new(db)
            .count_awaiting_review()
            .await?,
    };

    Ok(Json(DataResponse::ok(stats)))
}
