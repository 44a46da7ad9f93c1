use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::error::{ApiError, ApiResult};
use crate::repositories::{CompanyRepository, PlacementRepository};

/// Students and company advisors keep their rows with `company_id` cleared.
/// Refused while any placement still points at the company.
pub async fn delete_company(db: &DatabaseConnection, company_id: i32) -> ApiResult<()> {
    let txn = db.begin().await?;

    let company_repo = CompanyRepository::new(&txn);
    if !company_repo.exists(company_id).await? {
        return Err(ApiError::not_found("Company not found."));
    }

    let placements = PlacementRepository::new(&txn)
        .count_by_company(company_id)
        .await?;
    if placements > 0 {
        return Err(ApiError::validation(format!(
            "Cannot delete company: {} placement(s) still reference it.",
            placements
        )));
    }

    company_repo.delete(company_id).await?;
    txn.commit().await?;
    tracing::info!("deleted company {}", company_id);
    Ok(())
}
