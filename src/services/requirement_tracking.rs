//! Per-student requirement tracking.
//!
//! Every student owns one `student_requirements` row per catalog entry. Rows
//! are created lazily the first time the student's list is read, and a
//! rejection deletes the row so the next read re-creates it as `Pending`.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, DatabaseConnection};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::REQUIREMENT_UPLOAD_DIR;
use crate::entities::sea_orm_active_enums::RequirementStatus;
use crate::error::{ApiError, ApiResult};
use crate::repositories::{
    RequirementRepository, StatusChange, StudentRepository, StudentRequirementRepository,
};
use crate::utils::upload::FileStorage;

/// One catalog entry joined with a student's tracking row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRequirementView {
    pub requirement_id: i32,
    pub requirement_name: String,
    pub description: String,
    pub is_required: bool,
    pub status: RequirementStatus,
    pub file_path: Option<String>,
    pub uploaded_at: Option<NaiveDateTime>,
    pub submitted_at: Option<NaiveDateTime>,
    pub verified_at: Option<NaiveDateTime>,
    pub verified_by: Option<i32>,
    pub submission_id: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema)]
pub struct Progress {
    pub total: usize,
    pub satisfied: usize,
    /// Rounded half away from zero, 0 when the catalog is empty.
    pub percent: u32,
    pub mandatory_total: usize,
    pub mandatory_satisfied: usize,
}

fn rounded_percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    // Integer form of round(100 * part / whole) for non-negative inputs.
    ((200 * part + whole) / (2 * whole)) as u32
}

/// Computes completion from `(status, is_required)` pairs.
pub fn compute_progress<I>(items: I) -> Progress
where
    I: IntoIterator<Item = (RequirementStatus, bool)>,
{
    let mut progress = Progress::default();
    for (status, is_required) in items {
        progress.total += 1;
        if is_required {
            progress.mandatory_total += 1;
        }
        if status.is_satisfied() {
            progress.satisfied += 1;
            if is_required {
                progress.mandatory_satisfied += 1;
            }
        }
    }
    progress.percent = rounded_percent(progress.satisfied, progress.total);
    progress
}

pub fn progress_of(views: &[StudentRequirementView]) -> Progress {
    compute_progress(views.iter().map(|v| (v.status, v.is_required)))
}

async fn ensure_student_exists<C: ConnectionTrait>(
    db: &C,
    student_id: i32,
    message: &str,
) -> ApiResult<()> {
    if StudentRepository::new(db).find_by_id(student_id).await?.is_none() {
        return Err(ApiError::validation(message));
    }
    Ok(())
}

async fn ensure_requirement_exists<C: ConnectionTrait>(db: &C, requirement_id: i32) -> ApiResult<()> {
    if RequirementRepository::new(db)
        .find_by_id(requirement_id)
        .await?
        .is_none()
    {
        return Err(ApiError::validation("Invalid requirement_id."));
    }
    Ok(())
}

/// Materializes missing rows, then returns the full catalog for the student
/// in ascending requirement id order.
pub async fn get_requirements_for_student<C: ConnectionTrait>(
    db: &C,
    student_id: i32,
) -> ApiResult<Vec<StudentRequirementView>> {
    ensure_student_exists(db, student_id, "Invalid student_id").await?;

    let catalog = RequirementRepository::new(db).find_all().await?;
    let tracking = StudentRequirementRepository::new(db);

    let catalog_ids: Vec<i32> = catalog.iter().map(|r| r.id).collect();
    let created = tracking.insert_missing(student_id, &catalog_ids).await?;
    if created > 0 {
        tracing::info!(
            "materialized {} requirement rows for student {}",
            created,
            student_id
        );
    }

    let mut rows: HashMap<i32, _> = tracking
        .find_by_student(student_id)
        .await?
        .into_iter()
        .map(|row| (row.requirement_id, row))
        .collect();

    let views = catalog
        .into_iter()
        .map(|requirement| {
            let row = rows.remove(&requirement.id);
            StudentRequirementView {
                requirement_id: requirement.id,
                requirement_name: requirement.name,
                description: requirement.description,
                is_required: requirement.is_required,
                status: row
                    .as_ref()
                    .map(|r| r.status)
                    .unwrap_or(RequirementStatus::Pending),
                file_path: row.as_ref().and_then(|r| r.file_path.clone()),
                uploaded_at: row.as_ref().and_then(|r| r.uploaded_at),
                submitted_at: row.as_ref().and_then(|r| r.submitted_at),
                verified_at: row.as_ref().and_then(|r| r.verified_at),
                verified_by: row.as_ref().and_then(|r| r.verified_by),
                submission_id: row.map(|r| r.id),
            }
        })
        .collect();

    Ok(views)
}

#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub student_id: i32,
    pub requirement_id: i32,
    pub submission_id: Option<i32>,
    pub status: RequirementStatus,
    /// User performing the change, recorded as verifier on `Completed`.
    pub acting_user_id: i32,
}

/// Applies one status transition.
///
/// `Rejected` deletes the tracking row and its file; every other status
/// writes the row, creating it if needed.
pub async fn set_requirement_status(
    db: &DatabaseConnection,
    storage: &FileStorage,
    update: StatusUpdate,
) -> ApiResult<()> {
    ensure_student_exists(db, update.student_id, "Invalid student_id").await?;
    let tracking = StudentRequirementRepository::new(db);

    if update.status == RequirementStatus::Rejected {
        let row = match update.submission_id {
            Some(submission_id) => {
                tracking
                    .find_for_student(submission_id, update.student_id)
                    .await?
            }
            None => {
                tracking
                    .find_by_pair(update.student_id, update.requirement_id)
                    .await?
            }
        };
        let row = row.ok_or_else(|| ApiError::validation("Submission not found"))?;

        tracking.delete(row.id).await?;
        tracing::info!(
            "rejected submission {} (student {}, requirement {})",
            row.id,
            row.student_id,
            row.requirement_id
        );

        if let Some(file_path) = row.file_path {
            match storage.delete(&file_path).await {
                Ok(true) => tracing::info!("removed rejected file {}", file_path),
                Ok(false) => tracing::debug!("rejected file {} already gone", file_path),
                Err(e) => tracing::warn!("failed to remove rejected file {}: {}", file_path, e),
            }
        }
        return Ok(());
    }

    ensure_requirement_exists(db, update.requirement_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let change = match update.status {
        RequirementStatus::Pending => StatusChange {
            status: RequirementStatus::Pending,
            submitted_at: None,
            verification: None,
        },
        RequirementStatus::Completed => StatusChange {
            status: RequirementStatus::Completed,
            submitted_at: Some(now),
            verification: Some((now, update.acting_user_id)),
        },
        status => StatusChange {
            status,
            submitted_at: Some(now),
            verification: None,
        },
    };

    tracking
        .upsert_status(update.student_id, update.requirement_id, change)
        .await?;
    tracing::info!(
        "student {} requirement {} set to {:?}",
        update.student_id,
        update.requirement_id,
        update.status
    );
    Ok(())
}

/// Resets every row of the requirements tagged with `slug` to `Pending`.
pub async fn reset_weekly_reports<C: ConnectionTrait>(db: &C, slug: &str) -> ApiResult<u64> {
    let requirement_ids = RequirementRepository::new(db).find_ids_by_slug(slug).await?;
    if requirement_ids.is_empty() {
        tracing::info!("no requirement tagged '{}', nothing to reset", slug);
        return Ok(0);
    }

    let affected = StudentRequirementRepository::new(db)
        .reset_to_pending(requirement_ids)
        .await?;
    tracing::info!("reset {} '{}' rows to Pending", affected, slug);
    Ok(affected)
}

/// Stores an uploaded file and marks the requirement `Submitted`.
///
/// A previously uploaded file stays on disk. Returns the stored relative path.
pub async fn upload_requirement_file(
    db: &DatabaseConnection,
    storage: &FileStorage,
    student_id: i32,
    requirement_id: i32,
    original_name: &str,
    data: &[u8],
) -> ApiResult<String> {
    ensure_student_exists(db, student_id, "Invalid student_id.").await?;
    ensure_requirement_exists(db, requirement_id).await?;

    let file_path = storage
        .save(REQUIREMENT_UPLOAD_DIR, original_name, data)
        .await?;

    let now = chrono::Utc::now().naive_utc();
    let result = StudentRequirementRepository::new(db)
        .upsert_upload(student_id, requirement_id, file_path.clone(), now)
        .await;

    if let Err(e) = result {
        if let Err(cleanup) = storage.delete(&file_path).await {
            tracing::warn!("failed to remove orphaned upload {}: {}", file_path, cleanup);
        }
        return Err(e.into());
    }

    tracing::info!(
        "student {} uploaded {} for requirement {}",
        student_id,
        file_path,
        requirement_id
    );
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use RequirementStatus::*;

    #[test]
    fn empty_catalog_is_zero_percent() {
        let progress = compute_progress(Vec::new());
        assert_eq!(progress.percent, 0);
        assert_eq!(progress.total, 0);
    }

    #[test]
    fn submitted_and_completed_both_count() {
        let progress = compute_progress(vec![
            (Submitted, true),
            (Completed, true),
            (Pending, false),
        ]);
        assert_eq!(progress.satisfied, 2);
        assert_eq!(progress.percent, 67);
        assert_eq!(progress.mandatory_total, 2);
        assert_eq!(progress.mandatory_satisfied, 2);
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(rounded_percent(1, 3), 33);
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(1, 8), 13);
        assert_eq!(rounded_percent(1, 2), 50);
        assert_eq!(rounded_percent(3, 3), 100);
    }

    #[test]
    fn rejected_does_not_count() {
        let progress = compute_progress(vec![(Rejected, true), (Pending, true)]);
        assert_eq!(progress.percent, 0);
    }

    #[test]
    fn advancing_a_status_never_lowers_progress() {
        let mut statuses = vec![Pending, Pending, Pending, Pending, Pending, Pending, Pending];
        let mut last = compute_progress(statuses.iter().map(|s| (*s, true))).percent;
        for i in 0..statuses.len() {
            statuses[i] = if i % 2 == 0 { Submitted } else { Completed };
            let now = compute_progress(statuses.iter().map(|s| (*s, true))).percent;
            assert!(now >= last, "progress dropped from {} to {}", last, now);
            last = now;
        }
        assert_eq!(last, 100);
    }
}
