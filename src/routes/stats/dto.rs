use serde::Serialize;
use utoipa::ToSchema;

/// Dashboard counters.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStats {
    pub students: u64,
    pub advisors: u64,
    pub companies: u64,
    pub deployed_students: u64,
    pub completed_students: u64,
    /// Submitted requirement rows still waiting for an admin decision.
    pub pending_reviews: u64,
}
