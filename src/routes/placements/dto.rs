use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::sea_orm_active_enums::PlacementStatus;
use crate::utils::deserialize::lenient_id;

#[derive(Debug, Serialize, ToSchema)]
pub struct PlacementItem {
    pub id: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub status: PlacementStatus,
    pub student_id: i32,
    pub student_name: Option<String>,
    pub company_id: i32,
    pub company_name: Option<String>,
    pub advisor_id: Option<i32>,
    pub advisor_name: Option<String>,
}

/// Body shared by POST and PUT; `id` is only read on PUT.
#[derive(Debug, Deserialize, ToSchema)]
pub struct PlacementRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub student_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub company_id: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>)]
    pub advisor_id: Option<i32>,
    #[schema(example = "2025-06-01")]
    pub start_date: Option<String>,
    #[schema(example = "2025-08-31")]
    pub end_date: Option<String>,
    pub remarks: Option<String>,
    /// Defaults to `Pending`.
    pub status: Option<PlacementStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_defaults_to_absent_and_ids_are_lenient() {
        let req: PlacementRequest =
            serde_json::from_str(r#"{"student_id":"3","company_id":2,"advisor_id":""}"#).unwrap();
        assert_eq!(req.student_id, Some(3));
        assert_eq!(req.company_id, Some(2));
        assert_eq!(req.advisor_id, None);
        assert!(req.status.is_none());

        let req: PlacementRequest = serde_json::from_str(r#"{"status":"Ongoing"}"#).unwrap();
        assert_eq!(req.status, Some(PlacementStatus::Ongoing));
    }
}
