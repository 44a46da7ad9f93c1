use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ApiResult};
use crate::utils::deserialize::lenient_id;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = true)]
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DataResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Error envelope used by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "Missing student ID.")]
    pub message: String,
}

/// `{"id": ...}` body used by the DELETE verbs.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct IdRequest {
    #[serde(default, deserialize_with = "lenient_id")]
    #[schema(value_type = Option<i32>, example = 1)]
    pub id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IdQuery {
    #[serde(default, deserialize_with = "lenient_id")]
    #[param(value_type = Option<i32>)]
    pub id: Option<i32>,
}

/// Body id first, then the query string.
pub fn resolve_id(body: IdRequest, query: IdQuery, missing: &str) -> ApiResult<i32> {
    body.id
        .or(query.id)
        .ok_or_else(|| ApiError::validation(missing))
}

/// Accepts `YYYY-MM-DD`; blank means no date.
pub fn parse_optional_date(value: Option<&str>, field: &str) -> ApiResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::validation(format!("Invalid {} format, expected YYYY-MM-DD.", field))),
    }
}

/// Trims and drops blank strings.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_id_wins_over_query() {
        let id = resolve_id(IdRequest { id: Some(2) }, IdQuery { id: Some(9) }, "missing");
        assert_eq!(id.unwrap(), 2);
        let id = resolve_id(IdRequest::default(), IdQuery { id: Some(9) }, "missing");
        assert_eq!(id.unwrap(), 9);
        let err = resolve_id(IdRequest::default(), IdQuery::default(), "Requirement ID missing.");
        assert_eq!(err.unwrap_err().to_string(), "Requirement ID missing.");
    }

    #[test]
    fn dates_parse_or_stay_empty() {
        assert_eq!(parse_optional_date(None, "start_date").unwrap(), None);
        assert_eq!(parse_optional_date(Some(" "), "start_date").unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2025-06-01"), "start_date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1)
        );
        assert!(parse_optional_date(Some("06/01/2025"), "start_date").is_err());
    }
}
