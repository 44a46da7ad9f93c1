use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure modes surfaced to clients.
///
/// Business failures keep HTTP 200 and carry `success: false`; only
/// authorization and method errors change the status code.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Failed to upload file.")]
    Storage(#[from] std::io::Error),

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) | ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::OK,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Database(e) => tracing::error!("database error: {}", e),
            ApiError::Storage(e) => tracing::error!("storage error: {}", e),
            ApiError::Internal(e) => tracing::error!("internal error: {:#}", e),
            _ => tracing::debug!("request failed: {}", self),
        }

        let status = self.status_code();
        let body = Json(json!({
            "success": false,
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Repositories report through `anyhow`; database failures keep their own variant.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DbErr>() {
            Ok(db_err) => ApiError::Database(db_err),
            Err(err) => ApiError::Internal(err),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(format!("Invalid query parameters: {}", rejection.body_text()))
    }
}

/// Fallback for verbs an endpoint does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_keep_http_ok() {
        assert_eq!(
            ApiError::validation("Missing student ID.").status_code(),
            StatusCode::OK
        );
        assert_eq!(
            ApiError::Database(DbErr::Custom("boom".into())).status_code(),
            StatusCode::OK
        );
    }

    #[test]
    fn auth_and_method_errors_change_status() {
        assert_eq!(
            ApiError::forbidden("Access denied. Admins only.").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
    }

    #[test]
    fn anyhow_wrapped_db_errors_stay_database_errors() {
        let err: anyhow::Error = DbErr::Custom("connection refused".into()).into();
        assert!(matches!(ApiError::from(err), ApiError::Database(_)));

        let err = anyhow::anyhow!("something else");
        assert!(matches!(ApiError::from(err), ApiError::Internal(_)));
    }

    #[test]
    fn storage_error_hides_io_detail() {
        let err = ApiError::from(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "Failed to upload file.");
    }
}
