use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use axum_extra::extract::CookieJar;
use sea_orm::ConnectionTrait;
use serde::de::DeserializeOwned;

use crate::entities::sea_orm_active_enums::UserRole;
use crate::error::{ApiError, ApiResult};
use crate::repositories::StudentRepository;
use crate::session::SessionUser;
use crate::state::AppState;

/// JSON body that tolerates a missing content type and an empty body (read as `{}`).
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::validation(format!("Invalid request body: {}", e.body_text())))?;

        let body: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &bytes
        };

        serde_json::from_slice(body)
            .map(ApiJson)
            .map_err(|e| ApiError::validation(format!("Invalid request body: {}", e)))
    }
}

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Any logged-in caller. Rejects with 403 when the cookie is missing or stale.
pub struct CurrentSession {
    pub token: String,
    pub user: SessionUser,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(&state.config.session_cookie_name)
            .map(|cookie| cookie.value().to_string())
            .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

        let user = state
            .sessions
            .get(&token)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Not logged in".to_string()))?;

        Ok(CurrentSession { token, user })
    }
}

impl CurrentSession {
    /// Students may only touch their own record; staff roles may read any.
    pub async fn ensure_student_access<C: ConnectionTrait>(
        &self,
        db: &C,
        student_id: i32,
    ) -> ApiResult<()> {
        if self.user.role != UserRole::Student {
            return Ok(());
        }
        let own = StudentRepository::new(db)
            .find_by_user_id(self.user.user_id)
            .await?;
        match own {
            Some(student) if student.id == student_id => Ok(()),
            _ => Err(ApiError::forbidden("Access denied.")),
        }
    }
}

/// A logged-in Admin.
pub struct AdminSession(pub SessionUser);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = CurrentSession::from_request_parts(parts, state).await?;
        if !session.user.is_admin() {
            tracing::warn!(
                "user {} ({}) denied admin access to {}",
                session.user.user_id,
                session.user.role.as_str(),
                parts.uri.path()
            );
            return Err(ApiError::forbidden("Access denied. Admins only."));
        }
        Ok(AdminSession(session.user))
    }
}
