use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

use super::dto::{
    LoginRequest, LoginResponse, LoginUser, RegisterRequest, SessionUserInfo,
    VerifySessionResponse,
};
use crate::entities::sea_orm_active_enums::UserRole;
use crate::error::{ApiError, ApiResult, method_not_allowed};
use crate::extractor::ApiJson;
use crate::routes::response::{MessageResponse, non_blank};
use crate::services::accounts::{self, AccountInput};
use crate::session::SessionUser;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/auth/login",
            post(login).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/auth/verify_session",
            get(verify_session).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/auth/logout",
            post(logout).get(logout).fallback(method_not_allowed),
        )
        .route(
            "/api/v1/auth/register",
            post(register).fallback(method_not_allowed),
        )
}

fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Login with email and password; sets the session cookie on success
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, or `success: false` with \"Invalid credentials\"", body = LoginResponse)
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<(CookieJar, Json<LoginResponse>)> {
    let (Some(email), Some(password)) = (non_blank(payload.email), payload.password) else {
        return Err(ApiError::validation("Email and password required"));
    };

    let (user, student_id) = accounts::authenticate(&state.db, &email, password.trim()).await?;

    let token = state
        .sessions
        .create(SessionUser {
            user_id: user.id,
            role: user.role,
            name: user.name.clone(),
        })
        .await?;
    tracing::info!("user {} logged in as {}", user.id, user.role.as_str());

    let jar = jar.add(session_cookie(&state.config.session_cookie_name, token));
    let response = LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        user: LoginUser {
            id: user.id,
            student_id,
            name: user.name,
            email: user.email,
            role: user.role,
        },
    };

    Ok((jar, Json(response)))
}

/// Reports whether the caller holds a live session
#[utoipa::path(
    get,
    path = "/api/v1/auth/verify_session",
    responses(
        (status = 200, description = "Session state", body = VerifySessionResponse)
    ),
    tag = "Authentication"
)]
pub async fn verify_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<Json<VerifySessionResponse>> {
    let session = match jar.get(&state.config.session_cookie_name) {
        Some(cookie) => state.sessions.get(cookie.value()).await?,
        None => None,
    };

    let response = match session {
        Some(user) => VerifySessionResponse {
            logged_in: true,
            user: Some(SessionUserInfo {
                id: user.user_id,
                name: user.name,
                role: user.role,
            }),
        },
        None => VerifySessionResponse {
            logged_in: false,
            user: None,
        },
    };
    Ok(Json(response))
}

/// Ends the session and clears the cookie
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> ApiResult<(CookieJar, Json<MessageResponse>)> {
    let cookie_name = state.config.session_cookie_name.clone();
    if let Some(cookie) = jar.get(&cookie_name) {
        state.sessions.remove(cookie.value()).await?;
    }
    let jar = jar.remove(Cookie::build(cookie_name).path("/"));
    Ok((jar, Json(MessageResponse::ok("Logged out successfully"))))
}

/// Creates a bare user account
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered, or `success: false` on missing fields or a duplicate email", body = MessageResponse)
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (Some(name), Some(email), Some(password), Some(role)) = (
        non_blank(payload.name),
        non_blank(payload.email),
        payload.password.filter(|p| !p.is_empty()),
        payload.role,
    ) else {
        return Err(ApiError::validation("Missing required fields"));
    };

    if role == UserRole::Admin {
        return Err(ApiError::validation("Admin accounts cannot be self-registered"));
    }

    accounts::register_user(
        &state.db,
        state.config.password_hash_cost,
        AccountInput {
            name,
            email,
            password: Some(password),
        },
        role,
    )
    .await?;

    Ok(Json(MessageResponse::ok("User registered successfully")))
}
