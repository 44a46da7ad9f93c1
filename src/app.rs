use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::middleware;
use http::header;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_docs::ApiDoc;
use crate::config::Config;
use crate::error::ApiError;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::state::AppState;

async fn route_not_found() -> ApiError {
    ApiError::not_found("Endpoint not found.")
}

fn cors_layer(config: &Config) -> CorsLayer {
    let allowed_headers = [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        header::ACCEPT,
        header::ACCEPT_LANGUAGE,
    ];

    let allowed_methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];

    if config.cors_allowed_origins == "*" {
        // Wildcard origins cannot carry the session cookie.
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(false)
    } else {
        let allowed_origins: HashSet<String> = config
            .cors_allowed_origins
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let origins: Vec<http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
            .allow_credentials(true)
    }
}

pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        .merge(routes::health::create_route())
        .merge(routes::auth::create_route())
        .merge(routes::students::create_route())
        .merge(routes::companies::create_route())
        .merge(routes::advisors::create_route())
        .merge(routes::supervisors::create_route())
        .merge(routes::requirements::create_route())
        .merge(routes::student_requirements::create_route())
        .merge(routes::placements::create_route())
        .merge(routes::stats::create_route())
        .merge(routes::student::create_route(config.max_upload_bytes));

    if config.swagger_enabled {
        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    let uploads_dir = Path::new(&config.storage_root).join("uploads");
    let router = router
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .fallback(route_not_found)
        .layer(middleware::from_fn_with_state(state.clone(), http_logger));

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE, header::SET_COOKIE].into();

    let middleware = ServiceBuilder::new()
        .layer(cors_layer(&config))
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    router.layer(middleware).with_state(state)
}
