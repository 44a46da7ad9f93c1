use std::time::Instant;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method};
use http_body_util::BodyExt;
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

const SENSITIVE_FIELDS: [&str; 7] = [
    "password",
    "new_password",
    "token",
    "session_token",
    "secret",
    "credential",
    "credentials",
];

const SENSITIVE_HEADERS: [&str; 4] = ["authorization", "cookie", "set-cookie", "x-api-key"];

fn should_ignore_path(path: &str) -> bool {
    matches!(path, "/health" | "/health/") || path.starts_with("/uploads/")
}

fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(|ct| ct.starts_with("multipart/form-data"))
        .unwrap_or(false)
}

fn filter_sensitive_data(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    if SENSITIVE_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
                        (key, Value::String("[REDACTED]".to_string()))
                    } else {
                        (key, filter_sensitive_data(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(filter_sensitive_data).collect()),
        other => other,
    }
}

fn filter_sensitive_headers(headers: &HeaderMap) -> HeaderMap {
    let mut filtered_headers = headers.clone();
    for header_name in SENSITIVE_HEADERS {
        if filtered_headers.contains_key(header_name) {
            filtered_headers.insert(header_name, HeaderValue::from_static("[REDACTED]"));
        }
    }
    filtered_headers
}

fn body_as_json(bytes: &Bytes) -> Value {
    serde_json::from_slice::<Value>(bytes)
        .map(filter_sensitive_data)
        .unwrap_or_else(|_| Value::Object(serde_json::Map::new()))
}

/// Logs one structured line per request with redacted bodies.
pub async fn http_logger(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let path = uri.path().to_string();

    if should_ignore_path(&path) || method == Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let start_time = Instant::now();
    let version = req.version();
    let req_headers = req.headers().clone();
    let x_request_id = req_headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    // Multipart bodies pass through untouched and are never logged.
    let (req, req_body) = if is_multipart(&req_headers) {
        (req, Value::Object(serde_json::Map::new()))
    } else {
        let (parts, body) = req.into_parts();
        let bytes = buffer_body("request", body).await?;
        let logged = body_as_json(&bytes);
        (Request::from_parts(parts, Body::from(bytes)), logged)
    };

    let mut response = next.run(req).await;
    let latency = start_time.elapsed();
    let status = response.status();
    let res_headers = response.headers().clone();

    let res_body = if matches!(method, Method::POST | Method::PUT | Method::DELETE) {
        let (parts, body) = response.into_parts();
        let bytes = buffer_body("response", body).await?;
        let logged = body_as_json(&bytes);
        response = Response::from_parts(parts, Body::from(bytes));
        logged
    } else {
        Value::Object(serde_json::Map::new())
    };

    tracing::info!(
        method = ?method,
        uri = ?uri,
        path = %path,
        x_request_id = %x_request_id,
        version = ?version,
        req_headers = ?filter_sensitive_headers(&req_headers),
        req_body = %req_body,
        status = ?status,
        latency_ms = latency.as_millis(),
        res_headers = ?filter_sensitive_headers(&res_headers),
        res_body = %res_body,
        app_env = %state.config.app_env,
        "HTTP request completed"
    );

    Ok(response)
}

async fn buffer_body<B>(direction: &str, body: B) -> Result<Bytes, ApiError>
where
    B: BodyExt,
    B::Error: std::fmt::Display,
{
    body.collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|err| ApiError::validation(format!("failed to read {direction} body: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn redacts_nested_sensitive_fields() {
        let filtered = filter_sensitive_data(json!({
            "email": "admin@example.com",
            "password": "secret",
            "users": [{"name": "A", "Password": "x"}]
        }));
        assert_eq!(filtered["email"], "admin@example.com");
        assert_eq!(filtered["password"], "[REDACTED]");
        assert_eq!(filtered["users"][0]["Password"], "[REDACTED]");
        assert_eq!(filtered["users"][0]["name"], "A");
    }

    #[test]
    fn redacts_cookie_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("cookie", HeaderValue::from_static("OJTSESSID=abc"));
        headers.insert("accept", HeaderValue::from_static("application/json"));
        let filtered = filter_sensitive_headers(&headers);
        assert_eq!(filtered["cookie"], "[REDACTED]");
        assert_eq!(filtered["accept"], "application/json");
    }

    #[test]
    fn uploads_and_health_are_not_logged() {
        assert!(should_ignore_path("/health"));
        assert!(should_ignore_path("/uploads/student_requirements/a.pdf"));
        assert!(!should_ignore_path("/api/v1/auth/login"));
    }
}
