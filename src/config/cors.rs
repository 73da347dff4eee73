use axum::http::header;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

const PREFLIGHT_MAX_AGE_SECS: u64 = 86400;

/// Cross-origin requests are accepted from anywhere, with whatever headers the
/// browser asks for. Credentials stay off, since a wildcard origin cannot be
/// combined with them.
pub fn create_cors_layer() -> CorsLayer {
    tracing::debug!("CORS: allowing any origin");

    CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(AllowMethods::any())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .max_age(std::time::Duration::from_secs(PREFLIGHT_MAX_AGE_SECS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use axum::{routing::post, Router};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_preflight_accepts_any_origin_and_requested_headers() {
        let app = Router::new()
            .route("/events", post(|| async { StatusCode::CREATED }))
            .layer(create_cors_layer());

        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/events")
            .header(header::ORIGIN, "https://frontend.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-api-client,content-type")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert!(response.status().is_success());
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");

        let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .to_ascii_lowercase();
        assert!(allowed.contains("x-api-client"), "allowed: {}", allowed);
        assert!(allowed.contains("content-type"), "allowed: {}", allowed);

        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "*");
        assert!(headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).is_none());
    }
}
