use axum::http::HeaderValue;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub const DEFAULT_CORS_ORIGINS: [&str; 2] = ["http://localhost:8000", "http://127.0.0.1:8000"];

/// Lets the listed origins call the API with credentials.
///
/// Wildcards are not allowed together with credentials, so requested methods and headers
/// are mirrored back instead.
pub fn cors_layer(origins: impl IntoIterator<Item = HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

#[cfg(test)]
mod tests {
    use crate::server::{
        ServerState,
        cors::{DEFAULT_CORS_ORIGINS, cors_layer},
        routes,
    };
    use axum::{
        Router,
        body::Body,
        http::{
            HeaderValue, Method, Request, StatusCode,
            header::{
                ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_METHODS,
                ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, ORIGIN,
            },
        },
    };
    use board_db::memory::MemoryStore;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let origins = DEFAULT_CORS_ORIGINS.map(HeaderValue::from_static);

        routes()
            .layer(cors_layer(origins))
            .with_state(ServerState {
                store: Arc::new(MemoryStore::new()),
            })
    }

    fn preflight(origin: &str) -> Request<Body> {
        Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/posts")
            .header(ORIGIN, origin)
            .header(ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn allowed_origin_gets_credentials() {
        let response = app()
            .oneshot(preflight("http://127.0.0.1:8000"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://127.0.0.1:8000"
        );
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_METHODS], "DELETE");
    }

    #[tokio::test]
    async fn other_origins_are_not_allowed() {
        let response = app()
            .oneshot(preflight("http://example.com"))
            .await
            .unwrap();

        assert!(
            response
                .headers()
                .get(ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }
}
