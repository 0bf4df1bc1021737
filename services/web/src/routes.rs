//! Web service routes

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::error;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

/// Body of the `/_ls` diagnostic route
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicDirListing {
    pub public_dir: String,
    pub files: Vec<String>,
}

/// Create the router for the web service
///
/// Anything not matched by an API route is looked up under the public
/// directory; paths with no file behind them get `index.html` so the client
/// router can take over.
pub fn create_router(state: AppState, debug_listing: bool) -> Router {
    let index = state.public_dir.join("index.html");
    let static_files = ServeDir::new(state.public_dir.as_path()).fallback(ServeFile::new(index));

    let mut router = Router::new().route("/api/health", get(health_check));
    if debug_listing {
        router = router.route("/_ls", get(list_public_dir));
    }

    router
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok"
    }))
}

/// List the immediate entries of the public directory
pub async fn list_public_dir(State(state): State<AppState>) -> ApiResult<Json<PublicDirListing>> {
    let mut entries = tokio::fs::read_dir(state.public_dir.as_path())
        .await
        .map_err(|e| {
            error!("Failed to read {}: {}", state.public_dir.display(), e);
            ApiError::from(e)
        })?;

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        files.push(entry.file_name().to_string_lossy().into_owned());
    }
    files.sort();

    Ok(Json(PublicDirListing {
        public_dir: state.public_dir.display().to_string(),
        files,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const INDEX: &str = "<!doctype html><div id=\"root\"></div>";

    fn public_dir() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), INDEX).unwrap();
        fs::create_dir(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets").join("app.css"), "body{}").unwrap();
        dir
    }

    async fn send_get(router: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| value.to_str().unwrap().to_string());
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
        (status, content_type, body)
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = public_dir();
        let router = create_router(AppState::new(dir.path()), false);

        let (status, _, body) = send_get(router, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_health_check_without_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let router = create_router(AppState::new(dir.path().join("missing")), false);

        let (status, _, _) = send_get(router, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_static_asset_is_served_with_content_type() {
        let dir = public_dir();
        let router = create_router(AppState::new(dir.path()), false);

        let (status, content_type, body) = send_get(router, "/assets/app.css").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/css"));
        assert_eq!(body, b"body{}");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let dir = public_dir();
        let router = create_router(AppState::new(dir.path()), false);

        let (status, content_type, body) = send_get(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(content_type.unwrap().starts_with("text/html"));
        assert_eq!(body, INDEX.as_bytes());
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        let dir = public_dir();

        for uri in ["/watch/v1", "/search", "/upload/new/deep"] {
            let router = create_router(AppState::new(dir.path()), false);
            let (status, _, body) = send_get(router, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, INDEX.as_bytes(), "{uri}");
        }
    }

    #[tokio::test]
    async fn test_missing_index_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let router = create_router(AppState::new(dir.path()), false);

        let (status, _, _) = send_get(router, "/watch/v1").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing_disabled_falls_back_to_index() {
        let dir = public_dir();
        let router = create_router(AppState::new(dir.path()), false);

        let (status, _, body) = send_get(router, "/_ls").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, INDEX.as_bytes());
    }

    #[tokio::test]
    async fn test_listing_enabled() {
        let dir = public_dir();
        let router = create_router(AppState::new(dir.path()), true);

        let (status, _, body) = send_get(router, "/_ls").await;
        assert_eq!(status, StatusCode::OK);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            json!({
                "publicDir": dir.path().display().to_string(),
                "files": ["assets", "index.html"],
            })
        );
    }

    #[tokio::test]
    async fn test_listing_unreadable_dir_is_server_error() {
        let dir = tempfile::tempdir().unwrap();
        let router = create_router(AppState::new(dir.path().join("missing")), true);

        let (status, _, body) = send_get(router, "/_ls").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(body["error"].as_str().unwrap().starts_with("Failed to list public directory"));
    }
}
