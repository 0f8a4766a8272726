//! HTTP route handlers for Waymark.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use waymark_common::WaymarkError;

mod admin;
mod health;
mod location;
mod pages;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Player-facing pages
        .route("/", get(index))
        .route(
            "/location/{id}",
            get(location::show_location).post(location::submit_location),
        )

        // Health & Status
        .route("/health", get(health::health_check))

        // Admin (password-gated)
        .nest("/admin", admin_routes())

        .layer(TraceLayer::new_for_http())

        // Add shared state
        .with_state(state)
}

/// Admin routes (QR gallery and export)
fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::admin_page).post(admin::admin_gallery))
        .route("/download", post(admin::download_archive))
}

async fn index() -> Html<String> {
    Html(pages::index_page())
}

/// Handler error: maps [`WaymarkError`] to an HTTP response.
///
/// Server-side failures are logged and answered with a generic body.
pub struct ApiError(WaymarkError);

impl From<WaymarkError> for ApiError {
    fn from(err: WaymarkError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_fatal() {
            tracing::error!(error = %self.0, "Request failed");
            return (status, "Internal server error").into_response();
        }

        (status, self.0.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, HuntConfig, QrConfig};
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use std::io::Cursor;
    use tower::ServiceExt;
    use waymark_common::{CredentialRule, LocationRecord};

    const ADMIN: &str = "hunter2";

    fn config(rule: CredentialRule) -> AppConfig {
        AppConfig {
            base_url: Some("https://hunt.example.org".into()),
            admin_password: ADMIN.into(),
            hunt: HuntConfig {
                entry: Some("A".into()),
                credential_rule: rule,
                final_answer: Some("Eureka".into()),
                locations: vec![
                    LocationRecord::new("A", "Library", "Seek the lab.", "", Some("B")),
                    LocationRecord::new("B", "Lab", "Seek the oak.", "start", Some("C")),
                    LocationRecord::new("C", "Oak", "You made it.", "lab", None),
                ],
            },
            qr: QrConfig {
                module_size: 2,
                persist: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn app(rule: CredentialRule) -> Router {
        create_router(AppState::new(config(rule)).unwrap())
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_req(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let app = app(CredentialRule::default());

        let response = app.clone().oneshot(get_req("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Treasure Hunt"));

        let response = app.oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["locations"], 3);
        assert_eq!(json["qr"]["codes"], 3);
    }

    #[tokio::test]
    async fn test_unknown_location_is_404() {
        let app = app(CredentialRule::default());
        for uri in ["/location/Z", "/location/a"] {
            let response = app.clone().oneshot(get_req(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND);
        }
        let response = app.oneshot(form_req("/location/Z", "password=start")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_entry_shows_riddle_without_password() {
        let response = app(CredentialRule::default())
            .oneshot(get_req("/location/A"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Seek the lab."));
        assert!(!html.contains(r#"name="password""#));
    }

    #[tokio::test]
    async fn test_locked_location_prompts() {
        let response = app(CredentialRule::default())
            .oneshot(get_req("/location/B"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains(r#"name="password""#));
        assert!(!html.contains("Seek the oak."));
    }

    #[tokio::test]
    async fn test_wrong_password_rerenders_with_error() {
        let response = app(CredentialRule::default())
            .oneshot(form_req("/location/B", "password=library"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Incorrect password! Try again."));
        assert!(!html.contains("Seek the oak."));
    }

    #[tokio::test]
    async fn test_empty_post_counts_as_wrong_password() {
        let app = app(CredentialRule::default());
        for body in ["", "password="] {
            let response = app
                .clone()
                .oneshot(form_req("/location/B", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            let html = body_text(response).await;
            assert!(html.contains("Incorrect password! Try again."), "{:?}", body);
            assert!(!html.contains("Seek the oak."));
        }
    }

    #[tokio::test]
    async fn test_strip_whitespace_rule_unlocks_mixed_case_trailing_space() {
        let response = app(CredentialRule::LowercaseStripWhitespace)
            .oneshot(form_req("/location/B", "password=START+"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("Seek the oak."));
    }

    #[tokio::test]
    async fn test_lowercase_rule_keeps_mixed_case_trailing_space_locked() {
        let response = app(CredentialRule::Lowercase)
            .oneshot(form_req("/location/B", "password=START+"))
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(!html.contains("Seek the oak."));
        assert!(html.contains("Incorrect password! Try again."));
    }

    #[tokio::test]
    async fn test_unlock_is_not_remembered() {
        let app = app(CredentialRule::default());
        let response = app
            .clone()
            .oneshot(form_req("/location/B", "password=start"))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("Seek the oak."));

        let response = app.oneshot(get_req("/location/B")).await.unwrap();
        assert!(!body_text(response).await.contains("Seek the oak."));
    }

    #[tokio::test]
    async fn test_final_answer() {
        let app = app(CredentialRule::default());

        let response = app
            .clone()
            .oneshot(form_req("/location/C", "final_answer=Eureka"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["success"], true);
        assert!(json["completed_at"].is_string());

        let response = app
            .clone()
            .oneshot(form_req("/location/C", "final_answer=eureka"))
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("completed_at").is_none());

        let response = app
            .oneshot(form_req("/location/B", "final_answer=Eureka"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_admin_gallery_requires_password() {
        let app = app(CredentialRule::default());

        let response = app.clone().oneshot(get_req("/admin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!body_text(response).await.contains("data:image/png"));

        let response = app
            .clone()
            .oneshot(form_req("/admin", "password=wrong"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let html = body_text(response).await;
        assert!(html.contains("Incorrect admin password."));
        assert!(!html.contains("data:image/png"));

        let response = app
            .oneshot(form_req("/admin", &format!("password={}", ADMIN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert_eq!(html.matches("data:image/png;base64,").count(), 3);
        assert!(html.contains("https://hunt.example.org/location/C"));
    }

    #[tokio::test]
    async fn test_download_with_correct_password() {
        let response = app(CredentialRule::default())
            .oneshot(form_req("/admin/download", &format!("password={}", ADMIN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
        let disposition = response.headers()[header::CONTENT_DISPOSITION]
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment; filename=\"qr_codes_"));
        assert!(disposition.ends_with(".zip\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes.to_vec())).unwrap();
        assert_eq!(archive.len(), 3);
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        assert_eq!(names, ["A.png", "B.png", "C.png"]);
    }

    #[tokio::test]
    async fn test_download_with_wrong_password_is_unauthorized() {
        let response = app(CredentialRule::default())
            .oneshot(form_req("/admin/download", "password=nope"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(!bytes.starts_with(b"PK"));
    }

    #[tokio::test]
    async fn test_fatal_error_body_is_generic() {
        let response =
            ApiError::from(WaymarkError::Archive("secret detail".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert_eq!(body, "Internal server error");
        assert!(!body.contains("secret detail"));
    }

    #[tokio::test]
    async fn test_client_error_body_carries_message() {
        let response = ApiError::from(WaymarkError::NotFound("Z".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("Location not found: Z"));
    }
}
