//! Password-gated QR gallery and zip export.

use axum::{
    Form,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use chrono::Utc;
use serde::Deserialize;

use super::{ApiError, pages};
use crate::export::QrStore;
use crate::state::AppState;
use waymark_common::WaymarkError;
use waymark_common::constants::messages;

#[derive(Deserialize)]
pub struct AdminForm {
    #[serde(default)]
    password: String,
}

/// Admin password prompt
pub async fn admin_page() -> Html<String> {
    Html(pages::admin_login_page(None))
}

/// QR gallery, shown only for the correct admin password
pub async fn admin_gallery(
    State(state): State<AppState>,
    Form(form): Form<AdminForm>,
) -> Response {
    if !state.admin.verify(&form.password) {
        tracing::warn!("Admin gallery: wrong password");
        return (
            StatusCode::UNAUTHORIZED,
            Html(pages::admin_login_page(Some(messages::INCORRECT_ADMIN_PASSWORD))),
        )
            .into_response();
    }

    tracing::info!(codes = state.qr_store.len(), "Admin gallery viewed");
    Html(pages::admin_gallery_page(&state.qr_store)).into_response()
}

/// Download every QR code as `qr_codes_<timestamp>.zip`
pub async fn download_archive(
    State(state): State<AppState>,
    Form(form): Form<AdminForm>,
) -> Result<Response, ApiError> {
    if !state.admin.verify(&form.password) {
        tracing::warn!("Admin download: wrong password");
        return Err(WaymarkError::Unauthorized(messages::INCORRECT_ADMIN_PASSWORD.into()).into());
    }

    let bytes = state.qr_store.archive()?;
    let file_name = QrStore::archive_file_name(Utc::now());

    tracing::info!(file = %file_name, size = bytes.len(), "📦 QR archive downloaded");

    Ok((
        [
            (header::CONTENT_TYPE, "application/zip".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
