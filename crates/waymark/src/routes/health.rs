//! Health check endpoint.

use axum::{Json, extract::State};
use serde::Serialize;

use crate::export::QrStoreStatsSnapshot;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    locations: usize,
    uptime_secs: u64,
    qr: QrStoreStatsSnapshot,
}

/// Basic health check (is the server running?)
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        locations: state.registry.len(),
        uptime_secs: state.uptime_secs(),
        qr: state.qr_store.get_stats(),
    })
}
