use axum::{Extension, response::Json};
use serde_json::{Value, json};
use tracing::warn;

use crate::server::AppState;

pub async fn health(Extension(state): Extension<AppState>) -> Json<Value> {
    match state.service.store().stats().await {
        Ok(stats) => Json(json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
            "cached_tracks": stats.tracks,
        })),
        Err(e) => {
            warn!(error = %e, "cache unavailable");
            Json(json!({
                "status": "degraded",
                "version": env!("CARGO_PKG_VERSION"),
            }))
        }
    }
}
