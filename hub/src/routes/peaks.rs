use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::header::{HeaderMap, HeaderName, HeaderValue};
use axum::routing::post;
use axum::{Json, Router};
use peaks_core::detect;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ApiError;
use crate::plot;
use crate::state::AppState;

/// Response header carrying the path of the rendered plot.
pub const PLOT_PATH_HEADER: HeaderName = HeaderName::from_static("x-plot-path");

/// Body shared by every `/api/peaks*` endpoint.
#[derive(Debug, Deserialize)]
pub struct PeaksBody {
    pub serie: Vec<f64>,
    pub threshold: f64,
}

/// Build peaks sub-router.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/peaks", post(api_peaks))
        .route("/api/peaks/plot", post(api_peaks_plot))
        .route("/api/peaks/detail", post(api_peaks_detail))
}

/// POST /api/peaks — points of interest as ascending indices.
async fn api_peaks(
    body: Result<Json<PeaksBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let detection = detect(&body.serie, body.threshold)?;
    tracing::debug!(
        samples = body.serie.len(),
        threshold = body.threshold,
        poi = detection.poi.len(),
        "peaks detected"
    );
    Ok(Json(json!({ "PoI": detection.poi })))
}

/// POST /api/peaks/plot — same answer as `/api/peaks`, plus a PNG on disk.
///
/// Plot failures are logged and the JSON answer is returned regardless; on
/// success the file path is reported in the `x-plot-path` header.
async fn api_peaks_plot(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PeaksBody>, JsonRejection>,
) -> Result<(HeaderMap, Json<Value>), ApiError> {
    let Json(body) = body?;
    let detection = detect(&body.serie, body.threshold)?;
    let poi = detection.poi.clone();

    let opts = state.plot_options();
    let mut headers = HeaderMap::new();
    match tokio::task::spawn_blocking(move || plot::write_plot(&detection, &opts)).await {
        Ok(Ok(path)) => {
            tracing::info!("Plot written to {}", path.display());
            if let Ok(value) = HeaderValue::from_str(&path.display().to_string()) {
                headers.insert(PLOT_PATH_HEADER, value);
            }
        }
        Ok(Err(e)) => tracing::warn!("Plot rendering failed, returning PoI only: {e}"),
        Err(e) => tracing::warn!("Plot task aborted, returning PoI only: {e}"),
    }

    Ok((headers, Json(json!({ "PoI": poi }))))
}

/// POST /api/peaks/detail — PoI plus every retained extremum with its properties.
async fn api_peaks_detail(
    body: Result<Json<PeaksBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body?;
    let detection = detect(&body.serie, body.threshold)?;
    let points = serde_json::to_value(detection.points())?;
    Ok(Json(json!({
        "PoI": detection.poi,
        "threshold": detection.threshold,
        "points": points,
    })))
}
