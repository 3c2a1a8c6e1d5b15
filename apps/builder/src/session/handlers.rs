use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::export::ExportedFile;
use crate::models::Sector;
use crate::render::RenderedView;
use crate::session::SessionStatus;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SelectSectorRequest {
    pub sector: Sector,
}

/// GET /api/v1/session
pub async fn handle_get_session(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.session.lock().await.status())
}

/// POST /api/v1/session/sector
pub async fn handle_select_sector(
    State(state): State<AppState>,
    Json(req): Json<SelectSectorRequest>,
) -> Result<Json<RenderedView>, AppError> {
    let view = state.session.lock().await.select_sector(req.sector)?;
    Ok(Json(view))
}

/// DELETE /api/v1/session/sector
pub async fn handle_change_sector(State(state): State<AppState>) -> StatusCode {
    state.session.lock().await.change_sector();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/preview
pub async fn handle_preview(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let view = state.session.lock().await.preview()?;
    Ok(Html(view.html))
}

/// POST /api/v1/export
pub async fn handle_export(State(state): State<AppState>) -> Result<Json<ExportedFile>, AppError> {
    let exported = state.session.export(state.exporter.clone()).await?;
    info!("Export written: {} ({} bytes)", exported.file_name, exported.bytes);
    Ok(Json(exported))
}
