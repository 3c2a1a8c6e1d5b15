use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

use crate::editors::{CollectionEntry, IdentityUpdate};
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::render::RenderedView;
use crate::session::SessionController;
use crate::state::AppState;

/// Every edit answers with the stored document and the re-rendered preview.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditResponse {
    pub document: ResumeDocument,
    pub preview: RenderedView,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddEntryResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub edit: EditResponse,
}

#[derive(Deserialize)]
pub struct SummaryRequest {
    pub summary: String,
}

#[derive(Deserialize)]
pub struct SkillsTextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct HintRequest {
    pub hint: String,
}

fn edited(session: &SessionController, preview: RenderedView) -> Json<EditResponse> {
    Json(EditResponse {
        document: session.document().clone(),
        preview,
    })
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeDocument> {
    Json(state.session.lock().await.document().clone())
}

/// PATCH /api/v1/resume/identity
pub async fn handle_update_identity(
    State(state): State<AppState>,
    Json(update): Json<IdentityUpdate>,
) -> Result<Json<EditResponse>, AppError> {
    let mut session = state.session.lock().await;
    let preview = session.update_identity(update)?;
    Ok(edited(&session, preview))
}

/// PUT /api/v1/resume/summary
pub async fn handle_set_summary(
    State(state): State<AppState>,
    Json(req): Json<SummaryRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let mut session = state.session.lock().await;
    let preview = session.set_summary(req.summary)?;
    Ok(edited(&session, preview))
}

/// PUT /api/v1/resume/skills
pub async fn handle_set_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsTextRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let mut session = state.session.lock().await;
    let preview = session.set_skills_text(&req.text)?;
    Ok(edited(&session, preview))
}

/// DELETE /api/v1/resume/skills/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<EditResponse>, AppError> {
    let mut session = state.session.lock().await;
    let preview = session.remove_skill(index)?;
    Ok(edited(&session, preview))
}

/// POST /api/v1/resume/{work,education,projects}
pub async fn handle_add_entry<E>(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<AddEntryResponse>), AppError>
where
    E: CollectionEntry + Send + 'static,
{
    let mut session = state.session.lock().await;
    let (id, preview) = session.add_entry::<E>()?;
    let Json(edit) = edited(&session, preview);
    Ok((StatusCode::CREATED, Json(AddEntryResponse { id, edit })))
}

/// PATCH /api/v1/resume/{work,education,projects}/:id
pub async fn handle_update_entry<E>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<E::Update>,
) -> Result<Json<EditResponse>, AppError>
where
    E: CollectionEntry + Send + 'static,
    E::Update: DeserializeOwned + Send + 'static,
{
    let mut session = state.session.lock().await;
    let preview = session.update_entry::<E>(id, update)?;
    Ok(edited(&session, preview))
}

/// DELETE /api/v1/resume/{work,education,projects}/:id
pub async fn handle_remove_entry<E>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EditResponse>, AppError>
where
    E: CollectionEntry + Send + 'static,
{
    let mut session = state.session.lock().await;
    let preview = session.remove_entry::<E>(id)?;
    Ok(edited(&session, preview))
}

/// PUT /api/v1/suggestions/summary/hint
pub async fn handle_set_summary_hint(
    State(state): State<AppState>,
    Json(req): Json<HintRequest>,
) -> Result<StatusCode, AppError> {
    state.session.lock().await.set_summary_hint(req.hint)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/suggestions/skills
pub async fn handle_suggest_skills(
    State(state): State<AppState>,
) -> Result<Json<EditResponse>, AppError> {
    let preview = state.session.suggest_skills(state.suggester.clone()).await?;
    Ok(edited(&*state.session.lock().await, preview))
}

/// POST /api/v1/suggestions/summary
pub async fn handle_suggest_summary(
    State(state): State<AppState>,
) -> Result<Json<EditResponse>, AppError> {
    let preview = state.session.suggest_summary(state.suggester.clone()).await?;
    Ok(edited(&*state.session.lock().await, preview))
}
