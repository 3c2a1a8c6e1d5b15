//! Session controller: sector choice, the editing lifecycle, re-rendering
//! after every patch, and the guarded async actions (suggestions, export).

pub mod handlers;

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::editors::{
    self, fields, skills, CollectionEntry, IdentityUpdate, RequestRejected, SkillsEditor,
    SummaryEditor,
};
use crate::export::{export_file_stem, ExportError, ExportedFile, Exporter};
use crate::models::{ResumeDocument, ResumePatch, Sector};
use crate::render::{render, RenderError, RenderedView, Theme};
use crate::store::RecordStore;
use crate::suggestions::{SuggestionError, Suggester};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    SectorUnselected,
    Active,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Please choose a sector first")]
    SectorNotSelected,

    #[error("A sector is already selected; change sector to start over")]
    SectorAlreadySelected,

    #[error(transparent)]
    Rejected(#[from] RequestRejected),

    #[error("{message}")]
    Suggestion {
        message: String,
        #[source]
        source: SuggestionError,
    },

    #[error("The sector was changed while the request was running")]
    Superseded,

    #[error("An export is already in progress")]
    ExportInProgress,

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("background task failed: {0}")]
    Task(#[from] JoinError),
}

/// Input for an in-flight suggestion, tagged with the session epoch it was
/// started in. Results from an older epoch are discarded.
#[derive(Debug, Clone)]
pub struct PendingRequest {
    epoch: u64,
    pub input: String,
}

/// Everything a caller needs to show the editing surface.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    pub state: SessionState,
    pub sector: Option<Sector>,
    pub theme: Option<Theme>,
    pub is_exporting: bool,
    /// Skills as shown in the single comma-separated text control.
    pub skills_text: String,
    pub skills: SkillsEditor,
    pub summary: SummaryEditor,
}

pub struct SessionController {
    store: RecordStore,
    sector: Option<Sector>,
    is_exporting: bool,
    skills: SkillsEditor,
    summary: SummaryEditor,
    /// Bumped on every sector change.
    epoch: u64,
}

impl SessionController {
    /// Starts in `Active` when a previous session persisted a sector.
    pub fn open(store: RecordStore) -> Self {
        let sector = store.stored_sector();
        match sector {
            Some(sector) => info!("Resuming session with sector {sector}"),
            None => info!("No sector chosen yet"),
        }
        Self {
            store,
            sector,
            is_exporting: false,
            skills: SkillsEditor::default(),
            summary: SummaryEditor::default(),
            epoch: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.sector.is_some() {
            SessionState::Active
        } else {
            SessionState::SectorUnselected
        }
    }

    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    pub fn is_exporting(&self) -> bool {
        self.is_exporting
    }

    pub fn document(&self) -> &ResumeDocument {
        self.store.document()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            state: self.state(),
            sector: self.sector,
            theme: self.sector.map(Theme::for_sector),
            is_exporting: self.is_exporting,
            skills_text: skills::join_skill_list(&self.store.document().skills),
            skills: self.skills.clone(),
            summary: self.summary.clone(),
        }
    }

    // ── sector lifecycle ───────────────────────────────────────────────────

    pub fn select_sector(&mut self, sector: Sector) -> Result<RenderedView, SessionError> {
        if self.sector.is_some() {
            return Err(SessionError::SectorAlreadySelected);
        }
        self.store.patch(ResumePatch::sector(sector));
        self.sector = Some(sector);
        info!("Sector selected: {sector}");
        self.preview()
    }

    /// Discards the document and all editor state and returns to sector
    /// selection. An export already running still completes.
    pub fn change_sector(&mut self) {
        self.store.reset();
        self.sector = None;
        self.skills = SkillsEditor::default();
        self.summary = SummaryEditor::default();
        self.epoch += 1;
        info!("Sector cleared, session reset");
    }

    fn theme(&self) -> Result<Theme, SessionError> {
        self.sector
            .map(Theme::for_sector)
            .ok_or(SessionError::SectorNotSelected)
    }

    pub fn preview(&self) -> Result<RenderedView, SessionError> {
        let theme = self.theme()?;
        Ok(render(self.store.document(), theme)?)
    }

    /// Applies `patch` (if any) and re-renders.
    fn commit(&mut self, patch: Option<ResumePatch>) -> Result<RenderedView, SessionError> {
        self.theme()?;
        if let Some(patch) = patch.filter(|p| !p.is_empty()) {
            self.store.patch(patch);
        }
        self.preview()
    }

    // ── document edits ─────────────────────────────────────────────────────

    pub fn add_entry<E: CollectionEntry>(&mut self) -> Result<(Uuid, RenderedView), SessionError> {
        self.theme()?;
        let (id, patch) = editors::add_entry::<E>(self.store.document());
        Ok((id, self.commit(Some(patch))?))
    }

    pub fn update_entry<E: CollectionEntry>(
        &mut self,
        id: Uuid,
        update: E::Update,
    ) -> Result<RenderedView, SessionError> {
        self.theme()?;
        let patch = editors::update_entry::<E>(self.store.document(), id, update);
        self.commit(patch)
    }

    pub fn remove_entry<E: CollectionEntry>(
        &mut self,
        id: Uuid,
    ) -> Result<RenderedView, SessionError> {
        self.theme()?;
        let patch = editors::remove_entry::<E>(self.store.document(), id);
        self.commit(patch)
    }

    pub fn update_identity(&mut self, update: IdentityUpdate) -> Result<RenderedView, SessionError> {
        self.theme()?;
        let patch = fields::update_identity(self.store.document(), update);
        self.commit(Some(patch))
    }

    pub fn set_summary(&mut self, summary: String) -> Result<RenderedView, SessionError> {
        self.commit(Some(fields::set_summary(summary)))
    }

    pub fn set_skills_text(&mut self, text: &str) -> Result<RenderedView, SessionError> {
        self.commit(Some(skills::set_skills_from_text(text)))
    }

    pub fn remove_skill(&mut self, index: usize) -> Result<RenderedView, SessionError> {
        self.theme()?;
        let patch = skills::remove_skill(self.store.document(), index);
        self.commit(patch)
    }

    pub fn set_summary_hint(&mut self, hint: String) -> Result<(), SessionError> {
        self.theme()?;
        self.summary.set_hint(hint);
        Ok(())
    }

    // ── suggestions ────────────────────────────────────────────────────────

    pub fn begin_skills_suggestion(&mut self) -> Result<PendingRequest, SessionError> {
        self.theme()?;
        let input = self.skills.begin_suggestion(self.store.document())?;
        Ok(PendingRequest {
            epoch: self.epoch,
            input,
        })
    }

    pub fn finish_skills_suggestion(
        &mut self,
        pending: &PendingRequest,
        result: Result<Vec<String>, SuggestionError>,
    ) -> Result<RenderedView, SessionError> {
        if pending.epoch != self.epoch {
            debug!("Discarding skill suggestion from a previous sector");
            return Err(SessionError::Superseded);
        }
        let failure = result.as_ref().err().cloned();
        let patch = self.skills.finish_suggestion(self.store.document(), result);
        if let Some(source) = failure {
            return Err(suggestion_failed(&self.skills.request.error, source));
        }
        self.commit(patch)
    }

    pub fn begin_summary_suggestion(&mut self) -> Result<PendingRequest, SessionError> {
        self.theme()?;
        let input = self.summary.begin_suggestion()?;
        Ok(PendingRequest {
            epoch: self.epoch,
            input,
        })
    }

    pub fn finish_summary_suggestion(
        &mut self,
        pending: &PendingRequest,
        result: Result<String, SuggestionError>,
    ) -> Result<RenderedView, SessionError> {
        if pending.epoch != self.epoch {
            debug!("Discarding summary suggestion from a previous sector");
            return Err(SessionError::Superseded);
        }
        let failure = result.as_ref().err().cloned();
        let patch = self.summary.finish_suggestion(result);
        if let Some(source) = failure {
            return Err(suggestion_failed(&self.summary.request.error, source));
        }
        self.commit(patch)
    }

    // ── export ─────────────────────────────────────────────────────────────

    /// Sets the exporting flag and captures what to export: the file stem and
    /// the current preview.
    pub fn begin_export(&mut self) -> Result<(String, RenderedView), SessionError> {
        if self.is_exporting {
            return Err(SessionError::ExportInProgress);
        }
        let view = self.preview()?;
        self.is_exporting = true;
        Ok((export_file_stem(&self.store.document().identity.full_name), view))
    }

    pub fn finish_export(&mut self) {
        self.is_exporting = false;
    }
}

fn suggestion_failed(message: &Option<String>, source: SuggestionError) -> SessionError {
    SessionError::Suggestion {
        message: message.clone().unwrap_or_else(|| source.to_string()),
        source,
    }
}

/// The controller behind an async mutex, shared by all request handlers.
#[derive(Clone)]
pub struct SharedSession {
    inner: Arc<Mutex<SessionController>>,
}

impl SharedSession {
    pub fn new(controller: SessionController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, SessionController> {
        self.inner.lock().await
    }

    /// Runs `call` without holding the lock, then `finish` under it. Both run
    /// on a spawned task, so dropping the caller does not cancel the action
    /// and a panicking collaborator still reaches `finish`.
    async fn run_detached<T, R, C, F>(
        &self,
        call: C,
        on_panic: fn(JoinError) -> T,
        finish: F,
    ) -> Result<R, SessionError>
    where
        T: Send + 'static,
        R: Send + 'static,
        C: Future<Output = T> + Send + 'static,
        F: FnOnce(&mut SessionController, T) -> R + Send + 'static,
    {
        let inner = Arc::clone(&self.inner);
        let task = tokio::spawn(async move {
            let outcome = match tokio::spawn(call).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Collaborator task failed: {e}");
                    on_panic(e)
                }
            };
            let mut session = inner.lock().await;
            finish(&mut *session, outcome)
        });
        Ok(task.await?)
    }

    pub async fn suggest_skills(
        &self,
        suggester: Arc<dyn Suggester>,
    ) -> Result<RenderedView, SessionError> {
        let pending = self.lock().await.begin_skills_suggestion()?;
        info!("Requesting skill suggestions for role '{}'", pending.input);

        let role = pending.input.clone();
        self.run_detached(
            async move { suggester.suggest_skills(&role).await },
            |e| Err(SuggestionError::Upstream(e.to_string())),
            move |session, result| session.finish_skills_suggestion(&pending, result),
        )
        .await?
    }

    pub async fn suggest_summary(
        &self,
        suggester: Arc<dyn Suggester>,
    ) -> Result<RenderedView, SessionError> {
        let pending = self.lock().await.begin_summary_suggestion()?;
        info!("Requesting summary suggestion");

        let hints = pending.input.clone();
        self.run_detached(
            async move { suggester.suggest_summary(&hints).await },
            |e| Err(SuggestionError::Upstream(e.to_string())),
            move |session, result| session.finish_summary_suggestion(&pending, result),
        )
        .await?
    }

    pub async fn export(&self, exporter: Arc<dyn Exporter>) -> Result<ExportedFile, SessionError> {
        let (stem, view) = self.lock().await.begin_export()?;
        info!("Exporting resume as '{stem}'");

        self.run_detached(
            async move { exporter.export(&stem, &view).await },
            |e| Err(ExportError::Io(std::io::Error::other(e.to_string()))),
            |session, result| {
                session.finish_export();
                result.map_err(SessionError::from)
            },
        )
        .await?
    }
}
