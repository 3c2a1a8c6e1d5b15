//! Section editors. Each editor turns user input into a `ResumePatch`; the
//! only state they keep themselves is transient (hint text, last error,
//! in-flight flag) and is never persisted.

pub mod collection;
pub mod fields;
pub mod handlers;
pub mod skills;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{ResumeDocument, ResumePatch};
use crate::suggestions::SuggestionError;

pub use collection::{
    add_entry, remove_entry, update_entry, CollectionEntry, EducationUpdate, ExperienceUpdate,
    ProjectUpdate,
};
pub use fields::IdentityUpdate;

pub const ROLE_REQUIRED_MESSAGE: &str = "Please enter a job role first";
pub const HINTS_REQUIRED_MESSAGE: &str = "Please enter some key points first";
const SKILLS_FAILED_MESSAGE: &str = "Failed to generate skills. Please try again.";
const SUMMARY_FAILED_MESSAGE: &str = "Failed to generate summary. Please try again.";

/// Why an editor refused to start a suggestion request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestRejected {
    #[error("{0}")]
    InvalidInput(String),

    #[error("a {0} suggestion is already in progress")]
    InFlight(&'static str),
}

/// Transient request state shared by both suggestion-capable editors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionState {
    pub in_flight: bool,
    pub error: Option<String>,
}

impl SuggestionState {
    fn begin(&mut self, kind: &'static str) -> Result<(), RequestRejected> {
        if self.in_flight {
            return Err(RequestRejected::InFlight(kind));
        }
        self.in_flight = true;
        self.error = None;
        Ok(())
    }

    fn reject(&mut self, message: &str) -> RequestRejected {
        self.error = Some(message.to_string());
        RequestRejected::InvalidInput(message.to_string())
    }

    fn fail(&mut self, err: &SuggestionError, fallback: &str) {
        let message = match err {
            SuggestionError::InvalidInput(message) => message.clone(),
            SuggestionError::Upstream(_) => fallback.to_string(),
        };
        self.error = Some(message);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillsEditor {
    #[serde(flatten)]
    pub request: SuggestionState,
}

impl SkillsEditor {
    /// Validates the role title and marks a request in flight. Returns the
    /// role title to send.
    pub fn begin_suggestion(&mut self, doc: &ResumeDocument) -> Result<String, RequestRejected> {
        let role = doc.identity.target_role.trim();
        if role.is_empty() {
            return Err(self.request.reject(ROLE_REQUIRED_MESSAGE));
        }
        self.request.begin("skills")?;
        Ok(role.to_string())
    }

    /// Clears the in-flight flag and turns a successful result into a patch
    /// against `doc`. Failures only set the editor error.
    pub fn finish_suggestion(
        &mut self,
        doc: &ResumeDocument,
        result: Result<Vec<String>, SuggestionError>,
    ) -> Option<ResumePatch> {
        self.request.in_flight = false;
        match result {
            Ok(suggested) => {
                let merged = skills::merge_suggested_skills(&doc.skills, &suggested);
                debug!(
                    "Merged skill suggestions: {} new of {} suggested",
                    merged.len() - doc.skills.len(),
                    suggested.len()
                );
                Some(ResumePatch::skills(merged))
            }
            Err(e) => {
                warn!("Skill suggestion failed: {e}");
                self.request.fail(&e, SKILLS_FAILED_MESSAGE);
                None
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Summary
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEditor {
    /// Pending key points for the next suggestion request.
    pub hint: String,
    #[serde(flatten)]
    pub request: SuggestionState,
}

impl SummaryEditor {
    pub fn set_hint(&mut self, hint: impl Into<String>) {
        self.hint = hint.into();
    }

    /// Validates the pending hint and marks a request in flight. Returns the
    /// hint text to send.
    pub fn begin_suggestion(&mut self) -> Result<String, RequestRejected> {
        if self.hint.trim().is_empty() {
            return Err(self.request.reject(HINTS_REQUIRED_MESSAGE));
        }
        self.request.begin("summary")?;
        Ok(self.hint.clone())
    }

    /// On success the summary is overwritten and the hint cleared.
    pub fn finish_suggestion(
        &mut self,
        result: Result<String, SuggestionError>,
    ) -> Option<ResumePatch> {
        self.request.in_flight = false;
        match result {
            Ok(summary) => {
                self.hint.clear();
                Some(fields::set_summary(summary))
            }
            Err(e) => {
                warn!("Summary suggestion failed: {e}");
                self.request.fail(&e, SUMMARY_FAILED_MESSAGE);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Identity;

    fn doc_with_role(role: &str, skills: &[&str]) -> ResumeDocument {
        ResumeDocument {
            identity: Identity {
                target_role: role.to_string(),
                ..Identity::default()
            },
            skills: skills.iter().map(|s| s.to_string()).collect(),
            ..ResumeDocument::default()
        }
    }

    #[test]
    fn test_skills_request_requires_role() {
        let mut editor = SkillsEditor::default();
        let err = editor.begin_suggestion(&doc_with_role("  ", &[])).unwrap_err();

        assert_eq!(err, RequestRejected::InvalidInput(ROLE_REQUIRED_MESSAGE.into()));
        assert_eq!(editor.request.error.as_deref(), Some(ROLE_REQUIRED_MESSAGE));
        assert!(!editor.request.in_flight);
    }

    #[test]
    fn test_skills_request_rejects_repeat_while_in_flight() {
        let mut editor = SkillsEditor::default();
        let doc = doc_with_role("Chef", &[]);

        assert_eq!(editor.begin_suggestion(&doc).unwrap(), "Chef");
        assert_eq!(
            editor.begin_suggestion(&doc).unwrap_err(),
            RequestRejected::InFlight("skills")
        );

        editor.finish_suggestion(&doc, Ok(vec![]));
        assert!(editor.begin_suggestion(&doc).is_ok());
    }

    #[test]
    fn test_skills_success_merges_without_duplicates() {
        let mut editor = SkillsEditor::default();
        let doc = doc_with_role("Chef", &["python", "Plating"]);
        editor.begin_suggestion(&doc).unwrap();

        let patch = editor
            .finish_suggestion(
                &doc,
                Ok(vec!["Python".to_string(), "Sauces".to_string()]),
            )
            .unwrap();

        assert_eq!(
            patch.skills.unwrap(),
            vec!["python".to_string(), "Plating".to_string(), "Sauces".to_string()]
        );
        assert!(!editor.request.in_flight);
        assert!(editor.request.error.is_none());
    }

    #[test]
    fn test_skills_failure_sets_error_and_clears_flag() {
        let mut editor = SkillsEditor::default();
        let doc = doc_with_role("Chef", &[]);
        editor.begin_suggestion(&doc).unwrap();

        let patch = editor.finish_suggestion(&doc, Err(SuggestionError::Upstream("503".into())));

        assert!(patch.is_none());
        assert!(!editor.request.in_flight);
        assert_eq!(editor.request.error.as_deref(), Some(SKILLS_FAILED_MESSAGE));
    }

    #[test]
    fn test_new_request_clears_previous_error() {
        let mut editor = SkillsEditor::default();
        let doc = doc_with_role("Chef", &[]);
        editor.begin_suggestion(&doc).unwrap();
        editor.finish_suggestion(&doc, Err(SuggestionError::Upstream("timeout".into())));

        editor.begin_suggestion(&doc).unwrap();
        assert!(editor.request.error.is_none());
    }

    #[test]
    fn test_summary_success_overwrites_and_clears_hint() {
        let mut editor = SummaryEditor::default();
        editor.set_hint("ten years, two restaurants");
        assert_eq!(editor.begin_suggestion().unwrap(), "ten years, two restaurants");

        let patch = editor
            .finish_suggestion(Ok("Seasoned chef.".to_string()))
            .unwrap();

        assert_eq!(patch.summary.as_deref(), Some("Seasoned chef."));
        assert_eq!(editor.hint, "");
        assert!(!editor.request.in_flight);
    }

    #[test]
    fn test_summary_failure_keeps_hint() {
        let mut editor = SummaryEditor::default();
        editor.set_hint("key points");
        editor.begin_suggestion().unwrap();

        assert!(editor
            .finish_suggestion(Err(SuggestionError::Upstream("boom".into())))
            .is_none());
        assert_eq!(editor.hint, "key points");
        assert_eq!(editor.request.error.as_deref(), Some(SUMMARY_FAILED_MESSAGE));
    }

    #[test]
    fn test_summary_requires_hint() {
        let mut editor = SummaryEditor::default();
        assert_eq!(
            editor.begin_suggestion().unwrap_err(),
            RequestRejected::InvalidInput(HINTS_REQUIRED_MESSAGE.into())
        );
    }
}
