//! Suggestion client. Turns a role title or free-text hints into skill or
//! summary suggestions.
//!
//! `Suggester` is the seam; `LlmSuggester` is the production backend and
//! tests swap in canned implementations. Callers hold an
//! `Arc<dyn Suggester>`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::llm_client::prompts::{skills_prompt, summary_prompt, SUGGESTION_SYSTEM};
use crate::llm_client::LlmClient;

/// Upper bound on the number of skills returned by one suggestion.
pub const MAX_SUGGESTED_SKILLS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SuggestionError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("suggestion service failed: {0}")]
    Upstream(String),
}

#[async_trait]
pub trait Suggester: Send + Sync {
    /// At most `MAX_SUGGESTED_SKILLS` trimmed, non-empty skills for the role.
    async fn suggest_skills(&self, role_title: &str) -> Result<Vec<String>, SuggestionError>;

    /// A summary paragraph built from the user's key points.
    async fn suggest_summary(&self, hints: &str) -> Result<String, SuggestionError>;
}

/// Parses a comma-delimited response into at most `MAX_SUGGESTED_SKILLS`
/// trimmed, non-empty items.
pub fn parse_skill_response(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTED_SKILLS)
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// LlmSuggester
// ────────────────────────────────────────────────────────────────────────────

/// Suggestion backend over the shared `LlmClient`. Without a client (no API
/// key configured) every call fails as an upstream error.
pub struct LlmSuggester {
    llm: Option<LlmClient>,
}

impl LlmSuggester {
    pub fn new(llm: Option<LlmClient>) -> Self {
        Self { llm }
    }

    fn client(&self) -> Result<&LlmClient, SuggestionError> {
        self.llm
            .as_ref()
            .ok_or_else(|| SuggestionError::Upstream("suggestion service is not configured".into()))
    }
}

#[async_trait]
impl Suggester for LlmSuggester {
    async fn suggest_skills(&self, role_title: &str) -> Result<Vec<String>, SuggestionError> {
        if role_title.trim().is_empty() {
            return Err(SuggestionError::InvalidInput("Job role is required".into()));
        }
        let llm = self.client()?;

        let text = llm
            .complete(&skills_prompt(role_title), SUGGESTION_SYSTEM)
            .await
            .map_err(|e| {
                warn!("Skill suggestion call failed: {e}");
                SuggestionError::Upstream(e.to_string())
            })?;

        let skills = parse_skill_response(&text);
        if skills.is_empty() {
            return Err(SuggestionError::Upstream(
                "response contained no skills".into(),
            ));
        }
        info!("Suggested {} skills for role '{}'", skills.len(), role_title.trim());
        Ok(skills)
    }

    async fn suggest_summary(&self, hints: &str) -> Result<String, SuggestionError> {
        if hints.trim().is_empty() {
            return Err(SuggestionError::InvalidInput("Key points are required".into()));
        }
        let llm = self.client()?;

        let summary = llm
            .complete(&summary_prompt(hints), SUGGESTION_SYSTEM)
            .await
            .map_err(|e| {
                warn!("Summary suggestion call failed: {e}");
                SuggestionError::Upstream(e.to_string())
            })?;

        info!("Suggested summary ({} chars)", summary.len());
        Ok(summary.trim().to_string())
    }
}
