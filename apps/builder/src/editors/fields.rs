//! Flat-field editors: identity and summary.

use serde::Deserialize;

use crate::models::{ResumeDocument, ResumePatch};

/// Partial identity. Only the supplied fields change; a blank website or
/// professional link unsets it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IdentityUpdate {
    pub full_name: Option<String>,
    pub target_role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub professional_link: Option<String>,
}

pub fn update_identity(doc: &ResumeDocument, update: IdentityUpdate) -> ResumePatch {
    let mut identity = doc.identity.clone();

    if let Some(full_name) = update.full_name {
        identity.full_name = full_name;
    }
    if let Some(target_role) = update.target_role {
        identity.target_role = target_role;
    }
    if let Some(email) = update.email {
        identity.email = email;
    }
    if let Some(phone) = update.phone {
        identity.phone = phone;
    }
    if let Some(location) = update.location {
        identity.location = location;
    }
    if let Some(website) = update.website {
        identity.website = Some(website).filter(|w| !w.trim().is_empty());
    }
    if let Some(link) = update.professional_link {
        identity.professional_link = Some(link).filter(|l| !l.trim().is_empty());
    }

    ResumePatch::identity(identity)
}

pub fn set_summary(summary: impl Into<String>) -> ResumePatch {
    ResumePatch::summary(summary)
}
