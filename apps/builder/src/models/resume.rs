use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Document
// ────────────────────────────────────────────────────────────────────────────

/// The résumé being edited. There is exactly one live instance, owned by the
/// record store; everything else works on clones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub identity: Identity,
    pub summary: String,
    pub skills: Vec<String>,
    pub work_history: Vec<Experience>,
    pub education: Vec<EducationEntry>,
    pub projects: Vec<ProjectEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<Sector>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Identity {
    pub full_name: String,
    pub target_role: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_link: Option<String>,
}

/// One work-history entry. Months are kept as the raw `YYYY-MM` strings the
/// month inputs produce; formatting happens at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: Uuid,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub start_month: String,
    #[serde(default)]
    pub end_month: String,
    #[serde(default)]
    pub is_current: bool,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    pub id: Uuid,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub graduation_month: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectEntry {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    /// Free text, e.g. "Rust, Postgres, Redis".
    #[serde(default)]
    pub tech_stack: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub role: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Sector
// ────────────────────────────────────────────────────────────────────────────

/// Coarse domain tag chosen before editing starts. Drives the preview theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "IT")]
    It,
    Other,
}

impl Sector {
    /// The literal tag written to durable storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::It => "IT",
            Sector::Other => "Other",
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown sector tag '{0}'")]
pub struct UnknownSector(pub String);

impl FromStr for Sector {
    type Err = UnknownSector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "IT" => Ok(Sector::It),
            "Other" => Ok(Sector::Other),
            other => Err(UnknownSector(other.to_string())),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patch
// ────────────────────────────────────────────────────────────────────────────

/// A partial document. `None` leaves the field alone; `Some` replaces it
/// wholesale, including the collection fields (no element-wise merge).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePatch {
    pub identity: Option<Identity>,
    pub summary: Option<String>,
    pub skills: Option<Vec<String>>,
    pub work_history: Option<Vec<Experience>>,
    pub education: Option<Vec<EducationEntry>>,
    pub projects: Option<Vec<ProjectEntry>>,
    pub sector: Option<Sector>,
}

impl ResumePatch {
    pub fn identity(identity: Identity) -> Self {
        Self {
            identity: Some(identity),
            ..Self::default()
        }
    }

    pub fn summary(summary: impl Into<String>) -> Self {
        Self {
            summary: Some(summary.into()),
            ..Self::default()
        }
    }

    pub fn skills(skills: Vec<String>) -> Self {
        Self {
            skills: Some(skills),
            ..Self::default()
        }
    }

    pub fn sector(sector: Sector) -> Self {
        Self {
            sector: Some(sector),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ResumeDocument {
    /// Shallow merge of `patch` into `self`.
    pub fn apply(&mut self, patch: ResumePatch) {
        let ResumePatch {
            identity,
            summary,
            skills,
            work_history,
            education,
            projects,
            sector,
        } = patch;

        if let Some(identity) = identity {
            self.identity = identity;
        }
        if let Some(summary) = summary {
            self.summary = summary;
        }
        if let Some(skills) = skills {
            self.skills = skills;
        }
        if let Some(work_history) = work_history {
            self.work_history = work_history;
        }
        if let Some(education) = education {
            self.education = education;
        }
        if let Some(projects) = projects {
            self.projects = projects;
        }
        if let Some(sector) = sector {
            self.sector = Some(sector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_replaces_collections_wholesale() {
        let mut doc = ResumeDocument {
            skills: vec!["Rust".to_string(), "Go".to_string()],
            summary: "Keep me".to_string(),
            ..ResumeDocument::default()
        };

        doc.apply(ResumePatch::skills(vec!["Python".to_string()]));

        assert_eq!(doc.skills, vec!["Python".to_string()]);
        assert_eq!(doc.summary, "Keep me");
    }

    #[test]
    fn test_empty_patch_is_identity() {
        let mut doc = ResumeDocument {
            summary: "Unchanged".to_string(),
            ..ResumeDocument::default()
        };
        let before = doc.clone();
        let patch = ResumePatch::default();
        assert!(patch.is_empty());

        doc.apply(patch);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let doc = ResumeDocument {
            work_history: vec![Experience {
                id: Uuid::new_v4(),
                company: "Acme".to_string(),
                position: "Engineer".to_string(),
                start_month: "2021-01".to_string(),
                end_month: String::new(),
                is_current: true,
                description: String::new(),
            }],
            sector: Some(Sector::It),
            ..ResumeDocument::default()
        };

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["sector"], "IT");
        assert_eq!(json["workHistory"][0]["isCurrent"], true);
        assert_eq!(json["workHistory"][0]["startMonth"], "2021-01");
        assert!(json["identity"].get("website").is_none());
    }

    #[test]
    fn test_document_tolerates_missing_fields() {
        let doc: ResumeDocument =
            serde_json::from_str(r#"{"summary": "Only a summary"}"#).unwrap();
        assert_eq!(doc.summary, "Only a summary");
        assert!(doc.skills.is_empty());
        assert!(doc.sector.is_none());
    }

    #[test]
    fn test_sector_tag_parsing() {
        assert_eq!("IT".parse::<Sector>().unwrap(), Sector::It);
        assert_eq!("Other".parse::<Sector>().unwrap(), Sector::Other);
        assert!("it".parse::<Sector>().is_err());
        assert_eq!(Sector::Other.to_string(), "Other");
    }
}
