//! Preview rendering.
//!
//! `build_layout` is the single traversal that decides what is shown: which
//! sections exist, in which order, and which optional fields appear. The two
//! presenters (`plain`, `decorated`) only style that layout, so both themes
//! always show the same data.

pub mod dates;
pub mod decorated;
pub mod plain;

use serde::Serialize;
use thiserror::Error;

use crate::models::{ResumeDocument, Sector};

/// Id of the root element of every rendered view. Export looks for it.
pub const PREVIEW_ANCHOR: &str = "resume-preview";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Neutral layout tree
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    pub header: Header,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub role: Option<String>,
    /// Non-empty contact fields in display order.
    pub contacts: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Skills,
    Experience,
    Projects,
    Education,
}

impl SectionKind {
    pub fn slug(&self) -> &'static str {
        match self {
            SectionKind::Summary => "summary",
            SectionKind::Skills => "skills",
            SectionKind::Experience => "experience",
            SectionKind::Projects => "projects",
            SectionKind::Education => "education",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillColumns {
    pub left: Vec<String>,
    pub right: Vec<String>,
}

/// One dated/titled entry of a repeatable section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Item {
    pub heading: String,
    /// Right-aligned label: date range, graduation date or project role.
    pub aside: String,
    pub subheading: Option<String>,
    pub detail: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionBody {
    Paragraph(String),
    Columns(SkillColumns),
    Items(Vec<Item>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    pub kind: SectionKind,
    pub body: SectionBody,
}

impl Section {
    pub fn paragraph(&self) -> Option<&str> {
        match &self.body {
            SectionBody::Paragraph(text) => Some(text),
            _ => None,
        }
    }

    pub fn columns(&self) -> Option<&SkillColumns> {
        match &self.body {
            SectionBody::Columns(columns) => Some(columns),
            _ => None,
        }
    }

    pub fn items(&self) -> &[Item] {
        match &self.body {
            SectionBody::Items(items) => items,
            _ => &[],
        }
    }
}

impl Layout {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Traversal
// ────────────────────────────────────────────────────────────────────────────

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    non_empty(value).unwrap_or_else(|| placeholder.to_string())
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Splits skills into two display columns; the left one takes the extra
/// item when the count is odd.
pub fn split_skill_columns(skills: &[String]) -> SkillColumns {
    let split = skills.len().div_ceil(2);
    SkillColumns {
        left: skills[..split].to_vec(),
        right: skills[split..].to_vec(),
    }
}

fn build_header(doc: &ResumeDocument) -> Header {
    let identity = &doc.identity;
    let links = [identity.website.as_deref(), identity.professional_link.as_deref()];

    let contacts = [
        identity.email.as_str(),
        identity.phone.as_str(),
        identity.location.as_str(),
    ]
    .into_iter()
    .filter_map(non_empty)
    .chain(links.into_iter().flatten().filter_map(|l| non_empty(strip_scheme(l.trim()))))
    .collect();

    Header {
        name: or_placeholder(&identity.full_name, "Your Name"),
        role: non_empty(&identity.target_role),
        contacts,
    }
}

/// Projects the document into the neutral layout shared by every theme.
pub fn build_layout(doc: &ResumeDocument) -> Layout {
    let mut sections = Vec::new();

    if let Some(summary) = non_empty(&doc.summary) {
        sections.push(Section {
            kind: SectionKind::Summary,
            body: SectionBody::Paragraph(summary),
        });
    }

    if !doc.skills.is_empty() {
        sections.push(Section {
            kind: SectionKind::Skills,
            body: SectionBody::Columns(split_skill_columns(&doc.skills)),
        });
    }

    if !doc.work_history.is_empty() {
        let items = doc
            .work_history
            .iter()
            .map(|job| Item {
                heading: or_placeholder(&job.position, "Position Title"),
                aside: dates::date_range(&job.start_month, &job.end_month, job.is_current),
                subheading: Some(or_placeholder(&job.company, "Company Name")),
                detail: non_empty(&job.description),
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Experience,
            body: SectionBody::Items(items),
        });
    }

    if !doc.projects.is_empty() {
        let items = doc
            .projects
            .iter()
            .map(|project| Item {
                heading: or_placeholder(&project.title, "Project Title"),
                aside: or_placeholder(&project.role, "Role"),
                subheading: non_empty(&project.tech_stack).map(|s| format!("Tech Stack: {s}")),
                detail: non_empty(&project.description),
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Projects,
            body: SectionBody::Items(items),
        });
    }

    if !doc.education.is_empty() {
        let items = doc
            .education
            .iter()
            .map(|edu| {
                let degree = or_placeholder(&edu.degree, "Degree");
                let heading = match non_empty(&edu.field) {
                    Some(field) => format!("{degree} in {field}"),
                    None => degree,
                };
                Item {
                    heading,
                    aside: dates::format_month(&edu.graduation_month),
                    subheading: Some(or_placeholder(&edu.institution, "Institution Name")),
                    detail: edu
                        .gpa
                        .as_deref()
                        .and_then(non_empty)
                        .map(|gpa| format!("GPA: {gpa}")),
                }
            })
            .collect();
        sections.push(Section {
            kind: SectionKind::Education,
            body: SectionBody::Items(items),
        });
    }

    Layout {
        header: build_header(doc),
        sections,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Themes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Plain,
    Decorated,
}

impl Theme {
    pub fn for_sector(sector: Sector) -> Self {
        match sector {
            Sector::It => Theme::Plain,
            Sector::Other => Theme::Decorated,
        }
    }
}

/// A rendered preview: an HTML fragment rooted at `PREVIEW_ANCHOR`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedView {
    pub theme: Theme,
    pub html: String,
}

/// Renders `doc` with `theme`. Pure: same input, same output.
pub fn render(doc: &ResumeDocument, theme: Theme) -> Result<RenderedView, RenderError> {
    let layout = build_layout(doc);
    let html = match theme {
        Theme::Plain => plain::present(&layout)?,
        Theme::Decorated => decorated::present(&layout)?,
    };
    Ok(RenderedView { theme, html })
}
