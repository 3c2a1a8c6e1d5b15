//! Add / update / remove for the repeatable sections (work history,
//! education, projects). Every operation yields a patch that replaces the
//! whole collection field.

use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::models::{EducationEntry, Experience, ProjectEntry, ResumeDocument, ResumePatch};

/// An entry type living in one of the document's collections.
pub trait CollectionEntry: Clone + Sized {
    /// Partial field set accepted by `update`.
    type Update;

    /// Human-readable collection name, for logs.
    const LABEL: &'static str;

    fn id(&self) -> Uuid;
    fn blank(id: Uuid) -> Self;
    fn merge(&mut self, update: Self::Update);
    fn collection(doc: &ResumeDocument) -> &[Self];
    fn into_patch(entries: Vec<Self>) -> ResumePatch;
}

/// Appends a blank entry with a fresh id. Returns the id with the patch.
pub fn add_entry<E: CollectionEntry>(doc: &ResumeDocument) -> (Uuid, ResumePatch) {
    let id = Uuid::new_v4();
    let mut entries = E::collection(doc).to_vec();
    entries.push(E::blank(id));
    debug!("Added {} entry {id}", E::LABEL);
    (id, E::into_patch(entries))
}

/// Drops the entry with `id`. `None` when no entry matches.
pub fn remove_entry<E: CollectionEntry>(doc: &ResumeDocument, id: Uuid) -> Option<ResumePatch> {
    let current = E::collection(doc);
    if !current.iter().any(|e| e.id() == id) {
        debug!("Remove of unknown {} entry {id} ignored", E::LABEL);
        return None;
    }
    let entries = current.iter().filter(|e| e.id() != id).cloned().collect();
    Some(E::into_patch(entries))
}

/// Merges `update` into the entry with `id`. `None` when no entry matches.
pub fn update_entry<E: CollectionEntry>(
    doc: &ResumeDocument,
    id: Uuid,
    update: E::Update,
) -> Option<ResumePatch> {
    let mut entries = E::collection(doc).to_vec();
    let Some(entry) = entries.iter_mut().find(|e| e.id() == id) else {
        debug!("Update of unknown {} entry {id} ignored", E::LABEL);
        return None;
    };
    entry.merge(update);
    Some(E::into_patch(entries))
}

/// Treats a blank optional value as "unset".
fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Work history
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceUpdate {
    pub company: Option<String>,
    pub position: Option<String>,
    pub start_month: Option<String>,
    pub end_month: Option<String>,
    pub is_current: Option<bool>,
    pub description: Option<String>,
}

impl CollectionEntry for Experience {
    type Update = ExperienceUpdate;
    const LABEL: &'static str = "work history";

    fn id(&self) -> Uuid {
        self.id
    }

    fn blank(id: Uuid) -> Self {
        Experience {
            id,
            company: String::new(),
            position: String::new(),
            start_month: String::new(),
            end_month: String::new(),
            is_current: false,
            description: String::new(),
        }
    }

    fn merge(&mut self, update: ExperienceUpdate) {
        if let Some(company) = update.company {
            self.company = company;
        }
        if let Some(position) = update.position {
            self.position = position;
        }
        if let Some(start_month) = update.start_month {
            self.start_month = start_month;
        }
        if let Some(end_month) = update.end_month {
            self.end_month = end_month;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(is_current) = update.is_current {
            self.is_current = is_current;
        }
        // A current job has no end date, whatever else the update carried.
        if self.is_current {
            self.end_month.clear();
        }
    }

    fn collection(doc: &ResumeDocument) -> &[Self] {
        &doc.work_history
    }

    fn into_patch(entries: Vec<Self>) -> ResumePatch {
        ResumePatch {
            work_history: Some(entries),
            ..ResumePatch::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Education
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationUpdate {
    pub institution: Option<String>,
    pub degree: Option<String>,
    pub field: Option<String>,
    pub graduation_month: Option<String>,
    /// An empty string clears the GPA.
    pub gpa: Option<String>,
}

impl CollectionEntry for EducationEntry {
    type Update = EducationUpdate;
    const LABEL: &'static str = "education";

    fn id(&self) -> Uuid {
        self.id
    }

    fn blank(id: Uuid) -> Self {
        EducationEntry {
            id,
            institution: String::new(),
            degree: String::new(),
            field: String::new(),
            graduation_month: String::new(),
            gpa: None,
        }
    }

    fn merge(&mut self, update: EducationUpdate) {
        if let Some(institution) = update.institution {
            self.institution = institution;
        }
        if let Some(degree) = update.degree {
            self.degree = degree;
        }
        if let Some(field) = update.field {
            self.field = field;
        }
        if let Some(graduation_month) = update.graduation_month {
            self.graduation_month = graduation_month;
        }
        if let Some(gpa) = update.gpa {
            self.gpa = non_blank(gpa);
        }
    }

    fn collection(doc: &ResumeDocument) -> &[Self] {
        &doc.education
    }

    fn into_patch(entries: Vec<Self>) -> ResumePatch {
        ResumePatch {
            education: Some(entries),
            ..ResumePatch::default()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectUpdate {
    pub title: Option<String>,
    pub tech_stack: Option<String>,
    pub description: Option<String>,
    pub role: Option<String>,
}

impl CollectionEntry for ProjectEntry {
    type Update = ProjectUpdate;
    const LABEL: &'static str = "project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn blank(id: Uuid) -> Self {
        ProjectEntry {
            id,
            title: String::new(),
            tech_stack: String::new(),
            description: String::new(),
            role: String::new(),
        }
    }

    fn merge(&mut self, update: ProjectUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(tech_stack) = update.tech_stack {
            self.tech_stack = tech_stack;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(role) = update.role {
            self.role = role;
        }
    }

    fn collection(doc: &ResumeDocument) -> &[Self] {
        &doc.projects
    }

    fn into_patch(entries: Vec<Self>) -> ResumePatch {
        ResumePatch {
            projects: Some(entries),
            ..ResumePatch::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(doc: &mut ResumeDocument, patch: Option<ResumePatch>) {
        if let Some(patch) = patch {
            doc.apply(patch);
        }
    }

    #[test]
    fn test_add_appends_blank_entries_in_order() {
        let mut doc = ResumeDocument::default();

        let (first, patch) = add_entry::<Experience>(&doc);
        doc.apply(patch);
        let (second, patch) = add_entry::<Experience>(&doc);
        doc.apply(patch);

        assert_ne!(first, second);
        let ids: Vec<Uuid> = doc.work_history.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(doc.work_history[0], Experience::blank(first));
    }

    #[test]
    fn test_update_touches_only_matching_entry() {
        let mut doc = ResumeDocument::default();
        let (a, patch) = add_entry::<ProjectEntry>(&doc);
        doc.apply(patch);
        let (b, patch) = add_entry::<ProjectEntry>(&doc);
        doc.apply(patch);

        let patch = update_entry::<ProjectEntry>(
            &doc,
            b,
            ProjectUpdate {
                title: Some("Compiler".to_string()),
                tech_stack: Some("Rust".to_string()),
                ..ProjectUpdate::default()
            },
        );
        apply(&mut doc, patch);

        assert_eq!(doc.projects[0], ProjectEntry::blank(a));
        assert_eq!(doc.projects[1].id, b);
        assert_eq!(doc.projects[1].title, "Compiler");
        assert_eq!(doc.projects[1].tech_stack, "Rust");
        assert_eq!(doc.projects[1].role, "");
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut doc = ResumeDocument::default();
        let (_, patch) = add_entry::<EducationEntry>(&doc);
        doc.apply(patch);
        let before = doc.clone();

        assert!(remove_entry::<EducationEntry>(&doc, Uuid::new_v4()).is_none());
        assert!(update_entry::<EducationEntry>(
            &doc,
            Uuid::new_v4(),
            EducationUpdate::default()
        )
        .is_none());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_mixed_sequence_keeps_ids_and_order() {
        let mut doc = ResumeDocument::default();
        let mut expected = Vec::new();

        for _ in 0..4 {
            let (id, patch) = add_entry::<Experience>(&doc);
            doc.apply(patch);
            expected.push(id);
        }

        let patch = remove_entry::<Experience>(&doc, expected[1]);
        apply(&mut doc, patch);
        expected.remove(1);

        let patch = update_entry::<Experience>(
            &doc,
            expected[2],
            ExperienceUpdate {
                company: Some("Initech".to_string()),
                ..ExperienceUpdate::default()
            },
        );
        apply(&mut doc, patch);

        let (late, patch) = add_entry::<Experience>(&doc);
        doc.apply(patch);
        expected.push(late);

        let ids: Vec<Uuid> = doc.work_history.iter().map(|e| e.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(doc.work_history[2].company, "Initech");
        assert_eq!(
            doc.work_history
                .iter()
                .filter(|e| e.company == "Initech")
                .count(),
            1
        );
    }

    #[test]
    fn test_marking_current_clears_end_month() {
        let mut entry = Experience::blank(Uuid::new_v4());
        entry.merge(ExperienceUpdate {
            end_month: Some("2020-05".to_string()),
            ..ExperienceUpdate::default()
        });
        assert_eq!(entry.end_month, "2020-05");

        entry.merge(ExperienceUpdate {
            is_current: Some(true),
            ..ExperienceUpdate::default()
        });
        assert!(entry.is_current);
        assert_eq!(entry.end_month, "");

        // an end month sent while still current is dropped
        entry.merge(ExperienceUpdate {
            end_month: Some("2023-01".to_string()),
            ..ExperienceUpdate::default()
        });
        assert_eq!(entry.end_month, "");
    }

    #[test]
    fn test_blank_gpa_clears_value() {
        let mut entry = EducationEntry::blank(Uuid::new_v4());
        entry.merge(EducationUpdate {
            gpa: Some("3.9".to_string()),
            ..EducationUpdate::default()
        });
        assert_eq!(entry.gpa.as_deref(), Some("3.9"));

        entry.merge(EducationUpdate {
            gpa: Some("  ".to_string()),
            ..EducationUpdate::default()
        });
        assert_eq!(entry.gpa, None);
    }

    #[test]
    fn test_update_deserializes_camel_case() {
        let update: ExperienceUpdate =
            serde_json::from_str(r#"{"startMonth": "2021-01", "isCurrent": true}"#).unwrap();
        assert_eq!(update.start_month.as_deref(), Some("2021-01"));
        assert_eq!(update.is_current, Some(true));
        assert!(update.company.is_none());
    }
}
