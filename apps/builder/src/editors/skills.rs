//! Skills editor: delimited-text parsing, removal by index, and merging of
//! suggested skills.

use crate::models::{ResumeDocument, ResumePatch};

/// Case-insensitive membership test used for skill de-duplication.
pub fn contains_skill(skills: &[String], candidate: &str) -> bool {
    let candidate = candidate.to_lowercase();
    skills.iter().any(|s| s.to_lowercase() == candidate)
}

/// Splits comma-separated input into skills: trimmed, empties dropped, later
/// case-insensitive duplicates dropped, input order kept.
pub fn parse_skill_list(text: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for item in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !contains_skill(&skills, item) {
            skills.push(item.to_string());
        }
    }
    skills
}

/// Renders the skill list back into the single text control.
pub fn join_skill_list(skills: &[String]) -> String {
    skills.join(", ")
}

pub fn set_skills_from_text(text: &str) -> ResumePatch {
    ResumePatch::skills(parse_skill_list(text))
}

/// Removes the skill at `index`. `None` when the index is out of range.
pub fn remove_skill(doc: &ResumeDocument, index: usize) -> Option<ResumePatch> {
    if index >= doc.skills.len() {
        return None;
    }
    let mut skills = doc.skills.clone();
    skills.remove(index);
    Some(ResumePatch::skills(skills))
}

/// Existing skills stay where they are; suggestions not already present
/// (ignoring case) are appended in the order given.
pub fn merge_suggested_skills(existing: &[String], suggested: &[String]) -> Vec<String> {
    let mut merged = existing.to_vec();
    for skill in suggested {
        if !contains_skill(&merged, skill) {
            merged.push(skill.clone());
        }
    }
    merged
}
