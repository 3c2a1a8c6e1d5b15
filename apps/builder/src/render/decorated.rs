//! Decorated theme: gradient header, colored section accents and cards.

use askama::Template;

use super::{Header, Layout, Section, SectionKind};

pub struct DecoratedSection<'a> {
    pub title: &'static str,
    pub slug: &'static str,
    pub accent: &'static str,
    pub section: &'a Section,
}

#[derive(Template)]
#[template(path = "decorated.html")]
pub struct DecoratedTemplate<'a> {
    pub anchor: &'static str,
    pub header: &'a Header,
    pub sections: Vec<DecoratedSection<'a>>,
}

fn title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Summary => "Professional Summary",
        SectionKind::Skills => "Core Skills",
        SectionKind::Experience => "Professional Experience",
        SectionKind::Projects => "Projects",
        SectionKind::Education => "Education",
    }
}

fn accent(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Summary => "purple",
        SectionKind::Skills => "teal",
        SectionKind::Experience => "orange",
        SectionKind::Projects => "blue",
        SectionKind::Education => "indigo",
    }
}

pub fn present(layout: &Layout) -> Result<String, askama::Error> {
    DecoratedTemplate {
        anchor: super::PREVIEW_ANCHOR,
        header: &layout.header,
        sections: layout
            .sections
            .iter()
            .map(|section| DecoratedSection {
                title: title(section.kind),
                slug: section.kind.slug(),
                accent: accent(section.kind),
                section,
            })
            .collect(),
    }
    .render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResumeDocument;
    use crate::render::build_layout;

    #[test]
    fn test_decorated_titles_and_accents() {
        let doc = ResumeDocument {
            skills: vec!["Plating".to_string()],
            ..ResumeDocument::default()
        };
        let html = present(&build_layout(&doc)).unwrap();

        assert!(html.contains("Core Skills"));
        assert!(html.contains("resume__section--skills accent--teal"));
        assert!(!html.contains("PROFESSIONAL SUMMARY"));
    }
}
