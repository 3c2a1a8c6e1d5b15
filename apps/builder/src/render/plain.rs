//! Plain theme: black on white, uppercase rule-separated headings.

use askama::Template;

use super::{Header, Layout, Section, SectionKind};

pub struct PlainSection<'a> {
    pub title: &'static str,
    pub slug: &'static str,
    pub section: &'a Section,
}

#[derive(Template)]
#[template(path = "plain.html")]
pub struct PlainTemplate<'a> {
    pub anchor: &'static str,
    pub header: &'a Header,
    pub sections: Vec<PlainSection<'a>>,
}

fn title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Summary => "PROFESSIONAL SUMMARY",
        SectionKind::Skills => "SKILLS",
        SectionKind::Experience => "EXPERIENCE",
        SectionKind::Projects => "PROJECTS",
        SectionKind::Education => "EDUCATION",
    }
}

pub fn present(layout: &Layout) -> Result<String, askama::Error> {
    PlainTemplate {
        anchor: super::PREVIEW_ANCHOR,
        header: &layout.header,
        sections: layout
            .sections
            .iter()
            .map(|section| PlainSection {
                title: title(section.kind),
                slug: section.kind.slug(),
                section,
            })
            .collect(),
    }
    .render()
}
