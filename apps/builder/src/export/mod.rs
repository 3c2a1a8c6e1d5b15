//! Export: turns a rendered preview into a downloadable, printable file.
//!
//! `Exporter` is the seam; `HtmlFileExporter` writes a standalone HTML
//! document with print CSS for the configured page geometry.

use std::path::PathBuf;

use askama::Template;
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::render::{RenderedView, PREVIEW_ANCHOR};

/// File stem used when the résumé has no name yet.
pub const DEFAULT_FILE_STEM: &str = "Resume";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("preview element '{0}' not found")]
    MissingAnchor(&'static str),

    #[error("failed to build printable document: {0}")]
    Template(#[from] askama::Error),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperSize {
    Letter,
    A4,
}

impl PaperSize {
    fn css(&self) -> &'static str {
        match self {
            PaperSize::Letter => "letter",
            PaperSize::A4 => "A4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    fn css(&self) -> &'static str {
        match self {
            Orientation::Portrait => "portrait",
            Orientation::Landscape => "landscape",
        }
    }
}

/// Printed page layout. Export configuration only; the document model never
/// sees it.
#[derive(Debug, Clone, Serialize)]
pub struct PageSetup {
    pub paper: PaperSize,
    pub orientation: Orientation,
    pub margin_in: f32,
}

/// US letter, portrait, 0.3" margins.
pub fn default_page_setup() -> PageSetup {
    PageSetup {
        paper: PaperSize::Letter,
        orientation: Orientation::Portrait,
        margin_in: 0.3,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ExportedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: usize,
}

#[async_trait]
pub trait Exporter: Send + Sync {
    async fn export(&self, file_stem: &str, view: &RenderedView)
        -> Result<ExportedFile, ExportError>;
}

/// File stem derived from the full name: blank names fall back to
/// `DEFAULT_FILE_STEM`, path and shell-hostile characters become `_`.
pub fn export_file_stem(full_name: &str) -> String {
    let cleaned: String = full_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').trim();
    if cleaned.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        cleaned.to_string()
    }
}

#[derive(Template)]
#[template(path = "printable.html")]
struct PrintableTemplate<'a> {
    title: &'a str,
    page_size: &'static str,
    orientation: &'static str,
    margin_in: f32,
    body: &'a str,
}

/// Wraps a rendered view into a standalone printable HTML document.
pub fn printable_document(
    title: &str,
    view: &RenderedView,
    page: &PageSetup,
) -> Result<String, ExportError> {
    if !view.html.contains(&format!("id=\"{PREVIEW_ANCHOR}\"")) {
        return Err(ExportError::MissingAnchor(PREVIEW_ANCHOR));
    }
    Ok(PrintableTemplate {
        title,
        page_size: page.paper.css(),
        orientation: page.orientation.css(),
        margin_in: page.margin_in,
        body: &view.html,
    }
    .render()?)
}

/// Writes `{stem}.html` into an output directory.
pub struct HtmlFileExporter {
    out_dir: PathBuf,
    page: PageSetup,
}

impl HtmlFileExporter {
    pub fn new(out_dir: impl Into<PathBuf>, page: PageSetup) -> Self {
        Self {
            out_dir: out_dir.into(),
            page,
        }
    }
}

#[async_trait]
impl Exporter for HtmlFileExporter {
    async fn export(
        &self,
        file_stem: &str,
        view: &RenderedView,
    ) -> Result<ExportedFile, ExportError> {
        let document = printable_document(file_stem, view, &self.page)?;

        tokio::fs::create_dir_all(&self.out_dir).await?;
        let file_name = format!("{file_stem}.html");
        let path = self.out_dir.join(&file_name);
        tokio::fs::write(&path, document.as_bytes()).await?;

        info!("Exported resume to {}", path.display());
        Ok(ExportedFile {
            path,
            file_name,
            bytes: document.len(),
        })
    }
}
