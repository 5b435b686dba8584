//! Deck serialization: themes, `.pptx` packaging and PDF export.

pub mod export;
pub mod pptx;
pub mod theme;

use std::path::PathBuf;

use serde::Serialize;

pub use export::PdfExporter;
pub use pptx::{DeckWriter, escape_xml, output_filename};
pub use theme::{Palette, Theme};

/// Files produced by one generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeckArtifacts {
    pub pptx_path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_path: Option<PathBuf>,
    pub slide_count: usize,
}
