//! # Rendering
//!
//! Turns chord-annotated text into something a reader can look at. Both
//! targets walk the text line by line and classify each line with
//! [`crate::lines::classify_line`]; they differ only in what they emit.
//!
//! ## Sub-modules
//! - `html` - HTML fragment for the song page
//! - `pdf` - positioned draw operations for an A4 page writer
//!
//! Rendering is a pure function of its inputs. Text is expected to be trusted
//! plain text and is not HTML-escaped.

pub mod html;
pub mod pdf;

pub use html::{render_html, render_html_body};
pub use pdf::{
    layout_pdf, render_pdf, Color, DrawList, DrawOp, Font, ImageRef, PageWriter, PdfHeader,
    PdfLayout,
};

use crate::format::SongFormat;
use serde::{Deserialize, Serialize};

/// Output surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderTarget {
    #[default]
    Html,
    Pdf,
}

/// Result of [`render`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "target", content = "output", rename_all = "lowercase")]
pub enum RenderedOutput {
    Html(String),
    Pdf(Vec<DrawOp>),
}

impl RenderedOutput {
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedOutput::Html(html) => html.is_empty(),
            RenderedOutput::Pdf(ops) => ops.is_empty(),
        }
    }
}

/// Render `text` for the given target with default layout settings.
///
/// ```
/// use cifra_core::{render, RenderTarget, RenderedOutput, SongFormat};
///
/// let out = render("[C]Hello", SongFormat::Separate, RenderTarget::Html);
/// assert!(matches!(out, RenderedOutput::Html(ref html) if html.contains(r#"<span class="chord">C</span>"#)));
///
/// assert!(render("", SongFormat::Inline, RenderTarget::Pdf).is_empty());
/// ```
pub fn render(text: &str, format: SongFormat, target: RenderTarget) -> RenderedOutput {
    match target {
        RenderTarget::Html => RenderedOutput::Html(render_html(text, format)),
        RenderTarget::Pdf => RenderedOutput::Pdf(render_pdf(text, format)),
    }
}
