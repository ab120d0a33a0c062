//! # Public API
//!
//! The song page, the PDF export and the chord panel all go through the same
//! pipeline:
//!
//! 1. Detect the format from the raw text (`#mic#` sentinel)
//! 2. Strip the sentinel
//! 3. Detect the original key
//! 4. Transpose every chord (this also applies the spelling policy)
//! 5. Detect the key of the transposed text
//! 6. Drop chords when they are hidden
//! 7. Render to HTML or lay out onto a PDF page writer
//!
//! ## Typical Usage
//!
//! ```rust
//! use cifra_core::{render_song, RenderOptions};
//!
//! let options = RenderOptions { transpose: 3, ..RenderOptions::default() };
//! let song = render_song("#mic#\n[Am]Deus [F]está [C]aqui", &options);
//!
//! assert_eq!(song.original_key.map(|k| k.name()), Some("A"));
//! assert_eq!(song.key.map(|k| k.name()), Some("C"));
//! assert!(song.html.contains(r#"<span class="chord">D#</span>"#));
//! ```

use crate::chord::{parse_token, PitchClass};
use crate::columns::{split_columns, Columns};
use crate::format::{detect_format, strip_sentinel, SongFormat};
use crate::key::detect_key;
use crate::render::html::{container_class, render_html, render_html_body};
use crate::render::pdf::{layout_pdf, DrawList, DrawOp, ImageRef, PageWriter, PdfHeader, PdfLayout};
use crate::song::{strip_chords, Song, SongMeta};
use crate::transpose::{transpose_chord, transpose_with, Spelling};
use serde::{Deserialize, Serialize};

/// Options of a single render, usually taken from the request.
///
/// Field names are kebab-case in config files; the camelCase names used by
/// web requests (`showChords`, `twoColumns`) are accepted too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RenderOptions {
    /// Semitones to move every chord by.
    pub transpose: i32,
    /// When false, chords are removed and only the lyrics are shown.
    #[serde(alias = "showChords")]
    pub show_chords: bool,
    pub spelling: Spelling,
    /// Force a format instead of detecting it from the sentinel.
    pub format: Option<SongFormat>,
    /// Also produce a two-column split of the HTML.
    #[serde(alias = "twoColumns")]
    pub two_columns: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            transpose: 0,
            show_chords: true,
            spelling: Spelling::Sharps,
            format: None,
            two_columns: false,
        }
    }
}

/// A song ready for the song page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSong {
    pub format: SongFormat,
    /// Key of the text as written.
    pub original_key: Option<PitchClass>,
    /// Key after transposition.
    pub key: Option<PitchClass>,
    pub html: String,
    /// Present when two columns were requested. Each column is wrapped in the
    /// sheet container so it can be placed on its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Columns>,
}

/// Text after the chord stages of the pipeline, before rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedText {
    pub format: SongFormat,
    pub original_key: Option<PitchClass>,
    pub key: Option<PitchClass>,
    pub body: String,
}

/// Run steps 1-6 of the pipeline on raw song text.
pub fn prepare(text: &str, options: &RenderOptions) -> PreparedText {
    let format = options.format.unwrap_or_else(|| detect_format(text));
    prepare_body(strip_sentinel(text), format, options)
}

fn prepare_body(body: &str, format: SongFormat, options: &RenderOptions) -> PreparedText {
    let original_key = detect_key(body);
    let transposed = transpose_with(body, options.transpose, options.spelling);
    let key = detect_key(&transposed);
    let body = if options.show_chords {
        transposed
    } else {
        strip_chords(&transposed)
    };
    PreparedText {
        format,
        original_key,
        key,
        body,
    }
}

/// Render raw song text (sentinel included) for the song page.
pub fn render_song(text: &str, options: &RenderOptions) -> RenderedSong {
    let prepared = prepare(text, options);
    let html = render_html(&prepared.body, prepared.format);
    let columns = options
        .two_columns
        .then(|| render_columns(&prepared.body, prepared.format));

    RenderedSong {
        format: prepared.format,
        original_key: prepared.original_key,
        key: prepared.key,
        html,
        columns,
    }
}

/// Two-column HTML of already prepared text.
fn render_columns(body: &str, format: SongFormat) -> Columns {
    let inner = render_html_body(body, format);
    if inner.is_empty() {
        return Columns::default();
    }
    let class = container_class(body, format);
    let split = split_columns(&inner);
    let wrap = |html: &str, side: &str| format!("<div class=\"{} column-{}\">\n{}\n</div>", class, side, html.trim());

    Columns {
        left: wrap(&split.left, "left"),
        right: if split.is_single() {
            String::new()
        } else {
            wrap(&split.right, "right")
        },
    }
}

/// Header line announcing the key, e.g. `Tom: A (original: G)`.
///
/// The key declared in the frontmatter wins over the detected one so that
/// minor keys keep their `m`.
pub fn key_line(meta: &SongMeta, detected: Option<PitchClass>, options: &RenderOptions) -> Option<String> {
    let original = match meta.key.as_deref().and_then(|k| parse_token(k.trim())) {
        Some(declared) => declared,
        None => parse_token(detected?.name())?,
    };
    let current = transpose_chord(&original, options.transpose, options.spelling);
    if options.transpose.rem_euclid(12) == 0 {
        Some(format!("Tom: {}", current))
    } else {
        Some(format!("Tom: {} (original: {})", current, original))
    }
}

/// Lay out a parsed song, title block included, onto a page writer.
///
/// Returns the number of pages used.
pub fn export_pdf<W: PageWriter>(
    song: &Song,
    options: &RenderOptions,
    layout: &PdfLayout,
    logo: Option<ImageRef>,
    writer: &mut W,
) -> usize {
    let format = options.format.unwrap_or(song.format);
    let prepared = prepare_body(&song.body, format, options);
    let header = PdfHeader {
        title: song.meta.title.clone(),
        artist: song.meta.artist.clone(),
        key_line: key_line(&song.meta, prepared.original_key, options),
        logo,
    };
    layout_pdf(&prepared.body, prepared.format, &header, layout, writer)
}

/// Draw calls for raw song text with the default A4 layout and no header.
pub fn pdf_ops(text: &str, options: &RenderOptions) -> Vec<DrawOp> {
    let prepared = prepare(text, options);
    let mut list = DrawList::new();
    layout_pdf(&prepared.body, prepared.format, &PdfHeader::default(), &PdfLayout::default(), &mut list);
    list.into_ops()
}
