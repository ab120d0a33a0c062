//! # cifra-core
//!
//! Chord sheets for liturgical songs: lyrics with chord names in square
//! brackets, either inline over their syllables (`#mic#` songs) or on
//! separate lines above the lyrics.
//!
//! ```text
//! #mic#
//! [Am]Deus [F]está [C]aqui
//! ```
//!
//! The engine parses chord tokens, transposes them, guesses the key, and
//! renders the sheet as HTML (one or two columns) or as draw calls for a PDF
//! page writer. Everything is pure and synchronous.
//!
//! ## Modules
//! - `chord` - chord tokens and pitch classes
//! - `transpose` - moving every chord by a number of semitones
//! - `format` - inline/separate detection from the `#mic#` sentinel
//! - `key` - key guessing from chord roots
//! - `lines` - line classification shared by the renderers
//! - `render` - HTML and PDF output
//! - `columns` - two-column split of rendered HTML
//! - `song` - song files with YAML frontmatter
//! - `api` - the full render pipeline

pub mod api;
pub mod chord;
pub mod columns;
pub mod error;
pub mod format;
pub mod key;
pub mod lines;
pub mod render;
pub mod song;
pub mod transpose;

pub use api::{export_pdf, key_line, pdf_ops, prepare, render_song, PreparedText, RenderOptions, RenderedSong};
pub use chord::{chord_tokens, distinct_chords, ChordToken, PitchClass};
pub use columns::{split_columns, Columns, SplitStrategy};
pub use error::CifraError;
pub use format::{detect_format, strip_sentinel, SongFormat, SENTINEL};
pub use key::detect_key;
pub use render::{render, render_html, DrawList, DrawOp, PageWriter, PdfHeader, PdfLayout, RenderTarget, RenderedOutput};
pub use song::{Song, SongMeta};
pub use transpose::{transpose, transpose_with, Spelling};

/// Render a song file (frontmatter allowed) to HTML.
///
/// ```rust
/// let html = cifra_core::render_source("---\ntitle: Amém\n---\n[C]Amém", 2)?;
/// assert!(html.contains(r#"<span class="chord">D</span>"#));
/// # Ok::<(), cifra_core::CifraError>(())
/// ```
///
/// # Errors
/// Returns [`CifraError::MetadataError`] when the frontmatter is not valid YAML.
pub fn render_source(source: &str, semitones: i32) -> Result<String, CifraError> {
    let song = Song::parse(source)?;
    let options = RenderOptions {
        transpose: semitones,
        format: Some(song.format),
        ..RenderOptions::default()
    };
    Ok(render_song(&song.body, &options).html)
}
