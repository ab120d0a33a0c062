//! Line classification shared by the HTML and PDF renderers.
//!
//! | Line | Kind |
//! |---|---|
//! | `Intro:` / `Refrão` / `Ponte` ... alone on the line | `SectionHeading` |
//! | only chord tokens and whitespace | `ChordOnly` |
//! | chord tokens mixed with other text | `ChordLyric` |
//! | empty or whitespace | `Blank` |
//! | anything else | `Plain` |
//!
//! Bracketed text that is not a chord counts as ordinary text here, so a line
//! holding only `[x]` is a plain lyric and shows its brackets.

use crate::chord::{parse_token, CHORD_TOKEN_RE};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::trace;

lazy_static! {
    /// Section labels of a lyric sheet, alone on their line.
    pub static ref SECTION_HEADING_RE: Regex = Regex::new(
        r"(?i)^(Intro|Ponte|Solo|Bridge|Instrumental|Interlude|Refr[ãa]o|Estrofe|Verso):?\s*$"
    )
    .unwrap();

    /// A `**bold**` span. The renderers show the inner text in bold.
    pub static ref BOLD_SPAN_RE: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
}

/// What a single line of song text is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineKind {
    SectionHeading,
    ChordOnly,
    ChordLyric,
    Plain,
    Blank,
}

/// A piece of a line: literal text or the contents of a chord token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Chord(&'a str),
}

/// A piece of literal text, bold or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub bold: bool,
}

/// Split a line into text and chord segments, in order.
///
/// Empty text segments are left out. Bracket text that is not a chord stays
/// inside the surrounding text segment, brackets included.
pub fn split_chord_runs(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in CHORD_TOKEN_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if parse_token(inner.as_str()).is_none() {
            continue;
        }
        if whole.start() > last {
            segments.push(Segment::Text(&line[last..whole.start()]));
        }
        segments.push(Segment::Chord(inner.as_str()));
        last = whole.end();
    }
    if last < line.len() {
        segments.push(Segment::Text(&line[last..]));
    }
    segments
}

/// Split literal text into normal and bold runs. Bold runs drop the `**`.
pub fn split_bold_runs(text: &str) -> Vec<TextRun<'_>> {
    let mut runs = Vec::new();
    let mut last = 0;
    for caps in BOLD_SPAN_RE.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            runs.push(TextRun { text: &text[last..whole.start()], bold: false });
        }
        runs.push(TextRun { text: inner.as_str(), bold: true });
        last = whole.end();
    }
    if last < text.len() {
        runs.push(TextRun { text: &text[last..], bold: false });
    }
    runs
}

pub fn is_section_heading(line: &str) -> bool {
    SECTION_HEADING_RE.is_match(line.trim())
}

/// Classify one line of song text.
///
/// # Examples
/// ```
/// use cifra_core::lines::{classify_line, LineKind};
///
/// assert_eq!(classify_line("[C]    [G]"), LineKind::ChordOnly);
/// assert_eq!(classify_line("Hello world"), LineKind::Plain);
/// assert_eq!(classify_line("Refrão:"), LineKind::SectionHeading);
/// ```
pub fn classify_line(line: &str) -> LineKind {
    let kind = if line.trim().is_empty() {
        LineKind::Blank
    } else if is_section_heading(line) {
        LineKind::SectionHeading
    } else {
        let segments = split_chord_runs(line);
        let has_chord = segments.iter().any(|s| matches!(s, Segment::Chord(_)));
        let has_text = segments
            .iter()
            .any(|s| matches!(s, Segment::Text(t) if !t.trim().is_empty()));
        match (has_chord, has_text) {
            (true, false) => LineKind::ChordOnly,
            (true, true) => LineKind::ChordLyric,
            _ => LineKind::Plain,
        }
    };
    trace!(?kind, line, "classified line");
    kind
}

/// Whether any line of `text` is a section heading.
pub fn has_section_headings(text: &str) -> bool {
    text.lines().any(is_section_heading)
}
