//! Two-column layout of rendered song HTML.
//!
//! The HTML is cut into segments with the first strategy that yields more
//! than two of them:
//!
//! 1. after double line breaks (`<br><br>`)
//! 2. before section headings
//! 3. before chord sections (a chord line with its lyric)
//! 4. after paragraphs and blank-line spacers
//!
//! The first half of the segments (rounded up) goes left, the rest right.
//! A chorus block that would end the left column moves to the right unless
//! the right column already opens with a heading. Fewer than four segments
//! keep everything in the left column.
//!
//! Segments are contiguous slices of the input, so `left + right` is always
//! the input, byte for byte.

use crate::lines::SECTION_HEADING_RE;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use tracing::debug;

lazy_static! {
    static ref DOUBLE_BREAK_RE: Regex = Regex::new(r"(?i)(?:<br\s*/?>\s*){2,}").unwrap();
    static ref HEADING_BLOCK_RE: Regex = Regex::new(r#"<div class="section-heading""#).unwrap();
    static ref CHORD_SECTION_RE: Regex = Regex::new(r#"<div class="chord-section""#).unwrap();
    static ref PARAGRAPH_END_RE: Regex =
        Regex::new(r#"(?i)</p>|<div class="spacer"></div>"#).unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref CHORUS_RE: Regex = Regex::new(r"(?i)^refr[ãa]o:?$").unwrap();
}

/// Fewer segments than this and the song stays in one column.
pub const MIN_SEGMENTS: usize = 4;

/// How the HTML was cut into segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitStrategy {
    DoubleBreak,
    SectionHeading,
    ChordSection,
    Paragraph,
}

impl SplitStrategy {
    const ORDER: [SplitStrategy; 4] = [
        SplitStrategy::DoubleBreak,
        SplitStrategy::SectionHeading,
        SplitStrategy::ChordSection,
        SplitStrategy::Paragraph,
    ];

    fn pattern(self) -> &'static Regex {
        match self {
            SplitStrategy::DoubleBreak => &DOUBLE_BREAK_RE,
            SplitStrategy::SectionHeading => &HEADING_BLOCK_RE,
            SplitStrategy::ChordSection => &CHORD_SECTION_RE,
            SplitStrategy::Paragraph => &PARAGRAPH_END_RE,
        }
    }

    /// Whether a segment starts at the match or just after it.
    fn cuts_before(self) -> bool {
        matches!(self, SplitStrategy::SectionHeading | SplitStrategy::ChordSection)
    }
}

/// The two columns. `right` is empty for single-column songs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Columns {
    pub left: String,
    pub right: String,
}

impl Columns {
    pub fn is_single(&self) -> bool {
        self.right.is_empty()
    }
}

/// Split `html` into two balanced columns.
///
/// ```
/// use cifra_core::split_columns;
///
/// let html = "<p>one</p><p>two</p><p>three</p><p>four</p>";
/// let columns = split_columns(html);
/// assert_eq!(columns.left, "<p>one</p><p>two</p>");
/// assert_eq!(columns.right, "<p>three</p><p>four</p>");
///
/// assert!(split_columns("<p>only</p>").is_single());
/// ```
pub fn split_columns(html: &str) -> Columns {
    let Some((strategy, segments)) = segment(html) else {
        return single(html);
    };
    if segments.len() < MIN_SEGMENTS {
        return single(html);
    }

    let mut left_count = (segments.len() + 1) / 2;
    if is_chorus_block(segments[left_count - 1]) && !starts_with_heading(segments[left_count]) {
        left_count -= 1;
    }
    debug!(?strategy, segments = segments.len(), left = left_count, "split song into columns");

    Columns {
        left: segments[..left_count].concat(),
        right: segments[left_count..].concat(),
    }
}

fn single(html: &str) -> Columns {
    Columns {
        left: html.to_string(),
        right: String::new(),
    }
}

/// Cut `html` with the first strategy that yields more than two segments.
pub fn segment(html: &str) -> Option<(SplitStrategy, Vec<&str>)> {
    SplitStrategy::ORDER.iter().find_map(|&strategy| {
        let segments = cut(html, strategy);
        (segments.len() > 2).then_some((strategy, segments))
    })
}

fn cut(html: &str, strategy: SplitStrategy) -> Vec<&str> {
    let mut cuts: Vec<usize> = strategy
        .pattern()
        .find_iter(html)
        .map(|m| if strategy.cuts_before() { m.start() } else { m.end() })
        .collect();
    cuts.push(html.len());

    // byte ranges; whitespace between blocks rides along with its neighbour
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    let mut start = 0;
    for end in cuts {
        if end <= start {
            continue;
        }
        let blank = html[start..end].trim().is_empty();
        match ranges.last_mut() {
            Some(last) if blank => last.1 = end,
            _ => ranges.push((start, end)),
        }
        start = end;
    }
    if ranges.len() > 1 && html[ranges[0].0..ranges[0].1].trim().is_empty() {
        ranges[1].0 = ranges[0].0;
        ranges.remove(0);
    }

    ranges.into_iter().map(|(from, to)| &html[from..to]).collect()
}

/// Visible text lines of an HTML fragment.
fn text_lines(html: &str) -> Vec<String> {
    TAG_RE
        .replace_all(html, "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_chorus_block(html: &str) -> bool {
    text_lines(html).iter().any(|line| CHORUS_RE.is_match(line))
}

fn starts_with_heading(html: &str) -> bool {
    text_lines(html)
        .first()
        .is_some_and(|line| SECTION_HEADING_RE.is_match(line))
}
