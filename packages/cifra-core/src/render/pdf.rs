//! PDF page layout for song sheets.
//!
//! The layout does not talk to a PDF library. It drives a [`PageWriter`],
//! which the export service backs with whatever PDF writer it uses;
//! [`DrawList`] simply records the calls so they can be serialized or
//! inspected in tests.
//!
//! Coordinates follow PDF conventions: points, origin at the bottom-left of
//! an A4 page (595.28 × 841.89). The cursor starts below the top margin and
//! moves down one line at a time. Widths come from a fixed per-character
//! estimate rather than font metrics, which is close enough to keep chords
//! over their syllables.
//!
//! When the next line would cross the bottom margin the writer is asked for
//! a new page and the cursor returns to the top. In separate songs a chord
//! line is kept on the same page as the lyric line under it.

use crate::format::{strip_sentinel, SongFormat};
use crate::lines::{classify_line, split_bold_runs, split_chord_runs, LineKind, Segment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Font faces the layout asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Font {
    Regular,
    Bold,
}

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };
    pub const GRAY: Color = Color { r: 0.4, g: 0.4, b: 0.4 };
    pub const CHORD_BLUE: Color = Color { r: 0.1, g: 0.3, b: 0.7 };
}

/// An image the page writer knows how to load, e.g. the parish logo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

/// The drawing surface the layout writes to.
pub trait PageWriter {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Font, size: f32, color: Color);
    fn draw_image(&mut self, image: &ImageRef, x: f32, y: f32, width: f32, height: f32);
    /// Finish the current page and start a blank one.
    fn new_page(&mut self);
}

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawOp {
    #[serde(rename_all = "camelCase")]
    Text {
        text: String,
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        name: String,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    NewPage,
}

/// A [`PageWriter`] that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    pub ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages drawn so far (at least one once anything was drawn).
    pub fn page_count(&self) -> usize {
        if self.ops.is_empty() {
            0
        } else {
            1 + self.ops.iter().filter(|op| matches!(op, DrawOp::NewPage)).count()
        }
    }

    pub fn into_ops(self) -> Vec<DrawOp> {
        self.ops
    }
}

impl PageWriter for DrawList {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, font: Font, size: f32, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font,
            size,
            color,
        });
    }

    fn draw_image(&mut self, image: &ImageRef, x: f32, y: f32, width: f32, height: f32) {
        self.ops.push(DrawOp::Image {
            name: image.name.clone(),
            x,
            y,
            width,
            height,
        });
    }

    fn new_page(&mut self) {
        self.ops.push(DrawOp::NewPage);
    }
}

/// Page geometry and typography. Every field has an A4 default and can be
/// overridden from a YAML config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    /// Distance between consecutive baselines.
    pub line_height: f32,
    /// Extra space after a section heading.
    pub heading_gap: f32,
    /// Distance from a chord's baseline down to its lyric's baseline.
    pub chord_rise: f32,
    pub body_size: f32,
    pub heading_size: f32,
    pub chord_size: f32,
    pub title_size: f32,
    /// Width estimate per lyric character.
    pub body_char_width: f32,
    /// Width estimate per chord character.
    pub chord_char_width: f32,
    /// Space after each chord on a chord line.
    pub chord_gutter: f32,
    pub chord_color: Color,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self {
            page_width: 595.28,
            page_height: 841.89,
            margin_left: 50.0,
            margin_top: 60.0,
            margin_bottom: 80.0,
            line_height: 14.0,
            heading_gap: 4.0,
            chord_rise: 12.0,
            body_size: 11.0,
            heading_size: 12.0,
            chord_size: 10.0,
            title_size: 18.0,
            body_char_width: 5.5,
            chord_char_width: 7.5,
            chord_gutter: 22.0,
            chord_color: Color::CHORD_BLUE,
        }
    }
}

impl PdfLayout {
    fn top(&self) -> f32 {
        self.page_height - self.margin_top
    }

    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.body_char_width
    }

    fn chord_width(&self, chord: &str) -> f32 {
        chord.chars().count() as f32 * self.chord_char_width
    }

    /// How far below its own baseline a line of this kind draws.
    fn drop_below(&self, kind: LineKind) -> f32 {
        match kind {
            LineKind::ChordLyric => self.chord_rise,
            _ => 0.0,
        }
    }

    /// How far the cursor moves after a line of this kind.
    fn advance(&self, kind: LineKind) -> f32 {
        match kind {
            LineKind::SectionHeading => self.line_height + self.heading_gap,
            LineKind::ChordLyric => self.line_height + self.chord_rise,
            _ => self.line_height,
        }
    }
}

/// Title block drawn at the top of the first page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfHeader {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Already formatted, e.g. `"Tom: A (original: G)"`.
    pub key_line: Option<String>,
    pub logo: Option<ImageRef>,
}

impl PdfHeader {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.artist.is_none() && self.key_line.is_none() && self.logo.is_none()
    }
}

/// Lay out a song with default settings and no header, returning the recorded draw calls.
pub fn render_pdf(text: &str, format: SongFormat) -> Vec<DrawOp> {
    let mut list = DrawList::new();
    layout_pdf(text, format, &PdfHeader::default(), &PdfLayout::default(), &mut list);
    list.into_ops()
}

/// Lay out a song onto `writer`.
///
/// Returns the number of pages used (zero when nothing was drawn).
pub fn layout_pdf<W: PageWriter>(
    text: &str,
    format: SongFormat,
    header: &PdfHeader,
    layout: &PdfLayout,
    writer: &mut W,
) -> usize {
    let text = strip_sentinel(text);
    if text.trim().is_empty() && header.is_empty() {
        return 0;
    }

    let mut cursor = Cursor { y: layout.top(), pages: 1, pending_break: false };
    draw_header(header, layout, writer, &mut cursor);

    let lines: Vec<&str> = text.lines().collect();
    let kinds: Vec<LineKind> = lines.iter().map(|line| classify_line(line)).collect();

    for (i, (line, &kind)) in lines.iter().zip(&kinds).enumerate() {
        if kind == LineKind::Blank {
            // a blank line never opens a page of its own
            if cursor.pending_break {
                continue;
            }
            if cursor.y - layout.line_height < layout.margin_bottom {
                cursor.pending_break = true;
                cursor.y = layout.top();
            } else {
                cursor.y -= layout.line_height;
            }
            continue;
        }
        if cursor.pending_break {
            cursor.break_page(layout, writer);
        }

        let mut needed = layout.drop_below(kind);
        if format == SongFormat::Separate && kind == LineKind::ChordOnly {
            if let Some(&next) = kinds.get(i + 1) {
                if matches!(next, LineKind::Plain | LineKind::ChordLyric) {
                    needed += layout.advance(kind) + layout.drop_below(next);
                }
            }
        }
        if cursor.y - needed < layout.margin_bottom {
            cursor.break_page(layout, writer);
        }

        match kind {
            LineKind::SectionHeading => {
                writer.draw_text(line.trim(), layout.margin_left, cursor.y, Font::Bold, layout.heading_size, Color::BLACK);
            }
            LineKind::ChordOnly => draw_chord_line(line, layout, writer, cursor.y),
            LineKind::ChordLyric => draw_chord_lyric(line, layout, writer, cursor.y),
            LineKind::Plain => {
                draw_text_runs(line.trim_end(), layout.margin_left, cursor.y, layout, writer);
            }
            LineKind::Blank => {}
        }
        cursor.y -= layout.advance(kind);
    }

    cursor.pages
}

struct Cursor {
    y: f32,
    pages: usize,
    /// The page is full but the next page starts only when something is drawn.
    pending_break: bool,
}

impl Cursor {
    fn break_page<W: PageWriter>(&mut self, layout: &PdfLayout, writer: &mut W) {
        writer.new_page();
        self.pages += 1;
        self.pending_break = false;
        self.y = layout.top();
        debug!(page = self.pages, "started new pdf page");
    }
}

fn draw_header<W: PageWriter>(header: &PdfHeader, layout: &PdfLayout, writer: &mut W, cursor: &mut Cursor) {
    if let Some(logo) = &header.logo {
        let x = layout.page_width - layout.margin_left - logo.width;
        let y = layout.page_height - layout.margin_top + layout.title_size - logo.height;
        writer.draw_image(logo, x, y, logo.width, logo.height);
    }
    if let Some(title) = &header.title {
        writer.draw_text(title, layout.margin_left, cursor.y, Font::Bold, layout.title_size, Color::BLACK);
        cursor.y -= layout.title_size + 6.0;
    }
    if let Some(artist) = &header.artist {
        writer.draw_text(artist, layout.margin_left, cursor.y, Font::Regular, layout.body_size, Color::GRAY);
        cursor.y -= layout.line_height;
    }
    if let Some(key_line) = &header.key_line {
        writer.draw_text(key_line, layout.margin_left, cursor.y, Font::Bold, layout.body_size, Color::BLACK);
        cursor.y -= layout.line_height;
    }
    if header.title.is_some() || header.artist.is_some() || header.key_line.is_some() {
        cursor.y -= layout.line_height;
    }
}

/// Chords left to right, each followed by a fixed gutter.
fn draw_chord_line<W: PageWriter>(line: &str, layout: &PdfLayout, writer: &mut W, y: f32) {
    let mut x = layout.margin_left;
    for segment in split_chord_runs(line) {
        if let Segment::Chord(chord) = segment {
            writer.draw_text(chord, x, y, Font::Bold, layout.chord_size, layout.chord_color);
            x += layout.chord_width(chord) + layout.chord_gutter;
        }
    }
}

/// Chords on the baseline `y`, lyrics `chord_rise` below. A chord wider than
/// its syllable pushes the following lyric right so chords never collide.
fn draw_chord_lyric<W: PageWriter>(line: &str, layout: &PdfLayout, writer: &mut W, y: f32) {
    let lyric_y = y - layout.chord_rise;
    let mut text_x = layout.margin_left;
    let mut chord_end = layout.margin_left;

    for segment in split_chord_runs(line.trim_end()) {
        match segment {
            Segment::Chord(chord) => {
                if text_x < chord_end {
                    text_x = chord_end;
                }
                writer.draw_text(chord, text_x, y, Font::Bold, layout.chord_size, layout.chord_color);
                chord_end = text_x + layout.chord_width(chord) + layout.body_char_width;
            }
            Segment::Text(text) => {
                text_x = draw_text_runs(text, text_x, lyric_y, layout, writer);
            }
        }
    }
}

/// Draw normal and bold runs from `x`; returns the x after the last run.
fn draw_text_runs<W: PageWriter>(text: &str, x: f32, y: f32, layout: &PdfLayout, writer: &mut W) -> f32 {
    let mut x = x;
    for run in split_bold_runs(text) {
        let font = if run.bold { Font::Bold } else { Font::Regular };
        if !run.text.trim().is_empty() {
            writer.draw_text(run.text, x, y, font, layout.body_size, Color::BLACK);
        }
        x += layout.text_width(run.text);
    }
    x
}
