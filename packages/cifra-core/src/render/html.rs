//! HTML rendering of a song sheet.
//!
//! Markup produced for each line kind:
//!
//! ```text
//! SectionHeading  <div class="section-heading">Refrão:</div>
//! ChordOnly       <div class="chord-line"><span class="chord">C</span>   <span class="chord">G</span></div>
//! ChordLyric      <div class="lyric-line has-chords"><span class="chord-group"><span class="chord">Am</span><span class="lyric">Deus </span></span>...</div>
//! Plain           <div class="lyric-line">Deus está aqui</div>
//! Blank           <div class="spacer"></div>
//! ```
//!
//! In separate songs a chord line and the lyric line under it are wrapped in
//! `<div class="chord-section">` so they stay together. The whole sheet sits
//! in `<div class="chord-sheet inline|above">`, with an extra `mixed` class
//! when an inline song also uses section headings. Spacing inside chord lines
//! is kept as written; the stylesheet is expected to use `white-space: pre`.

use crate::format::{strip_sentinel, SongFormat};
use crate::lines::{classify_line, has_section_headings, split_bold_runs, split_chord_runs, LineKind, Segment};

/// Render a song as a complete HTML fragment, wrapped in its container.
///
/// Returns an empty string for empty or whitespace-only text.
pub fn render_html(text: &str, format: SongFormat) -> String {
    let body = render_html_body(text, format);
    if body.is_empty() {
        return body;
    }
    format!("<div class=\"{}\">\n{}\n</div>", container_class(text, format), body)
}

/// Class list of the container element.
pub fn container_class(text: &str, format: SongFormat) -> String {
    let text = strip_sentinel(text);
    if format == SongFormat::Inline && has_section_headings(text) {
        format!("chord-sheet {} mixed", format.css_class())
    } else {
        format!("chord-sheet {}", format.css_class())
    }
}

/// Render the line elements of a song without the container.
pub fn render_html_body(text: &str, format: SongFormat) -> String {
    let text = strip_sentinel(text);
    if text.trim().is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.lines().collect();
    let kinds: Vec<LineKind> = lines.iter().map(|line| classify_line(line)).collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len());

    let mut i = 0;
    while i < lines.len() {
        let pairs_with_next = format == SongFormat::Separate
            && kinds[i] == LineKind::ChordOnly
            && matches!(kinds.get(i + 1), Some(LineKind::Plain | LineKind::ChordLyric));
        if pairs_with_next {
            out.push(format!(
                "<div class=\"chord-section\">{}{}</div>",
                render_line(lines[i], kinds[i]),
                render_line(lines[i + 1], kinds[i + 1])
            ));
            i += 2;
        } else {
            out.push(render_line(lines[i], kinds[i]));
            i += 1;
        }
    }

    out.join("\n")
}

fn render_line(line: &str, kind: LineKind) -> String {
    match kind {
        LineKind::Blank => "<div class=\"spacer\"></div>".to_string(),
        LineKind::SectionHeading => {
            format!("<div class=\"section-heading\">{}</div>", line.trim())
        }
        LineKind::ChordOnly => {
            let mut html = String::from("<div class=\"chord-line\">");
            for segment in split_chord_runs(line.trim_end()) {
                match segment {
                    Segment::Chord(chord) => push_chord(&mut html, chord),
                    Segment::Text(spacing) => html.push_str(spacing),
                }
            }
            html.push_str("</div>");
            html
        }
        LineKind::ChordLyric => render_chord_lyric(line),
        LineKind::Plain => {
            let mut html = String::from("<div class=\"lyric-line\">");
            push_text(&mut html, line.trim_end());
            html.push_str("</div>");
            html
        }
    }
}

/// A lyric line with chords placed right before the syllables they fall on.
fn render_chord_lyric(line: &str) -> String {
    let mut html = String::from("<div class=\"lyric-line has-chords\">");
    let mut segments = split_chord_runs(line.trim_end()).into_iter().peekable();

    while let Some(segment) = segments.next() {
        match segment {
            Segment::Text(text) => {
                html.push_str("<span class=\"lyric\">");
                push_text(&mut html, text);
                html.push_str("</span>");
            }
            Segment::Chord(chord) => {
                html.push_str("<span class=\"chord-group\">");
                push_chord(&mut html, chord);
                if let Some(Segment::Text(text)) = segments.peek().copied() {
                    segments.next();
                    html.push_str("<span class=\"lyric\">");
                    push_text(&mut html, text);
                    html.push_str("</span>");
                }
                html.push_str("</span>");
            }
        }
    }

    html.push_str("</div>");
    html
}

fn push_chord(html: &mut String, chord: &str) {
    html.push_str("<span class=\"chord\">");
    html.push_str(chord);
    html.push_str("</span>");
}

fn push_text(html: &mut String, text: &str) {
    for run in split_bold_runs(text) {
        if run.bold {
            html.push_str("<strong>");
            html.push_str(run.text);
            html.push_str("</strong>");
        } else {
            html.push_str(run.text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text_renders_nothing() {
        assert_eq!(render_html("", SongFormat::Separate), "");
        assert_eq!(render_html("  \n \n", SongFormat::Inline), "");
        assert_eq!(render_html("#mic#\n", SongFormat::Inline), "");
    }

    #[test]
    fn test_separate_chord_line_above_lyric() {
        let html = render_html_body("[C]    [G]\nHello world", SongFormat::Separate);
        assert_eq!(
            html,
            "<div class=\"chord-section\">\
             <div class=\"chord-line\"><span class=\"chord\">C</span>    <span class=\"chord\">G</span></div>\
             <div class=\"lyric-line\">Hello world</div>\
             </div>"
        );
    }

    #[test]
    fn test_inline_chords_group_with_syllables() {
        let html = render_html_body("#mic#\nO [Am]Deus [F]está", SongFormat::Inline);
        assert_eq!(
            html,
            "<div class=\"lyric-line has-chords\">\
             <span class=\"lyric\">O </span>\
             <span class=\"chord-group\"><span class=\"chord\">Am</span><span class=\"lyric\">Deus </span></span>\
             <span class=\"chord-group\"><span class=\"chord\">F</span><span class=\"lyric\">está</span></span>\
             </div>"
        );
    }

    #[test]
    fn test_consecutive_chords_without_lyric() {
        let html = render_html_body("[C][G]la", SongFormat::Inline);
        assert!(html.contains(
            "<span class=\"chord-group\"><span class=\"chord\">C</span></span>\
             <span class=\"chord-group\"><span class=\"chord\">G</span><span class=\"lyric\">la</span></span>"
        ));
    }

    #[test]
    fn test_headings_spacers_and_bold() {
        let html = render_html_body("Refrão:\nSanto, **santo**\n\nfim", SongFormat::Separate);
        let lines: Vec<&str> = html.lines().collect();
        assert_eq!(
            lines,
            vec![
                "<div class=\"section-heading\">Refrão:</div>",
                "<div class=\"lyric-line\">Santo, <strong>santo</strong></div>",
                "<div class=\"spacer\"></div>",
                "<div class=\"lyric-line\">fim</div>",
            ]
        );
    }

    #[test]
    fn test_container_classes() {
        assert!(render_html("[C]la", SongFormat::Separate).starts_with("<div class=\"chord-sheet above\">"));
        assert!(render_html("#mic#\n[C]la", SongFormat::Inline).starts_with("<div class=\"chord-sheet inline\">"));
        assert!(render_html("#mic#\nIntro:\n[C]la", SongFormat::Inline)
            .starts_with("<div class=\"chord-sheet inline mixed\">"));
    }

    #[test]
    fn test_inline_chord_only_line_is_not_paired() {
        let html = render_html_body("[C] [G]\nla la", SongFormat::Inline);
        assert!(!html.contains("chord-section"));
        assert!(html.starts_with("<div class=\"chord-line\">"));
    }

    #[test]
    fn test_unknown_brackets_stay_literal() {
        let html = render_html_body("[Refrão 2x]", SongFormat::Separate);
        assert_eq!(html, "<div class=\"lyric-line\">[Refrão 2x]</div>");
    }
}
