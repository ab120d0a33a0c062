//! Song documents: optional YAML frontmatter followed by chord-annotated text.
//!
//! ```text
//! ---
//! title: Deus Está Aqui
//! artist: Comunidade
//! key: Am
//! moment: Entrada
//! ---
//! #mic#
//! [Am]Deus [F]está [C]aqui
//! ```
//!
//! The frontmatter must open on the first non-blank line. Anything else that
//! looks like `---` further down is lyric text.

use crate::chord::{ChordToken, ANY_BRACKET_RE};
use crate::error::CifraError;
use crate::format::{detect_format, strip_sentinel, SongFormat};
use crate::lines::{classify_line, LineKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Keys that mark a leading `---` block as frontmatter.
const META_KEYS: &[&str] = &["title", "artist", "key", "moment", "capo"];

/// Frontmatter fields. All optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SongMeta {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Key as written by the author, e.g. `"G"` or `"Em"`.
    pub key: Option<String>,
    /// Liturgical moment (Entrada, Ofertório, Comunhão, ...).
    pub moment: Option<String>,
    pub capo: Option<u8>,
}

/// A parsed song document.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
    pub meta: SongMeta,
    pub format: SongFormat,
    /// Chord-annotated text with frontmatter and sentinel removed.
    pub body: String,
}

impl Song {
    /// Split a song document into frontmatter, format and body.
    ///
    /// # Example
    /// ```
    /// use cifra_core::{Song, SongFormat};
    ///
    /// let song = Song::parse("---\ntitle: Amém\n---\n#mic#\n[G]Amém").unwrap();
    /// assert_eq!(song.meta.title.as_deref(), Some("Amém"));
    /// assert_eq!(song.format, SongFormat::Inline);
    /// assert_eq!(song.body, "[G]Amém");
    /// ```
    ///
    /// A leading `---` block is frontmatter only when it is a YAML mapping
    /// with at least one known field. Otherwise the dashes are decoration and
    /// the whole source is song text.
    ///
    /// # Errors
    /// Returns [`CifraError::MetadataError`] when a known field has the wrong
    /// type, e.g. `capo: two`.
    pub fn parse(source: &str) -> Result<Song, CifraError> {
        let (meta, text) = match extract_frontmatter(source) {
            (Some(yaml), text) if yaml.trim().is_empty() => (SongMeta::default(), text),
            (Some(yaml), text) => match parse_meta(yaml)? {
                Some(meta) => (meta, text),
                None => {
                    debug!("leading --- block is not frontmatter, keeping it as text");
                    (SongMeta::default(), source)
                }
            },
            (None, text) => (SongMeta::default(), text),
        };
        let format = detect_format(text);
        Ok(Song {
            meta,
            format,
            body: strip_sentinel(text).to_string(),
        })
    }

    /// Chords of the body in order of first appearance.
    pub fn chords(&self) -> Vec<ChordToken> {
        crate::chord::distinct_chords(&self.body)
    }
}

/// Frontmatter fields of a `---` block, or `None` when the block is song text.
fn parse_meta(yaml: &str) -> Result<Option<SongMeta>, CifraError> {
    let Ok(serde_yaml::Value::Mapping(map)) = serde_yaml::from_str(yaml) else {
        return Ok(None);
    };
    if !map.keys().any(|k| k.as_str().is_some_and(|k| META_KEYS.contains(&k))) {
        return Ok(None);
    }
    serde_yaml::from_value(serde_yaml::Value::Mapping(map))
        .map(Some)
        .map_err(|e| CifraError::MetadataError(e.to_string()))
}

/// Split off a leading `---` block.
///
/// Returns (frontmatter, remaining text). Without a closed block the whole
/// source is returned as text.
pub(crate) fn extract_frontmatter(source: &str) -> (Option<&str>, &str) {
    let mut offset = 0;
    let mut start = None;
    for line in source.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        let trimmed = line.trim();
        match start {
            None if trimmed.is_empty() => continue,
            None if trimmed == "---" => start = Some(offset),
            None => return (None, source),
            Some(body_start) if trimmed == "---" => {
                return (Some(&source[body_start..line_start]), &source[offset..]);
            }
            Some(_) => {}
        }
    }
    (None, source)
}

/// Remove chord tokens for a lyrics-only view.
///
/// Lines that held nothing but chords disappear instead of turning into blank
/// lines; every other line keeps its text with the brackets removed.
///
/// ```
/// use cifra_core::song::strip_chords;
///
/// assert_eq!(strip_chords("[C]   [G]\nDeus [Am]está\n\naqui"), "Deus está\n\naqui");
/// ```
pub fn strip_chords(text: &str) -> String {
    text.lines()
        .filter(|line| classify_line(line) != LineKind::ChordOnly)
        .map(|line| ANY_BRACKET_RE.replace_all(line, "").into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_frontmatter() {
        let song = Song::parse("[C]Deus\n[G]aqui").unwrap();
        assert_eq!(song.meta, SongMeta::default());
        assert_eq!(song.format, SongFormat::Separate);
        assert_eq!(song.body, "[C]Deus\n[G]aqui");
    }

    #[test]
    fn test_parse_with_frontmatter() {
        let source = "---\ntitle: Deus Está Aqui\nartist: Comunidade\nkey: Am\ncapo: 2\n---\n#mic#\n[Am]Deus [F]está";
        let song = Song::parse(source).unwrap();
        assert_eq!(song.meta.title.as_deref(), Some("Deus Está Aqui"));
        assert_eq!(song.meta.artist.as_deref(), Some("Comunidade"));
        assert_eq!(song.meta.key.as_deref(), Some("Am"));
        assert_eq!(song.meta.capo, Some(2));
        assert_eq!(song.format, SongFormat::Inline);
        assert_eq!(song.body, "[Am]Deus [F]está");
    }

    #[test]
    fn test_empty_frontmatter() {
        let song = Song::parse("---\n---\n[C]la").unwrap();
        assert_eq!(song.meta, SongMeta::default());
        assert_eq!(song.body, "[C]la");
    }

    #[test]
    fn test_invalid_frontmatter() {
        let result = Song::parse("---\ncapo: two\n---\n[C]la");
        assert!(matches!(result, Err(CifraError::MetadataError(_))));
    }

    #[test]
    fn test_decorative_dashes_stay_in_the_body() {
        let source = "---\n[C]Deus está [G]aqui\n---\n[Am]fim";
        let song = Song::parse(source).unwrap();
        assert_eq!(song.meta, SongMeta::default());
        assert_eq!(song.format, SongFormat::Separate);
        assert_eq!(song.body, source);

        // a mapping that names none of the song fields is lyric text too
        let source = "---\nRefrão: 2x\n---\n[C]la";
        let song = Song::parse(source).unwrap();
        assert_eq!(song.meta, SongMeta::default());
        assert_eq!(song.body, source);
    }

    #[test]
    fn test_dashes_inside_lyrics_are_not_frontmatter() {
        let source = "[C]Deus\n---\nfim\n---\n";
        let (meta, text) = extract_frontmatter(source);
        assert!(meta.is_none());
        assert_eq!(text, source);
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let (meta, text) = extract_frontmatter("---\ntitle: x\n[C]la");
        assert!(meta.is_none());
        assert_eq!(text, "---\ntitle: x\n[C]la");
    }

    #[test]
    fn test_song_chords() {
        let song = Song::parse("[G]a [D/F#]b [G]c").unwrap();
        let names: Vec<String> = song.chords().iter().map(|c| c.display()).collect();
        assert_eq!(names, vec!["G", "D/F#"]);
    }

    #[test]
    fn test_strip_chords_keeps_plain_text() {
        assert_eq!(strip_chords("Refrão\n[C]Deus é [G]bom"), "Refrão\nDeus é bom");
        assert_eq!(strip_chords(""), "");
    }
}
