//! # Chord Tokens
//!
//! A chord token is the text between a pair of square brackets in a song,
//! e.g. `Cm7` in `[Cm7]Deus`. This module splits that text into a root pitch,
//! a free-form quality suffix and an optional slash bass, and puts it back
//! together again.
//!
//! ```text
//! [ F#m7/C# ]
//!   │ │   └── bass:    C#  (optional, after the last '/')
//!   │ └────── quality: m7  (everything after the root, kept verbatim)
//!   └──────── root:    F#  (A-G plus optional '#' or 'b')
//! ```
//!
//! Text that does not start with `A`-`G` is not a chord; callers leave the
//! bracket contents exactly as written.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// A bracketed chord token. Group 1 is the text between the brackets.
    pub static ref CHORD_TOKEN_RE: Regex = Regex::new(r"\[([^\]]+)\]").unwrap();

    /// Any bracket pair, including empty ones. Used when chords are hidden.
    pub static ref ANY_BRACKET_RE: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
}

/// Sharp spelling of the twelve pitch classes, indexed by semitone above C.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spelling of the twelve pitch classes, indexed by semitone above C.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// One of the twelve chromatic pitch classes, stored as semitones above C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any integer, wrapping into `0..12`.
    pub fn from_semitone(semitone: i32) -> Self {
        PitchClass(semitone.rem_euclid(12) as u8)
    }

    /// Parse a note name: a letter `A`-`G` with an optional `#` or `b`.
    ///
    /// The whole string must be the note name; `"Am"` is not a pitch class.
    pub fn parse(name: &str) -> Option<Self> {
        let (pitch, consumed) = parse_root(name)?;
        if consumed == name.len() {
            Some(pitch)
        } else {
            None
        }
    }

    pub fn semitone(self) -> u8 {
        self.0
    }

    /// Move up (or down, for negative values) by a number of semitones.
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::from_semitone(self.0 as i32 + semitones.rem_euclid(12))
    }

    /// Sharp spelling, e.g. `C#`.
    pub fn name(self) -> &'static str {
        SHARP_NAMES[self.0 as usize]
    }

    /// Spelling with flats, e.g. `Db`.
    pub fn flat_name(self) -> &'static str {
        FLAT_NAMES[self.0 as usize]
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PitchClass> for String {
    fn from(pitch: PitchClass) -> Self {
        pitch.name().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PitchClass::parse(value.trim()).ok_or_else(|| format!("not a note name: {}", value))
    }
}

/// Parse the root at the start of `text`.
///
/// Returns the pitch class and the number of bytes consumed (1 or 2).
fn parse_root(text: &str) -> Option<(PitchClass, usize)> {
    let mut chars = text.chars();
    let base: i32 = match chars.next()? {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    match chars.next() {
        Some('#') => Some((PitchClass::from_semitone(base + 1), 2)),
        Some('b') => Some((PitchClass::from_semitone(base - 1), 2)),
        _ => Some((PitchClass::from_semitone(base), 1)),
    }
}

/// A parsed chord token.
///
/// `root_name` and `bass_name` keep the spelling found in the source so a
/// token can be written back without changes; transposition replaces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordToken {
    pub root: PitchClass,
    pub root_name: String,
    /// Everything after the root; empty for a plain major triad.
    pub quality: String,
    pub bass: Option<PitchClass>,
    pub bass_name: Option<String>,
}

impl ChordToken {
    /// Minor-looking quality: starts with `m` but is not a `maj` chord.
    pub fn is_minor(&self) -> bool {
        self.quality.starts_with('m') && !self.quality.starts_with("maj")
    }

    /// Display form, the same as [`format_token`].
    pub fn display(&self) -> String {
        format_token(self)
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_token(self))
    }
}

/// Parse the text between brackets into a [`ChordToken`].
///
/// Returns `None` when the text does not start with `A`-`G`. A trailing
/// `/X` is taken as the bass only when `X` is itself a note name, so
/// `C/E` has a bass while `C6/9` keeps `6/9` as its quality.
///
/// # Examples
/// ```
/// use cifra_core::chord::parse_token;
///
/// let chord = parse_token("F#m7/C#").unwrap();
/// assert_eq!(chord.root.name(), "F#");
/// assert_eq!(chord.quality, "m7");
/// assert_eq!(chord.bass.map(|b| b.name()), Some("C#"));
///
/// assert!(parse_token("Refrão").is_none());
/// ```
pub fn parse_token(raw: &str) -> Option<ChordToken> {
    let (body, bass) = match raw.rfind('/') {
        Some(slash) if slash > 0 => match PitchClass::parse(&raw[slash + 1..]) {
            Some(pitch) => (&raw[..slash], Some((pitch, raw[slash + 1..].to_string()))),
            None => (raw, None),
        },
        _ => (raw, None),
    };

    let (root, consumed) = parse_root(body)?;

    let (bass, bass_name) = match bass {
        Some((pitch, name)) => (Some(pitch), Some(name)),
        None => (None, None),
    };

    Some(ChordToken {
        root,
        root_name: body[..consumed].to_string(),
        quality: body[consumed..].to_string(),
        bass,
        bass_name,
    })
}

/// Write a chord back in its bracket-free display form.
///
/// ```
/// use cifra_core::chord::{format_token, parse_token};
///
/// assert_eq!(format_token(&parse_token("G").unwrap()), "G");
/// assert_eq!(format_token(&parse_token("Bbmaj7/D").unwrap()), "Bbmaj7/D");
/// ```
pub fn format_token(token: &ChordToken) -> String {
    let mut out = String::with_capacity(token.root_name.len() + token.quality.len() + 3);
    out.push_str(&token.root_name);
    out.push_str(&token.quality);
    if let Some(bass) = &token.bass_name {
        out.push('/');
        out.push_str(bass);
    }
    out
}

/// All recognised chord tokens in `text`, in order of appearance.
///
/// Bracketed text that is not a chord is skipped.
pub fn chord_tokens(text: &str) -> Vec<ChordToken> {
    CHORD_TOKEN_RE
        .captures_iter(text)
        .filter_map(|caps| parse_token(&caps[1]))
        .collect()
}

/// Distinct chords of a song in order of first appearance.
///
/// Two spellings of the same chord (`[Db]` and `[C#]`) count once, under the
/// spelling seen first.
pub fn distinct_chords(text: &str) -> Vec<ChordToken> {
    let mut seen: Vec<ChordToken> = Vec::new();
    for chord in chord_tokens(text) {
        let duplicate = seen.iter().any(|known| {
            known.root == chord.root && known.quality == chord.quality && known.bass == chord.bass
        });
        if !duplicate {
            seen.push(chord);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_accidentals() {
        let c = parse_token("C").unwrap();
        assert_eq!(c.root.semitone(), 0);
        assert_eq!(c.quality, "");
        assert_eq!(c.bass, None);

        let db = parse_token("Db").unwrap();
        assert_eq!(db.root, PitchClass::parse("C#").unwrap());
        assert_eq!(db.root_name, "Db");

        let fsharp = parse_token("F#m").unwrap();
        assert_eq!(fsharp.root.semitone(), 6);
        assert_eq!(fsharp.quality, "m");
    }

    #[test]
    fn test_quality_is_kept_verbatim() {
        for (raw, quality) in [
            ("Cm7", "m7"),
            ("Cmaj7", "maj7"),
            ("Gsus4", "sus4"),
            ("Bdim", "dim"),
            ("Eadd9", "add9"),
            ("A7(9)", "7(9)"),
        ] {
            assert_eq!(parse_token(raw).unwrap().quality, quality, "quality of {}", raw);
        }
    }

    #[test]
    fn test_slash_chords() {
        let g = parse_token("G/D").unwrap();
        assert_eq!(g.root.name(), "G");
        assert_eq!(g.quality, "");
        assert_eq!(g.bass.unwrap().name(), "D");
        assert_eq!(format_token(&g), "G/D");

        // Not a bass note, so the slash stays in the quality
        let six_nine = parse_token("C6/9").unwrap();
        assert_eq!(six_nine.quality, "6/9");
        assert_eq!(six_nine.bass, None);
    }

    #[test]
    fn test_non_chords() {
        assert!(parse_token("x").is_none());
        assert!(parse_token("refrão").is_none());
        assert!(parse_token("/G").is_none());
        assert!(parse_token("").is_none());
        assert!(parse_token("H7").is_none());
    }

    #[test]
    fn test_format_roundtrip_keeps_spelling() {
        for raw in ["C", "Ebm", "F#7", "Bbmaj7/D", "Asus2", "C6/9"] {
            assert_eq!(format_token(&parse_token(raw).unwrap()), raw);
        }
    }

    #[test]
    fn test_pitch_class_wraps() {
        assert_eq!(PitchClass::from_semitone(-1).name(), "B");
        assert_eq!(PitchClass::from_semitone(25).name(), "C#");
        assert_eq!(PitchClass::parse("Cb").unwrap().name(), "B");
        assert_eq!(PitchClass::parse("E#").unwrap().name(), "F");
        assert!(PitchClass::parse("Am").is_none());
    }

    #[test]
    fn test_labels_starting_with_a_note_letter_are_chords() {
        let bridge = parse_token("Bridge").unwrap();
        assert_eq!(bridge.root.name(), "B");
        assert_eq!(bridge.quality, "ridge");
        assert_eq!(parse_token("Coro").unwrap().quality, "oro");
    }

    #[test]
    fn test_minor_detection() {
        assert!(parse_token("Am").unwrap().is_minor());
        assert!(parse_token("Am7").unwrap().is_minor());
        assert!(parse_token("Cmin").unwrap().is_minor());
        assert!(!parse_token("Cmaj7").unwrap().is_minor());
        assert!(!parse_token("G").unwrap().is_minor());
    }

    #[test]
    fn test_chord_tokens_skip_unrecognised() {
        let chords = chord_tokens("[Intro] [C]Deus [x] [G/B]está");
        let names: Vec<String> = chords.iter().map(format_token).collect();
        assert_eq!(names, vec!["C", "G/B"]);
    }

    #[test]
    fn test_distinct_chords_first_appearance() {
        let chords = distinct_chords("[G]a [C]b [G]c [Db]d [C#]e [D]f");
        let names: Vec<String> = chords.iter().map(format_token).collect();
        assert_eq!(names, vec!["G", "C", "Db", "D"]);
    }
}
