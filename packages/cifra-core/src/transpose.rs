//! Transposition of bracketed chords by a number of semitones.
//!
//! Only the text inside `[...]` is touched, and only when it parses as a
//! chord. Lyrics, spacing and unknown bracket text come out byte for byte.

use crate::chord::{format_token, parse_token, ChordToken, PitchClass, CHORD_TOKEN_RE};
use regex::Captures;
use serde::{Deserialize, Serialize};

/// How rewritten roots and bass notes are spelled.
///
/// The choice applies to every chord of a call, including a transposition by
/// zero, so `[Db]` comes back as `[C#]` under the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Spelling {
    #[default]
    Sharps,
    Flats,
}

impl Spelling {
    pub fn name_of(self, pitch: PitchClass) -> &'static str {
        match self {
            Spelling::Sharps => pitch.name(),
            Spelling::Flats => pitch.flat_name(),
        }
    }
}

/// Transpose a single chord. Quality is carried over untouched; a slash bass
/// moves by the same interval as the root.
pub fn transpose_chord(chord: &ChordToken, semitones: i32, spelling: Spelling) -> ChordToken {
    let root = chord.root.transpose(semitones);
    let bass = chord.bass.map(|b| b.transpose(semitones));
    ChordToken {
        root,
        root_name: spelling.name_of(root).to_string(),
        quality: chord.quality.clone(),
        bass,
        bass_name: bass.map(|b| spelling.name_of(b).to_string()),
    }
}

/// Transpose every chord in `text`, spelling the results with sharps.
///
/// # Examples
/// ```
/// use cifra_core::transpose;
///
/// assert_eq!(transpose("[C]Hello [G]world", 2), "[D]Hello [A]world");
/// assert_eq!(transpose("[Db]Test", 1), "[D]Test");
/// assert_eq!(transpose("[Am]Deus", -3), "[F#m]Deus");
/// ```
pub fn transpose(text: &str, semitones: i32) -> String {
    transpose_with(text, semitones, Spelling::Sharps)
}

/// Transpose every chord in `text` using the given spelling.
pub fn transpose_with(text: &str, semitones: i32, spelling: Spelling) -> String {
    CHORD_TOKEN_RE
        .replace_all(text, |caps: &Captures| match parse_token(&caps[1]) {
            Some(chord) => format!("[{}]", format_token(&transpose_chord(&chord, semitones, spelling))),
            None => caps[0].to_string(),
        })
        .into_owned()
}
