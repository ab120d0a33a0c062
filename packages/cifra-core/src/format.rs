//! Detection of the chord-annotation convention a song was written in.
//!
//! The submission form stores inline songs with a leading `#mic#` line. Every
//! other song is treated as above-line ("separate") text. Once the sentinel
//! has been stripped, detection falls back to `Separate`; callers that need
//! the format later must keep the value returned here.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Leading line that marks a song as using inline chords.
pub const SENTINEL: &str = "#mic#";

/// Chord-annotation convention of a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SongFormat {
    /// Chords sit inside the lyric, right before the syllable they fall on.
    Inline,
    /// Chords sit on their own line above the lyric.
    #[default]
    Separate,
}

impl SongFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            SongFormat::Inline => "inline",
            SongFormat::Separate => "separate",
        }
    }

    /// Container class for the HTML view.
    pub fn css_class(self) -> &'static str {
        match self {
            SongFormat::Inline => "inline",
            SongFormat::Separate => "above",
        }
    }

    /// Parse `"inline"` or `"separate"` (also accepts `"above"`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Some(SongFormat::Inline),
            "separate" | "above" => Some(SongFormat::Separate),
            _ => None,
        }
    }
}

impl fmt::Display for SongFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First non-blank line of `text`, trimmed.
fn first_content_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Classify a song as inline or separate.
///
/// # Examples
/// ```
/// use cifra_core::{detect_format, SongFormat};
///
/// assert_eq!(detect_format("#mic#\n[C]Hello"), SongFormat::Inline);
/// assert_eq!(detect_format("[C]\nHello"), SongFormat::Separate);
/// assert_eq!(detect_format("Hello world"), SongFormat::Separate);
/// ```
pub fn detect_format(text: &str) -> SongFormat {
    let format = match first_content_line(text) {
        Some(SENTINEL) => SongFormat::Inline,
        _ => SongFormat::Separate,
    };
    debug!(format = format.as_str(), "detected song format");
    format
}

/// Remove the sentinel line, if present, along with the blank lines before it.
///
/// Text without the sentinel is returned unchanged.
pub fn strip_sentinel(text: &str) -> &str {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        offset += line.len();
        match line.trim() {
            "" => continue,
            SENTINEL => return &text[offset..],
            _ => return text,
        }
    }
    text
}
