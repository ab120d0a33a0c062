//! Property-based tests for transposition, key detection and the column
//! splitter using proptest.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p cifra-core --test proptest_properties
//! ```

use proptest::prelude::*;

use cifra_core::chord::CHORD_TOKEN_RE;
use cifra_core::{detect_key, split_columns, transpose, transpose_with, Spelling};

// ============================================================================
// Strategies
// ============================================================================

fn chord() -> impl Strategy<Value = String> {
    let root = prop::sample::select(vec![
        "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
    ]);
    let quality = prop::sample::select(vec!["", "m", "7", "m7", "maj7", "sus4", "dim", "6/9", "7(b9)"]);
    let bass = prop::option::of(prop::sample::select(vec!["C", "E", "F#", "G", "Bb"]));
    (root, quality, bass).prop_map(|(root, quality, bass)| match bass {
        Some(bass) => format!("{}{}/{}", root, quality, bass),
        None => format!("{}{}", root, quality),
    })
}

/// Lyrics, chords and the odd bracket that is not a chord.
fn song_text() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        3 => "[a-zçãé ,.]{0,10}",
        3 => chord().prop_map(|c| format!("[{}]", c)),
        1 => Just("\n".to_string()),
        1 => "[a-z0-9 ]{1,6}".prop_map(|t| format!("[{}]", t)),
    ];
    prop::collection::vec(piece, 0..40).prop_map(|pieces| pieces.concat())
}

fn plain_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ,.!?çãéó#\n-]{0,120}").unwrap()
}

fn html_block() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z ]{1,12}".prop_map(|t| format!("<div class=\"lyric-line\">{}</div>\n", t)),
        prop::sample::select(vec!["Intro:", "Refrão", "Estrofe", "Ponte"])
            .prop_map(|h| format!("<div class=\"section-heading\">{}</div>\n", h)),
        Just("<div class=\"spacer\"></div>\n".to_string()),
        "[a-z]{1,8}".prop_map(|t| format!("<p>{}</p>", t)),
        "[a-z]{1,8}".prop_map(|t| format!("{}<br><br>", t)),
        Just("  \n".to_string()),
    ]
}

fn bracket_count(text: &str) -> usize {
    CHORD_TOKEN_RE.find_iter(text).count()
}

// ============================================================================
// Transposition
// ============================================================================

proptest! {
    /// Going up and back down gives the original chords, normalized to sharps.
    #[test]
    fn transposition_round_trips(text in song_text(), n in -24i32..24) {
        let there = transpose(&text, n);
        prop_assert_eq!(transpose(&there, -n), transpose(&text, 0));
    }

    /// Twelve semitones is the same chord.
    #[test]
    fn transposition_is_periodic(text in song_text(), n in -30i32..30) {
        prop_assert_eq!(transpose(&text, n), transpose(&text, n + 12));
        prop_assert_eq!(
            transpose_with(&text, n, Spelling::Flats),
            transpose_with(&text, n - 12, Spelling::Flats)
        );
    }

    /// Text without brackets comes back untouched.
    #[test]
    fn text_without_chords_is_preserved(text in plain_text(), n in -24i32..24) {
        prop_assert_eq!(transpose(&text, n), text.clone());
        prop_assert_eq!(transpose_with(&text, n, Spelling::Flats), text);
    }

    /// No bracket pair is created or lost.
    #[test]
    fn token_count_is_invariant(text in song_text(), n in -24i32..24) {
        prop_assert_eq!(bracket_count(&transpose(&text, n)), bracket_count(&text));
    }

    /// The detected key moves with the chords.
    #[test]
    fn key_follows_transposition(text in song_text(), n in -12i32..12) {
        let before = detect_key(&text);
        let after = detect_key(&transpose(&text, n));
        prop_assert_eq!(after, before.map(|k| k.transpose(n)));
    }
}

// ============================================================================
// Column split
// ============================================================================

proptest! {
    /// The two columns are the input cut in one place.
    #[test]
    fn columns_conserve_content(blocks in prop::collection::vec(html_block(), 0..20)) {
        let html = blocks.concat();
        let columns = split_columns(&html);
        prop_assert_eq!(format!("{}{}", columns.left, columns.right), html);
    }

    /// Arbitrary input never panics.
    #[test]
    fn columns_never_panic(html in "\\PC{0,200}") {
        let columns = split_columns(&html);
        prop_assert_eq!(columns.left.len() + columns.right.len(), html.len());
    }
}
