//! Key detection from the chords of a song.
//!
//! A heuristic, not harmonic analysis. Each root scores one point per
//! occurrence; the opening chord gets a bonus of two and the closing chord a
//! bonus of one, since liturgical songs almost always start and end on the
//! tonic. Ties go to the root heard first. A song built on a single chord
//! always reports that chord's root.

use crate::chord::{chord_tokens, PitchClass};
use tracing::debug;

const OPENING_BONUS: u32 = 2;
const CLOSING_BONUS: u32 = 1;

/// Infer the tonal center of `text`, or `None` when it has no chords.
///
/// # Examples
/// ```
/// use cifra_core::detect_key;
///
/// let key = detect_key("[G]Amazing [C]grace [D]how [G]sweet").unwrap();
/// assert_eq!(key.name(), "G");
///
/// assert_eq!(detect_key("Só letra, sem acordes"), None);
/// ```
pub fn detect_key(text: &str) -> Option<PitchClass> {
    let roots: Vec<PitchClass> = chord_tokens(text).iter().map(|chord| chord.root).collect();
    let first = *roots.first()?;
    let last = *roots.last()?;

    // (root, score) in order of first appearance
    let mut scores: Vec<(PitchClass, u32)> = Vec::new();
    for root in &roots {
        match scores.iter_mut().find(|(known, _)| known == root) {
            Some((_, score)) => *score += 1,
            None => scores.push((*root, 1)),
        }
    }
    for (root, score) in scores.iter_mut() {
        if *root == first {
            *score += OPENING_BONUS;
        }
        if *root == last {
            *score += CLOSING_BONUS;
        }
    }

    let mut best = scores[0];
    for &(root, score) in &scores[1..] {
        if score > best.1 {
            best = (root, score);
        }
    }

    debug!(key = best.0.name(), chords = roots.len(), "detected key");
    Some(best.0)
}
