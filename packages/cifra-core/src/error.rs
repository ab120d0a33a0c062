//! # Error Types
//!
//! Chord processing itself never fails: unknown tokens pass through, empty
//! songs render to empty output and a song without chords simply has no key.
//! The errors here cover the two places where structured input is expected.
//!
//! ## Error Types
//! - `MetadataError` - Invalid YAML frontmatter at the top of a song file
//! - `InvalidInput` - A caller handed over something that is not song text
//!
//! ## Usage
//! ```rust
//! use cifra_core::{CifraError, Song};
//!
//! match Song::parse("---\ntitle: [unclosed\n---\n[C]Aleluia") {
//!     Ok(song) => println!("{:?}", song.meta.title),
//!     Err(CifraError::MetadataError(message)) => eprintln!("bad frontmatter: {}", message),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CifraError {
    /// Invalid frontmatter.
    ///
    /// Occurs when the `---` block at the top of a song is not valid YAML or
    /// holds a field of the wrong type.
    ///
    /// # Example
    /// ```
    /// # use cifra_core::CifraError;
    /// let err = CifraError::MetadataError("capo: invalid type".to_string());
    /// assert_eq!(err.to_string(), "Invalid song metadata: capo: invalid type");
    /// ```
    #[error("Invalid song metadata: {0}")]
    MetadataError(String),

    /// Input that is neither song text nor an explicit absence of it.
    ///
    /// # Example
    /// ```
    /// # use cifra_core::CifraError;
    /// let err = CifraError::InvalidInput("expected a string, got number".to_string());
    /// assert_eq!(err.to_string(), "Invalid input: expected a string, got number");
    /// ```
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
