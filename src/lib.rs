//! # cifra
//!
//! Command-line front end for the cifra chord-sheet engine.
//!
//! ```text
//! cifra render deus-esta-aqui.txt -t 3 --flats      # HTML, three semitones up
//! cifra render pao-da-vida.txt --pdf -o ops.json    # PDF draw calls
//! cifra key pao-da-vida.txt -t -2                   # Tom: F (original: G)
//! cifra songs entrada/deus-esta-aqui | cifra render -
//! ```

pub mod commands;
pub mod config;
pub mod error;

pub use error::{CliError, Result};
