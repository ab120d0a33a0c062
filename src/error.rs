//! CLI error types

use cifra_core::CifraError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Error reading '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error writing '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Song(#[from] CifraError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown song: {0}\n\n  Tip: run `cifra songs` to list the bundled songs.")]
    UnknownSong(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
