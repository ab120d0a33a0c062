//! Runtime configuration settings
//!
//! Settings come from an optional YAML file and are then overridden by the
//! flags of the command being run:
//!
//! ```yaml
//! render:
//!   transpose: -2
//!   spelling: flats
//!   show-chords: true
//! pdf:
//!   margin-left: 40
//!   body-size: 12
//! ```

use super::cli::RenderArgs;
use crate::error::{CliError, Result};
use cifra_core::{PdfLayout, RenderOptions, SongFormat, Spelling};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Runtime settings for rendering
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Render pipeline options
    pub render: RenderOptions,
    /// PDF page geometry
    pub pdf: PdfLayout,
}

impl Settings {
    /// Load settings from a YAML file, or the defaults when no file is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_yaml(&text).map_err(|source| CliError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(settings)
    }

    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Apply the flags of `cifra render` on top of the file settings
    pub fn with_render_args(mut self, args: &RenderArgs) -> Self {
        if let Some(semitones) = args.transpose {
            self.render.transpose = semitones;
        }
        if args.flats {
            self.render.spelling = Spelling::Flats;
        }
        if args.no_chords {
            self.render.show_chords = false;
        }
        if let Some(format) = args.format.as_deref().and_then(SongFormat::from_str) {
            self.render.format = Some(format);
        }
        if args.columns {
            self.render.two_columns = true;
        }
        self
    }

    /// Apply a transposition flag and spelling flag
    pub fn with_transpose(mut self, semitones: Option<i32>, flats: bool) -> Self {
        if let Some(semitones) = semitones {
            self.render.transpose = semitones;
        }
        if flats {
            self.render.spelling = Spelling::Flats;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(settings.render.show_chords);
        assert_eq!(settings.pdf.margin_left, 50.0);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render:\n  transpose: -2\n  spelling: flats\npdf:\n  margin-left: 40").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.render.transpose, -2);
        assert_eq!(settings.render.spelling, Spelling::Flats);
        assert_eq!(settings.pdf.margin_left, 40.0);
        // untouched fields keep their defaults
        assert_eq!(settings.pdf.line_height, 14.0);
        assert!(settings.render.show_chords);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Settings::from_yaml("").unwrap(), Settings::default());
    }

    #[test]
    fn test_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render:\n  transpose: up").unwrap();
        let result = Settings::load(Some(file.path()));
        assert!(matches!(result, Err(CliError::Config { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = Settings::load(Some(Path::new("/nonexistent/cifra.yaml")));
        assert!(matches!(result, Err(CliError::Read { .. })));
    }

    #[test]
    fn test_flags_override_file() {
        let settings = Settings::from_yaml("render:\n  transpose: 5").unwrap();
        let args = RenderArgs {
            transpose: Some(-1),
            no_chords: true,
            format: Some("above".to_string()),
            ..RenderArgs::default()
        };
        let settings = settings.with_render_args(&args);
        assert_eq!(settings.render.transpose, -1);
        assert!(!settings.render.show_chords);
        assert_eq!(settings.render.format, Some(SongFormat::Separate));
        assert_eq!(settings.render.spelling, Spelling::Sharps);
    }
}
