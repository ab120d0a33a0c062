//! CLI argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// cifra - chord sheets for liturgical songs
///
/// Transposes chord-annotated song text, detects its key and renders it as
/// HTML or as PDF draw calls. Input is a song file with optional YAML
/// frontmatter, or `-` for stdin.
#[derive(Parser, Debug)]
#[command(name = "cifra")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML file with `render:` and `pdf:` sections; flags override it
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, default_value = "false", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a song as HTML, or as PDF draw calls with --pdf
    Render(RenderArgs),

    /// Rewrite every chord of a song by a number of semitones
    Transpose(TransposeArgs),

    /// Print the key of a song
    Key {
        /// Song file, or - for stdin
        input: PathBuf,

        /// Semitones to transpose before reporting
        #[arg(short, long, allow_hyphen_values = true)]
        transpose: Option<i32>,
    },

    /// List the distinct chords of a song in order of appearance
    Chords {
        /// Song file, or - for stdin
        input: PathBuf,

        /// Semitones to transpose before listing
        #[arg(short, long, allow_hyphen_values = true)]
        transpose: Option<i32>,

        /// Spell altered notes with flats
        #[arg(long, default_value = "false")]
        flats: bool,
    },

    /// List the bundled songs, or print one of them
    Songs {
        /// Library path, e.g. entrada/deus-esta-aqui
        name: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// Song file, or - for stdin
    pub input: PathBuf,

    /// Semitones to move every chord (negative moves down)
    #[arg(short, long, allow_hyphen_values = true)]
    pub transpose: Option<i32>,

    /// Spell altered notes with flats
    #[arg(long, default_value = "false")]
    pub flats: bool,

    /// Hide chords and render only the lyrics
    #[arg(long, default_value = "false")]
    pub no_chords: bool,

    /// Force the song format instead of detecting it
    #[arg(long, value_name = "FORMAT")]
    #[arg(value_parser = ["inline", "separate", "above"])]
    pub format: Option<String>,

    /// Split the HTML into two columns
    #[arg(long, default_value = "false")]
    pub columns: bool,

    /// Emit PDF draw calls as JSON instead of HTML
    #[arg(long, default_value = "false", conflicts_with = "columns")]
    pub pdf: bool,

    /// Emit the full render result (keys, format, html) as JSON
    #[arg(long, default_value = "false", conflicts_with = "pdf")]
    pub json: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TransposeArgs {
    /// Song file, or - for stdin
    pub input: PathBuf,

    /// Semitones to move every chord (negative moves down)
    #[arg(short, long, allow_hyphen_values = true)]
    pub transpose: i32,

    /// Spell altered notes with flats
    #[arg(long, default_value = "false")]
    pub flats: bool,

    /// Output file (defaults to stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Get the log filter based on verbosity flags
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
