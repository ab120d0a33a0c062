//! Subcommand implementations
//!
//! Every command turns its input into a single output string; `main` decides
//! where that string goes.

use crate::config::{Cli, Command, RenderArgs, Settings, TransposeArgs};
use crate::error::{CliError, Result};
use cifra_core::transpose::transpose_chord;
use cifra_core::{detect_key, export_pdf, key_line, render_song, DrawList, Song};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Output of a command and where it should be written.
#[derive(Debug)]
pub struct Output {
    pub text: String,
    pub path: Option<PathBuf>,
}

impl Output {
    fn stdout(text: String) -> Self {
        Self { text, path: None }
    }
}

/// Run the parsed command line.
pub fn run(cli: &Cli) -> Result<Output> {
    let settings = Settings::load(cli.config.as_deref())?;

    match &cli.command {
        Command::Render(args) => render(args, settings),
        Command::Transpose(args) => transpose(args, settings),
        Command::Key { input, transpose } => {
            let settings = settings.with_transpose(*transpose, false);
            key(&read_input(input)?, &settings).map(Output::stdout)
        }
        Command::Chords { input, transpose, flats } => {
            let settings = settings.with_transpose(*transpose, *flats);
            chords(&read_input(input)?, &settings).map(Output::stdout)
        }
        Command::Songs { name } => songs(name.as_deref()).map(Output::stdout),
    }
}

/// Read a song file, or stdin for `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn render(args: &RenderArgs, settings: Settings) -> Result<Output> {
    let settings = settings.with_render_args(args);
    let source = read_input(&args.input)?;
    info!(input = %args.input.display(), "rendering song");
    let text = render_source(&source, &settings, args.pdf, args.json)?;
    Ok(Output {
        text,
        path: args.output.clone(),
    })
}

/// Render a song document as HTML, JSON or PDF draw calls.
pub fn render_source(source: &str, settings: &Settings, pdf: bool, json: bool) -> Result<String> {
    let song = Song::parse(source)?;
    let mut options = settings.render.clone();
    options.format = options.format.or(Some(song.format));
    debug!(?options, "render options");

    if pdf {
        let mut list = DrawList::new();
        let pages = export_pdf(&song, &options, &settings.pdf, None, &mut list);
        info!(pages, "laid out pdf");
        return Ok(serde_json::to_string_pretty(&list.ops)?);
    }

    let rendered = render_song(&song.body, &options);
    if json {
        return Ok(serde_json::to_string_pretty(&rendered)?);
    }
    match rendered.columns {
        Some(columns) if !columns.is_single() => Ok(format!(
            "<div class=\"chord-columns\">\n{}\n{}\n</div>",
            columns.left, columns.right
        )),
        _ => Ok(rendered.html),
    }
}

fn transpose(args: &TransposeArgs, settings: Settings) -> Result<Output> {
    let settings = settings.with_transpose(Some(args.transpose), args.flats);
    let source = read_input(&args.input)?;
    info!(input = %args.input.display(), semitones = args.transpose, "transposing song");
    Ok(Output {
        text: cifra_core::transpose_with(&source, settings.render.transpose, settings.render.spelling),
        path: args.output.clone(),
    })
}

/// Key report, e.g. `Tom: A (original: G)`.
pub fn key(source: &str, settings: &Settings) -> Result<String> {
    let song = Song::parse(source)?;
    let detected = detect_key(&song.body);
    Ok(key_line(&song.meta, detected, &settings.render).unwrap_or_else(|| "No chords found".to_string()))
}

/// Distinct chords, space separated.
pub fn chords(source: &str, settings: &Settings) -> Result<String> {
    let song = Song::parse(source)?;
    let options = &settings.render;
    let names: Vec<String> = song
        .chords()
        .iter()
        .map(|chord| transpose_chord(chord, options.transpose, options.spelling).display())
        .collect();
    Ok(names.join(" "))
}

/// Library listing, or the text of one bundled song.
pub fn songs(name: Option<&str>) -> Result<String> {
    match name {
        Some(name) => cifra_songs::get_song(name)
            .map(|song| song.content)
            .ok_or_else(|| CliError::UnknownSong(name.to_string())),
        None => Ok(cifra_songs::list_songs()
            .iter()
            .map(|name| name.trim_end_matches(".txt"))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}
