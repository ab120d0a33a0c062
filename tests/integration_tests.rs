//! Integration tests for the cifra CLI
//!
//! These tests run whole command lines against song files on disk.

use cifra::commands;
use cifra::config::Cli;
use cifra::CliError;
use clap::Parser;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SONG: &str = "---\ntitle: Deus Está Aqui\nkey: Am\n---\n#mic#\n[Am]Deus [F]está [C]aqui\n[Am]Deus [E7]está [Am]aqui\n";

fn write_song(dir: &Path) -> String {
    let path = dir.join("song.txt");
    fs::write(&path, SONG).expect("Failed to write song");
    path.to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> Result<commands::Output, CliError> {
    let mut argv = vec!["cifra"];
    argv.extend_from_slice(args);
    commands::run(&Cli::parse_from(argv))
}

#[test]
fn test_render_command() {
    let dir = TempDir::new().unwrap();
    let song = write_song(dir.path());

    let output = run(&["render", &song, "-t", "3"]).unwrap();
    assert!(output.path.is_none());
    assert!(output.text.starts_with("<div class=\"chord-sheet inline\">"));
    assert!(output.text.contains("<span class=\"chord\">Cm</span>"));
    assert!(!output.text.contains("#mic#"));
}

#[test]
fn test_render_command_with_output_file() {
    let dir = TempDir::new().unwrap();
    let song = write_song(dir.path());
    let out = dir.path().join("song.html");

    let output = run(&["render", &song, "-o", &out.to_string_lossy()]).unwrap();
    assert_eq!(output.path.as_deref(), Some(out.as_path()));
}

#[test]
fn test_config_file_and_flags() {
    let dir = TempDir::new().unwrap();
    let song = write_song(dir.path());
    let config = dir.path().join("cifra.yaml");
    fs::write(&config, "render:\n  transpose: 1\n  spelling: flats\n").unwrap();

    let output = run(&["render", &song, "--config", &config.to_string_lossy()]).unwrap();
    assert!(output.text.contains("<span class=\"chord\">Bbm</span>"));

    // the flag wins over the file
    let output = run(&["render", &song, "--config", &config.to_string_lossy(), "-t", "0"]).unwrap();
    assert!(output.text.contains("<span class=\"chord\">Am</span>"));
}

#[test]
fn test_transpose_command_keeps_frontmatter() {
    let dir = TempDir::new().unwrap();
    let song = write_song(dir.path());

    let output = run(&["transpose", &song, "-t", "-2"]).unwrap();
    assert!(output.text.starts_with("---\ntitle: Deus Está Aqui\nkey: Am\n---\n#mic#\n"));
    assert!(output.text.contains("[Gm]Deus [D#]está [A#]aqui"));
}

#[test]
fn test_key_and_chords_commands() {
    let dir = TempDir::new().unwrap();
    let song = write_song(dir.path());

    assert_eq!(run(&["key", &song]).unwrap().text, "Tom: Am");
    assert_eq!(run(&["key", &song, "-t", "2"]).unwrap().text, "Tom: Bm (original: Am)");
    assert_eq!(run(&["chords", &song]).unwrap().text, "Am F C E7");
}

#[test]
fn test_missing_input() {
    let result = run(&["render", "/nonexistent/song.txt"]);
    assert!(matches!(result, Err(CliError::Read { .. })));
}

#[test]
fn test_bundled_song() {
    let output = run(&["songs", "comunhao/pao-da-vida"]).unwrap();
    assert!(output.text.contains("title: Pão da Vida"));
}
