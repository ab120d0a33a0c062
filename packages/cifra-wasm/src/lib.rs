use cifra_core::{CifraError, RenderOptions, Song, Spelling};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct RenderError {
    message: String,
    kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParsedSong {
    meta: cifra_core::SongMeta,
    format: cifra_core::SongFormat,
    body: String,
    chords: Vec<String>,
}

fn error_to_render_error(e: CifraError) -> RenderError {
    match e {
        CifraError::MetadataError(message) => RenderError {
            message,
            kind: "metadata",
        },
        CifraError::InvalidInput(message) => RenderError {
            message,
            kind: "input",
        },
    }
}

fn error_json(e: CifraError) -> String {
    let error = error_to_render_error(e);
    serde_json::to_string(&error).unwrap_or_else(|_| format!("{{\"message\":{:?}}}", error.message))
}

fn to_js_error(e: CifraError) -> JsValue {
    JsValue::from_str(&error_json(e))
}

/// Song text from JavaScript: a string, or `null`/`undefined` for no song.
fn song_text(value: &JsValue) -> Result<String, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(String::new());
    }
    value
        .as_string()
        .ok_or_else(|| to_js_error(CifraError::InvalidInput("song text must be a string".to_string())))
}

/// Render options from JavaScript. Missing options mean the defaults.
fn render_options(value: JsValue) -> Result<RenderOptions, JsValue> {
    if value.is_null() || value.is_undefined() {
        return Ok(RenderOptions::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| to_js_error(CifraError::InvalidInput(format!("invalid render options: {}", e))))
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| to_js_error(CifraError::InvalidInput(e.to_string())))
}

/// Render song text to HTML
#[wasm_bindgen]
pub fn render(text: JsValue, options: JsValue) -> Result<String, JsValue> {
    let text = song_text(&text)?;
    let options = render_options(options)?;
    Ok(cifra_core::render_song(&text, &options).html)
}

/// Render song text and return html, keys, format and (optionally) columns
#[wasm_bindgen]
pub fn render_song(text: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let text = song_text(&text)?;
    let options = render_options(options)?;
    to_js(&cifra_core::render_song(&text, &options))
}

/// Render song text as two columns of HTML
#[wasm_bindgen]
pub fn render_columns(text: JsValue, options: JsValue) -> Result<JsValue, JsValue> {
    let text = song_text(&text)?;
    let mut options = render_options(options)?;
    options.two_columns = true;
    let rendered = cifra_core::render_song(&text, &options);
    to_js(&rendered.columns.unwrap_or_default())
}

/// Transpose every chord in the text
#[wasm_bindgen]
pub fn transpose(text: JsValue, semitones: i32, flats: Option<bool>) -> Result<String, JsValue> {
    let text = song_text(&text)?;
    let spelling = if flats.unwrap_or(false) {
        Spelling::Flats
    } else {
        Spelling::Sharps
    };
    Ok(cifra_core::transpose_with(&text, semitones, spelling))
}

/// Most likely key of the text, or `undefined` when it has no chords
#[wasm_bindgen]
pub fn detect_key(text: JsValue) -> Result<Option<String>, JsValue> {
    let text = song_text(&text)?;
    Ok(cifra_core::detect_key(&text).map(String::from))
}

/// `"inline"` or `"separate"`
#[wasm_bindgen]
pub fn detect_format(text: JsValue) -> Result<String, JsValue> {
    let text = song_text(&text)?;
    Ok(cifra_core::detect_format(&text).as_str().to_string())
}

/// PDF draw calls for the text as a JSON array
#[wasm_bindgen]
pub fn pdf_ops(text: JsValue, options: JsValue) -> Result<String, JsValue> {
    let text = song_text(&text)?;
    let options = render_options(options)?;
    let ops = cifra_core::pdf_ops(&text, &options);
    serde_json::to_string(&ops).map_err(|e| to_js_error(CifraError::InvalidInput(e.to_string())))
}

/// Parse a song file with frontmatter
#[wasm_bindgen]
pub fn parse_song(source: &str) -> Result<JsValue, JsValue> {
    let song = Song::parse(source).map_err(to_js_error)?;
    let parsed = ParsedSong {
        chords: song.chords().iter().map(|c| c.display()).collect(),
        meta: song.meta,
        format: song.format,
        body: song.body,
    };
    to_js(&parsed)
}

/// Names of the bundled songs as a JSON array
#[wasm_bindgen]
pub fn list_songs() -> String {
    serde_json::to_string(&cifra_songs::list_songs()).unwrap_or_else(|_| "[]".to_string())
}

/// Raw text of a bundled song
#[wasm_bindgen]
pub fn get_song(name: &str) -> Option<String> {
    cifra_songs::get_song(name).map(|song| song.content)
}
