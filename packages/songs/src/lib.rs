//! Song files bundled with cifra, grouped by liturgical moment
//! (`entrada/`, `aclamacao/`, `comunhao/`).

include!(concat!(env!("OUT_DIR"), "/songs.rs"));

/// A song file with its library path and raw text.
#[derive(Debug, Clone)]
pub struct SongFile {
    pub name: String,
    pub content: String,
}

impl SongFile {
    /// Liturgical moment, taken from the directory the file lives in.
    pub fn moment(&self) -> Option<&str> {
        self.name.split_once('/').map(|(dir, _)| dir)
    }
}

/// Get all embedded songs
pub fn get_all_songs() -> Vec<SongFile> {
    SONGS
        .iter()
        .map(|(name, content)| SongFile {
            name: name.to_string(),
            content: content.to_string(),
        })
        .collect()
}

/// Get a song by its library path, with or without the `.txt` extension
pub fn get_song(name: &str) -> Option<SongFile> {
    SONGS
        .iter()
        .find(|(n, _)| *n == name || n.strip_suffix(".txt") == Some(name))
        .map(|(name, content)| SongFile {
            name: name.to_string(),
            content: content.to_string(),
        })
}

/// List all song names
pub fn list_songs() -> Vec<&'static str> {
    SONGS.iter().map(|(name, _)| *name).collect()
}
