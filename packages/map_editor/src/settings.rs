
use std::{
    path::{
        Path,
        PathBuf,
    },
    fs::File,
    io::{
        BufReader,
        BufWriter,
    },
};
use serde::{Serialize, Deserialize};
use anyhow::*;


pub const SETTINGS_FILE_NAME: &'static str = "editor_settings.json";


/// Editor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Chunk rows of a map made with "new".
    pub new_map_rows: usize,
    /// Chunk columns of a map made with "new".
    pub new_map_cols: usize,
    /// Selectable brush sizes, in tiles across.
    pub brush_sizes: Vec<i64>,
    /// Selectable brush heights.
    pub heights: Vec<i32>,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            new_map_rows: 4,
            new_map_cols: 4,
            brush_sizes: vec![1, 3],
            heights: (-8..=8).collect(),
            log_file: PathBuf::from("log"),
        }
    }
}

impl Settings {
    /// Read settings, falling back to the defaults. The error which caused
    /// the fallback, if any, is returned so it can be logged once logging is
    /// set up, which itself needs settings.
    pub fn read_or_default(path: impl AsRef<Path>) -> (Self, Option<Error>) {
        match Self::try_read(path) {
            std::result::Result::Ok(settings) => (settings, None),
            Err(e) => (Settings::default(), Some(e)),
        }
    }

    pub fn try_read(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Settings = serde_json::from_reader(BufReader::new(File::open(path)?))?;
        ensure!(
            settings.new_map_rows > 0 && settings.new_map_cols > 0,
            "new map size must be at least 1x1 chunks",
        );
        ensure!(!settings.brush_sizes.is_empty(), "no brush sizes");
        ensure!(!settings.heights.is_empty(), "no heights");
        Ok(settings)
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        serde_json::to_writer_pretty(BufWriter::new(File::create(path)?), self)?;
        Ok(())
    }
}
