//! The open map and its lifetime.

use crate::{
    headless::HeadlessEngine,
    settings::Settings,
};
use pfmap::{
    Brush,
    Map,
    TileCoords,
};
use std::{
    mem,
    path::{
        Path,
        PathBuf,
    },
};
use anyhow::*;
use vek::*;


/// A map being edited, plus the world positions of objects placed on it.
///
/// Objects are not part of the map file, but follow the terrain when it is
/// reshaped.
#[derive(Debug, Clone)]
pub struct Document {
    pub map: Map,
    pub objects: Vec<Vec3<f32>>,
    dirty: bool,
}

impl Document {
    /// Blank map of the size configured for new maps.
    pub fn new_blank(settings: &Settings) -> Self {
        Document::from_map(Map::new(settings.new_map_rows, settings.new_map_cols))
    }

    pub fn from_map(map: Map) -> Self {
        Document {
            map,
            objects: Vec::new(),
            dirty: false,
        }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let map = Map::try_read(path)
            .with_context(|| format!("unable to open map {}", path.display()))?;
        Ok(Document::from_map(map))
    }

    pub fn path(&self) -> Option<&Path> {
        self.map.path()
    }

    /// Whether there are edits not yet saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}


/// Owns the one open document, and the engine displaying it.
#[derive(Debug)]
pub struct Editor {
    settings: Settings,
    document: Document,
    engine: HeadlessEngine,
}

impl Editor {
    /// Start with a blank document.
    pub fn new(settings: Settings) -> Self {
        let document = Document::new_blank(&settings);
        let engine = HeadlessEngine::new(&document.map);
        Editor {
            settings,
            document,
            engine,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn engine(&self) -> &HeadlessEngine {
        &self.engine
    }

    /// Swap in a different document, returning the old one. Tile coordinates
    /// issued for the old document's map must not be used with the new one.
    pub fn replace(&mut self, document: Document) -> Document {
        self.engine = HeadlessEngine::new(&document.map);
        info!(
            path = ?document.path(),
            rows = document.map.chunk_rows(),
            cols = document.map.chunk_cols(),
            "switched document",
        );
        mem::replace(&mut self.document, document)
    }

    /// Replace the document with a blank one.
    pub fn new_map(&mut self) -> Document {
        let document = Document::new_blank(&self.settings);
        self.replace(document)
    }

    /// Replace the document with one loaded from `path`. If that fails, the
    /// current document stays open.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<Document> {
        let document = Document::open(path)
            .map_err(|e| {
                error!("{:#}", e);
                e
            })?;
        Ok(self.replace(document))
    }

    /// Save to the document's own path.
    pub fn save(&mut self) -> Result<()> {
        let path = self.document.path()
            .map(Path::to_owned)
            .ok_or_else(|| anyhow!("map has no file name yet, save it as a file first"))?;
        self.save_as(path)
    }

    /// Save to `path`, which becomes the document's path. The document is
    /// only marked clean if this succeeds.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        self.document.map.save_as(&path)
            .with_context(|| format!("unable to save map to {}", path.display()))?;
        self.document.dirty = false;
        info!(?path, "saved document");
        Ok(())
    }

    /// Apply `brush` around `cursor`, pushing changes to the engine and
    /// moving objects onto the new terrain. On failure the document is left
    /// as it was.
    pub fn apply_brush(&mut self, brush: &Brush, cursor: TileCoords) -> Result<()> {
        let document = &mut self.document;
        ensure!(
            document.map.contains_gtc(cursor.gtc()),
            "tile {:?} is outside of the map", cursor.gtc(),
        );
        brush.apply(&mut document.map, &mut self.engine, cursor, &mut document.objects)
            .context("unable to apply brush")?;
        document.dirty = true;
        Ok(())
    }
}
