//! Terrain painting tool.
//!
//! While the left mouse button is held, every change of the tile under the
//! cursor paints the brush once more.

use crate::{
    document::Editor,
    settings::Settings,
};
use pfmap::{
    Brush,
    BrushKind,
    EdgeMode,
    TileCoords,
};
use anyhow::*;


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Which kind of brush is selected. Its parameter is selected separately.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum BrushType {
    #[default]
    Material,
    Height,
}

#[derive(Debug, Clone)]
pub struct TerrainTool {
    brush_sizes: Vec<i64>,
    heights: Vec<i32>,
    brush_type: BrushType,
    brush_size_idx: usize,
    height_idx: usize,
    material_idx: usize,
    edges: EdgeMode,
    selected_tile: Option<TileCoords>,
    painting: bool,
}

impl TerrainTool {
    /// Smallest brush, height 0 if it is selectable, first material, hard
    /// edges.
    ///
    /// Panics if `settings` has no brush sizes or no heights.
    pub fn new(settings: &Settings) -> Self {
        assert!(!settings.brush_sizes.is_empty(), "no brush sizes");
        assert!(!settings.heights.is_empty(), "no heights");
        TerrainTool {
            brush_sizes: settings.brush_sizes.clone(),
            heights: settings.heights.clone(),
            brush_type: BrushType::default(),
            brush_size_idx: 0,
            height_idx: settings.heights.iter().position(|&h| h == 0).unwrap_or(0),
            material_idx: 0,
            edges: EdgeMode::default(),
            selected_tile: None,
            painting: false,
        }
    }

    pub fn set_brush_type(&mut self, brush_type: BrushType) {
        self.brush_type = brush_type;
    }

    pub fn set_edges(&mut self, edges: EdgeMode) {
        self.edges = edges;
    }

    pub fn select_brush_size(&mut self, idx: usize) -> Result<()> {
        ensure!(idx < self.brush_sizes.len(), "no brush size #{}", idx);
        self.brush_size_idx = idx;
        Ok(())
    }

    pub fn select_height(&mut self, idx: usize) -> Result<()> {
        ensure!(idx < self.heights.len(), "no height #{}", idx);
        self.height_idx = idx;
        Ok(())
    }

    /// Material indices are checked against the map when painting.
    pub fn select_material(&mut self, idx: usize) {
        self.material_idx = idx;
    }

    pub fn brush_sizes(&self) -> &[i64] {
        &self.brush_sizes
    }

    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    pub fn selected_tile(&self) -> Option<TileCoords> {
        self.selected_tile
    }

    pub fn is_painting(&self) -> bool {
        self.painting
    }

    /// The brush as currently configured.
    pub fn brush(&self) -> Brush {
        let kind = match self.brush_type {
            BrushType::Material => BrushKind::Material(self.material_idx),
            BrushType::Height => BrushKind::Height(self.heights[self.height_idx]),
        };
        Brush::with_size(kind, self.brush_sizes[self.brush_size_idx], self.edges)
    }

    pub fn on_mouse_pressed(&mut self, button: MouseButton, editor: &mut Editor) -> Result<()> {
        if button != MouseButton::Left {
            return Ok(());
        }
        self.painting = true;
        self.paint(editor)
    }

    pub fn on_mouse_released(&mut self, button: MouseButton) {
        if button == MouseButton::Left {
            self.painting = false;
        }
    }

    /// The cursor moved onto a different tile, or off the map.
    pub fn on_selected_tile_changed(
        &mut self,
        tile: Option<TileCoords>,
        editor: &mut Editor,
    ) -> Result<()> {
        self.selected_tile = tile;
        if self.painting {
            self.paint(editor)?;
        }
        Ok(())
    }

    fn paint(&self, editor: &mut Editor) -> Result<()> {
        match self.selected_tile {
            Some(cursor) => editor.apply_brush(&self.brush(), cursor),
            None => Ok(()),
        }
    }
}
