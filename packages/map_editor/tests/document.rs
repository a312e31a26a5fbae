use map_editor::{
    document::{
        Document,
        Editor,
    },
    settings::Settings,
    terrain_tool::{
        BrushType,
        MouseButton,
        TerrainTool,
    },
};
use pfmap::{
    EdgeMode,
    Map,
    TileCoords,
    TileShape,
    X_COORDS_PER_TILE,
    Y_COORDS_PER_TILE,
    Z_COORDS_PER_TILE,
};
use std::{
    fs,
    path::PathBuf,
};
use vek::*;


fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("map-editor-test-{}-{}.pfmap", std::process::id(), name))
}

fn small_settings() -> Settings {
    Settings {
        new_map_rows: 1,
        new_map_cols: 2,
        ..Settings::default()
    }
}

#[test]
fn save_as_then_load() {
    let path = temp_path("save-load");
    let mut editor = Editor::new(small_settings());
    let mut tool = TerrainTool::new(editor.settings());
    tool.set_brush_type(BrushType::Height);
    tool.select_height(12).unwrap();

    let cursor = TileCoords::from_gtc(Vec2::new(33, 4));
    tool.on_selected_tile_changed(Some(cursor), &mut editor).unwrap();
    tool.on_mouse_pressed(MouseButton::Left, &mut editor).unwrap();
    tool.on_mouse_released(MouseButton::Left);
    assert!(editor.document().is_dirty());

    editor.save_as(&path).unwrap();
    assert!(!editor.document().is_dirty());
    assert_eq!(editor.document().path(), Some(path.as_path()));
    let saved = editor.document().map.clone();

    let old = editor.new_map();
    assert_eq!(old.map, saved);
    assert_eq!(*editor.document().map.tile_at(cursor), Default::default());

    editor.load(&path).unwrap();
    assert_eq!(editor.document().map, saved);
    assert_eq!(editor.document().map.tile_at(cursor).base_height, 4);
    assert!(!editor.document().is_dirty());

    fs::remove_file(&path).unwrap();
}

#[test]
fn failed_load_keeps_document() {
    let path = temp_path("bad");
    fs::write(&path, "version 9.0\n").unwrap();

    let mut editor = Editor::new(small_settings());
    editor.replace(Document::from_map(Map::new(3, 1)));
    assert!(editor.load(&path).is_err());
    assert!(editor.load(temp_path("missing")).is_err());
    assert_eq!(editor.document().map.chunk_rows(), 3);

    fs::remove_file(&path).unwrap();
}

#[test]
fn failed_save_stays_dirty() {
    let mut editor = Editor::new(small_settings());
    let mut tool = TerrainTool::new(editor.settings());
    tool.set_brush_type(BrushType::Height);
    tool.on_selected_tile_changed(Some(TileCoords::from_gtc(Vec2::new(0, 0))), &mut editor).unwrap();
    tool.on_mouse_pressed(MouseButton::Left, &mut editor).unwrap();
    assert!(editor.document().is_dirty());

    assert!(editor.save().is_err());
    let bad = std::env::temp_dir().join("map-editor-no-such-dir").join("x.pfmap");
    assert!(editor.save_as(bad).is_err());
    assert!(editor.document().is_dirty());
    assert_eq!(editor.document().path(), None);
}

#[test]
fn dragging_paints_each_tile_and_moves_objects() {
    let mut editor = Editor::new(small_settings());
    let mut tool = TerrainTool::new(editor.settings());
    tool.set_brush_type(BrushType::Height);
    tool.select_height(13).unwrap();
    tool.set_edges(EdgeMode::Smooth);

    let mut document = Document::from_map(Map::new(1, 2));
    document.objects.push(Vec3::new(10.5 * X_COORDS_PER_TILE, 0.0, 9.5 * Z_COORDS_PER_TILE));
    editor.replace(document);

    tool.on_mouse_pressed(MouseButton::Left, &mut editor).unwrap();
    for x in 10..13 {
        let cursor = TileCoords::from_gtc(Vec2::new(x, 10));
        tool.on_selected_tile_changed(Some(cursor), &mut editor).unwrap();
    }
    tool.on_mouse_released(MouseButton::Left);
    tool.on_selected_tile_changed(Some(TileCoords::from_gtc(Vec2::new(20, 20))), &mut editor).unwrap();

    let map = &editor.document().map;
    for x in 10..13 {
        assert_eq!(map.tile_at_gtc(Vec2::new(x, 10)).unwrap().base_height, 5);
    }
    assert_eq!(map.tile_at_gtc(Vec2::new(20, 20)).unwrap().base_height, 0);
    let north = map.tile_at_gtc(Vec2::new(11, 9)).unwrap();
    assert_eq!((north.shape, north.base_height, north.ramp_height), (TileShape::RampNS, 0, 5));

    // halfway up the ramp north of the painted row
    let object = editor.document().objects[0];
    assert_eq!(object.y, 2.5 * Y_COORDS_PER_TILE);

    // the engine saw the same terrain the map holds
    for (coords, tile) in map.tiles() {
        assert_eq!(editor.engine().tile(coords.gtc()), Some(tile));
    }
}

#[test]
fn cursor_off_map_is_rejected() {
    let mut editor = Editor::new(small_settings());
    let mut tool = TerrainTool::new(editor.settings());
    tool.on_selected_tile_changed(Some(TileCoords::from_gtc(Vec2::new(64, 0))), &mut editor).unwrap();
    assert!(tool.on_mouse_pressed(MouseButton::Left, &mut editor).is_err());
    assert!(!editor.document().is_dirty());
}
