
#[macro_use]
extern crate tracing;

use map_editor::{
    logging::init_logging,
    settings::{
        Settings,
        SETTINGS_FILE_NAME,
    },
    document::Editor,
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
    PFMAP_EXTENSION,
};
use std::{
    env::args,
    process::exit,
    str::FromStr,
};
use anyhow::*;
use vek::*;


const CLI_INTRO: &'static str = r#"Permafrost map editor, headless edition."#;

const CLI_HELP: &'static str = r#"
Examples:

    [this command] new --out=island.pfmap
    Create a blank map with the size from the settings file.

    [this command] new --out=island.pfmap --rows=2 --cols=3
    Create a blank map of 2x3 chunks.

    [this command] check island.pfmap
    Check that a map file loads.

    [this command] info island.pfmap
    Print a summary of a map file.

    [this command] paint island.pfmap --col=40 --row=12 --height=3 --size=3 --smooth
    Raise a 3x3 square to height 3, blend it into the surroundings, and save.
    Pass --out=other.pfmap to save elsewhere.

Settings are read from editor_settings.json in the working directory.

Env var examples:
    RUST_LOG=pfmap=trace
    Changes logging levels"#;


fn main() {
    println!("{}", CLI_INTRO);
    let (settings, settings_error) = Settings::read_or_default(SETTINGS_FILE_NAME);
    if let Err(e) = init_logging(&settings.log_file) {
        eprintln!("{:#}", e);
    }
    if let Some(e) = settings_error {
        debug!("using default settings: {:#}", e);
    }

    let args = args().collect::<Vec<_>>();
    let result = match args.get(1).map(String::as_str) {
        Some("--help") | None => {
            println!("{}", CLI_HELP);
            Ok(())
        }
        Some("new") => new_from_cli(&args, settings),
        Some("check") => check_from_cli(&args),
        Some("info") => info_from_cli(&args),
        Some("paint") => paint_from_cli(&args, settings),
        Some(command) => Err(anyhow!("unknown command {:?}, try --help", command)),
    };
    if let Err(e) = result {
        error!("{:#}", e);
        exit(1);
    }
}

// value of a --name=value argument
fn flag<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .filter_map(|arg| arg.strip_prefix("--")?.strip_prefix(name)?.strip_prefix('='))
        .next()
}

fn parsed_flag<T>(args: &[String], name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    flag(args, name)
        .map(|value| value.parse().with_context(|| format!("invalid --{}={}", name, value)))
        .transpose()
}

fn required_flag<T>(args: &[String], name: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parsed_flag(args, name)?.ok_or_else(|| anyhow!("missing --{}=", name))
}

// first argument after the command which isn't a flag
fn map_path_arg(args: &[String]) -> Result<&str> {
    args.iter()
        .skip(2)
        .map(String::as_str)
        .find(|arg| !arg.starts_with("--"))
        .ok_or_else(|| anyhow!("missing map path"))
}

fn with_extension(path: &str) -> String {
    if path.ends_with(&format!(".{}", PFMAP_EXTENSION)) {
        path.to_owned()
    } else {
        format!("{}.{}", path, PFMAP_EXTENSION)
    }
}

fn new_from_cli(args: &[String], mut settings: Settings) -> Result<()> {
    let out = with_extension(flag(args, "out").ok_or_else(|| anyhow!("missing --out="))?);
    if let Some(rows) = parsed_flag(args, "rows")? {
        settings.new_map_rows = rows;
    }
    if let Some(cols) = parsed_flag(args, "cols")? {
        settings.new_map_cols = cols;
    }
    ensure!(
        settings.new_map_rows > 0 && settings.new_map_cols > 0,
        "map must have at least 1 chunk",
    );
    let mut editor = Editor::new(settings);
    editor.save_as(&out)?;
    println!("created {}", out);
    Ok(())
}

fn check_from_cli(args: &[String]) -> Result<()> {
    let path = map_path_arg(args)?;
    Map::try_read(path).with_context(|| format!("{} is not a valid map", path))?;
    println!("{} ok", path);
    Ok(())
}

fn info_from_cli(args: &[String]) -> Result<()> {
    let path = map_path_arg(args)?;
    let map = Map::try_read(path).with_context(|| format!("{} is not a valid map", path))?;

    let mut shaped = 0;
    let mut min_height = i32::MAX;
    let mut max_height = i32::MIN;
    for (_, tile) in map.tiles() {
        if tile.shape != TileShape::Flat {
            shaped += 1;
        }
        min_height = min_height.min(tile.base_height);
        max_height = max_height.max(tile.base_height + tile.ramp_height);
    }

    println!("{}", path);
    println!("    chunks:    {} rows x {} cols", map.chunk_rows(), map.chunk_cols());
    println!("    tiles:     {} rows x {} cols", map.tile_rows(), map.tile_cols());
    println!("    non-flat:  {}", shaped);
    println!("    heights:   {} to {}", min_height, max_height);
    println!("    materials:");
    for (i, material) in map.materials().iter().enumerate() {
        println!("        {:>3} {} ({})", i, material.name(), material.texture());
    }
    Ok(())
}

fn paint_from_cli(args: &[String], settings: Settings) -> Result<()> {
    let path = map_path_arg(args)?;
    let gtc = Vec2::new(required_flag::<i64>(args, "col")?, required_flag::<i64>(args, "row")?);
    let height = required_flag::<i32>(args, "height")?;
    let size = parsed_flag::<i64>(args, "size")?.unwrap_or(1);
    let smooth = args.iter().any(|arg| arg == "--smooth");

    let mut tool = TerrainTool::new(&settings);
    let mut editor = Editor::new(settings);
    editor.load(path)?;

    tool.set_brush_type(BrushType::Height);
    tool.set_edges(if smooth { EdgeMode::Smooth } else { EdgeMode::Hard });
    let size_idx = tool.brush_sizes().iter().position(|&s| s == size)
        .ok_or_else(|| anyhow!("brush size {} not one of {:?}", size, tool.brush_sizes()))?;
    tool.select_brush_size(size_idx)?;
    let height_idx = tool.heights().iter().position(|&h| h == height)
        .ok_or_else(|| anyhow!("height {} not one of {:?}", height, tool.heights()))?;
    tool.select_height(height_idx)?;

    // one click on the tile
    tool.on_selected_tile_changed(Some(TileCoords::from_gtc(gtc)), &mut editor)?;
    tool.on_mouse_pressed(MouseButton::Left, &mut editor)?;
    tool.on_mouse_released(MouseButton::Left);
    info!(pushes = editor.engine().tile_pushes(), "painted");

    match flag(args, "out") {
        Some(out) => editor.save_as(with_extension(out))?,
        None => editor.save()?,
    }
    println!("painted {}x{} at {:?} to height {}", size, size, gtc, height);
    Ok(())
}
