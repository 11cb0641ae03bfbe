//! Headless hex map editor: builds a map, drags one brush stroke across it,
//! and reports what changed.

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::{Parser, ValueEnum};

use hex_map_editor::HexCoordinates;
use hex_map_editor::editor::{MAX_BRUSH_SIZE, OptionalToggle};
use hex_map_editor::terrain::{
    EditInput, EditorSettings, GridSettings, HexMap, HexMapConfig, NoiseSettings, RebuildStats,
    TerrainPlugin,
};

/// Builds a hex map and drags one brush stroke across its middle row.
#[derive(Parser)]
#[command(name = "hex-map-editor")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Chunks along X.
    #[arg(long, default_value = "4")]
    chunks_x: u32,

    /// Chunks along Z.
    #[arg(long, default_value = "3")]
    chunks_z: u32,

    /// Brush radius in cells.
    #[arg(
        short,
        long,
        default_value = "0",
        value_parser = clap::value_parser!(u32).range(..=MAX_BRUSH_SIZE as i64)
    )]
    brush: u32,

    /// Elevation to apply along the stroke.
    #[arg(short, long)]
    elevation: Option<i32>,

    /// Palette index to paint along the stroke.
    #[arg(short, long)]
    color: Option<usize>,

    /// River handling along the stroke.
    #[arg(short, long, default_value = "ignore")]
    river: RiverMode,

    /// Noise seed for elevation perturbation.
    #[arg(short, long, default_value = "42")]
    seed: u32,

    /// Log per-edit and per-rebuild detail.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum RiverMode {
    Ignore,
    Yes,
    No,
}

impl From<RiverMode> for OptionalToggle {
    fn from(mode: RiverMode) -> Self {
        match mode {
            RiverMode::Ignore => OptionalToggle::Ignore,
            RiverMode::Yes => OptionalToggle::Yes,
            RiverMode::No => OptionalToggle::No,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let config = HexMapConfig {
        grid: GridSettings {
            chunk_count_x: cli.chunks_x,
            chunk_count_z: cli.chunks_z,
            ..default()
        },
        noise: NoiseSettings {
            seed: cli.seed,
            ..default()
        },
        editor: EditorSettings {
            color: cli.color,
            elevation: cli.elevation,
            brush_size: cli.brush,
            river_mode: cli.river.into(),
            ..default()
        },
        ..default()
    };

    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level: if cli.verbose { Level::DEBUG } else { Level::INFO },
        ..default()
    })
    .add_plugins(TerrainPlugin(config));
    app.update();

    let Some(map) = app.world().get_resource::<HexMap>() else {
        error!("No hex map was generated");
        return;
    };
    info!(
        "Generated {}x{} cells in {}x{} chunks",
        map.cell_count_x(),
        map.cell_count_z(),
        map.chunk_count_x(),
        map.chunk_count_z()
    );

    let row = (map.cell_count_z() / 2) as i32;
    let stroke: Vec<Vec3> = (0..map.cell_count_x() as i32)
        .filter_map(|column| map.cell_id(HexCoordinates::from_offset(column, row)))
        .map(|id| map.world_position(id))
        .collect();

    for point in stroke {
        app.world_mut().write_message(EditInput::Press(point));
        app.update();
    }
    app.world_mut().write_message(EditInput::Release);
    app.update();

    let map = app.world().resource::<HexMap>();
    let rivers = map.cells().filter(|(_, c)| c.has_outgoing_river()).count();
    let raised = map.cells().filter(|(_, c)| c.elevation() != 0).count();
    let stats = app.world().resource::<RebuildStats>();
    info!(
        "Stroke done: {rivers} river segments, {raised} cells off ground level, {} chunks rebuilt over {} passes",
        stats.chunks_rebuilt, stats.passes
    );
}
