use bevy::prelude::*;

use super::HexMapConfig;
use super::entities::{HexMap, MapEditor};
use crate::editor::HexMapEditor;
use crate::grid::HexGrid;
use crate::metrics::{HexMetrics, PerlinNoise};

// ── Startup ─────────────────────────────────────────────────────────

/// Builds the [`HexMap`] and [`MapEditor`] resources from [`HexMapConfig`].
///
/// Invalid configuration is logged and leaves both resources absent, which
/// keeps the edit and rebuild systems idle.
pub fn generate_hex_map(mut commands: Commands, cfg: Res<HexMapConfig>) {
    let editor = match HexMapEditor::from_settings(&cfg.editor) {
        Ok(editor) => editor,
        Err(err) => {
            error!("Invalid editor settings: {err}");
            return;
        }
    };

    let metrics = HexMetrics::new(PerlinNoise::from_settings(&cfg.noise), cfg.edges.clone());
    let grid = match HexGrid::new(&cfg.grid, metrics) {
        Ok(grid) => grid,
        Err(err) => {
            error!("Hex map generation failed: {err}");
            return;
        }
    };

    commands.insert_resource(HexMap(grid));
    commands.insert_resource(MapEditor(editor));
}
