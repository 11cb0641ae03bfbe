//! Bevy integration: builds the hex map at startup, applies edit input each
//! frame, and batches chunk rebuilds into one pass at the end of the frame.

mod entities;
mod startup_systems;
mod systems;

pub use entities::{ChunkRebuilt, EditInput, HexMap, MapEditor, RebuildStats};

use bevy::prelude::*;

use crate::editor::OptionalToggle;
use crate::metrics::{EdgeThresholds, NOISE_SCALE};

/// Pipeline ordering for hex map systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HexMapSet {
    /// Applies queued [`EditInput`] messages to the grid.
    Edit,
    /// Consumes dirty chunk flags and emits [`ChunkRebuilt`].
    Rebuild,
}

/// Nested configuration for the hex map subsystem.
#[derive(Resource, Clone, Debug, Default, Reflect)]
pub struct HexMapConfig {
    /// Grid dimensions and initial cell state.
    pub grid: GridSettings,
    /// Elevation perturbation noise.
    pub noise: NoiseSettings,
    /// Edge classification thresholds.
    pub edges: EdgeThresholds,
    /// Initial brush tool state.
    pub editor: EditorSettings,
}

/// Grid dimensions and initial cell state.
#[derive(Clone, Debug, Reflect)]
pub struct GridSettings {
    /// Number of chunks along X.
    pub chunk_count_x: u32,
    /// Number of chunks along Z.
    pub chunk_count_z: u32,
    /// Color every cell starts with.
    pub default_color: Color,
    /// World-space position of cell (0, 0).
    pub origin: Vec3,
}

/// Noise parameters for elevation perturbation.
#[derive(Clone, Debug, Reflect)]
pub struct NoiseSettings {
    /// Seed for the first channel; later channels use consecutive seeds.
    pub seed: u32,
    /// Number of fBm octaves.
    pub octaves: usize,
    /// World-to-noise-space scale.
    pub scale: f64,
}

/// Initial brush tool state.
#[derive(Clone, Debug, Reflect)]
pub struct EditorSettings {
    /// Colors the brush can paint.
    pub palette: Vec<Color>,
    /// Palette index painted, or `None` to leave colors alone.
    pub color: Option<usize>,
    /// Elevation applied by the brush, or `None` to leave elevation alone.
    pub elevation: Option<i32>,
    /// Brush radius in cells.
    pub brush_size: u32,
    /// River handling for brushed cells.
    pub river_mode: OptionalToggle,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            chunk_count_x: 4,
            chunk_count_z: 3,
            default_color: Color::WHITE,
            origin: Vec3::ZERO,
        }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            octaves: 4,
            scale: NOISE_SCALE,
        }
    }
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::srgb(1.0, 0.92, 0.016),
                Color::srgb(0.0, 1.0, 0.0),
                Color::srgb(0.0, 0.0, 1.0),
                Color::WHITE,
            ],
            color: Some(0),
            elevation: None,
            brush_size: 0,
            river_mode: OptionalToggle::Ignore,
        }
    }
}

/// Hex map plugin: grid generation at startup, brush edits in `Update`,
/// chunk rebuilds in `PostUpdate`.
pub struct TerrainPlugin(pub HexMapConfig);

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HexMapConfig>()
            .insert_resource(self.0.clone())
            .init_resource::<RebuildStats>()
            .add_message::<EditInput>()
            .add_message::<ChunkRebuilt>()
            .configure_sets(Update, HexMapSet::Edit)
            .configure_sets(PostUpdate, HexMapSet::Rebuild)
            .add_systems(Startup, startup_systems::generate_hex_map)
            .add_systems(
                Update,
                systems::apply_edit_input
                    .in_set(HexMapSet::Edit)
                    .run_if(resource_exists::<HexMap>),
            )
            .add_systems(
                PostUpdate,
                systems::rebuild_dirty_chunks
                    .in_set(HexMapSet::Rebuild)
                    .run_if(resource_exists::<HexMap>),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::HexCoordinates;
    use crate::direction::HexDirection;

    fn small_app(editor: EditorSettings) -> App {
        let mut app = App::new();
        app.add_plugins(TerrainPlugin(HexMapConfig {
            grid: GridSettings {
                chunk_count_x: 2,
                chunk_count_z: 1,
                ..default()
            },
            editor,
            ..default()
        }));
        app.update();
        app
    }

    fn world_point(app: &App, column: i32, row: i32) -> Vec3 {
        let map = app.world().resource::<HexMap>();
        let id = map
            .cell_id(HexCoordinates::from_offset(column, row))
            .unwrap();
        map.world_position(id)
    }

    #[test]
    fn startup_builds_map_and_first_rebuild_covers_all_chunks() {
        let app = small_app(EditorSettings::default());
        let map = app.world().resource::<HexMap>();
        assert_eq!(map.chunks().count(), 2);
        assert!(map.chunks().all(|(_, c)| !c.is_dirty()));

        let stats = app.world().resource::<RebuildStats>();
        assert_eq!(stats.passes, 1);
        assert_eq!(stats.chunks_rebuilt, 2);
    }

    #[test]
    fn edits_in_one_frame_collapse_into_one_rebuild() {
        let mut app = small_app(EditorSettings {
            elevation: Some(2),
            ..default()
        });
        for column in 0..4 {
            let point = world_point(&app, column, 2);
            app.world_mut().write_message(EditInput::Press(point));
        }
        app.update();

        let stats = app.world().resource::<RebuildStats>();
        assert_eq!(stats.passes, 2);
        assert_eq!(stats.chunks_rebuilt, 3);
        let map = app.world().resource::<HexMap>();
        let cell = map.get(HexCoordinates::from_offset(3, 2)).unwrap();
        assert_eq!(cell.elevation(), 2);
    }

    #[test]
    fn idle_frames_rebuild_nothing() {
        let mut app = small_app(EditorSettings::default());
        app.update();
        app.update();
        assert_eq!(app.world().resource::<RebuildStats>().passes, 1);
    }

    #[test]
    fn drag_across_frames_draws_river() {
        let mut app = small_app(EditorSettings {
            color: None,
            river_mode: OptionalToggle::Yes,
            ..default()
        });
        for column in 1..=3 {
            let point = world_point(&app, column, 2);
            app.world_mut().write_message(EditInput::Press(point));
            app.update();
        }
        app.world_mut().write_message(EditInput::Release);
        app.update();

        let map = app.world().resource::<HexMap>();
        let start = map.get(HexCoordinates::from_offset(1, 2)).unwrap();
        assert_eq!(start.outgoing_river(), Some(HexDirection::E));
        let end = map.get(HexCoordinates::from_offset(3, 2)).unwrap();
        assert_eq!(end.incoming_river(), Some(HexDirection::W));
        assert!(app.world().resource::<MapEditor>().drag_direction().is_none());
    }

    #[test]
    fn invalid_editor_settings_skip_map_creation() {
        let app = small_app(EditorSettings {
            color: Some(99),
            ..default()
        });
        assert!(app.world().get_resource::<HexMap>().is_none());
    }
}
