use bevy::prelude::*;

use crate::editor::HexMapEditor;
use crate::grid::{ChunkId, HexGrid};

/// The hex grid, inserted once startup generation succeeds.
#[derive(Resource, Deref, DerefMut)]
pub struct HexMap(pub HexGrid);

/// Brush tool state shared across frames so drags span multiple inputs.
#[derive(Resource, Deref, DerefMut)]
pub struct MapEditor(pub HexMapEditor);

/// Pointer input forwarded to the brush.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum EditInput {
    /// Pointer held down at a world-space point.
    Press(Vec3),
    /// Pointer released; ends the current drag.
    Release,
}

/// Emitted once per dirty chunk when its rebuild pass runs.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkRebuilt {
    /// The chunk whose cells changed since its last rebuild.
    pub chunk: ChunkId,
}

/// Running totals of rebuild work.
#[derive(Resource, Default, Debug)]
pub struct RebuildStats {
    /// Frames in which at least one chunk was rebuilt.
    pub passes: u32,
    /// Chunks rebuilt across all passes.
    pub chunks_rebuilt: u32,
}
