use bevy::prelude::*;

use super::entities::{ChunkRebuilt, EditInput, HexMap, MapEditor, RebuildStats};

// ── Update: brush input ─────────────────────────────────────────────

/// Feeds queued [`EditInput`] messages through the brush in arrival order.
pub fn apply_edit_input(
    mut inputs: MessageReader<EditInput>,
    mut map: ResMut<HexMap>,
    mut editor: ResMut<MapEditor>,
) {
    for input in inputs.read() {
        match *input {
            EditInput::Press(point) => {
                if editor.handle_input(&mut map.0, point).is_none() {
                    trace!("Edit input at {point} is off the grid");
                }
            }
            EditInput::Release => editor.release(),
        }
    }
}

// ── PostUpdate: chunk rebuilds ──────────────────────────────────────

/// Clears every dirty chunk flag and emits one [`ChunkRebuilt`] per chunk.
///
/// Runs after all edits of the frame, so any number of refreshes of the same
/// chunk collapse into a single rebuild.
pub fn rebuild_dirty_chunks(
    mut map: ResMut<HexMap>,
    mut rebuilt: MessageWriter<ChunkRebuilt>,
    mut stats: ResMut<RebuildStats>,
) {
    let mut count = 0;
    for (chunk, state) in map.chunks_mut() {
        if state.take_dirty() {
            rebuilt.write(ChunkRebuilt { chunk });
            count += 1;
        }
    }
    if count > 0 {
        stats.passes += 1;
        stats.chunks_rebuilt += count;
        debug!("Rebuilt {count} chunks");
    }
}
