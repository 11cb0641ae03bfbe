//! Chunk contract consumed by cells and the default dirty-tracking chunk.

use super::CellId;
use crate::metrics::{CHUNK_SIZE_X, CHUNK_SIZE_Z};

/// Receiver for chunk membership and refresh notifications.
///
/// Implemented by whatever builds chunk geometry. `mark_dirty` must be
/// idempotent; the rebuild itself happens later, once per frame.
pub trait ChunkSink {
    /// Registers `cell` at `local_index`. Called once per cell while the grid is built.
    fn add_cell(&mut self, local_index: usize, cell: CellId);

    /// Queues the chunk for a rebuild.
    fn mark_dirty(&mut self);
}

/// Default chunk: member cells plus a dirty flag for the deferred rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexGridChunk {
    cells: [Option<CellId>; CHUNK_SIZE_X * CHUNK_SIZE_Z],
    dirty: bool,
}

impl Default for HexGridChunk {
    fn default() -> Self {
        Self {
            cells: [None; CHUNK_SIZE_X * CHUNK_SIZE_Z],
            dirty: false,
        }
    }
}

impl HexGridChunk {
    /// Empty, clean chunk.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a rebuild is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag, returning whether a rebuild was pending.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Member cells in local (row-major) order.
    pub fn cells(&self) -> impl Iterator<Item = CellId> + '_ {
        self.cells.iter().flatten().copied()
    }
}

impl ChunkSink for HexGridChunk {
    fn add_cell(&mut self, local_index: usize, cell: CellId) {
        self.cells[local_index] = Some(cell);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_flag_collapses_repeated_marks() {
        let mut chunk = HexGridChunk::new();
        assert!(!chunk.is_dirty());
        chunk.mark_dirty();
        chunk.mark_dirty();
        assert!(chunk.take_dirty());
        assert!(!chunk.take_dirty());
    }

    #[test]
    fn cells_iterate_in_local_order() {
        let mut chunk = HexGridChunk::new();
        chunk.add_cell(7, CellId(70));
        chunk.add_cell(2, CellId(20));
        assert_eq!(chunk.cells().collect::<Vec<_>>(), vec![CellId(20), CellId(70)]);
    }
}
