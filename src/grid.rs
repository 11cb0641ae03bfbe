//! Hex cell arena: construction, lookup, and invariant-preserving edits.
//!
//! Cells live in one flat `Vec` owned by [`HexGrid`] and refer to each other
//! (and to their chunk) by index, so symmetric river and neighbor updates are
//! plain index lookups.

mod cell;
mod chunk;
mod hex_grid;

pub use cell::{CellMut, HexCell};
pub use chunk::{ChunkSink, HexGridChunk};
pub use hex_grid::HexGrid;

/// Index of a cell in its grid's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(usize);

impl CellId {
    /// Flat row-major index.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Index of a chunk in its grid's chunk array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(usize);

impl ChunkId {
    /// Flat row-major index.
    pub const fn index(self) -> usize {
        self.0
    }
}
