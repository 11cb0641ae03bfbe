#![warn(missing_docs)]
//! Hex terrain map editor core.
//!
//! A rectangular grid of hexagonal cells with elevation, color and rivers,
//! grouped into fixed-size chunks that are flagged for rebuild whenever a
//! cell they display changes. [`terrain::TerrainPlugin`] wires the grid and
//! the brush tool into a Bevy app.

pub mod coordinates;
pub mod direction;
pub mod editor;
pub mod error;
pub mod grid;
pub mod math;
pub mod metrics;
pub mod terrain;

pub use coordinates::HexCoordinates;
pub use direction::HexDirection;
pub use editor::{HexMapEditor, OptionalToggle};
pub use error::HexMapError;
pub use grid::{CellId, ChunkId, HexCell, HexGrid, HexGridChunk};
pub use metrics::{EdgeThresholds, EdgeType, HexMetrics};
