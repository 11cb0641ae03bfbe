//! Error types for hex map construction and editor setup.
//!
//! Edits on an existing grid never fail: invalid requests are no-ops.

use thiserror::Error;

/// Configuration errors reported before any cell is touched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HexMapError {
    /// A grid needs at least one chunk along each axis.
    #[error("grid needs at least one chunk per axis, got {x}x{z}")]
    EmptyGrid {
        /// Requested chunk count along X.
        x: u32,
        /// Requested chunk count along Z.
        z: u32,
    },

    /// A palette color index past the end of the palette.
    #[error("color index {index} is out of range for a palette of {len}")]
    PaletteIndex {
        /// Requested index.
        index: usize,
        /// Palette length.
        len: usize,
    },
}
