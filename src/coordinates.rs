//! Cube coordinates for a pointy-top hex grid stored in staggered rows.
//!
//! Only `x` and `z` are stored; `y` is always `-x - z`, so the cube constraint
//! `x + y + z = 0` holds for every value of [`HexCoordinates`] by construction.

use std::fmt;

use bevy::math::{Vec2, Vec3};
use hexx::Hex;

use crate::direction::HexDirection;
use crate::metrics::HEX_LAYOUT;

/// Immutable cube coordinate of a hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HexCoordinates {
    x: i32,
    z: i32,
}

impl HexCoordinates {
    /// Coordinate from its two independent cube components.
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cube `x` component.
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Derived cube `y` component (`-x - z`).
    pub const fn y(&self) -> i32 {
        -self.x - self.z
    }

    /// Cube `z` component, equal to the storage row.
    pub const fn z(&self) -> i32 {
        self.z
    }

    /// Converts staggered-row offset indices to cube coordinates.
    pub const fn from_offset(column: i32, row: i32) -> Self {
        Self::new(column - row.div_euclid(2), row)
    }

    /// Inverse of [`Self::from_offset`]: `(column, row)`.
    pub const fn to_offset(&self) -> (i32, i32) {
        (self.x + self.z.div_euclid(2), self.z)
    }

    /// Cell center on the XZ plane (grid-local space, `y = 0`).
    pub fn to_world_position(&self) -> Vec3 {
        let center = HEX_LAYOUT.hex_to_world_pos(self.to_hex());
        Vec3::new(center.x, 0.0, center.y)
    }

    /// Coordinate of the cell containing a grid-local point. `y` is ignored.
    pub fn from_world_position(position: Vec3) -> Self {
        HEX_LAYOUT
            .world_pos_to_hex(Vec2::new(position.x, position.z))
            .into()
    }

    /// Coordinate of the adjacent cell across `direction`.
    pub const fn neighbor(&self, direction: HexDirection) -> Self {
        let (dx, dz) = direction.offset();
        Self::new(self.x + dx, self.z + dz)
    }

    /// Hex distance (number of steps) to `other`.
    pub fn distance_to(&self, other: Self) -> i32 {
        self.to_hex().distance_to(other.to_hex())
    }

    /// Axial `hexx` coordinate (`x` → `q`, `z` → `r`).
    pub const fn to_hex(&self) -> Hex {
        Hex::new(self.x, self.z)
    }

    /// Cell label text with one component per line.
    pub fn to_string_on_separate_lines(&self) -> String {
        format!("{}\n{}\n{}", self.x, self.y(), self.z)
    }
}

impl From<Hex> for HexCoordinates {
    fn from(hex: Hex) -> Self {
        Self::new(hex.x, hex.y)
    }
}

impl fmt::Display for HexCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y(), self.z)
    }
}
