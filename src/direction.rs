//! The six edge directions of a pointy-top hex cell.

use std::fmt;

/// Edge direction of a pointy-top hex, clockwise from north-east.
///
/// The discriminant doubles as the index into a cell's neighbor table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexDirection {
    /// North-east.
    NE = 0,
    /// East.
    E = 1,
    /// South-east.
    SE = 2,
    /// South-west.
    SW = 3,
    /// West.
    W = 4,
    /// North-west.
    NW = 5,
}

impl HexDirection {
    /// All directions in index order.
    pub const ALL: [Self; 6] = [Self::NE, Self::E, Self::SE, Self::SW, Self::W, Self::NW];

    /// Index into a six-slot neighbor table.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Direction with the given index, wrapping modulo 6.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// The direction pointing back across the same edge.
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Next direction counter-clockwise.
    pub const fn previous(self) -> Self {
        Self::from_index(self.index() + 5)
    }

    /// Next direction clockwise.
    pub const fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Cube offset `(dx, dz)` to the neighbor across this edge.
    ///
    /// Rows grow northward and odd rows are shifted half a cell east.
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::NE => (0, 1),
            Self::E => (1, 0),
            Self::SE => (1, -1),
            Self::SW => (0, -1),
            Self::W => (-1, 0),
            Self::NW => (-1, 1),
        }
    }
}

impl fmt::Display for HexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NE => "NE",
            Self::E => "E",
            Self::SE => "SE",
            Self::SW => "SW",
            Self::W => "W",
            Self::NW => "NW",
        };
        f.write_str(name)
    }
}
