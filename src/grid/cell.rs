use std::ops::Deref;

use bevy::color::Color;
use bevy::log::{debug, trace};
use bevy::math::Vec3;

use super::chunk::ChunkSink;
use super::hex_grid::HexGrid;
use super::{CellId, ChunkId};
use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;

/// State of one hex cell.
///
/// Read through [`HexGrid::cell`]; change through [`HexGrid::cell_mut`] so
/// that neighbor and chunk bookkeeping stays consistent.
#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub(super) coordinates: HexCoordinates,
    pub(super) position: Vec3,
    pub(super) elevation: i32,
    pub(super) color: Color,
    pub(super) neighbors: [Option<CellId>; 6],
    pub(super) incoming_river: Option<HexDirection>,
    pub(super) outgoing_river: Option<HexDirection>,
    pub(super) chunk: Option<ChunkId>,
}

impl HexCell {
    /// Elevation of a cell that has never been assigned one.
    pub const UNSET_ELEVATION: i32 = i32::MIN;

    pub(super) fn new(coordinates: HexCoordinates, position: Vec3, color: Color) -> Self {
        Self {
            coordinates,
            position,
            elevation: Self::UNSET_ELEVATION,
            color,
            neighbors: [None; 6],
            incoming_river: None,
            outgoing_river: None,
            chunk: None,
        }
    }

    /// Cube coordinates, fixed at creation.
    pub fn coordinates(&self) -> HexCoordinates {
        self.coordinates
    }

    /// Grid-local center; `y` is the perturbed elevation height.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Position of the overlay label: on the XY plane, lifted above the surface.
    pub fn ui_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.z, -self.position.y)
    }

    /// Overlay label text.
    pub fn label(&self) -> String {
        self.coordinates.to_string_on_separate_lines()
    }

    /// Elevation level.
    pub fn elevation(&self) -> i32 {
        self.elevation
    }

    /// Surface color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Owning chunk; `None` only while the grid is being built.
    pub fn chunk(&self) -> Option<ChunkId> {
        self.chunk
    }

    /// Neighbor across `direction`, absent at the grid border.
    pub fn neighbor(&self, direction: HexDirection) -> Option<CellId> {
        self.neighbors[direction.index()]
    }

    /// Whether a river flows into this cell.
    pub fn has_incoming_river(&self) -> bool {
        self.incoming_river.is_some()
    }

    /// Whether a river flows out of this cell.
    pub fn has_outgoing_river(&self) -> bool {
        self.outgoing_river.is_some()
    }

    /// Edge the incoming river enters through.
    pub fn incoming_river(&self) -> Option<HexDirection> {
        self.incoming_river
    }

    /// Edge the outgoing river leaves through.
    pub fn outgoing_river(&self) -> Option<HexDirection> {
        self.outgoing_river
    }

    /// Whether any river touches this cell.
    pub fn has_river(&self) -> bool {
        self.has_incoming_river() || self.has_outgoing_river()
    }

    /// Whether a river starts or ends here (exactly one of in/out).
    pub fn has_river_begin_or_end(&self) -> bool {
        self.has_incoming_river() != self.has_outgoing_river()
    }

    /// Whether a river crosses the edge in `direction`.
    pub fn has_river_through_edge(&self, direction: HexDirection) -> bool {
        self.incoming_river == Some(direction) || self.outgoing_river == Some(direction)
    }
}

/// Mutable view of one cell inside its grid.
///
/// Every setter is a no-op when nothing would change. Elevation and color
/// changes refresh this cell's chunk and any neighboring chunk, since both
/// mesh the shared edge. River changes refresh only the chunks of the two
/// endpoint cells: river decoration is drawn from those cells alone.
pub struct CellMut<'a, C> {
    grid: &'a mut HexGrid<C>,
    id: CellId,
}

impl<C> Deref for CellMut<'_, C> {
    type Target = HexCell;

    fn deref(&self) -> &HexCell {
        &self.grid.cells[self.id.index()]
    }
}

impl<'a, C: ChunkSink> CellMut<'a, C> {
    pub(super) fn new(grid: &'a mut HexGrid<C>, id: CellId) -> Self {
        Self { grid, id }
    }

    /// Id of the cell being edited.
    pub fn id(&self) -> CellId {
        self.id
    }

    fn state(&mut self) -> &mut HexCell {
        &mut self.grid.cells[self.id.index()]
    }

    fn neighbor_elevation(&self, direction: HexDirection) -> Option<i32> {
        self.neighbor(direction)
            .map(|n| self.grid.cells[n.index()].elevation)
    }

    /// Moves the cell to `elevation`, dropping any river that would now flow uphill.
    pub fn set_elevation(&mut self, elevation: i32) {
        let grid = &mut *self.grid;
        let cell = &mut grid.cells[self.id.index()];
        if cell.elevation == elevation {
            return;
        }
        cell.elevation = elevation;
        cell.position.y = grid.metrics.elevation_height(elevation, cell.position);

        if let Some(direction) = self.outgoing_river
            && self
                .neighbor_elevation(direction)
                .is_some_and(|downstream| elevation < downstream)
        {
            self.remove_outgoing_river();
        }
        if let Some(direction) = self.incoming_river
            && self
                .neighbor_elevation(direction)
                .is_some_and(|upstream| elevation > upstream)
        {
            self.remove_incoming_river();
        }

        self.grid.refresh(self.id);
    }

    /// Recolors the cell.
    pub fn set_color(&mut self, color: Color) {
        if self.color == color {
            return;
        }
        self.state().color = color;
        self.grid.refresh(self.id);
    }

    /// Starts a river flowing out across `direction`.
    ///
    /// Ignored when there is no neighbor there or the neighbor is higher.
    /// Replaces this cell's outgoing river and the neighbor's incoming one;
    /// an incoming river through the same edge is removed.
    pub fn set_outgoing_river(&mut self, direction: HexDirection) {
        if self.outgoing_river == Some(direction) {
            return;
        }
        let Some(neighbor) = self.neighbor(direction) else {
            trace!("No river {direction} of {}: grid border", self.coordinates);
            return;
        };
        let target = self.grid.cells[neighbor.index()].elevation;
        if self.elevation < target {
            debug!(
                "No river {direction} of {}: elevation {} is below {target}",
                self.coordinates, self.elevation
            );
            return;
        }

        self.remove_outgoing_river();
        if self.incoming_river == Some(direction) {
            self.remove_incoming_river();
        }
        self.state().outgoing_river = Some(direction);
        self.grid.refresh_self_only(self.id);

        let mut downstream = self.grid.cell_mut(neighbor);
        downstream.remove_incoming_river();
        downstream.state().incoming_river = Some(direction.opposite());
        self.grid.refresh_self_only(neighbor);
    }

    /// Removes the outgoing river and its incoming end on the neighbor.
    pub fn remove_outgoing_river(&mut self) {
        let Some(direction) = self.state().outgoing_river.take() else {
            return;
        };
        self.grid.refresh_self_only(self.id);

        let neighbor = self.neighbor(direction);
        if let Some(neighbor) = neighbor {
            self.grid.cells[neighbor.index()].incoming_river = None;
            self.grid.refresh_self_only(neighbor);
        }
    }

    /// Removes the incoming river and its outgoing end on the neighbor.
    pub fn remove_incoming_river(&mut self) {
        let Some(direction) = self.state().incoming_river.take() else {
            return;
        };
        self.grid.refresh_self_only(self.id);

        let neighbor = self.neighbor(direction);
        if let Some(neighbor) = neighbor {
            self.grid.cells[neighbor.index()].outgoing_river = None;
            self.grid.refresh_self_only(neighbor);
        }
    }

    /// Removes both river ends, if present.
    pub fn remove_river(&mut self) {
        self.remove_outgoing_river();
        self.remove_incoming_river();
    }
}

impl<C: ChunkSink> HexGrid<C> {
    /// Marks the cell's chunk and every different neighboring chunk dirty.
    fn refresh(&mut self, id: CellId) {
        let cell = &self.cells[id.index()];
        let Some(chunk) = cell.chunk else {
            return;
        };
        self.chunks[chunk.index()].mark_dirty();
        for neighbor in cell.neighbors.iter().flatten() {
            if let Some(other) = self.cells[neighbor.index()].chunk
                && other != chunk
            {
                self.chunks[other.index()].mark_dirty();
            }
        }
    }

    /// Marks only the cell's own chunk dirty.
    fn refresh_self_only(&mut self, id: CellId) {
        if let Some(chunk) = self.cells[id.index()].chunk {
            self.chunks[chunk.index()].mark_dirty();
        }
    }
}
