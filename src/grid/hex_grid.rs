use bevy::color::Color;
use bevy::log::info;
use bevy::math::Vec3;

use super::cell::{CellMut, HexCell};
use super::chunk::{ChunkSink, HexGridChunk};
use super::{CellId, ChunkId};
use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;
use crate::error::HexMapError;
use crate::metrics::{CHUNK_SIZE_X, CHUNK_SIZE_Z, EdgeType, HexMetrics};
use crate::terrain::GridSettings;

/// Fixed-size hex map: every cell and chunk, created once.
///
/// Cells are stored row-major by offset coordinates; chunks partition the
/// cells into `CHUNK_SIZE_X` x `CHUNK_SIZE_Z` rectangles.
pub struct HexGrid<C = HexGridChunk> {
    chunk_count_x: usize,
    chunk_count_z: usize,
    cell_count_x: usize,
    cell_count_z: usize,
    origin: Vec3,
    pub(super) cells: Vec<HexCell>,
    pub(super) chunks: Vec<C>,
    pub(super) metrics: HexMetrics,
}

impl HexGrid {
    /// Builds a grid of default [`HexGridChunk`]s.
    pub fn new(settings: &GridSettings, metrics: HexMetrics) -> Result<Self, HexMapError> {
        Self::with_chunks(settings, metrics, |_| HexGridChunk::new())
    }
}

impl<C: ChunkSink> HexGrid<C> {
    /// Builds a grid whose chunks come from `new_chunk`.
    ///
    /// Chunks are created first, then cells in row-major order. Each cell is
    /// wired to its already-created west and southern neighbors, attached to
    /// its chunk, and only then given elevation 0, so every chunk starts dirty.
    pub fn with_chunks(
        settings: &GridSettings,
        metrics: HexMetrics,
        mut new_chunk: impl FnMut(ChunkId) -> C,
    ) -> Result<Self, HexMapError> {
        if settings.chunk_count_x == 0 || settings.chunk_count_z == 0 {
            return Err(HexMapError::EmptyGrid {
                x: settings.chunk_count_x,
                z: settings.chunk_count_z,
            });
        }

        let chunk_count_x = settings.chunk_count_x as usize;
        let chunk_count_z = settings.chunk_count_z as usize;
        let cell_count_x = chunk_count_x * CHUNK_SIZE_X;
        let cell_count_z = chunk_count_z * CHUNK_SIZE_Z;

        let chunks = (0..chunk_count_x * chunk_count_z)
            .map(|i| new_chunk(ChunkId(i)))
            .collect();

        let mut grid = Self {
            chunk_count_x,
            chunk_count_z,
            cell_count_x,
            cell_count_z,
            origin: settings.origin,
            cells: Vec::with_capacity(cell_count_x * cell_count_z),
            chunks,
            metrics,
        };

        for z in 0..cell_count_z {
            for x in 0..cell_count_x {
                grid.create_cell(x, z, settings.default_color);
            }
        }

        info!(
            "Built hex grid: {cell_count_x}x{cell_count_z} cells in {chunk_count_x}x{chunk_count_z} chunks"
        );
        Ok(grid)
    }

    fn create_cell(&mut self, x: usize, z: usize, color: Color) {
        let i = self.cells.len();
        let id = CellId(i);
        let coordinates = HexCoordinates::from_offset(x as i32, z as i32);
        self.cells
            .push(HexCell::new(coordinates, coordinates.to_world_position(), color));

        if x > 0 {
            self.set_neighbor(id, HexDirection::W, CellId(i - 1));
        }
        if z > 0 {
            let below = i - self.cell_count_x;
            if z % 2 == 0 {
                self.set_neighbor(id, HexDirection::SE, CellId(below));
                if x > 0 {
                    self.set_neighbor(id, HexDirection::SW, CellId(below - 1));
                }
            } else {
                self.set_neighbor(id, HexDirection::SW, CellId(below));
                if x + 1 < self.cell_count_x {
                    self.set_neighbor(id, HexDirection::SE, CellId(below + 1));
                }
            }
        }

        self.add_cell_to_chunk(x, z, id);
        self.cell_mut(id).set_elevation(0);
    }

    /// Links `cell` and `other` across `direction` in both directions.
    ///
    /// Called once per undirected adjacency during construction.
    fn set_neighbor(&mut self, cell: CellId, direction: HexDirection, other: CellId) {
        debug_assert!(
            self.cells[cell.0].neighbors[direction.index()].is_none(),
            "neighbor {direction} of {cell:?} wired twice"
        );
        self.cells[cell.0].neighbors[direction.index()] = Some(other);
        self.cells[other.0].neighbors[direction.opposite().index()] = Some(cell);
    }

    fn add_cell_to_chunk(&mut self, x: usize, z: usize, id: CellId) {
        let chunk_x = x / CHUNK_SIZE_X;
        let chunk_z = z / CHUNK_SIZE_Z;
        let chunk = ChunkId(chunk_x + chunk_z * self.chunk_count_x);

        let local_x = x - chunk_x * CHUNK_SIZE_X;
        let local_z = z - chunk_z * CHUNK_SIZE_Z;
        self.chunks[chunk.0].add_cell(local_x + local_z * CHUNK_SIZE_X, id);
        self.cells[id.0].chunk = Some(chunk);
    }

    // ── Lookup ─────────────────────────────────────────────────────

    /// Cell at `coordinates`, or `None` outside the grid.
    pub fn cell_id(&self, coordinates: HexCoordinates) -> Option<CellId> {
        let (column, row) = coordinates.to_offset();
        let row = usize::try_from(row).ok().filter(|&r| r < self.cell_count_z)?;
        let column = usize::try_from(column)
            .ok()
            .filter(|&c| c < self.cell_count_x)?;
        Some(CellId(column + row * self.cell_count_x))
    }

    /// Cell under a world-space point, or `None` when it lies off the grid.
    pub fn cell_id_at(&self, position: Vec3) -> Option<CellId> {
        self.cell_id(HexCoordinates::from_world_position(position - self.origin))
    }

    /// Cell data at `coordinates`, or `None` outside the grid.
    pub fn get(&self, coordinates: HexCoordinates) -> Option<&HexCell> {
        self.cell_id(coordinates).map(|id| self.cell(id))
    }

    /// Cell data for an id issued by this grid.
    pub fn cell(&self, id: CellId) -> &HexCell {
        &self.cells[id.0]
    }

    /// Mutation handle for an id issued by this grid.
    pub fn cell_mut(&mut self, id: CellId) -> CellMut<'_, C> {
        CellMut::new(self, id)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellId, &HexCell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }

    /// Neighbor of `id` across `direction`, absent at the grid border.
    pub fn neighbor(&self, id: CellId, direction: HexDirection) -> Option<CellId> {
        self.cells[id.0].neighbor(direction)
    }

    /// World-space center of a cell, including its elevation height.
    pub fn world_position(&self, id: CellId) -> Vec3 {
        self.origin + self.cells[id.0].position()
    }

    // ── Edge classification ────────────────────────────────────────

    /// Edge type between `id` and its neighbor across `direction`.
    pub fn edge_type(&self, id: CellId, direction: HexDirection) -> Option<EdgeType> {
        self.neighbor(id, direction)
            .map(|other| self.edge_type_between(id, other))
    }

    /// Edge type between any two cells, by elevation difference.
    pub fn edge_type_between(&self, a: CellId, b: CellId) -> EdgeType {
        self.metrics
            .edge_type(self.cells[a.0].elevation(), self.cells[b.0].elevation())
    }

    // ── Chunks ─────────────────────────────────────────────────────

    /// Chunk by id.
    pub fn chunk(&self, id: ChunkId) -> &C {
        &self.chunks[id.0]
    }

    /// All chunks in row-major order.
    pub fn chunks(&self) -> impl Iterator<Item = (ChunkId, &C)> {
        self.chunks.iter().enumerate().map(|(i, c)| (ChunkId(i), c))
    }

    /// All chunks, mutably; used by the deferred rebuild pass.
    pub fn chunks_mut(&mut self) -> impl Iterator<Item = (ChunkId, &mut C)> {
        self.chunks
            .iter_mut()
            .enumerate()
            .map(|(i, c)| (ChunkId(i), c))
    }

    // ── Dimensions ─────────────────────────────────────────────────

    /// Cells per row.
    pub fn cell_count_x(&self) -> usize {
        self.cell_count_x
    }

    /// Number of rows.
    pub fn cell_count_z(&self) -> usize {
        self.cell_count_z
    }

    /// Chunks per chunk row.
    pub fn chunk_count_x(&self) -> usize {
        self.chunk_count_x
    }

    /// Number of chunk rows.
    pub fn chunk_count_z(&self) -> usize {
        self.chunk_count_z
    }

    /// World-space position of the grid's local origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Geometry context shared by all cells.
    pub fn metrics(&self) -> &HexMetrics {
        &self.metrics
    }
}
