//! Brush tool: applies color, elevation, and river edits around a cell.
//!
//! The editor only resolves positions to cells and calls the cell setters,
//! so every grid invariant is enforced by [`crate::grid`].

use bevy::color::Color;
use bevy::log::debug;
use bevy::math::Vec3;
use bevy::reflect::Reflect;

use crate::coordinates::HexCoordinates;
use crate::direction::HexDirection;
use crate::error::HexMapError;
use crate::grid::{CellId, ChunkSink, HexGrid};
use crate::terrain::EditorSettings;

/// Three-way toggle for brush features that can add, remove, or leave alone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
pub enum OptionalToggle {
    /// Leave the feature untouched.
    #[default]
    Ignore,
    /// Add the feature.
    Yes,
    /// Remove the feature.
    No,
}

/// Largest brush radius; larger requests are clamped to it.
pub const MAX_BRUSH_SIZE: u32 = 64;

/// Coordinates covered by a hexagonal brush of radius `size` around `center`.
///
/// Scans the southern half (including the center row) with a widening
/// column range, then the northern half with a narrowing one. `size` is
/// clamped to [`MAX_BRUSH_SIZE`]; a radius `n` brush yields
/// `3 * n * (n + 1) + 1` coordinates, some possibly off the grid.
pub fn brush_coordinates(center: HexCoordinates, size: u32) -> Vec<HexCoordinates> {
    let (cx, cz) = (center.x(), center.z());
    let n = size.min(MAX_BRUSH_SIZE) as usize;
    let mut coordinates = Vec::with_capacity(3 * n * (n + 1) + 1);
    let size = n as i32;

    for (r, z) in (cz - size..=cz).enumerate() {
        for x in cx - r as i32..=cx + size {
            coordinates.push(HexCoordinates::new(x, z));
        }
    }
    for (r, z) in (cz + 1..=cz + size).rev().enumerate() {
        for x in cx - size..=cx + r as i32 {
            coordinates.push(HexCoordinates::new(x, z));
        }
    }
    coordinates
}

/// Interactive brush state.
#[derive(Clone, Debug)]
pub struct HexMapEditor {
    palette: Vec<Color>,
    active_color: Option<Color>,
    active_elevation: i32,
    apply_elevation: bool,
    brush_size: u32,
    river_mode: OptionalToggle,
    previous_cell: Option<CellId>,
    drag_direction: Option<HexDirection>,
}

impl HexMapEditor {
    /// Editor painting the first palette color, single-cell brush.
    pub fn new(palette: Vec<Color>) -> Self {
        let active_color = palette.first().copied();
        Self {
            palette,
            active_color,
            active_elevation: 0,
            apply_elevation: false,
            brush_size: 0,
            river_mode: OptionalToggle::Ignore,
            previous_cell: None,
            drag_direction: None,
        }
    }

    /// Editor configured from settings; fails on an out-of-range color index.
    pub fn from_settings(settings: &EditorSettings) -> Result<Self, HexMapError> {
        let mut editor = Self::new(settings.palette.clone());
        editor.select_color(settings.color)?;
        if let Some(elevation) = settings.elevation {
            editor.set_elevation(elevation);
            editor.set_apply_elevation(true);
        }
        editor.set_brush_size(settings.brush_size);
        editor.set_river_mode(settings.river_mode);
        Ok(editor)
    }

    // ── Tool settings ──────────────────────────────────────────────

    /// Selects a palette color, or `None` to stop painting color.
    pub fn select_color(&mut self, index: Option<usize>) -> Result<(), HexMapError> {
        self.active_color = match index {
            None => None,
            Some(index) => {
                let color = self.palette.get(index).copied().ok_or(
                    HexMapError::PaletteIndex {
                        index,
                        len: self.palette.len(),
                    },
                )?;
                Some(color)
            }
        };
        Ok(())
    }

    /// Elevation applied while elevation editing is on.
    pub fn set_elevation(&mut self, elevation: i32) {
        self.active_elevation = elevation;
    }

    /// Turns elevation editing on or off.
    pub fn set_apply_elevation(&mut self, apply: bool) {
        self.apply_elevation = apply;
    }

    /// Brush radius in cells, clamped to [`MAX_BRUSH_SIZE`]; 0 edits a single cell.
    pub fn set_brush_size(&mut self, size: u32) {
        if size > MAX_BRUSH_SIZE {
            debug!("Brush size {size} clamped to {MAX_BRUSH_SIZE}");
        }
        self.brush_size = size.min(MAX_BRUSH_SIZE);
    }

    /// How brushed cells treat rivers.
    pub fn set_river_mode(&mut self, mode: OptionalToggle) {
        self.river_mode = mode;
    }

    /// Color currently painted, if any.
    pub fn active_color(&self) -> Option<Color> {
        self.active_color
    }

    /// Current brush radius.
    pub fn brush_size(&self) -> u32 {
        self.brush_size
    }

    /// Direction of the current drag, if the last two inputs were neighbors.
    pub fn drag_direction(&self) -> Option<HexDirection> {
        self.drag_direction
    }

    // ── Input ──────────────────────────────────────────────────────

    /// Applies the brush at a world-space point, tracking drags between inputs.
    ///
    /// A point off the grid edits nothing and ends the drag.
    pub fn handle_input<C: ChunkSink>(
        &mut self,
        grid: &mut HexGrid<C>,
        point: Vec3,
    ) -> Option<CellId> {
        let Some(current) = grid.cell_id_at(point) else {
            self.release();
            return None;
        };
        self.drag_direction = match self.previous_cell {
            Some(previous) if previous != current => HexDirection::ALL
                .into_iter()
                .find(|&dir| grid.neighbor(previous, dir) == Some(current)),
            _ => None,
        };
        self.edit_cells(grid, current);
        self.previous_cell = Some(current);
        Some(current)
    }

    /// Ends the current stroke.
    pub fn release(&mut self) {
        self.previous_cell = None;
        self.drag_direction = None;
    }

    /// Edits every in-bounds cell under the brush centered on `center`.
    ///
    /// Returns the number of cells edited.
    pub fn edit_cells<C: ChunkSink>(&self, grid: &mut HexGrid<C>, center: CellId) -> usize {
        let center = grid.cell(center).coordinates();
        let mut edited = 0;
        for coordinates in brush_coordinates(center, self.brush_size) {
            if let Some(id) = grid.cell_id(coordinates) {
                self.edit_cell(grid, id);
                edited += 1;
            }
        }
        debug!("Brush at {center} edited {edited} cells");
        edited
    }

    fn edit_cell<C: ChunkSink>(&self, grid: &mut HexGrid<C>, id: CellId) {
        let mut cell = grid.cell_mut(id);
        if let Some(color) = self.active_color {
            cell.set_color(color);
        }
        if self.apply_elevation {
            cell.set_elevation(self.active_elevation);
        }
        match self.river_mode {
            OptionalToggle::Ignore => {}
            OptionalToggle::No => cell.remove_river(),
            OptionalToggle::Yes => {
                if let Some(dir) = self.drag_direction
                    && let Some(upstream) = cell.neighbor(dir.opposite())
                {
                    grid.cell_mut(upstream).set_outgoing_river(dir);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use hexx::{Hex, shapes};

    use super::*;
    use crate::metrics::HexMetrics;
    use crate::terrain::GridSettings;

    fn grid() -> HexGrid {
        let settings = GridSettings {
            chunk_count_x: 1,
            chunk_count_z: 1,
            ..GridSettings::default()
        };
        HexGrid::new(&settings, HexMetrics::flat()).unwrap()
    }

    fn at(grid: &HexGrid, column: i32, row: i32) -> CellId {
        grid.cell_id(HexCoordinates::from_offset(column, row)).unwrap()
    }

    fn palette() -> Vec<Color> {
        vec![Color::srgb(1.0, 0.0, 0.0), Color::srgb(0.0, 0.0, 1.0)]
    }

    // ── Brush shape ────────────────────────────────────────────────

    #[test]
    fn brush_sizes_cover_centered_hexagons() {
        let center = HexCoordinates::new(4, 7);
        for size in 0..5u32 {
            let coords = brush_coordinates(center, size);
            let n = size as usize;
            assert_eq!(coords.len(), 3 * n * (n + 1) + 1);

            let brushed: HashSet<Hex> = coords.iter().map(|c| c.to_hex()).collect();
            let expected: HashSet<Hex> = shapes::hexagon(center.to_hex(), size).collect();
            assert_eq!(brushed, expected, "brush of size {size}");
        }
    }

    #[test]
    fn size_zero_brush_is_the_center() {
        let center = HexCoordinates::new(-2, 3);
        assert_eq!(brush_coordinates(center, 0), vec![center]);
    }

    #[test]
    fn oversized_brush_is_clamped() {
        let center = HexCoordinates::new(0, 0);
        let n = MAX_BRUSH_SIZE as usize;
        assert_eq!(
            brush_coordinates(center, 30_000).len(),
            3 * n * (n + 1) + 1
        );
        assert_eq!(
            brush_coordinates(center, u32::MAX),
            brush_coordinates(center, MAX_BRUSH_SIZE)
        );

        let mut editor = HexMapEditor::new(palette());
        editor.set_brush_size(u32::MAX);
        assert_eq!(editor.brush_size(), MAX_BRUSH_SIZE);
    }

    #[test]
    fn radius_one_brush_on_interior_cell_touches_seven() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        editor.set_brush_size(1);
        let center = at(&grid, 2, 2);
        assert_eq!(editor.edit_cells(&mut grid, center), 7);
    }

    #[test]
    fn brush_skips_cells_off_the_grid() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        editor.set_brush_size(1);
        for (column, row, edited) in [(0, 0, 3), (3, 0, 5), (5, 5, 3)] {
            let center = at(&grid, column, row);
            assert_eq!(editor.edit_cells(&mut grid, center), edited);
        }
    }

    // ── Painting ───────────────────────────────────────────────────

    #[test]
    fn brush_paints_color_and_elevation() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        editor.select_color(Some(1)).unwrap();
        editor.set_elevation(2);
        editor.set_apply_elevation(true);
        editor.set_brush_size(1);

        let center = at(&grid, 2, 2);
        editor.edit_cells(&mut grid, center);

        let blue = Color::srgb(0.0, 0.0, 1.0);
        let origin = grid.cell(center).coordinates();
        for (_, cell) in grid.cells() {
            let inside = cell.coordinates().distance_to(origin) <= 1;
            assert_eq!(cell.color() == blue, inside);
            assert_eq!(cell.elevation() == 2, inside);
        }
    }

    #[test]
    fn no_color_selected_leaves_colors() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        editor.select_color(None).unwrap();
        let center = at(&grid, 2, 2);
        let before = grid.cell(center).color();
        editor.edit_cells(&mut grid, center);
        assert_eq!(grid.cell(center).color(), before);
    }

    #[test]
    fn out_of_range_color_is_an_error() {
        let mut editor = HexMapEditor::new(palette());
        assert_eq!(
            editor.select_color(Some(5)),
            Err(HexMapError::PaletteIndex { index: 5, len: 2 })
        );
        assert_eq!(editor.active_color(), Some(palette()[0]));
    }

    #[test]
    fn input_at_world_point_edits_cell_under_it() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        let target = at(&grid, 3, 4);
        let point = grid.world_position(target) + Vec3::new(2.0, 0.0, -1.0);
        assert_eq!(editor.handle_input(&mut grid, point), Some(target));
        assert_eq!(grid.cell(target).color(), palette()[0]);
    }

    #[test]
    fn input_off_grid_edits_nothing() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        assert_eq!(editor.handle_input(&mut grid, Vec3::new(-100.0, 0.0, 0.0)), None);
        assert!(grid.cells().all(|(_, c)| c.color() != palette()[0]));
    }

    // ── Rivers ─────────────────────────────────────────────────────

    #[test]
    fn dragging_draws_a_river() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        editor.set_river_mode(OptionalToggle::Yes);

        let path = [at(&grid, 1, 2), at(&grid, 2, 2), at(&grid, 3, 2)];
        for id in path {
            let point = grid.world_position(id);
            editor.handle_input(&mut grid, point);
        }
        editor.release();

        assert_eq!(grid.cell(path[0]).outgoing_river(), Some(HexDirection::E));
        assert_eq!(grid.cell(path[1]).incoming_river(), Some(HexDirection::W));
        assert_eq!(grid.cell(path[1]).outgoing_river(), Some(HexDirection::E));
        assert_eq!(grid.cell(path[2]).incoming_river(), Some(HexDirection::W));
        assert!(!grid.cell(path[2]).has_outgoing_river());
        assert_eq!(editor.drag_direction(), None);
    }

    #[test]
    fn jumping_between_distant_cells_is_not_a_drag() {
        let mut grid = grid();
        let mut editor = HexMapEditor::new(palette());
        editor.set_river_mode(OptionalToggle::Yes);
        for id in [at(&grid, 0, 0), at(&grid, 4, 4)] {
            let point = grid.world_position(id);
            editor.handle_input(&mut grid, point);
        }
        assert_eq!(editor.drag_direction(), None);
        assert!(grid.cells().all(|(_, c)| !c.has_river()));
    }

    #[test]
    fn river_mode_no_erases_rivers() {
        let mut grid = grid();
        let a = at(&grid, 2, 2);
        grid.cell_mut(a).set_outgoing_river(HexDirection::E);

        let mut editor = HexMapEditor::new(palette());
        editor.set_river_mode(OptionalToggle::No);
        editor.edit_cells(&mut grid, a);

        assert!(grid.cells().all(|(_, c)| !c.has_river()));
    }

    #[test]
    fn from_settings_applies_every_option() {
        let settings = EditorSettings {
            palette: palette(),
            color: None,
            elevation: Some(3),
            brush_size: 2,
            river_mode: OptionalToggle::No,
        };
        let editor = HexMapEditor::from_settings(&settings).unwrap();
        assert_eq!(editor.active_color(), None);
        assert_eq!(editor.brush_size(), 2);

        let bad = EditorSettings {
            color: Some(9),
            ..settings
        };
        assert!(HexMapEditor::from_settings(&bad).is_err());
    }
}
