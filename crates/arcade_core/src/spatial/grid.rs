//! Uniform grid for broad-phase collision detection
//!
//! The play field is cut into square cells. Each entity is filed under every
//! cell its bounding circle's box touches, so a query only has to look at the
//! cells under the query circle. With cells close to the typical entity size
//! that is a handful of cells per query, which turns the all-pairs test into
//! roughly linear work.
//!
//! The grid keeps no history: it is cleared and refilled every frame.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::SpatialQuery;
use crate::config::CollisionConfig;
use crate::ecs::Entity;
use crate::foundation::math::Vec2;

/// Smallest accepted cell edge length
pub const MIN_CELL_SIZE: f32 = 1e-3;

/// Upper bound on cells along one axis
pub const MAX_CELLS_PER_AXIS: usize = 1024;

/// How positions outside the play field map onto cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoundaryMode {
    /// Out-of-bounds positions land in the nearest edge cell
    #[default]
    Clamp,
    /// Cell coordinates wrap around, for fields whose edges connect
    Wrap,
}

/// An entity filed in the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridEntry {
    /// The entity
    pub entity: Entity,
    /// Center on the collision plane
    pub position: Vec2,
    /// Bounding radius
    pub radius: f32,
}

/// Uniform grid over a rectangular play field
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    width: f32,
    height: f32,
    /// Minimum corner of the covered field
    origin: Vec2,
    columns: usize,
    rows: usize,
    boundary: BoundaryMode,
    cells: Vec<Vec<GridEntry>>,
    /// Indices of non-empty cells, so clearing skips empty ones
    occupied: Vec<usize>,
    entity_count: usize,
}

impl SpatialGrid {
    /// Create a grid of `cell_size` cells covering a `width` x `height` field
    /// centered on the world origin
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let cell_size = cell_size.max(MIN_CELL_SIZE);
        let width = width.max(cell_size);
        let height = height.max(cell_size);
        let columns = cells_along(width, cell_size);
        let rows = cells_along(height, cell_size);

        Self {
            cell_size,
            width,
            height,
            origin: Vec2::new(-width / 2.0, -height / 2.0),
            columns,
            rows,
            boundary: BoundaryMode::Clamp,
            cells: vec![Vec::new(); columns * rows],
            occupied: Vec::new(),
            entity_count: 0,
        }
    }

    /// Create a grid from collision settings
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self::new(config.cell_size, config.width, config.height)
            .with_boundary(config.boundary)
    }

    /// Move the field so its minimum corner sits at `min_corner`
    pub fn with_origin(mut self, min_corner: Vec2) -> Self {
        self.origin = min_corner;
        self
    }

    /// Set how out-of-bounds positions are handled
    pub fn with_boundary(mut self, boundary: BoundaryMode) -> Self {
        self.boundary = boundary;
        self
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        for index in self.occupied.drain(..) {
            self.cells[index].clear();
        }
        self.entity_count = 0;
    }

    /// File an entity under every cell its bounding circle touches
    ///
    /// Negative or NaN radii are treated as zero.
    pub fn insert(&mut self, entity: Entity, position: Vec2, radius: f32) {
        let radius = if radius > 0.0 { radius } else { 0.0 };
        let entry = GridEntry { entity, position, radius };

        let rows = self.span(position.y - radius, position.y + radius, self.origin.y, self.rows);
        let columns = self.span(position.x - radius, position.x + radius, self.origin.x, self.columns);

        for row in rows {
            for column in columns.clone() {
                let index = self.cell_index(column, row);
                let cell = &mut self.cells[index];
                if cell.is_empty() {
                    self.occupied.push(index);
                }
                cell.push(entry);
            }
        }

        self.entity_count += 1;
    }

    /// Entities filed in any cell under the query circle, without duplicates
    pub fn query(&self, position: Vec2, radius: f32) -> Vec<Entity> {
        self.query_entries(position, radius)
            .into_iter()
            .map(|entry| entry.entity)
            .collect()
    }

    /// Like [`SpatialGrid::query`] but returns the stored entries
    ///
    /// Entries come back in the order they are first met walking the cells
    /// row by row.
    pub fn query_entries(&self, position: Vec2, radius: f32) -> Vec<GridEntry> {
        let radius = if radius > 0.0 { radius } else { 0.0 };
        let rows = self.span(position.y - radius, position.y + radius, self.origin.y, self.rows);
        let columns = self.span(position.x - radius, position.x + radius, self.origin.x, self.columns);

        let mut seen = HashSet::new();
        let mut results = Vec::new();
        for row in rows {
            for column in columns.clone() {
                for entry in &self.cells[self.cell_index(column, row)] {
                    if seen.insert(entry.entity) {
                        results.push(*entry);
                    }
                }
            }
        }
        results
    }

    /// Cell (column, row) a point falls in after boundary handling
    pub fn cell_of(&self, position: Vec2) -> (usize, usize) {
        let column = *self.span(position.x, position.x, self.origin.x, self.columns).start();
        let row = *self.span(position.y, position.y, self.origin.y, self.rows).start();
        (
            wrap_index(column, self.columns),
            wrap_index(row, self.rows),
        )
    }

    /// Edge length of one cell
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Width and height of the covered field
    pub fn extent(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Number of cell columns
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cell rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of cells holding at least one entity
    pub fn occupied_cells(&self) -> usize {
        self.occupied.len()
    }

    /// Number of entities inserted since the last clear
    pub fn entity_count(&self) -> usize {
        self.entity_count
    }

    /// Boundary handling mode
    pub fn boundary(&self) -> BoundaryMode {
        self.boundary
    }

    /// Raw cell coordinates covered by `[lo, hi]` along one axis
    ///
    /// In clamp mode the range is already inside `0..count`. In wrap mode it
    /// may run past either end and is capped at `count` cells, so mapping it
    /// through [`wrap_index`] visits each cell at most once.
    fn span(&self, lo: f32, hi: f32, origin: f32, count: usize) -> RangeInclusive<i64> {
        let count = count as i64;
        // NaN becomes cell 0 here
        let first = ((lo - origin) / self.cell_size).floor() as i64;
        let last = (((hi - origin) / self.cell_size).floor() as i64).max(first);

        match self.boundary {
            BoundaryMode::Clamp => first.clamp(0, count - 1)..=last.clamp(0, count - 1),
            BoundaryMode::Wrap => first..=last.min(first.saturating_add(count - 1)),
        }
    }

    fn cell_index(&self, column: i64, row: i64) -> usize {
        wrap_index(row, self.rows) * self.columns + wrap_index(column, self.columns)
    }
}

impl SpatialQuery for SpatialGrid {
    fn insert(&mut self, entity: Entity, position: Vec2, radius: f32) {
        SpatialGrid::insert(self, entity, position, radius);
    }

    fn query_circle(&self, center: Vec2, radius: f32) -> Vec<Entity> {
        self.query(center, radius)
    }

    fn clear(&mut self) {
        SpatialGrid::clear(self);
    }

    fn entity_count(&self) -> usize {
        self.entity_count
    }
}

fn cells_along(length: f32, cell_size: f32) -> usize {
    // Float to int casts saturate, so huge fields just hit the cap
    ((length / cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS)
}

fn wrap_index(raw: i64, count: usize) -> usize {
    raw.rem_euclid(count as i64) as usize
}
