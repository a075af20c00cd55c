//! Spatial partitioning data structures
//!
//! Broad-phase indexing for collision detection on the x/y plane.

pub mod grid;
pub mod spatial_query;

pub use grid::{BoundaryMode, GridEntry, SpatialGrid};
pub use spatial_query::SpatialQuery;
