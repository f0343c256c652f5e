//! **tilewalk-core**: shared types for tile-level pathfinding.
//!
//! This crate provides the geometry primitives, the pixel→tile raster and
//! the read-only [`Level`] view that the `tilewalk-paths` search consumes.

pub mod geom;
pub mod level;
pub mod tiles;

pub use geom::{Point, Range, RangeIter};
pub use level::{Level, LevelError, Passability, TileMap};
pub use tiles::TileSize;
