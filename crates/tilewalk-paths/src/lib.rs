//! A* pathfinding for side-view tile levels.
//!
//! Movement is 8-directional with per-axis step costs (see [`MoveCosts`]).
//! Diagonal steps may not cut past an impassable corner, and
//! [`Passability::Platform`](tilewalk_core::Passability::Platform) tiles can
//! be entered from below or the side but never by moving downward.
//!
//! The open set is a [`NodeHeap`]: a complete binary min-heap of linked
//! nodes with stable [`NodeId`]s, so a cell's queued cost can be lowered in
//! place instead of pushing duplicates.
//!
//! ```
//! use tilewalk_core::{Point, TileMap};
//! use tilewalk_paths::Pathfinder;
//!
//! let level = TileMap::from_ascii(".....\n..#..\n.....").unwrap();
//! let path = Pathfinder::new()
//!     .find_path(&level, Point::new(0, 1), Point::new(4, 1))
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! assert_eq!(path.last(), Some(&Point::new(4, 1)));
//! ```

mod astar;
mod cost;
mod direction;
mod heap;
mod pathfinder;

pub use cost::MoveCosts;
pub use direction::Direction;
pub use heap::{HeapNode, NodeHeap, NodeId};
pub use pathfinder::{Pathfinder, PathfinderConfig, Route};
