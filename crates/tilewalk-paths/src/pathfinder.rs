use tilewalk_core::{Level, Passability, Point, Range};

use crate::cost::MoveCosts;
use crate::direction::Direction;
use crate::heap::NodeId;

/// Search settings for a [`Pathfinder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathfinderConfig {
    /// Per-step movement costs, also used by the heuristic.
    pub costs: MoveCosts,
    /// Give up with "no path" after expanding this many nodes.
    /// `None` searches until the open set is exhausted.
    pub max_expansions: Option<usize>,
}

/// A found path plus its bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Tiles to walk, start excluded, goal included.
    pub steps: Vec<Point>,
    /// Total movement cost of `steps`.
    pub cost: i32,
    /// Number of nodes expanded by the search, goal included.
    pub expanded: usize,
}

/// A* pathfinder over a [`Level`].
///
/// The pathfinder itself only holds configuration. Every query allocates
/// its own cell-state grid and heap, so one `Pathfinder` can be shared
/// freely between agents and threads.
#[derive(Debug, Clone, Default)]
pub struct Pathfinder {
    pub(crate) config: PathfinderConfig,
}

impl Pathfinder {
    /// Create a pathfinder with the default costs and no expansion cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pathfinder with explicit settings.
    pub fn with_config(config: PathfinderConfig) -> Self {
        Self { config }
    }

    /// The active settings.
    #[inline]
    pub fn config(&self) -> &PathfinderConfig {
        &self.config
    }

    /// Heuristic cost between two tiles, without running a search.
    #[inline]
    pub fn heuristic_cost(&self, a: Point, b: Point) -> i32 {
        self.config.costs.estimate(a, b)
    }

    /// The candidate with the lowest [`heuristic_cost`](Self::heuristic_cost)
    /// from `from`. The first one wins ties.
    pub fn nearest(
        &self,
        from: Point,
        candidates: impl IntoIterator<Item = Point>,
    ) -> Option<Point> {
        candidates
            .into_iter()
            .min_by_key(|&c| self.heuristic_cost(from, c))
    }

    /// Whether a single step from `from` in `dir` is allowed on `level`.
    ///
    /// Applies the bounds, impassable, platform and corner-cutting rules a
    /// search uses; `from` must itself be inside the level.
    pub fn can_step<L: Level>(&self, level: &L, from: Point, dir: Direction) -> bool {
        level.contains(from) && step_allowed(level, from, dir)
    }
}

/// Movement rules for one step, independent of search state.
///
/// A diagonal move cuts the corner shared by two orthogonal tiles; neither
/// may be impassable. Platforms only block moves that go downward into them.
pub(crate) fn step_allowed<L: Level>(level: &L, from: Point, dir: Direction) -> bool {
    let to = from + dir.offset();
    if !level.contains(to) {
        return false;
    }
    let dest = level.passability(to);
    if dest == Passability::Impassable {
        return false;
    }
    match dir {
        Direction::Up | Direction::Left | Direction::Right => true,
        Direction::Down => dest != Passability::Platform,
        Direction::UpRight | Direction::UpLeft => corner_clear(level, from, dir),
        Direction::DownRight | Direction::DownLeft => {
            dest != Passability::Platform && corner_clear(level, from, dir)
        }
    }
}

/// Both orthogonal neighbours of the corner crossed by diagonal `dir` are
/// not impassable. Platforms do not block corners.
fn corner_clear<L: Level>(level: &L, from: Point, dir: Direction) -> bool {
    let d = dir.offset();
    level.passability(from.shift(d.x, 0)) != Passability::Impassable
        && level.passability(from.shift(0, d.y)) != Passability::Impassable
}

// ---------------------------------------------------------------------------
// Per-search cell state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Membership {
    #[default]
    Unseen,
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CellState {
    pub(crate) membership: Membership,
    /// Heap node while `Open`.
    pub(crate) node: Option<NodeId>,
    /// Predecessor on the best known path, as a cell index.
    pub(crate) parent: Option<usize>,
}

/// Fresh state for every tile of a level, allocated per query.
pub(crate) struct SearchGrid {
    pub(crate) cells: Vec<CellState>,
    rng: Range,
    width: usize,
}

impl SearchGrid {
    pub(crate) fn new(rng: Range) -> Self {
        Self {
            cells: vec![CellState::default(); rng.len()],
            rng,
            width: rng.width().max(0) as usize,
        }
    }

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let y = (p.y - self.rng.min.y) as usize;
        Some(y * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let y = (idx / self.width) as i32 + self.rng.min.y;
        Point::new(x, y)
    }

    /// Number of cells currently `Open`.
    #[cfg(test)]
    pub(crate) fn open_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|c| c.membership == Membership::Open)
            .count()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let cfg = PathfinderConfig {
            costs: MoveCosts {
                diagonal: 14,
                horizontal: 10,
                vertical: 10,
            },
            max_expansions: Some(500),
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: PathfinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
