use log::{debug, trace};
use tilewalk_core::{Level, Passability, Point};

use crate::direction::Direction;
use crate::heap::NodeHeap;
use crate::pathfinder::{CellState, Membership, Pathfinder, Route, SearchGrid, step_allowed};

impl Pathfinder {
    /// Compute the cheapest path from `start` to `goal` using A*.
    ///
    /// Returns the tiles to walk, excluding `start` and including `goal`,
    /// or `None` if no path exists. See [`find_route`](Self::find_route).
    pub fn find_path<L: Level>(
        &self,
        level: &L,
        start: Point,
        goal: Point,
    ) -> Option<Vec<Point>> {
        self.find_route(level, start, goal).map(|r| r.steps)
    }

    /// Compute the cheapest path from `start` to `goal` along with its cost.
    ///
    /// A goal outside the level or on an impassable tile is rejected before
    /// any search state is allocated. A `start` equal to `goal` yields an
    /// empty route. Closed tiles are never reopened.
    pub fn find_route<L: Level>(&self, level: &L, start: Point, goal: Point) -> Option<Route> {
        if !level.contains(goal) || level.passability(goal) == Passability::Impassable {
            debug!("astar: goal {goal} is out of bounds or impassable");
            return None;
        }
        if !level.contains(start) {
            debug!("astar: start {start} is out of bounds");
            return None;
        }

        let costs = self.config.costs;
        let mut grid = SearchGrid::new(level.bounds());
        let mut open = NodeHeap::new();
        let start_idx = grid.idx(start)?;
        let goal_idx = grid.idx(goal)?;

        let id = open.insert(start, 0, costs.estimate(start, goal));
        grid.cells[start_idx] = CellState {
            membership: Membership::Open,
            node: Some(id),
            parent: None,
        };

        let mut expanded = 0usize;

        let found = 'search: loop {
            #[cfg(test)]
            {
                assert_eq!(grid.open_count(), open.len());
                assert_eq!(open.check(), Ok(()));
            }

            let Some(id) = open.extract_min() else {
                break 'search None;
            };
            let (current_point, current_g) = {
                let n = open.get(id);
                (n.pos, n.g)
            };
            let ci = grid.idx(current_point)?;
            grid.cells[ci].membership = Membership::Closed;
            grid.cells[ci].node = None;
            expanded += 1;

            if ci == goal_idx {
                break 'search Some(current_g);
            }
            if self.config.max_expansions.is_some_and(|cap| expanded >= cap) {
                debug!("astar: gave up after {expanded} expansions towards {goal}");
                return None;
            }
            trace!("astar: expand {current_point} g={current_g}");

            for dir in Direction::ALL {
                let np = current_point + dir.offset();
                let Some(ni) = grid.idx(np) else {
                    continue;
                };
                if grid.cells[ni].membership == Membership::Closed
                    || !step_allowed(level, current_point, dir)
                {
                    continue;
                }
                let tentative_g = current_g + costs.step(dir);

                let n = &mut grid.cells[ni];
                match n.membership {
                    Membership::Unseen => {
                        let id = open.insert(np, tentative_g, costs.estimate(np, goal));
                        *n = CellState {
                            membership: Membership::Open,
                            node: Some(id),
                            parent: Some(ci),
                        };
                    }
                    Membership::Open => {
                        let Some(id) = n.node else {
                            continue;
                        };
                        if tentative_g < open.get(id).g {
                            n.parent = Some(ci);
                            open.decrease_key(id, tentative_g);
                        }
                    }
                    Membership::Closed => {}
                }
            }
        };

        let Some(cost) = found else {
            debug!("astar: no path from {start} to {goal} ({expanded} expanded)");
            return None;
        };

        // Reconstruct path.
        let mut steps = Vec::new();
        let mut ci = goal_idx;
        while let Some(parent) = grid.cells[ci].parent {
            steps.push(grid.point(ci));
            ci = parent;
        }
        steps.reverse();

        debug!(
            "astar: {start} -> {goal}: {} steps, cost {cost}, {expanded} expanded",
            steps.len()
        );
        Some(Route {
            steps,
            cost,
            expanded,
        })
    }
}
