use tilewalk_core::Point;

use crate::direction::Direction;

/// Movement costs per step kind.
///
/// The defaults are proportional to a 32×24 pixel tile: a horizontal step
/// costs 32, a vertical one 24 and a diagonal 40. For
/// [`estimate`](Self::estimate) to stay admissible, `diagonal` must lie
/// between `max(horizontal, vertical)` and `horizontal + vertical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveCosts {
    /// Cost of a step along both axes at once.
    pub diagonal: i32,
    /// Cost of a `Left` or `Right` step.
    pub horizontal: i32,
    /// Cost of an `Up` or `Down` step.
    pub vertical: i32,
}

impl MoveCosts {
    pub const DEFAULT: Self = Self {
        diagonal: 40,
        horizontal: 32,
        vertical: 24,
    };

    /// Cost of a single step in `dir`.
    #[inline]
    pub const fn step(self, dir: Direction) -> i32 {
        match dir {
            Direction::Up | Direction::Down => self.vertical,
            Direction::Left | Direction::Right => self.horizontal,
            _ => self.diagonal,
        }
    }

    /// Estimated cost from `a` to `b`: diagonal steps until the row or
    /// column lines up, then straight steps along the remaining axis.
    ///
    /// Exact on an obstacle-free level. Saturates at `i32::MAX` when the
    /// points are too far apart for the cost to fit.
    #[inline]
    pub fn estimate(self, a: Point, b: Point) -> i32 {
        let dx = i64::from(a.x.abs_diff(b.x));
        let dy = i64::from(a.y.abs_diff(b.y));
        let diag = dx.min(dy);
        let total = diag
            .saturating_mul(self.diagonal.into())
            .saturating_add((dx - diag).saturating_mul(self.horizontal.into()))
            .saturating_add((dy - diag).saturating_mul(self.vertical.into()));
        total.clamp(i32::MIN.into(), i32::MAX.into()) as i32
    }

    /// Total cost of walking `steps` from `start`, or `None` if two
    /// consecutive positions are not adjacent.
    pub fn path_cost(self, start: Point, steps: &[Point]) -> Option<i32> {
        let mut prev = start;
        let mut total = 0;
        for &p in steps {
            total += self.step(Direction::from_offset(p - prev)?);
            prev = p;
        }
        Some(total)
    }
}

impl Default for MoveCosts {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_costs() {
        let c = MoveCosts::default();
        assert_eq!(c.step(Direction::Up), 24);
        assert_eq!(c.step(Direction::Down), 24);
        assert_eq!(c.step(Direction::Left), 32);
        assert_eq!(c.step(Direction::Right), 32);
        for dir in Direction::ALL.into_iter().filter(|d| d.is_diagonal()) {
            assert_eq!(c.step(dir), 40);
        }
    }

    #[test]
    fn estimate_mixes_diagonal_and_straight() {
        let c = MoveCosts::default();
        let o = Point::new(0, 0);
        assert_eq!(c.estimate(o, o), 0);
        assert_eq!(c.estimate(o, Point::new(4, 0)), 128);
        assert_eq!(c.estimate(o, Point::new(0, 3)), 72);
        assert_eq!(c.estimate(o, Point::new(4, 4)), 160);
        // 2 diagonals, then 3 horizontal.
        assert_eq!(c.estimate(o, Point::new(5, -2)), 2 * 40 + 3 * 32);
        // 1 diagonal, then 2 vertical.
        assert_eq!(c.estimate(Point::new(3, 3), Point::new(2, 6)), 40 + 2 * 24);
    }

    #[test]
    fn estimate_is_symmetric() {
        let c = MoveCosts::default();
        let a = Point::new(-3, 7);
        let b = Point::new(9, 1);
        assert_eq!(c.estimate(a, b), c.estimate(b, a));
    }

    #[test]
    fn estimate_saturates_for_far_points() {
        let c = MoveCosts::default();
        let far = c.estimate(Point::new(i32::MIN, 0), Point::new(i32::MAX, 0));
        assert_eq!(far, i32::MAX);
        let corners = c.estimate(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX));
        assert_eq!(corners, i32::MAX);
        let big = MoveCosts {
            diagonal: i32::MAX,
            horizontal: i32::MAX,
            vertical: i32::MAX,
        };
        assert_eq!(big.estimate(Point::new(i32::MIN, 0), Point::new(i32::MAX, 5)), i32::MAX);
    }

    #[test]
    fn path_cost_sums_steps() {
        let c = MoveCosts::default();
        let steps = [Point::new(1, 1), Point::new(2, 1), Point::new(2, 0)];
        assert_eq!(c.path_cost(Point::ZERO, &steps), Some(40 + 32 + 24));
        assert_eq!(c.path_cost(Point::ZERO, &[]), Some(0));
        assert_eq!(c.path_cost(Point::ZERO, &[Point::new(2, 0)]), None);
    }
}
