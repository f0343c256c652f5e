use tilewalk_core::Point;

/// One of the eight moves between adjacent tiles.
///
/// Y grows downward, so [`Up`](Direction::Up) is `(0, -1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
}

impl Direction {
    /// Every direction, clockwise from `Up`. Searches expand neighbours in
    /// this order, which decides ties between equal-cost candidates.
    pub const ALL: [Direction; 8] = [
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
        Self::Left,
        Self::UpLeft,
    ];

    /// Tile delta for one step in this direction.
    #[inline]
    pub const fn offset(self) -> Point {
        match self {
            Self::Up => Point::new(0, -1),
            Self::UpRight => Point::new(1, -1),
            Self::Right => Point::new(1, 0),
            Self::DownRight => Point::new(1, 1),
            Self::Down => Point::new(0, 1),
            Self::DownLeft => Point::new(-1, 1),
            Self::Left => Point::new(-1, 0),
            Self::UpLeft => Point::new(-1, -1),
        }
    }

    /// The direction whose [`offset`](Self::offset) is `d`, if any.
    pub fn from_offset(d: Point) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.offset() == d)
    }

    /// Whether the move changes both coordinates.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpRight | Self::DownRight | Self::DownLeft | Self::UpLeft
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_unit_steps() {
        for dir in Direction::ALL {
            let d = dir.offset();
            assert!(d != Point::ZERO && d.x.abs() <= 1 && d.y.abs() <= 1);
            assert_eq!(dir.is_diagonal(), d.x != 0 && d.y != 0);
            assert_eq!(Direction::from_offset(d), Some(dir));
        }
        assert_eq!(Direction::from_offset(Point::new(2, 0)), None);
        assert_eq!(Direction::from_offset(Point::ZERO), None);
    }

    #[test]
    fn clockwise_order() {
        let offsets: Vec<_> = Direction::ALL.iter().map(|d| d.offset()).collect();
        assert_eq!(offsets[0], Point::new(0, -1));
        assert_eq!(offsets[2], Point::new(1, 0));
        assert_eq!(offsets[4], Point::new(0, 1));
        assert_eq!(offsets[6], Point::new(-1, 0));
    }
}
