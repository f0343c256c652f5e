//! Level passability data consumed by the pathfinder.
//!
//! The [`Level`] trait is the read-only view a search needs: dimensions and a
//! per-tile [`Passability`]. [`TileMap`] is an owned implementation that can
//! be built programmatically or parsed from ASCII art:
//!
//! ```text
//! ......
//! ..##..
//! .====.
//! ......
//! ```
//!
//! `.` is open, `#` is impassable and `=` is a one-way platform.

use std::fmt;

use crate::geom::{Point, Range};

/// How a single tile may be entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Passability {
    /// Freely passable.
    #[default]
    Open,
    /// Solid; never entered, and blocks diagonal corner cutting.
    Impassable,
    /// One-way: enterable from below or the side, not by moving downward.
    Platform,
}

impl Passability {
    /// ASCII glyph used by [`TileMap::from_ascii`] and `Display`.
    pub const fn glyph(self) -> char {
        match self {
            Self::Open => '.',
            Self::Impassable => '#',
            Self::Platform => '=',
        }
    }

    /// Inverse of [`glyph`](Self::glyph).
    pub const fn from_glyph(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::Open),
            '#' => Some(Self::Impassable),
            '=' => Some(Self::Platform),
            _ => None,
        }
    }
}

/// Read-only level data. Must not change while a search is running.
pub trait Level {
    /// Width (x) and height (y) in tiles.
    fn size(&self) -> Point;

    /// Passability of an in-bounds tile.
    fn passability(&self, p: Point) -> Passability;

    /// The tile rectangle `[0, size)`.
    fn bounds(&self) -> Range {
        let s = self.size();
        Range::new(0, 0, s.x, s.y)
    }

    /// Whether `p` lies inside the level.
    fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }
}

impl<L: Level + ?Sized> Level for &L {
    fn size(&self) -> Point {
        (**self).size()
    }

    fn passability(&self, p: Point) -> Passability {
        (**self).passability(p)
    }
}

// ---------------------------------------------------------------------------
// TileMap
// ---------------------------------------------------------------------------

/// An owned, row-major grid of [`Passability`] values.
///
/// `tiles.len() == width * height` always holds; deserialization goes
/// through [`TileMap::from_tiles`] to enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTileMap")
)]
pub struct TileMap {
    tiles: Vec<Passability>,
    width: i32,
    height: i32,
}

/// Unchecked wire form of a [`TileMap`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTileMap {
    tiles: Vec<Passability>,
    width: i32,
    height: i32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileMap> for TileMap {
    type Error = LevelError;

    fn try_from(raw: RawTileMap) -> Result<Self, LevelError> {
        Self::from_tiles(raw.width, raw.height, raw.tiles)
    }
}

impl TileMap {
    /// Create a map of the given dimensions with every tile open.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            tiles: vec![Passability::Open; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// Build a map from row-major `tiles`.
    ///
    /// Fails unless both dimensions are non-negative and `tiles` holds
    /// exactly `width * height` entries.
    pub fn from_tiles(
        width: i32,
        height: i32,
        tiles: Vec<Passability>,
    ) -> Result<Self, LevelError> {
        let expected = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h));
        if expected != Some(tiles.len()) {
            return Err(LevelError::TileCount {
                width,
                height,
                found: tiles.len(),
            });
        }
        Ok(Self {
            tiles,
            width,
            height,
        })
    }

    /// Parse a map from ASCII art.
    ///
    /// Leading/trailing whitespace is trimmed from the whole string but not
    /// from individual lines. Every line must have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, LevelError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(LevelError::Empty);
        }
        let mut tiles = Vec::with_capacity(s.len());
        let mut width: Option<i32> = None;
        let mut height = 0;

        for (y, line) in s.lines().enumerate() {
            let mut x = 0;
            for ch in line.chars() {
                let Some(tile) = Passability::from_glyph(ch) else {
                    return Err(LevelError::InvalidGlyph {
                        ch,
                        pos: Point::new(x, y as i32),
                    });
                };
                tiles.push(tile);
                x += 1;
            }
            match width {
                None => width = Some(x),
                Some(w) if w != x => {
                    return Err(LevelError::InconsistentSize {
                        line: y as i32,
                        expected: w,
                        found: x,
                    });
                }
                Some(_) => {}
            }
            height += 1;
        }

        Ok(Self {
            tiles,
            width: width.unwrap_or(0),
            height,
        })
    }

    /// Width in tiles.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height in tiles.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height {
            Some((p.y as usize) * (self.width as usize) + (p.x as usize))
        } else {
            None
        }
    }

    /// Passability at `p`, or `None` outside the map.
    pub fn get(&self, p: Point) -> Option<Passability> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// Set the tile at `p`. No-op outside the map.
    pub fn set(&mut self, p: Point, tile: Passability) {
        if let Some(i) = self.index(p) {
            self.tiles[i] = tile;
        }
    }

    /// Set every tile in `rng` (clipped to the map) to `tile`.
    pub fn fill(&mut self, rng: Range, tile: Passability) {
        for p in rng.intersect(self.bounds()) {
            self.set(p, tile);
        }
    }
}

impl Level for TileMap {
    fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    fn passability(&self, p: Point) -> Passability {
        self.get(p).unwrap_or(Passability::Impassable)
    }
}

impl fmt::Display for TileMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            if y > 0 {
                f.write_str("\n")?;
            }
            for x in 0..self.width {
                write!(f, "{}", self.passability(Point::new(x, y)).glyph())?;
            }
        }
        Ok(())
    }
}

/// Errors that can occur when parsing a [`TileMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// The input contained no tiles.
    Empty,
    /// A line's width differs from the first line's.
    InconsistentSize { line: i32, expected: i32, found: i32 },
    /// A character other than `.`, `#` or `=` was found.
    InvalidGlyph { ch: char, pos: Point },
    /// Negative dimensions, or a tile count other than `width * height`.
    TileCount { width: i32, height: i32, found: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("level: no tiles"),
            Self::InconsistentSize {
                line,
                expected,
                found,
            } => write!(
                f,
                "level: line {line} is {found} tiles wide, expected {expected}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "level: invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::TileCount {
                width,
                height,
                found,
            } => write!(f, "level: {found} tiles do not fill a {width}x{height} map"),
        }
    }
}

impl std::error::Error for LevelError {}

#[cfg(test)]
mod tests {
    use super::*;

    const LEDGE: &str = "\
......
..##..
.====.
......";

    #[test]
    fn parse_and_size() {
        let map = TileMap::from_ascii(LEDGE).unwrap();
        assert_eq!(map.size(), Point::new(6, 4));
        assert_eq!(map.get(Point::new(0, 0)), Some(Passability::Open));
        assert_eq!(map.get(Point::new(2, 1)), Some(Passability::Impassable));
        assert_eq!(map.get(Point::new(4, 2)), Some(Passability::Platform));
        assert_eq!(map.get(Point::new(6, 0)), None);
        assert_eq!(map.get(Point::new(0, -1)), None);
    }

    #[test]
    fn display_round_trips_ascii() {
        let map = TileMap::from_ascii(LEDGE).unwrap();
        assert_eq!(map.to_string(), LEDGE);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let map = TileMap::from_ascii("\n\n.#\n=.\n\n").unwrap();
        assert_eq!(map.size(), Point::new(2, 2));
    }

    #[test]
    fn inconsistent_size_error() {
        let err = TileMap::from_ascii("...\n..").unwrap_err();
        assert_eq!(
            err,
            LevelError::InconsistentSize {
                line: 1,
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn invalid_glyph_error() {
        let err = TileMap::from_ascii("..\n.x").unwrap_err();
        assert_eq!(
            err,
            LevelError::InvalidGlyph {
                ch: 'x',
                pos: Point::new(1, 1)
            }
        );
        assert!(err.to_string().contains("(1, 1)"));
    }

    #[test]
    fn empty_input_error() {
        assert_eq!(TileMap::from_ascii("  \n "), Err(LevelError::Empty));
    }

    #[test]
    fn set_and_fill() {
        let mut map = TileMap::new(4, 3);
        map.set(Point::new(1, 1), Passability::Platform);
        map.set(Point::new(9, 9), Passability::Impassable);
        assert_eq!(map.passability(Point::new(1, 1)), Passability::Platform);

        map.fill(Range::new(2, 0, 10, 2), Passability::Impassable);
        assert_eq!(map.to_string(), "..##\n.=##\n....");
    }

    #[test]
    fn from_tiles_checks_count() {
        use Passability::{Impassable as W, Open as O};
        let map = TileMap::from_tiles(2, 2, vec![O, W, W, O]).unwrap();
        assert_eq!(map.to_string(), ".#\n#.");
        assert_eq!(
            TileMap::from_tiles(3, 3, vec![O]),
            Err(LevelError::TileCount {
                width: 3,
                height: 3,
                found: 1
            })
        );
        assert!(TileMap::from_tiles(-1, -1, vec![O]).is_err());
        assert!(TileMap::from_tiles(-2, 0, vec![]).is_err());
        assert!(TileMap::from_tiles(0, 0, vec![]).is_ok());
    }

    #[test]
    fn level_bounds_from_size() {
        let map = TileMap::new(5, 2);
        assert_eq!(map.bounds(), Range::new(0, 0, 5, 2));
        assert!(map.contains(Point::new(4, 1)));
        assert!(!map.contains(Point::new(5, 1)));
        let by_ref: &TileMap = &map;
        assert_eq!(Level::size(&by_ref), Point::new(5, 2));
    }
}
