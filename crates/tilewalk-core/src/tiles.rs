//! Pixel ↔ tile coordinate conversion.
//!
//! Levels are laid out on a fixed tile raster. [`TileSize`] maps a pixel
//! position (e.g. a sprite's anchor) to the tile containing it.

use crate::geom::Point;

/// Pixel dimensions of a single tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileSize {
    pub width: i32,
    pub height: i32,
}

impl TileSize {
    /// The standard 32×24 tile raster.
    pub const DEFAULT: Self = Self {
        width: 32,
        height: 24,
    };

    /// Create a tile size. Both dimensions must be positive.
    pub const fn new(width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0, "tile dimensions must be positive");
        Self { width, height }
    }

    /// The tile containing `pixel`, by floor division on each axis.
    ///
    /// Pixels left of or above the origin land on negative tiles.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero, which the public fields (and a
    /// deserialized value) do not rule out.
    #[inline]
    pub fn tile_at(self, pixel: Point) -> Point {
        Point::new(
            pixel.x.div_euclid(self.width),
            pixel.y.div_euclid(self.height),
        )
    }

    /// Top-left pixel of `tile`.
    #[inline]
    pub fn origin_of(self, tile: Point) -> Point {
        Point::new(tile.x * self.width, tile.y * self.height)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_at_floors() {
        let ts = TileSize::default();
        assert_eq!(ts.tile_at(Point::new(0, 0)), Point::new(0, 0));
        assert_eq!(ts.tile_at(Point::new(31, 23)), Point::new(0, 0));
        assert_eq!(ts.tile_at(Point::new(32, 24)), Point::new(1, 1));
        assert_eq!(ts.tile_at(Point::new(100, 50)), Point::new(3, 2));
    }

    #[test]
    fn tile_at_negative_pixels() {
        let ts = TileSize::default();
        assert_eq!(ts.tile_at(Point::new(-1, -1)), Point::new(-1, -1));
        assert_eq!(ts.tile_at(Point::new(-32, -25)), Point::new(-1, -2));
    }

    #[test]
    fn origin_is_inverse_of_tile_at() {
        let ts = TileSize::new(16, 8);
        let tile = Point::new(5, -3);
        let origin = ts.origin_of(tile);
        assert_eq!(origin, Point::new(80, -24));
        assert_eq!(ts.tile_at(origin), tile);
        assert_eq!(ts.tile_at(origin.shift(15, 7)), tile);
    }

    #[test]
    #[should_panic]
    fn zero_width_tile_panics() {
        let ts = TileSize {
            width: 0,
            height: 24,
        };
        ts.tile_at(Point::new(10, 10));
    }
}
