use super::Coordinate;

/// Anything laid out as a `width` by `height` grid of cells
pub trait HasDimensions {
    fn dimensions(&self) -> Dimensions;

    /// Whether the signed coordinate addresses an existing cell
    #[inline]
    fn in_bounds(&self, coord: Coordinate) -> bool {
        self.dimensions().in_bounds(coord)
    }
}

/// Width and height of a texture, framebuffer or tile grid, in cells
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[inline(always)]
    pub fn new(width: u32, height: u32) -> Dimensions {
        Dimensions { width, height }
    }

    /// Cell count
    #[inline]
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.width && (coord.y as u32) < self.height
    }

    /// Row-major storage index of the coordinate, with row 0 first.
    ///
    /// Returns `None` for coordinates outside of the grid.
    #[inline]
    pub fn index_of(&self, coord: Coordinate) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.x as usize + coord.y as usize * self.width as usize)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod test {
    use ::geometry::Coordinate;

    use super::Dimensions;

    #[test]
    fn test_index_of() {
        let d = Dimensions::new(4, 3);

        assert_eq!(d.area(), 12);
        assert_eq!(d.index_of(Coordinate::new(0, 0)), Some(0));
        assert_eq!(d.index_of(Coordinate::new(3, 0)), Some(3));
        assert_eq!(d.index_of(Coordinate::new(1, 2)), Some(9));
        assert_eq!(d.index_of(Coordinate::new(4, 0)), None);
        assert_eq!(d.index_of(Coordinate::new(0, 3)), None);
        assert_eq!(d.index_of(Coordinate::new(-1, 1)), None);
    }
}
