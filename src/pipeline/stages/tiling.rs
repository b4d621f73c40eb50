//! Screen-space tile binning

use ::geometry::{BoundingBox, Coordinate, Dimensions, Triangle};

/// Uniform grid of square tiles covering the draw surface.
///
/// Only whole tiles are part of the grid, so when the tile size does not divide the draw size
/// the pixels in the remainder along the right and top edges are never rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub dimensions: Dimensions,
    pub tile_size: u32,
    pub tiles_x: u32,
    pub tiles_y: u32,
}

/// A tile with at least one triangle assigned to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Row-major index of the tile within its grid
    pub index: usize,
    /// Bottom-left pixel of the tile
    pub origin: Coordinate,
    /// Pixels covered by the tile, inclusive
    pub region: BoundingBox,
    /// Indices of the assigned candidate triangles, in ascending order
    pub triangles: Vec<usize>,
}

impl TileGrid {
    pub fn new(dimensions: Dimensions, tile_size: u32) -> TileGrid {
        let tile_size = tile_size.max(1);

        TileGrid {
            dimensions,
            tile_size,
            tiles_x: dimensions.width / tile_size,
            tiles_y: dimensions.height / tile_size,
        }
    }

    /// Total number of tiles in the grid
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles_x as usize * self.tiles_y as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixel region of the tile with the given index
    pub fn region(&self, index: usize) -> BoundingBox {
        let tiles_x = self.tiles_x.max(1) as usize;
        let size = self.tile_size as i32;

        let origin = Coordinate::new((index % tiles_x) as i32 * size, (index / tiles_x) as i32 * size);

        BoundingBox::new(origin, Coordinate::new(origin.x + size - 1, origin.y + size - 1))
    }

    /// Maps a pixel range onto the range of tiles along one axis, scaling by `tiles / size`
    /// with the minimum rounded down and the maximum rounded up, clamped to the grid.
    fn tile_span(min: i32, max: i32, tiles: u32, size: u32) -> Option<(u32, u32)> {
        if tiles == 0 {
            return None;
        }

        let scale = tiles as f64 / size as f64;

        let lo = (min as f64 * scale).floor().max(0.0);
        let hi = (max as f64 * scale).ceil().min(tiles as f64 - 1.0);

        if lo <= hi {
            Some((lo as u32, hi as u32))
        } else {
            None
        }
    }

    /// Tile index ranges along x and y overlapped by the bounding box, inclusive
    pub fn tile_range(&self, bounds: &BoundingBox) -> Option<((u32, u32), (u32, u32))> {
        let x = TileGrid::tile_span(bounds.min.x, bounds.max.x, self.tiles_x, self.dimensions.width)?;
        let y = TileGrid::tile_span(bounds.min.y, bounds.max.y, self.tiles_y, self.dimensions.height)?;

        Some((x, y))
    }

    /// Records the triangle against every tile its bounding box overlaps, as `(tile, triangle)` pairs.
    pub fn bin(&self, index: usize, triangle: &Triangle, out: &mut Vec<(usize, usize)>) {
        if let Some(((x0, x1), (y0, y1))) = self.tile_range(&triangle.bounds) {
            for ty in y0..(y1 + 1) {
                for tx in x0..(x1 + 1) {
                    out.push((ty as usize * self.tiles_x as usize + tx as usize, index));
                }
            }
        }
    }

    /// Sorts `(tile, triangle)` pairs and groups them into tiles.
    ///
    /// Tiles without any triangles are left out.
    pub fn build_tiles(&self, mut pairs: Vec<(usize, usize)>) -> Vec<Tile> {
        pairs.sort_unstable();

        let mut tiles: Vec<Tile> = Vec::new();

        for (tile, triangle) in pairs {
            let start_new = match tiles.last() {
                Some(last) => last.index != tile,
                None => true,
            };

            if start_new {
                let region = self.region(tile);

                tiles.push(Tile {
                    index: tile,
                    origin: region.min,
                    region,
                    triangles: Vec::new(),
                });
            }

            if let Some(last) = tiles.last_mut() {
                last.triangles.push(triangle);
            }
        }

        tiles
    }
}

#[cfg(test)]
mod test {
    use ::geometry::{BoundingBox, Coordinate, Dimensions};

    use super::TileGrid;

    fn bounds(x0: i32, y0: i32, x1: i32, y1: i32) -> BoundingBox {
        BoundingBox::new(Coordinate::new(x0, y0), Coordinate::new(x1, y1))
    }

    #[test]
    fn test_regions_partition_grid() {
        for &(w, h, t) in &[(64u32, 64u32, 32u32), (70, 70, 32), (100, 37, 8), (31, 64, 32)] {
            let grid = TileGrid::new(Dimensions::new(w, h), t);

            let mut hits = vec![0u32; (w * h) as usize];

            for i in 0..grid.len() {
                let r = grid.region(i);

                for y in r.min.y..(r.max.y + 1) {
                    for x in r.min.x..(r.max.x + 1) {
                        hits[(x + y * w as i32) as usize] += 1;
                    }
                }
            }

            let covered = hits.iter().filter(|&&n| n == 1).count() as u32;

            assert!(hits.iter().all(|&n| n <= 1), "overlap for {}x{} / {}", w, h, t);
            assert_eq!(covered, (w / t) * t * (h / t) * t);
        }
    }

    #[test]
    fn test_tile_range() {
        let grid = TileGrid::new(Dimensions::new(128, 64), 32);

        assert_eq!(grid.tile_range(&bounds(0, 0, 10, 10)), Some(((0, 1), (0, 1))));
        assert_eq!(grid.tile_range(&bounds(40, 40, 70, 50)), Some(((1, 3), (1, 1))));
        assert_eq!(grid.tile_range(&bounds(-50, -50, 500, 500)), Some(((0, 3), (0, 1))));
        assert_eq!(grid.tile_range(&bounds(200, 0, 300, 10)), None);
        assert_eq!(TileGrid::new(Dimensions::new(16, 16), 32).tile_range(&bounds(0, 0, 4, 4)), None);
    }

    #[test]
    fn test_build_tiles_groups_sorted() {
        let grid = TileGrid::new(Dimensions::new(64, 64), 32);

        let tiles = grid.build_tiles(vec![(3, 1), (0, 2), (3, 0), (0, 0), (3, 2)]);

        assert_eq!(tiles.len(), 2);

        assert_eq!(tiles[0].index, 0);
        assert_eq!(tiles[0].triangles, vec![0, 2]);
        assert_eq!(tiles[0].origin, Coordinate::new(0, 0));

        assert_eq!(tiles[1].index, 3);
        assert_eq!(tiles[1].triangles, vec![0, 1, 2]);
        assert_eq!(tiles[1].origin, Coordinate::new(32, 32));
        assert_eq!(tiles[1].region, bounds(32, 32, 63, 63));
    }
}
