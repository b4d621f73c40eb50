//! Triangle setup and barycentric coverage

use nalgebra::{Vector3, Vector4};

use ::mesh::Vertex;

use super::{Coordinate, Dimensions};

/// Determinants smaller than this are treated as zero-area triangles
const DEGENERATE_EPSILON: f32 = 1e-12;

/// Homogeneous `w` values smaller than this cannot be divided by
const W_EPSILON: f32 = 1e-8;

/// Fraction of one pixel's extent in normalized device coordinates that a pixel center may lie
/// outside of a triangle and still be covered. Smaller than a whole pixel so edge pixels are not
/// claimed by both neighbours.
pub const COVERAGE_PIXEL_FRACTION: f32 = 1e-2;

/// Inclusive screen-space bounding box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub min: Coordinate,
    pub max: Coordinate,
}

impl BoundingBox {
    #[inline]
    pub fn new(min: Coordinate, max: Coordinate) -> BoundingBox {
        BoundingBox { min, max }
    }

    /// Smallest box containing all of the given points
    pub fn from_points(points: &[Coordinate; 3]) -> BoundingBox {
        let [a, b, c] = *points;

        BoundingBox {
            min: Coordinate::new(a.x.min(b.x).min(c.x), a.y.min(b.y).min(c.y)),
            max: Coordinate::new(a.x.max(b.x).max(c.x), a.y.max(b.y).max(c.y)),
        }
    }

    #[inline]
    pub fn contains(&self, point: Coordinate) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
            point.y >= self.min.y && point.y <= self.max.y
    }

    /// Overlap of two boxes, if they share any pixel
    pub fn intersection(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let min = Coordinate::new(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Coordinate::new(self.max.x.min(other.max.x), self.max.y.min(other.max.y));

        if min.x <= max.x && min.y <= max.y {
            Some(BoundingBox { min, max })
        } else {
            None
        }
    }
}

/// Self-contained rasterizable triangle, produced by triangle setup from three clipped clip-space vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertices after the perspective divide, with positions in normalized device coordinates
    pub vertices: [Vertex; 3],
    /// The homogeneous positions from before the divide, used for perspective-correct weights
    pub clip_positions: [Vector4<f32>; 3],
    /// Projected pixel positions
    pub screen: [Coordinate; 3],
    pub bounds: BoundingBox,
    dimensions: Dimensions,
}

/// Maps a normalized device coordinate in `[-1, 1]` onto `[0, size]`
#[inline]
pub fn to_screen(ndc: f32, size: u32) -> i32 {
    (0.5 * size as f32 * (ndc + 1.0)).floor() as i32
}

/// Maps the center of a pixel back into normalized device coordinates
#[inline]
pub fn pixel_center(pixel: i32, size: u32) -> f32 {
    (pixel as f32 + 0.5) / size as f32 * 2.0 - 1.0
}

impl Triangle {
    /// Runs triangle setup on three clip-space vertices.
    ///
    /// `eye` is the camera position taken from the translation column of the model-view matrix.
    /// Returns `None` for back-facing and degenerate triangles, or when a vertex has `w == 0`.
    pub fn new(a: &Vertex, b: &Vertex, c: &Vertex, eye: &Vector3<f32>, dimensions: Dimensions) -> Option<Triangle> {
        let clip_positions = [a.position, b.position, c.position];

        if clip_positions.iter().any(|p| p.w.abs() < W_EPSILON) {
            return None;
        }

        let mut vertices = [*a, *b, *c];

        for v in &mut vertices {
            let w = v.position.w;
            v.position /= w;
        }

        let [p0, p1, p2] = [vertices[0].position.xyz(), vertices[1].position.xyz(), vertices[2].position.xyz()];

        let normal = (p1 - p0).cross(&(p2 - p0));
        let view = p0 - eye;

        let facing = normal.dot(&view.try_normalize(0.0).unwrap_or(view));

        // `!(x > 0)` also rejects NaN
        if !(facing > 0.0) {
            return None;
        }

        let screen = [
            Coordinate::new(to_screen(p0.x, dimensions.width), to_screen(p0.y, dimensions.height)),
            Coordinate::new(to_screen(p1.x, dimensions.width), to_screen(p1.y, dimensions.height)),
            Coordinate::new(to_screen(p2.x, dimensions.width), to_screen(p2.y, dimensions.height)),
        ];

        Some(Triangle {
            vertices,
            clip_positions,
            screen,
            bounds: BoundingBox::from_points(&screen),
            dimensions,
        })
    }

    /// Coverage tolerance, about a hundredth of a pixel in normalized device coordinates.
    ///
    /// Lets triangles sharing an edge meet without a gap.
    #[inline]
    pub fn epsilon(&self) -> f32 {
        2.0 / self.dimensions.width.max(self.dimensions.height) as f32 * COVERAGE_PIXEL_FRACTION
    }

    /// Barycentric coordinates of the pixel center, in the post-divide plane.
    ///
    /// Returns `None` for degenerate triangles.
    pub fn barycentric(&self, x: i32, y: i32) -> Option<Vector3<f32>> {
        let (x1, y1) = (self.vertices[0].position.x, self.vertices[0].position.y);
        let (x2, y2) = (self.vertices[1].position.x, self.vertices[1].position.y);
        let (x3, y3) = (self.vertices[2].position.x, self.vertices[2].position.y);

        let det = (y2 - y3) * (x1 - x3) + (x3 - x2) * (y1 - y3);

        if det.abs() < DEGENERATE_EPSILON {
            return None;
        }

        let (x, y) = (pixel_center(x, self.dimensions.width), pixel_center(y, self.dimensions.height));

        let u = ((y2 - y3) * (x - x3) + (x3 - x2) * (y - y3)) / det;
        let v = ((y3 - y1) * (x - x3) + (x1 - x3) * (y - y3)) / det;

        Some(Vector3::new(u, v, 1.0 - u - v))
    }

    /// Barycentric coordinates of the pixel center if the triangle covers that pixel.
    #[inline]
    pub fn coverage(&self, x: i32, y: i32) -> Option<Vector3<f32>> {
        let epsilon = -self.epsilon();

        self.barycentric(x, y).and_then(|b| {
            if b.x >= epsilon && b.y >= epsilon && b.z >= epsilon && b.z >= 0.0 {
                Some(b)
            } else {
                None
            }
        })
    }

    /// Converts screen-space barycentric coordinates into perspective-correct weights,
    /// returning them along with the depth metric of the fragment.
    ///
    /// Larger depth metrics are closer to the camera.
    #[inline]
    pub fn perspective_weights(&self, barycentric: &Vector3<f32>) -> (Vector3<f32>, f32) {
        let weights = Vector3::new(barycentric.x / self.clip_positions[0].w,
                                   barycentric.y / self.clip_positions[1].w,
                                   barycentric.z / self.clip_positions[2].w);

        let d = weights.x + weights.y + weights.z;

        (weights / d, d / 3.0)
    }
}
