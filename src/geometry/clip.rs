//! Homogeneous clipping against the view frustum

use smallvec::SmallVec;

use ::interpolate::Interpolate;
use ::mesh::Vertex;

/// Polygon produced while clipping a triangle.
///
/// We expect most triangles will go unchanged or gain only a few vertices,
/// so stack allocate them if possible.
pub type Polygon = SmallVec<[Vertex; 8]>;

/// Homogeneous axis whose pair of opposite frustum planes a polygon is clipped against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClippingAxis {
    X,
    Y,
    Z,
}

/// All clipping axes in the order they are applied.
pub const ALL_CLIPPING_AXES: [ClippingAxis; 3] = [
    ClippingAxis::X,
    ClippingAxis::Y,
    ClippingAxis::Z,
];

impl ClippingAxis {
    #[inline(always)]
    fn component(self) -> usize {
        match self {
            ClippingAxis::X => 0,
            ClippingAxis::Y => 1,
            ClippingAxis::Z => 2,
        }
    }

    /// Signed distance of the vertex to the plane `position[axis] * factor == w`, positive inside
    #[inline]
    fn distance(self, factor: f32, v: &Vertex) -> f32 {
        v.position.w - v.position[self.component()] * factor
    }

    /// Check if the clipping plane `position[axis] * factor <= w` has the given clip-space vertex inside of it
    #[inline]
    pub fn has_inside(self, factor: f32, v: &Vertex) -> bool {
        v.position[self.component()] * factor <= v.position.w
    }

    /// Clips the polygon against a single plane of this axis, with `factor` being `1.0` for the positive plane
    /// and `-1.0` for the negative plane. The clipped polygon is appended to `out`.
    pub fn clip_plane(self, factor: f32, polygon: &[Vertex], out: &mut Polygon) {
        let mut previous = match polygon.last() {
            Some(last) => last,
            None => return,
        };

        let mut previous_inside = self.has_inside(factor, previous);

        for current in polygon {
            let current_inside = self.has_inside(factor, current);

            // Edge intersects clipping plane
            if current_inside != previous_inside {
                let a = self.distance(factor, previous);
                let b = self.distance(factor, current);

                out.push(Interpolate::linear_interpolate(a / (a - b), previous, current));
            }

            if current_inside {
                out.push(*current);
            }

            previous = current;
            previous_inside = current_inside;
        }
    }

    /// Clips the polygon against both planes of this axis, using `scratch` for the intermediate result.
    ///
    /// Returns `false` when nothing of the polygon remains.
    pub fn clip(self, polygon: &mut Polygon, scratch: &mut Polygon) -> bool {
        scratch.clear();
        self.clip_plane(1.0, polygon, scratch);

        polygon.clear();

        if scratch.is_empty() {
            return false;
        }

        self.clip_plane(-1.0, scratch, polygon);

        !polygon.is_empty()
    }
}

/// Clips the polygon in place against all six frustum planes, x first, then y, then z.
///
/// Returns `false`, leaving the polygon empty, when it lies entirely outside of the frustum.
pub fn clip_polygon(polygon: &mut Polygon) -> bool {
    let mut scratch = Polygon::new();

    ALL_CLIPPING_AXES.iter().all(|axis| axis.clip(polygon, &mut scratch))
}

/// Splits a convex polygon into a triangle fan around its first vertex.
pub fn triangulate<'a>(polygon: &'a [Vertex]) -> impl Iterator<Item = [Vertex; 3]> + 'a {
    let n = polygon.len();

    (1..n.saturating_sub(1)).map(move |i| [polygon[0], polygon[i], polygon[i + 1]])
}

#[cfg(test)]
mod test {
    use nalgebra::{Vector4, Vector2};

    use ::mesh::Vertex;

    use super::*;

    fn clip_vertex(x: f32, y: f32, z: f32, w: f32) -> Vertex {
        Vertex { position: Vector4::new(x, y, z, w), ..Vertex::default() }
    }

    fn polygon(vertices: &[Vertex]) -> Polygon {
        vertices.iter().cloned().collect()
    }

    #[test]
    fn test_inside_unchanged() {
        let tri = [clip_vertex(-0.5, -0.5, 0.0, 1.0),
                   clip_vertex(0.5, -0.5, 0.0, 1.0),
                   clip_vertex(0.0, 0.5, 0.0, 1.0)];

        let mut p = polygon(&tri);

        assert!(clip_polygon(&mut p));
        assert_eq!(p.len(), 3);

        for v in &tri {
            assert!(p.contains(v));
        }
    }

    #[test]
    fn test_outside_each_plane_is_empty() {
        for &axis in &[0usize, 1, 2] {
            for &sign in &[1.0f32, -1.0] {
                let mut vertices = Vec::new();

                for &(a, b) in &[(-0.5f32, -0.5f32), (0.5, -0.5), (0.0, 0.5)] {
                    let mut p = Vector4::new(a, b, 0.0, 1.0);

                    // rotate the free coordinates out of the way, then push the axis past its plane
                    p[(axis + 1) % 3] = a;
                    p[(axis + 2) % 3] = b;
                    p[axis] = sign * (2.0 + a.abs());

                    vertices.push(Vertex { position: p, ..Vertex::default() });
                }

                let mut p = polygon(&vertices);

                assert!(!clip_polygon(&mut p), "axis {} sign {}", axis, sign);
                assert!(p.is_empty());
            }
        }
    }

    #[test]
    fn test_bisected_triangle() {
        // the plane x = w cuts this triangle through the middle of two edges
        let a = clip_vertex(0.0, -0.5, 0.0, 1.0).with_uv(Vector2::new(0.0, 0.0));
        let b = clip_vertex(2.0, 0.0, 0.0, 1.0).with_uv(Vector2::new(1.0, 0.0));
        let c = clip_vertex(0.0, 0.5, 0.0, 1.0).with_uv(Vector2::new(0.0, 1.0));

        let mut p = polygon(&[a, b, c]);
        let mut scratch = Polygon::new();

        assert!(ClippingAxis::X.clip(&mut p, &mut scratch));
        assert_eq!(p.len(), 4);

        let new: Vec<&Vertex> = p.iter().filter(|v| v.position.x == 1.0).collect();

        assert_eq!(new.len(), 2);

        for v in new {
            // both intersections are halfway along an edge touching `b`
            let other = if v.position.y < 0.0 { &a } else { &c };
            let t = 0.5;

            assert_eq!(v.position, other.position * (1.0 - t) + b.position * t);
            assert_eq!(v.uv, other.uv * (1.0 - t) + b.uv * t);
            assert_eq!(v.color, other.color);
        }

        assert!(p.iter().all(|v| v.position.x <= v.position.w));
    }

    #[test]
    fn test_corner_clip_grows_polygon() {
        let mut p = polygon(&[clip_vertex(-3.0, -3.0, 0.0, 1.0),
                              clip_vertex(3.0, -3.0, 0.0, 1.0),
                              clip_vertex(0.0, 3.0, 0.0, 1.0)]);

        assert!(clip_polygon(&mut p));
        assert!(p.len() > 3);

        for v in &p {
            assert!(v.position.x.abs() <= 1.0 + 1e-6);
            assert!(v.position.y.abs() <= 1.0 + 1e-6);
        }
    }

    #[test]
    fn test_triangulate_fan() {
        let quad: Vec<Vertex> = (0..5).map(|i| clip_vertex(i as f32, 0.0, 0.0, 1.0)).collect();

        let tris: Vec<[Vertex; 3]> = triangulate(&quad).collect();

        assert_eq!(tris.len(), 3);

        for (i, tri) in tris.iter().enumerate() {
            assert_eq!(tri[0], quad[0]);
            assert_eq!(tri[1], quad[i + 1]);
            assert_eq!(tri[2], quad[i + 2]);
        }

        assert_eq!(triangulate(&quad[..2]).count(), 0);
    }
}
