//! Vertex record and indexed mesh structure

use std::fmt::{Debug, Formatter, Result as FmtResult};

use num_traits::Float;

use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

use ::error::{RenderError, RenderResult};
use ::interpolate::Interpolate;

/// A single vertex with a homogeneous position and the attributes carried through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Homogeneous position. After the vertex stage this is in clip-space, and `w` must be nonzero
    /// before the perspective divide.
    pub position: Vector4<f32>,
    /// Texture coordinate
    pub uv: Vector2<f32>,
    pub normal: Vector3<f32>,
    /// Straight (non-premultiplied) alpha color
    pub color: Vector4<f32>,
}

impl Default for Vertex {
    fn default() -> Vertex {
        Vertex {
            position: Vector4::new(0.0, 0.0, 0.0, 1.0),
            uv: Vector2::zeros(),
            normal: Vector3::zeros(),
            color: Vector4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

impl Vertex {
    #[inline]
    pub fn new(position: Vector4<f32>, uv: Vector2<f32>, normal: Vector3<f32>, color: Vector4<f32>) -> Vertex {
        Vertex { position, uv, normal, color }
    }

    /// Vertex at the given object-space point with default attributes
    #[inline]
    pub fn at(x: f32, y: f32, z: f32) -> Vertex {
        Vertex { position: Vector4::new(x, y, z, 1.0), ..Vertex::default() }
    }

    #[inline]
    pub fn with_color(self, color: Vector4<f32>) -> Vertex {
        Vertex { color, ..self }
    }

    #[inline]
    pub fn with_uv(self, uv: Vector2<f32>) -> Vertex {
        Vertex { uv, ..self }
    }

    #[inline]
    pub fn with_normal(self, normal: Vector3<f32>) -> Vertex {
        Vertex { normal, ..self }
    }

    /// Transforms the position by the given matrix, and the normal by the same matrix
    /// as a direction, re-normalized. Other attributes pass through unchanged.
    pub fn transform(&self, matrix: &Matrix4<f32>) -> Vertex {
        let normal = (matrix * self.normal.to_homogeneous()).xyz();

        Vertex {
            position: matrix * self.position,
            uv: self.uv,
            normal: normal.try_normalize(0.0).unwrap_or(normal),
            color: self.color,
        }
    }
}

impl Interpolate for Vertex {
    #[inline]
    fn barycentric_interpolate<R: Float>(u: R, x1: &Self, v: R, x2: &Self, w: R, x3: &Self) -> Self {
        Vertex {
            position: Interpolate::barycentric_interpolate(u, &x1.position, v, &x2.position, w, &x3.position),
            uv: Interpolate::barycentric_interpolate(u, &x1.uv, v, &x2.uv, w, &x3.uv),
            normal: Interpolate::barycentric_interpolate(u, &x1.normal, v, &x2.normal, w, &x3.normal),
            color: Interpolate::barycentric_interpolate(u, &x1.color, v, &x2.color, w, &x3.color),
        }
    }

    #[inline]
    fn linear_interpolate<R: Float>(t: R, x1: &Self, x2: &Self) -> Self {
        Vertex {
            position: Interpolate::linear_interpolate(t, &x1.position, &x2.position),
            uv: Interpolate::linear_interpolate(t, &x1.uv, &x2.uv),
            normal: Interpolate::linear_interpolate(t, &x1.normal, &x2.normal),
            color: Interpolate::linear_interpolate(t, &x1.color, &x2.color),
        }
    }
}

/// Mesh structure with indexed vertices.
#[derive(Clone, Default)]
pub struct Mesh {
    /// Vertex indices
    ///
    /// Every three consecutive indices form one triangle. For example (in 2D), for a rectangle made of two
    /// triangles, you would define the four points for each corner vertex:
    ///
    /// ```text
    /// vertex #: name         = (x,   y)
    /// 0:        bottom_left  = (0.0, 0.0)
    /// 1:        bottom_right = (1.0, 0.0)
    /// 2:        top_right    = (1.0, 1.0)
    /// 3:        top_left     = (0.0, 1.0)
    /// ```
    ///
    /// then you'd have your index list be something like:
    ///
    /// ```text
    /// [0, 1, 2, // bottom right half
    ///  0, 2, 3] // top left half
    /// ```
    ///
    /// Note that both of those triangles go in a counter-clockwise direction from vertex to vertex,
    /// which is the winding that survives back-face culling.
    pub indices: Vec<usize>,
    /// Vertices with their attributes
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<usize>) -> Mesh {
        Mesh { indices, vertices }
    }

    /// Number of complete triangles described by the index list
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Checks that the index list describes whole triangles that only reference existing vertices.
    pub fn validate(&self) -> RenderResult<()> {
        validate_indices(self.vertices.len(), &self.indices)
    }
}

pub(crate) fn validate_indices(len: usize, indices: &[usize]) -> RenderResult<()> {
    if indices.len() % 3 != 0 {
        return Err(RenderError::InvalidIndexCount(indices.len()));
    }

    match indices.iter().find(|&&index| index >= len) {
        Some(&index) => Err(RenderError::IndexOutOfBounds { index, len }),
        None => Ok(())
    }
}

impl Debug for Mesh {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "Mesh {{ vertices: {}, triangles: {} }}", self.vertices.len(), self.triangle_count())
    }
}

#[cfg(test)]
mod test {
    use nalgebra::{Matrix4, Vector3, Vector4};

    use ::error::RenderError;
    use ::interpolate::Interpolate;

    use super::{Mesh, Vertex};

    #[test]
    fn test_transform_normalizes_normal() {
        let v = Vertex::at(1.0, 2.0, 3.0).with_normal(Vector3::new(0.0, 0.0, 1.0));

        let t = v.transform(&Matrix4::new_scaling(2.0));

        assert_eq!(t.position, Vector4::new(2.0, 4.0, 6.0, 1.0));
        assert_eq!(t.normal, Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(t.color, v.color);
    }

    #[test]
    fn test_transform_zero_normal() {
        let t = Vertex::at(0.0, 0.0, 0.0).transform(&Matrix4::identity());

        assert_eq!(t.normal, Vector3::zeros());
    }

    #[test]
    fn test_lerp_all_attributes() {
        let a = Vertex::at(0.0, 0.0, 0.0).with_color(Vector4::new(0.0, 0.0, 0.0, 1.0));
        let b = Vertex::at(2.0, 4.0, 0.0).with_color(Vector4::new(1.0, 1.0, 1.0, 1.0));

        let m: Vertex = Interpolate::linear_interpolate(0.5f32, &a, &b);

        assert_eq!(m.position, Vector4::new(1.0, 2.0, 0.0, 1.0));
        assert_eq!(m.color, Vector4::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn test_validate() {
        let vertices = vec![Vertex::default(); 3];

        assert!(Mesh::new(vertices.clone(), vec![0, 1, 2]).validate().is_ok());

        match Mesh::new(vertices.clone(), vec![0, 1]).validate() {
            Err(RenderError::InvalidIndexCount(2)) => (),
            other => panic!("unexpected {:?}", other),
        }

        match Mesh::new(vertices, vec![0, 1, 3]).validate() {
            Err(RenderError::IndexOutOfBounds { index: 3, len: 3 }) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
