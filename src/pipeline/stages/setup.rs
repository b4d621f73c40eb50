//! Vertex shading, clipping and triangle setup

use nalgebra::{Matrix4, Vector3};

use ::geometry::{clip_polygon, triangulate, Dimensions, Polygon, Triangle};
use ::mesh::Vertex;
use ::shader::Shader;

/// Read-only state shared by every worker during the setup stage
#[derive(Clone, Copy)]
pub struct SetupContext<'a> {
    pub shader: &'a dyn Shader,
    pub projection: &'a Matrix4<f32>,
    pub model_view: &'a Matrix4<f32>,
    /// Camera position, the translation column of the model-view matrix
    pub eye: Vector3<f32>,
    pub dimensions: Dimensions,
}

impl<'a> SetupContext<'a> {
    pub fn new(shader: &'a dyn Shader,
               projection: &'a Matrix4<f32>,
               model_view: &'a Matrix4<f32>,
               dimensions: Dimensions) -> SetupContext<'a> {
        SetupContext {
            shader,
            projection,
            model_view,
            eye: model_view.fixed_view::<3, 1>(0, 3).into_owned(),
            dimensions,
        }
    }

    /// Shades, clips and sets up a single object-space triangle,
    /// pushing every surviving sub-triangle into `out`.
    pub fn process(&self, a: &Vertex, b: &Vertex, c: &Vertex, out: &mut Vec<Triangle>) {
        let mut polygon = Polygon::new();

        for v in &[a, b, c] {
            polygon.push(self.shader.vertex(self.projection, self.model_view, v));
        }

        if !clip_polygon(&mut polygon) {
            return;
        }

        for [a, b, c] in triangulate(&polygon) {
            if let Some(triangle) = Triangle::new(&a, &b, &c, &self.eye, self.dimensions) {
                out.push(triangle);
            }
        }
    }

    /// Processes the triangle formed by three consecutive indices starting at `3 * triangle`.
    ///
    /// Indices must already be validated against the vertex list.
    #[inline]
    pub fn process_indexed(&self, vertices: &[Vertex], indices: &[usize], triangle: usize, out: &mut Vec<Triangle>) {
        let i = triangle * 3;

        self.process(&vertices[indices[i]], &vertices[indices[i + 1]], &vertices[indices[i + 2]], out);
    }
}
