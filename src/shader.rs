//! Programmable vertex and pixel stages

use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

use ::mesh::Vertex;
use ::texture::Texture;

/// Fragment returned by the pixel shader, which can either be a color
/// value for the pixel or a discard flag to skip that fragment altogether.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fragment {
    /// Discard the fragment altogether, as if it was never there.
    ///
    /// Neither the color nor the depth of the pixel are written.
    Discard,
    /// Desired color for the pixel. Channels are clamped to `[0, 1]` by the rasterizer.
    Color(Vector4<f32>),
}

/// Interpolated per-fragment values handed to the pixel shader
#[derive(Debug, Clone, Copy)]
pub struct PixelInput<'a> {
    /// Perspective-correct interpolation of the clip-space positions
    pub position: Vector4<f32>,
    pub color: Vector4<f32>,
    /// Interpolated normal, re-normalized
    pub normal: Vector3<f32>,
    /// Interpolated texture coordinate, wrapped into `[0, 1)`
    pub uv: Vector2<f32>,
    /// Currently bound texture, if any
    pub texture: Option<&'a Texture>,
}

/// A vertex and pixel shader pair.
///
/// Shaders are shared between all worker threads during a draw call, so they must not rely on
/// interior state for per-fragment decisions. Discarding is signalled through the returned `Fragment`.
pub trait Shader: Send + Sync {
    /// Transforms an object-space vertex into clip-space.
    fn vertex(&self, projection: &Matrix4<f32>, model_view: &Matrix4<f32>, vertex: &Vertex) -> Vertex;

    /// Computes the color of a single fragment.
    fn pixel(&self, input: &PixelInput) -> Fragment;
}

/// Pass-through shader used when no other shader is bound.
///
/// Applies the combined projection and model-view transform, then shades fragments with the
/// bilinear sample of the bound texture, or flat white without one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultShader;

impl Shader for DefaultShader {
    fn vertex(&self, projection: &Matrix4<f32>, model_view: &Matrix4<f32>, vertex: &Vertex) -> Vertex {
        vertex.transform(&(projection * model_view))
    }

    fn pixel(&self, input: &PixelInput) -> Fragment {
        Fragment::Color(match input.texture {
            Some(texture) => texture.sample_bilinear(input.uv.x, input.uv.y),
            None => Vector4::new(1.0, 1.0, 1.0, 1.0),
        })
    }
}

impl<'a, S: Shader + ?Sized> Shader for &'a S {
    #[inline]
    fn vertex(&self, projection: &Matrix4<f32>, model_view: &Matrix4<f32>, vertex: &Vertex) -> Vertex {
        (**self).vertex(projection, model_view, vertex)
    }

    #[inline]
    fn pixel(&self, input: &PixelInput) -> Fragment {
        (**self).pixel(input)
    }
}
