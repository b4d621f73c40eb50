use nalgebra::{Vector3, Vector4};

use ::framebuffer::UnsafeFrameBuffer;
use ::geometry::Triangle;
use ::interpolate::Interpolate;
use ::shader::{Fragment, PixelInput, Shader};
use ::texture::Texture;
use ::utils::{saturate, wrap};

use ::pipeline::stages::tiling::Tile;

/// Interpolates the per-fragment inputs of a triangle with perspective-correct weights
pub fn fragment_input<'t>(triangle: &Triangle, weights: &Vector3<f32>, texture: Option<&'t Texture>) -> PixelInput<'t> {
    let [ref a, ref b, ref c] = triangle.vertices;
    let [ref pa, ref pb, ref pc] = triangle.clip_positions;

    let (u, v, w) = (weights.x, weights.y, weights.z);

    let position: Vector4<f32> = Interpolate::barycentric_interpolate(u, pa, v, pb, w, pc);
    let normal: Vector3<f32> = Interpolate::barycentric_interpolate(u, &a.normal, v, &b.normal, w, &c.normal);
    let uv = Interpolate::barycentric_interpolate(u, &a.uv, v, &b.uv, w, &c.uv);

    PixelInput {
        position,
        color: Interpolate::barycentric_interpolate(u, &a.color, v, &b.color, w, &c.color),
        normal: normal.try_normalize(0.0).unwrap_or(normal),
        uv: uv.map(wrap),
        texture,
    }
}

/// Rasterizes every triangle assigned to the tile, in order, into the tile's own pixels.
///
/// The framebuffer view is shared with the other workers, which is sound because no two tiles share
/// a pixel and every write below is restricted to the tile region.
pub(crate) fn rasterize_tile(tile: &Tile,
                             triangles: &[Triangle],
                             shader: &dyn Shader,
                             texture: Option<&Texture>,
                             framebuffer: UnsafeFrameBuffer) {
    for &index in &tile.triangles {
        let triangle = &triangles[index];

        let area = match tile.region.intersection(&triangle.bounds) {
            Some(area) => area,
            None => continue,
        };

        for y in area.min.y..(area.max.y + 1) {
            for x in area.min.x..(area.max.x + 1) {
                let barycentric = match triangle.coverage(x, y) {
                    Some(barycentric) => barycentric,
                    None => continue,
                };

                let (weights, depth) = triangle.perspective_weights(&barycentric);

                // Larger depth metrics win
                if unsafe { framebuffer.depth(x, y) } >= depth {
                    continue;
                }

                match shader.pixel(&fragment_input(triangle, &weights, texture)) {
                    Fragment::Discard => (),
                    Fragment::Color(color) => unsafe {
                        framebuffer.write(x, y, saturate(color), depth);
                    },
                }
            }
        }
    }
}
