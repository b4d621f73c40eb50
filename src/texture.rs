//! Floating-point RGBA textures

use nalgebra::Vector4;

use ::error::{RenderError, RenderResult};
use ::geometry::{Coordinate, Dimensions, HasDimensions};
use ::interpolate::Interpolate;

/// Value returned for any lookup outside of the texture: opaque black.
pub const BORDER_COLOR: Vector4<f32> = Vector4::new(0.0, 0.0, 0.0, 1.0);

/// Blends `new` over `old` using the alpha of `new` as the mix factor.
///
/// Returns `None` for fully transparent colors, which leave the destination untouched.
#[inline]
pub fn blend(old: Vector4<f32>, new: Vector4<f32>) -> Option<Vector4<f32>> {
    if new.w <= 0.0 {
        None
    } else {
        Some(Interpolate::linear_interpolate(new.w, &old, &new))
    }
}

/// Two-dimensional array of RGBA `f32` samples, stored row-major with row 0 at the bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    dimensions: Dimensions,
    pixels: Vec<Vector4<f32>>,
}

impl HasDimensions for Texture {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

impl Texture {
    /// Creates a texture filled with transparent black
    pub fn new(width: u32, height: u32) -> Texture {
        Texture::filled(width, height, Vector4::zeros())
    }

    pub fn filled(width: u32, height: u32, color: Vector4<f32>) -> Texture {
        let dimensions = Dimensions::new(width, height);

        Texture { dimensions, pixels: vec![color; dimensions.area()] }
    }

    /// Creates a texture from raw 8-bit image data, as produced by an image decoder.
    ///
    /// The first row of `bytes` becomes the bottom row of the texture. One channel is read as grey,
    /// two as grey and alpha, three as RGB with opaque alpha and four as RGBA.
    pub fn from_raw(width: u32, height: u32, channels: usize, bytes: &[u8]) -> RenderResult<Texture> {
        if channels == 0 || channels > 4 {
            return Err(RenderError::InvalidTextureData(format!("unsupported channel count {}", channels)));
        }

        let dimensions = Dimensions::new(width, height);
        let row_len = width as usize * channels;

        if bytes.len() != row_len * height as usize {
            return Err(RenderError::InvalidTextureData(
                format!("expected {} bytes for {}x{}x{}, got {}", row_len * height as usize, width, height, channels, bytes.len())));
        }

        let mut pixels = Vec::with_capacity(dimensions.area());

        if row_len > 0 {
            for row in bytes.chunks(row_len).rev() {
                for texel in row.chunks(channels) {
                    let c = |i: usize| texel[i] as f32 / 255.0;

                    pixels.push(match channels {
                        1 => Vector4::new(c(0), c(0), c(0), 1.0),
                        2 => Vector4::new(c(0), c(0), c(0), c(1)),
                        3 => Vector4::new(c(0), c(1), c(2), 1.0),
                        _ => Vector4::new(c(0), c(1), c(2), c(3)),
                    });
                }
            }
        }

        Ok(Texture { dimensions, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 { self.dimensions.width }

    #[inline]
    pub fn height(&self) -> u32 { self.dimensions.height }

    /// Raw texels, row-major from the bottom row up
    #[inline]
    pub fn pixels(&self) -> &[Vector4<f32>] { &self.pixels }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Vector4<f32>] { &mut self.pixels }

    /// Replaces every texel with `color`
    pub fn fill(&mut self, color: Vector4<f32>) {
        for pixel in &mut self.pixels {
            *pixel = color;
        }
    }

    /// Texel at the given integer coordinate, or `BORDER_COLOR` outside of the texture.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Vector4<f32> {
        match self.dimensions.index_of(Coordinate::new(x, y)) {
            Some(index) => self.pixels[index],
            None => BORDER_COLOR,
        }
    }

    /// Point sampling at normalized coordinates.
    pub fn sample(&self, s: f32, t: f32) -> Vector4<f32> {
        let x = s * (self.width() as f32 - 0.5);
        let y = t * (self.height() as f32 - 0.5);

        self.get(x.floor() as i32, y.floor() as i32)
    }

    /// Bilinear sampling at normalized coordinates, blending the four texels around the sample point.
    ///
    /// Texel centers sit at `(x + 0.5) / width`, where the result equals point sampling.
    pub fn sample_bilinear(&self, s: f32, t: f32) -> Vector4<f32> {
        let s = s * self.width() as f32 - 0.5;
        let t = t * self.height() as f32 - 0.5;

        let (x, y) = (s.floor(), t.floor());
        let (s_ratio, t_ratio) = (s - x, t - y);
        let (x, y) = (x as i32, y as i32);

        let bottom: Vector4<f32> = Interpolate::linear_interpolate(s_ratio, &self.get(x, y), &self.get(x + 1, y));
        let top: Vector4<f32> = Interpolate::linear_interpolate(s_ratio, &self.get(x, y + 1), &self.get(x + 1, y + 1));

        Interpolate::linear_interpolate(t_ratio, &bottom, &top)
    }

    /// Alpha-blends `color` into the texel at the given coordinate.
    ///
    /// Writes outside of the texture and fully transparent colors are ignored.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, color: Vector4<f32>) {
        if let Some(index) = self.dimensions.index_of(Coordinate::new(x, y)) {
            if let Some(blended) = blend(self.pixels[index], color) {
                self.pixels[index] = blended;
            }
        }
    }
}
