//! Color and depth framebuffer

use std::marker::PhantomData;

use nalgebra::Vector4;

use ::geometry::{Coordinate, Dimensions, HasDimensions};
use ::texture::{self, Texture};
use ::utils::clamp;

/// A color texture paired with a depth buffer of identical dimensions.
///
/// Depth values follow an increasing-wins convention: a cleared buffer holds `0.0`,
/// and fragments with a larger depth metric replace smaller ones.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    color: Texture,
    depth: Vec<f32>,
}

impl HasDimensions for FrameBuffer {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.color.dimensions() }
}

impl FrameBuffer {
    /// Creates a new framebuffer with transparent black color and zeroed depth
    pub fn new(width: u32, height: u32) -> FrameBuffer {
        let color = Texture::new(width, height);
        let depth = vec![0.0; color.dimensions().area()];

        FrameBuffer { color, depth }
    }

    #[inline]
    pub fn width(&self) -> u32 { self.color.width() }

    #[inline]
    pub fn height(&self) -> u32 { self.color.height() }

    /// Color attachment
    #[inline]
    pub fn texture(&self) -> &Texture { &self.color }

    #[inline]
    pub fn texture_mut(&mut self) -> &mut Texture { &mut self.color }

    /// Raw depth values, row-major from the bottom row up
    #[inline]
    pub fn depth_buffer(&self) -> &[f32] { &self.depth }

    /// Stored depth at the given pixel, or `0.0` outside of the framebuffer
    #[inline]
    pub fn depth(&self, x: i32, y: i32) -> f32 {
        match self.dimensions().index_of(Coordinate::new(x, y)) {
            Some(index) => self.depth[index],
            None => 0.0,
        }
    }

    /// Sets the stored depth at the given pixel, ignoring coordinates outside of the framebuffer
    #[inline]
    pub fn set_depth(&mut self, x: i32, y: i32, d: f32) {
        if let Some(index) = self.dimensions().index_of(Coordinate::new(x, y)) {
            self.depth[index] = d;
        }
    }

    /// Resets every depth value to `0.0` and every texel to `color`
    pub fn clear(&mut self, color: Vector4<f32>) {
        for d in &mut self.depth {
            *d = 0.0;
        }

        self.color.fill(color);
    }

    /// Converts the color attachment to row-major RGB triplets, in storage order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.dimensions().area() * 3);

        for color in self.color.pixels() {
            res.push((clamp(color.x, 0.0, 1.0) * 255.0).floor() as u8);
            res.push((clamp(color.y, 0.0, 1.0) * 255.0).floor() as u8);
            res.push((clamp(color.z, 0.0, 1.0) * 255.0).floor() as u8);
        }

        res
    }

    /// Shared view for writing from several threads at once
    pub(crate) fn as_unsafe(&mut self) -> UnsafeFrameBuffer {
        UnsafeFrameBuffer {
            dimensions: self.dimensions(),
            color: self.color.pixels_mut().as_mut_ptr(),
            depth: self.depth.as_mut_ptr(),
            lifetime: PhantomData,
        }
    }
}

/// Unsynchronized shared view of a `FrameBuffer`.
///
/// Every thread holding a copy must only touch its own disjoint set of pixels,
/// which the tile rasterizer guarantees by giving each thread whole tiles.
#[derive(Clone, Copy)]
pub(crate) struct UnsafeFrameBuffer<'a> {
    dimensions: Dimensions,
    color: *mut Vector4<f32>,
    depth: *mut f32,
    lifetime: PhantomData<&'a mut FrameBuffer>,
}

unsafe impl<'a> Send for UnsafeFrameBuffer<'a> {}

unsafe impl<'a> Sync for UnsafeFrameBuffer<'a> {}

impl<'a> HasDimensions for UnsafeFrameBuffer<'a> {
    #[inline]
    fn dimensions(&self) -> Dimensions { self.dimensions }
}

impl<'a> UnsafeFrameBuffer<'a> {
    /// Stored depth at the given pixel, or `0.0` outside of the framebuffer.
    ///
    /// The caller must be the only thread accessing this pixel.
    #[inline]
    pub unsafe fn depth(&self, x: i32, y: i32) -> f32 {
        match self.dimensions.index_of(Coordinate::new(x, y)) {
            Some(index) => *self.depth.add(index),
            None => 0.0,
        }
    }

    /// Blends the color into the pixel and stores the new depth. Out-of-bounds writes are ignored.
    ///
    /// The caller must be the only thread accessing this pixel.
    #[inline]
    pub unsafe fn write(&self, x: i32, y: i32, color: Vector4<f32>, depth: f32) {
        if let Some(index) = self.dimensions.index_of(Coordinate::new(x, y)) {
            let pixel = self.color.add(index);

            if let Some(blended) = texture::blend(*pixel, color) {
                *pixel = blended;
            }

            *self.depth.add(index) = depth;
        }
    }
}
