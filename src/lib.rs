//! Tile-parallel software triangle rasterizer
//!
//! ### Overview
//!
//! A draw call runs in three parallel stages separated by full barriers:
//!
//! 1. Every triangle is vertex shaded, clipped against the six homogeneous frustum planes,
//!    perspective divided, back-face culled and projected onto the screen.
//! 2. Each surviving triangle is recorded against every screen tile its bounding box overlaps,
//!    and the `(tile, triangle)` pairs are sorted and grouped into tiles.
//! 3. Tiles are rasterized independently. Since no two tiles share a pixel, workers write to the
//!    framebuffer without any locking.
//!
//! Fragments are shaded with perspective-correct attributes and depth tested with an
//! increasing-wins metric: the depth buffer is cleared to `0.0` and larger values are closer.
//!
//! ### Example:
//!
//! ```
//! extern crate nalgebra;
//! extern crate tilerender;
//!
//! use nalgebra::Vector4;
//! use tilerender::{Config, Pipeline, Vertex};
//!
//! # fn main() {
//! let mut pipeline = Pipeline::new(Config::new(64, 64)).unwrap();
//!
//! pipeline.clear();
//!
//! let stats = pipeline.triangle(&Vertex::at(-0.5, -0.5, 0.5),
//!                               &Vertex::at(0.5, -0.5, 0.5),
//!                               &Vertex::at(0.0, 0.5, 0.5));
//!
//! assert_eq!(stats.candidates, 1);
//! assert_eq!(pipeline.framebuffer().texture().get(32, 32), Vector4::new(1.0, 1.0, 1.0, 1.0));
//! # }
//! ```
//!
//! ### Features
//!
//! * `image_compat` loads textures from image files and copies the framebuffer into an `image::RgbImage`.
//! * `obj_compat` loads meshes from Wavefront OBJ files.

#[macro_use]
extern crate log;

extern crate nalgebra;
extern crate num_cpus;
extern crate num_traits;
extern crate parking_lot;
extern crate scoped_threadpool;
extern crate smallvec;
extern crate thiserror;

#[cfg(feature = "image_compat")]
extern crate image;

#[cfg(feature = "obj_compat")]
extern crate tobj;

pub mod error;
pub mod utils;
pub mod interpolate;
pub mod geometry;
pub mod mesh;
pub mod matrix_stack;
pub mod texture;
pub mod framebuffer;
pub mod shader;
pub mod parallel;
pub mod config;
pub mod surface;
pub mod pipeline;

#[cfg(feature = "image_compat")]
pub mod image_compat;

#[cfg(feature = "obj_compat")]
pub mod obj_compat;

pub use error::{RenderError, RenderResult};
pub use interpolate::Interpolate;
pub use mesh::{Mesh, Vertex};
pub use matrix_stack::MatrixStack;
pub use texture::Texture;
pub use framebuffer::FrameBuffer;
pub use shader::{DefaultShader, Fragment, PixelInput, Shader};
pub use config::Config;
pub use surface::Surface;
pub use pipeline::{DrawStats, Pipeline};
