//! Renders a few frames of a spinning, vertex-colored cube into PNG files.
//!
//! Usage: `cargo run --example cube --features image_compat [output directory] [frames]`

extern crate image;
extern crate nalgebra;
extern crate tilerender;

use std::env;
use std::fs;
use std::path::PathBuf;

use nalgebra::{Vector3, Vector4};

use tilerender::{Config, Mesh, Pipeline, RenderError, RenderResult, Surface, Vertex};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;

/// Writes every presented frame to a numbered PNG file, and asks to close after the last one.
struct PngSurface {
    directory: PathBuf,
    frame: usize,
    frames: usize,
}

impl Surface for PngSurface {
    fn poll_close(&mut self) -> bool {
        self.frame + 1 >= self.frames
    }

    fn present(&mut self, rgb: &[u8], width: u32, height: u32) -> RenderResult<()> {
        let image = image::RgbImage::from_raw(width, height, rgb.to_vec())
            .ok_or_else(|| RenderError::Surface("frame buffer size mismatch".to_string()))?;

        // Framebuffer rows start at the bottom
        let image = image::imageops::flip_vertical(&image);

        let path = self.directory.join(format!("cube_{:03}.png", self.frame));

        image.save(&path)?;

        println!("wrote {}", path.display());

        self.frame += 1;

        Ok(())
    }
}

fn cube() -> Mesh {
    let vertex = |x: f32, y: f32, z: f32, color: [f32; 3]| {
        Vertex::at(x, y, z)
            .with_normal(Vector3::new(0.0, 0.0, z))
            .with_color(Vector4::new(color[0], color[1], color[2], 1.0))
    };

    let vertices = vec![
        vertex(-1.0, -1.0, -1.0, [0.2, 0.0, 0.0]),
        vertex(1.0, -1.0, -1.0, [0.0, 0.2, 0.0]),
        vertex(1.0, 1.0, -1.0, [0.0, 0.0, 0.2]),
        vertex(-1.0, 1.0, -1.0, [0.2, 0.0, 0.2]),
        vertex(-1.0, -1.0, 1.0, [1.0, 0.0, 0.0]),
        vertex(1.0, -1.0, 1.0, [0.0, 1.0, 0.0]),
        vertex(1.0, 1.0, 1.0, [0.0, 0.0, 1.0]),
        vertex(-1.0, 1.0, 1.0, [1.0, 0.0, 1.0]),
    ];

    // Counter-clockwise when seen from outside of the cube
    let indices = vec![
        0, 2, 1, 2, 0, 3, // back
        5, 7, 4, 7, 5, 6, // front
        1, 6, 5, 6, 1, 2, // right
        4, 3, 0, 3, 4, 7, // left
        3, 6, 2, 6, 3, 7, // top
        1, 4, 0, 4, 1, 5, // bottom
    ];

    Mesh::new(vertices, indices)
}

/// Shades fragments with their interpolated vertex color
struct VertexColor;

impl tilerender::Shader for VertexColor {
    fn vertex(&self, projection: &nalgebra::Matrix4<f32>, model_view: &nalgebra::Matrix4<f32>, vertex: &Vertex) -> Vertex {
        vertex.transform(&(projection * model_view))
    }

    fn pixel(&self, input: &tilerender::PixelInput) -> tilerender::Fragment {
        tilerender::Fragment::Color(input.color)
    }
}

fn main() -> RenderResult<()> {
    let mut args = env::args().skip(1);

    let directory = PathBuf::from(args.next().unwrap_or_else(|| "frames".to_string()));
    let frames = args.next().and_then(|n| n.parse().ok()).unwrap_or(8);

    fs::create_dir_all(&directory).map_err(|err| RenderError::Surface(err.to_string()))?;

    let mut pipeline = Pipeline::new(Config::new(WIDTH, HEIGHT).with_clear_color(Vector4::new(0.1, 0.1, 0.1, 1.0)))?;
    let mut surface = PngSurface { directory, frame: 0, frames };

    pipeline.bind_shader(std::sync::Arc::new(VertexColor));

    let cube = cube();
    let mut rot = 0.0f32;

    while !pipeline.should_close() {
        rot += 0.1;

        pipeline.clear();

        {
            let projection = pipeline.projection_mut();

            projection.load_identity();
            projection.perspective(60.0f32.to_radians(), WIDTH as f32 / HEIGHT as f32, 0.01, 200.0);
        }

        {
            let model_view = pipeline.model_view_mut();

            model_view.load_identity();
            model_view.translate(&Vector3::new(0.0, 0.0, -5.0));
            model_view.rotate(rot, &Vector3::new(0.0, 1.0, 0.0));
            model_view.rotate(rot * 1.25, &Vector3::new(0.0, 0.0, 1.0));
        }

        let stats = pipeline.draw_mesh(&cube)?;

        println!("frame {}: {} of {} triangles visible across {} tiles",
                 surface.frame, stats.candidates, stats.submitted, stats.tiles);

        pipeline.update(&mut surface)?;
    }

    Ok(())
}
