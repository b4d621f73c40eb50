//! Rendering context and the tiled draw pipeline

use std::sync::Arc;
use std::time::Instant;

use nalgebra::Vector4;

use scoped_threadpool::Pool;

use ::config::Config;
use ::error::RenderResult;
use ::framebuffer::FrameBuffer;
use ::geometry::{HasDimensions, Triangle};
use ::geometry::clip_segment;
use ::matrix_stack::MatrixStack;
use ::mesh::{self, Mesh, Vertex};
use ::parallel;
use ::shader::{DefaultShader, Shader};
use ::surface::Surface;
use ::texture::Texture;

pub mod stages;

use self::stages::{SetupContext, TileGrid};
use self::stages::rasterization::{draw_line_bresenham, rasterize_tile};
use self::stages::tiling::Tile;

/// Triangles handed to a setup worker at a time
const SETUP_CHUNK_SIZE: usize = 64;

/// Candidate triangles handed to a binning worker at a time
const BINNING_CHUNK_SIZE: usize = 256;

/// Pixel column or row containing a normalized device coordinate, without narrowing to an integer
#[inline]
fn screen_position(ndc: f32, size: u32) -> f64 {
    (0.5 * size as f64 * (ndc as f64 + 1.0)).floor()
}

/// Summary of a single draw call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles described by the index list
    pub submitted: usize,
    /// Triangles that survived clipping and culling, including those created by clipping
    pub candidates: usize,
    /// Tiles that had at least one triangle assigned to them
    pub tiles: usize,
}

/// The rendering context.
///
/// Owns the framebuffer, both matrix stacks, the bound shader and texture, and the worker pool
/// the draw stages run on. State is only changed between draw calls.
pub struct Pipeline {
    config: Config,
    framebuffer: FrameBuffer,
    grid: TileGrid,
    model_view: MatrixStack,
    projection: MatrixStack,
    default_shader: DefaultShader,
    shader: Option<Arc<dyn Shader>>,
    texture: Option<Arc<Texture>>,
    pool: Pool,
    should_close: bool,
}

impl Pipeline {
    /// Creates a new rendering context, failing if the configuration leaves nothing to draw to.
    pub fn new(config: Config) -> RenderResult<Pipeline> {
        let dimensions = config.validate()?;

        info!("creating {}x{} rendering context ({} threads, {}px tiles)",
              dimensions.width, dimensions.height, config.threads, config.tile_size);

        let mut framebuffer = FrameBuffer::new(dimensions.width, dimensions.height);

        framebuffer.clear(config.clear_color);

        Ok(Pipeline {
            grid: TileGrid::new(dimensions, config.tile_size),
            framebuffer,
            model_view: MatrixStack::new(),
            projection: MatrixStack::new(),
            default_shader: DefaultShader,
            shader: None,
            texture: None,
            pool: Pool::new(config.threads as u32),
            should_close: false,
            config,
        })
    }

    #[inline]
    pub fn config(&self) -> &Config { &self.config }

    #[inline]
    pub fn framebuffer(&self) -> &FrameBuffer { &self.framebuffer }

    #[inline]
    pub fn framebuffer_mut(&mut self) -> &mut FrameBuffer { &mut self.framebuffer }

    #[inline]
    pub fn model_view(&self) -> &MatrixStack { &self.model_view }

    #[inline]
    pub fn model_view_mut(&mut self) -> &mut MatrixStack { &mut self.model_view }

    #[inline]
    pub fn projection(&self) -> &MatrixStack { &self.projection }

    #[inline]
    pub fn projection_mut(&mut self) -> &mut MatrixStack { &mut self.projection }

    /// Uses the given shader for all following draw calls
    pub fn bind_shader(&mut self, shader: Arc<dyn Shader>) {
        self.shader = Some(shader);
    }

    /// Goes back to the default shader
    pub fn unbind_shader(&mut self) {
        self.shader = None;
    }

    /// Makes the texture available to the pixel shader
    pub fn bind_texture(&mut self, texture: Arc<Texture>) {
        self.texture = Some(texture);
    }

    pub fn unbind_texture(&mut self) {
        self.texture = None;
    }

    /// Whether the last `update` saw a close request
    #[inline]
    pub fn should_close(&self) -> bool { self.should_close }

    /// Clears the framebuffer to the configured clear color
    pub fn clear(&mut self) {
        self.framebuffer.clear(self.config.clear_color);
    }

    pub fn clear_with(&mut self, color: Vector4<f32>) {
        self.framebuffer.clear(color);
    }

    /// Polls the surface for a close request, then presents the framebuffer to it.
    pub fn update<S: Surface>(&mut self, surface: &mut S) -> RenderResult<()> {
        if surface.poll_close() {
            debug!("surface requested close");
            self.should_close = true;
        }

        let (width, height) = (self.framebuffer.width(), self.framebuffer.height());

        surface.present(&self.framebuffer.to_rgb8(), width, height)
    }

    /// Alpha-blends a single pixel into the framebuffer. Pixels outside of it are ignored.
    #[inline]
    pub fn pixel(&mut self, x: i32, y: i32, color: Vector4<f32>) {
        self.framebuffer.texture_mut().set(x, y, color);
    }

    /// Draws a 2D line in framebuffer pixels, including both endpoints.
    ///
    /// The line is clipped to the framebuffer first, so only its visible part is stepped.
    pub fn line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Vector4<f32>) {
        self.clipped_line((x1 as f64, y1 as f64), (x2 as f64, y2 as f64), color);
    }

    /// Draws a line between two object-space vertices in the color of the first one.
    ///
    /// Lines with an endpoint behind the camera are skipped entirely. There is no depth testing.
    pub fn line_3d(&mut self, a: &Vertex, b: &Vertex) {
        let (a, b) = {
            let shader = self.current_shader();
            let projection = self.projection.matrix();
            let model_view = self.model_view.matrix();

            (shader.vertex(&projection, &model_view, a), shader.vertex(&projection, &model_view, b))
        };

        if a.position.w <= 0.0 || b.position.w <= 0.0 {
            trace!("skipping line with an endpoint behind the camera");
            return;
        }

        let dimensions = self.framebuffer.dimensions();

        // Kept in floating point so endpoints far off screen survive until clipping
        let screen = |v: &Vertex| {
            let p = v.position / v.position.w;

            (screen_position(p.x, dimensions.width), screen_position(p.y, dimensions.height))
        };

        self.clipped_line(screen(&a), screen(&b), a.color);
    }

    fn clipped_line(&mut self, start: (f64, f64), end: (f64, f64), color: Vector4<f32>) {
        let max = (self.framebuffer.width() as f64 - 1.0, self.framebuffer.height() as f64 - 1.0);

        let ((x1, y1), (x2, y2)) = match clip_segment(start, end, (0.0, 0.0), max) {
            Some(segment) => segment,
            None => return,
        };

        let texture = self.framebuffer.texture_mut();

        draw_line_bresenham(x1.round() as i32, y1.round() as i32, x2.round() as i32, y2.round() as i32,
                            |x, y| texture.set(x, y, color));
    }

    fn current_shader(&self) -> &dyn Shader {
        match self.shader {
            Some(ref shader) => &**shader,
            None => &self.default_shader,
        }
    }

    /// Draws a single triangle through the full pipeline
    pub fn triangle(&mut self, a: &Vertex, b: &Vertex, c: &Vertex) -> DrawStats {
        let vertices = [*a, *b, *c];

        self.draw_validated(&vertices, &[0, 1, 2])
    }

    /// Draws an indexed mesh
    pub fn draw_mesh(&mut self, mesh: &Mesh) -> RenderResult<DrawStats> {
        self.draw_indexed(&mesh.vertices, &mesh.indices)
    }

    /// Draws the triangles formed by every three consecutive indices into the vertex list.
    ///
    /// The whole index list is checked before anything is drawn.
    pub fn draw_indexed(&mut self, vertices: &[Vertex], indices: &[usize]) -> RenderResult<DrawStats> {
        mesh::validate_indices(vertices.len(), indices)?;

        Ok(self.draw_validated(vertices, indices))
    }

    fn draw_validated(&mut self, vertices: &[Vertex], indices: &[usize]) -> DrawStats {
        let submitted = indices.len() / 3;

        let projection = self.projection.matrix();
        let model_view = self.model_view.matrix();

        let Pipeline {
            ref mut pool,
            ref mut framebuffer,
            ref grid,
            ref shader,
            ref default_shader,
            ref texture,
            ..
        } = *self;

        let shader: &dyn Shader = match *shader {
            Some(ref shader) => &**shader,
            None => default_shader,
        };

        let texture = texture.as_ref().map(|texture| &**texture);

        let start = Instant::now();

        // Stage 1: vertex shading, clipping and triangle setup
        let candidates: Vec<Triangle> = {
            let setup = SetupContext::new(shader, &projection, &model_view, framebuffer.dimensions());

            parallel::gather(pool, submitted, SETUP_CHUNK_SIZE, |i, out| {
                setup.process_indexed(vertices, indices, i, out)
            })
        };

        trace!("setup finished in {:?}", start.elapsed());

        // Stage 2: tile assignment
        let tiles: Vec<Tile> = {
            let candidates = &candidates;

            let pairs = parallel::gather(pool, candidates.len(), BINNING_CHUNK_SIZE, |i, out| {
                grid.bin(i, &candidates[i], out)
            });

            grid.build_tiles(pairs)
        };

        trace!("binning finished in {:?}", start.elapsed());

        // Stage 3: rasterization
        {
            let shared = framebuffer.as_unsafe();
            let candidates = &candidates;
            let tiles = &tiles;

            parallel::dispatch(pool, tiles.len(), 1, |i| {
                rasterize_tile(&tiles[i], candidates, shader, texture, shared)
            });
        }

        trace!("rasterization finished in {:?}", start.elapsed());

        let stats = DrawStats {
            submitted,
            candidates: candidates.len(),
            tiles: tiles.len(),
        };

        debug!("drew {} triangles ({} candidates) across {} tiles", stats.submitted, stats.candidates, stats.tiles);

        stats
    }
}
