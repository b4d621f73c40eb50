//! Rendering context configuration

use nalgebra::Vector4;

use num_cpus;

use ::error::{RenderError, RenderResult};
use ::geometry::Dimensions;

/// Default side length of a rasterization tile, in pixels
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Settings used to create a rendering context.
///
/// ```
/// use tilerender::Config;
///
/// let config = Config::new(640, 480).with_downscale(2.0).with_tile_size(16);
///
/// assert_eq!(config.draw_dimensions().width, 320);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Factor the window size is divided by to get the size of the framebuffer
    pub downscale: f32,
    /// Side length of the square rasterization tiles. Must be a power of two.
    pub tile_size: u32,
    /// Number of worker threads
    pub threads: usize,
    /// Color the framebuffer is reset to by `Pipeline::clear`
    pub clear_color: Vector4<f32>,
}

impl Default for Config {
    fn default() -> Config {
        Config::new(640, 480)
    }
}

impl Config {
    pub fn new(width: u32, height: u32) -> Config {
        Config {
            width,
            height,
            downscale: 1.0,
            tile_size: DEFAULT_TILE_SIZE,
            threads: num_cpus::get(),
            clear_color: Vector4::zeros(),
        }
    }

    pub fn with_downscale(self, downscale: f32) -> Config {
        Config { downscale, ..self }
    }

    pub fn with_tile_size(self, tile_size: u32) -> Config {
        Config { tile_size, ..self }
    }

    pub fn with_threads(self, threads: usize) -> Config {
        Config { threads, ..self }
    }

    pub fn with_clear_color(self, clear_color: Vector4<f32>) -> Config {
        Config { clear_color, ..self }
    }

    /// Effective downscale factor, never less than one
    pub fn effective_downscale(&self) -> f32 {
        // `max` also replaces NaN
        self.downscale.max(1.0)
    }

    /// Size of the framebuffer that is actually drawn to
    pub fn draw_dimensions(&self) -> Dimensions {
        let downscale = self.effective_downscale();

        Dimensions::new((self.width as f32 / downscale).floor() as u32,
                        (self.height as f32 / downscale).floor() as u32)
    }

    /// Checks the configuration, returning the draw dimensions if it is usable
    pub fn validate(&self) -> RenderResult<Dimensions> {
        let dimensions = self.draw_dimensions();

        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(RenderError::EmptyDrawSurface(dimensions.width, dimensions.height));
        }

        if !self.tile_size.is_power_of_two() {
            return Err(RenderError::InvalidTileSize(self.tile_size));
        }

        if self.threads == 0 {
            return Err(RenderError::NoWorkerThreads);
        }

        Ok(dimensions)
    }
}

#[cfg(test)]
mod test {
    use ::error::RenderError;
    use ::geometry::Dimensions;

    use super::Config;

    #[test]
    fn test_downscale_clamped() {
        assert_eq!(Config::new(640, 480).with_downscale(0.25).draw_dimensions(), Dimensions::new(640, 480));
        assert_eq!(Config::new(641, 480).with_downscale(2.0).draw_dimensions(), Dimensions::new(320, 240));
    }

    #[test]
    fn test_validate() {
        assert_eq!(Config::new(64, 32).validate().unwrap(), Dimensions::new(64, 32));

        match Config::new(1, 1).with_downscale(2.0).validate() {
            Err(RenderError::EmptyDrawSurface(0, 0)) => (),
            other => panic!("unexpected {:?}", other),
        }

        match Config::new(64, 64).with_tile_size(24).validate() {
            Err(RenderError::InvalidTileSize(24)) => (),
            other => panic!("unexpected {:?}", other),
        }

        match Config::new(64, 64).with_tile_size(0).validate() {
            Err(RenderError::InvalidTileSize(0)) => (),
            other => panic!("unexpected {:?}", other),
        }

        match Config::new(64, 64).with_threads(0).validate() {
            Err(RenderError::NoWorkerThreads) => (),
            other => panic!("unexpected {:?}", other),
        }
    }
}
