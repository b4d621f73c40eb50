//! Conversions to and from the `image` crate

use std::path::Path;

use image;

use ::error::{RenderError, RenderResult};
use ::framebuffer::FrameBuffer;
use ::texture::Texture;
use ::utils::clamp;

impl From<image::ImageError> for RenderError {
    fn from(err: image::ImageError) -> RenderError {
        RenderError::Image(err.to_string())
    }
}

impl Texture {
    /// Loads an image file as a texture, with the top row of the image becoming the last texture row.
    pub fn open<P: AsRef<Path>>(path: P) -> RenderResult<Texture> {
        let path = path.as_ref();

        let image = image::open(path)?.into_rgba8();

        debug!("loaded {}x{} texture from {}", image.width(), image.height(), path.display());

        let (width, height) = image.dimensions();

        Texture::from_raw(width, height, 4, &image.into_raw())
    }
}

impl FrameBuffer {
    /// Copies the color attachment into an RGB image, top row first.
    pub fn copy_to_image(&self) -> image::RgbImage {
        let texture = self.texture();
        let height = self.height();

        image::RgbImage::from_fn(self.width(), height, |x, y| {
            let color = texture.get(x as i32, (height - 1 - y) as i32);

            let channel = |c: f32| (clamp(c, 0.0, 1.0) * 255.0).floor() as u8;

            image::Rgb([channel(color.x), channel(color.y), channel(color.z)])
        })
    }
}

#[cfg(test)]
mod test {
    use nalgebra::Vector4;

    use ::framebuffer::FrameBuffer;

    #[test]
    fn test_copy_to_image_flips_rows() {
        let mut fb = FrameBuffer::new(2, 2);

        fb.texture_mut().set(0, 0, Vector4::new(1.0, 0.0, 0.0, 1.0));
        fb.texture_mut().set(1, 1, Vector4::new(0.0, 0.5, 1.0, 1.0));

        let image = fb.copy_to_image();

        assert_eq!(image.get_pixel(0, 1).0, [255, 0, 0]);
        assert_eq!(image.get_pixel(1, 0).0, [0, 127, 255]);
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 0]);
    }
}
