//! Presentation surface interface

use ::error::RenderResult;

/// Display target the rendered frame is presented to, such as a window.
///
/// The rendering context polls it for a close request once per frame, then hands it the color buffer.
pub trait Surface {
    /// Returns `true` if the user asked for the surface to be closed
    fn poll_close(&mut self) -> bool;

    /// Shows a frame of row-major RGB triplets, with the bottom row first
    fn present(&mut self, rgb: &[u8], width: u32, height: u32) -> RenderResult<()>;
}

impl<'a, S: Surface + ?Sized> Surface for &'a mut S {
    #[inline]
    fn poll_close(&mut self) -> bool {
        (**self).poll_close()
    }

    #[inline]
    fn present(&mut self, rgb: &[u8], width: u32, height: u32) -> RenderResult<()> {
        (**self).present(rgb, width, height)
    }
}
