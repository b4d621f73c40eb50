//! Utilities

use nalgebra::Vector4;

/// Clamp a value to the given range
pub fn clamp<T>(value: T, min: T, max: T) -> T where T: PartialOrd {
    if value < min { min } else if value > max { max } else { value }
}

/// Clamp every channel of a color to `[0, 1]`
#[inline]
pub fn saturate(color: Vector4<f32>) -> Vector4<f32> {
    color.map(|c| clamp(c, 0.0, 1.0))
}

/// Wrap a texture coordinate into `[0, 1)`
#[inline]
pub fn wrap(value: f32) -> f32 {
    let fract = value - value.floor();

    // tiny negative values round up to exactly 1
    if fract >= 1.0 { 0.0 } else { fract }
}
