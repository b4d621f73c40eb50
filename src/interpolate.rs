//! Interpolation utilities

use num_traits::{Float, NumCast};

use nalgebra::{Vector2, Vector3, Vector4};

/// Describes a type that can be interpolated with barycentric coordinates or linearly between two values.
///
/// Barycentric interpolation is used by the rasterizer to produce per-fragment attributes,
/// and linear interpolation is used by the clipper to produce new vertices on the clipping planes.
///
/// See [This document](https://classes.soe.ucsc.edu/cmps160/Fall10/resources/barycentricInterpolation.pdf) for more information.
pub trait Interpolate {
    /// Interpolate the three values with their corresponding barycentric coordinate weight
    fn barycentric_interpolate<R: Float>(u: R, x1: &Self, v: R, x2: &Self, w: R, x3: &Self) -> Self;

    /// Simple linear interpolation
    fn linear_interpolate<R: Float>(t: R, x1: &Self, x2: &Self) -> Self;
}

impl Interpolate for () {
    #[inline(always)]
    fn barycentric_interpolate<R: Float>(_: R, _: &Self, _: R, _: &Self, _: R, _: &Self) -> Self { () }

    #[inline(always)]
    fn linear_interpolate<R: Float>(_: R, _: &Self, _: &Self) -> Self { () }
}

#[inline(always)]
fn cast<A: Float, B: Float>(value: A) -> B {
    <B as NumCast>::from(value).unwrap_or_else(B::nan)
}

macro_rules! impl_float_interpolate {
    ($($t:ty),+) => {
        $(
            impl Interpolate for $t {
                #[inline(always)]
                fn barycentric_interpolate<R: Float>(u: R, ux: &$t, v: R, vx: &$t, w: R, wx: &$t) -> $t {
                    cast(cast::<$t, R>(*ux) * u + cast::<$t, R>(*vx) * v + cast::<$t, R>(*wx) * w)
                }

                #[inline(always)]
                fn linear_interpolate<R: Float>(t: R, x1: &$t, x2: &$t) -> $t {
                    cast((R::one() - t) * cast::<$t, R>(*x1) + t * cast::<$t, R>(*x2))
                }
            }
        )+
    }
}

impl_float_interpolate!(f32, f64);

macro_rules! impl_vector_interpolate {
    ($($t:ty),+) => {
        $(
            impl Interpolate for $t {
                #[inline]
                fn barycentric_interpolate<R: Float>(u: R, ux: &$t, v: R, vx: &$t, w: R, wx: &$t) -> $t {
                    ux.zip_zip_map(vx, wx, |a, b, c| Interpolate::barycentric_interpolate(u, &a, v, &b, w, &c))
                }

                #[inline]
                fn linear_interpolate<R: Float>(t: R, x1: &$t, x2: &$t) -> $t {
                    x1.zip_map(x2, |a, b| Interpolate::linear_interpolate(t, &a, &b))
                }
            }
        )+
    }
}

impl_vector_interpolate!(Vector2<f32>, Vector3<f32>, Vector4<f32>);
