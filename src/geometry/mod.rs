//! Screen-space and clip-space geometry

pub mod dimension;
pub mod coordinate;
pub mod clip;
pub mod line;
pub mod triangle;

pub use self::dimension::{Dimensions, HasDimensions};
pub use self::coordinate::Coordinate;
pub use self::clip::{ClippingAxis, Polygon, ALL_CLIPPING_AXES, clip_polygon, triangulate};
pub use self::line::clip_segment;
pub use self::triangle::{BoundingBox, Triangle};
