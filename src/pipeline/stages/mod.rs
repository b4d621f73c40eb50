pub mod rasterization;

pub mod setup;
pub mod tiling;

pub use self::setup::SetupContext;
pub use self::tiling::{Tile, TileGrid};
