//! Error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("draw surface of {0}x{1} pixels is empty")]
    EmptyDrawSurface(u32, u32),
    #[error("tile size {0} is not a non-zero power of two")]
    InvalidTileSize(u32),
    #[error("a rendering context needs at least one worker thread")]
    NoWorkerThreads,
    #[error("{0} indices is invalid for triangle indexing")]
    InvalidIndexCount(usize),
    #[error("index {index} is out of bounds for {len} vertices")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("invalid texture data: {0}")]
    InvalidTextureData(String),
    #[error("surface error: {0}")]
    Surface(String),
    #[error("image error: {0}")]
    Image(String),
    #[error("mesh import error: {0}")]
    MeshImport(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
