use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainMeshError {
    #[error("pixel grid has {channels} channel(s), terrain-RGB decoding needs at least 3")]
    InvalidPixelFormat { channels: usize },
    #[error("pixel buffer holds {found} bytes, but its shape requires {expected}")]
    PixelBufferSize { expected: usize, found: usize },
    #[error("grid of {vertex_count} cells does not fit into a 16 bit index buffer")]
    MeshTooLarge { vertex_count: usize },
    #[error("grids are not aligned: expected {expected:?}, found {found:?} (width, height)")]
    DimensionMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error("image error")]
    Image(#[from] image::ImageError),
}

pub type TerrainMeshResult<T> = Result<T, TerrainMeshError>;
