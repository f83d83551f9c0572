use bevy_terrain_mesh::prelude::TerrainMeshError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PreprocessError {
    #[error("{imagery} imagery path(s) given for {sources} heightmap(s)")]
    ImageryCount { sources: usize, imagery: usize },
    #[error("{} already contains a mesh manifest, use --overwrite to replace it", .0.display())]
    OutputExists(PathBuf),
    #[error("heightmaps {first} and {second} would both be written to {name}")]
    DuplicateName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
    #[error("preprocessing was cancelled")]
    Cancelled,
    #[error("terrain mesh error")]
    TerrainMesh(#[from] TerrainMeshError),
    #[error("image error")]
    Image(#[from] image::ImageError),
    #[error("IO error")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type PreprocessResult<T> = Result<T, PreprocessError>;
