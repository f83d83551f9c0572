//! This crate turns terrain-RGB heightmap tiles into renderable triangle meshes.
//!
//! # Pipeline
//! The conversion happens in two pure and deterministic stages:
//!
//! 1. The [`decode_elevation`](formats::terrain_rgb::decode_elevation) step maps every pixel
//!    of an [`EncodedPixelGrid`](terrain_data::pixel_grid::EncodedPixelGrid) to its elevation
//!    in meters, producing an [`ElevationGrid`](terrain_data::elevation_grid::ElevationGrid).
//! 2. The [`GridMeshBuilder`](mesh::GridMeshBuilder) places one vertex on every grid sample
//!    and connects neighbouring samples with two triangles each, producing a
//!    [`TerrainMesh`](mesh::TerrainMesh).
//!
//! The [`TerrainTile`](terrain::TerrainTile) ties both stages together and optionally tints
//! the mesh with imagery of the same size.
//!
//! # Limits
//! Meshes use 16 bit indices, so a single mesh can not have more than
//! [`MAX_VERTEX_COUNT`](mesh::MAX_VERTEX_COUNT) vertices.
//! Larger heightmaps have to be downsampled or split into tiles first
//! (see [`TerrainMeshConfig`](config::TerrainMeshConfig)).
//!
//! # Bevy
//! A [`TerrainMesh`](mesh::TerrainMesh) converts into a Bevy [`Mesh`](bevy::render::mesh::Mesh).
//! Adding the [`TerrainMeshPlugin`] lets the asset server load `*.height.png` files as meshes
//! directly.

pub mod config;
pub mod formats;
pub mod loader;
pub mod mesh;
pub mod plugin;
pub mod result;
pub mod terrain;
pub mod terrain_data;

pub use crate::plugin::TerrainMeshPlugin;

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        config::TerrainMeshConfig,
        formats::terrain_rgb::{decode_elevation, decode_pixel, encode_elevation},
        loader::{load_heightmap_mesh, HeightmapLoader, HeightmapLoaderSettings},
        mesh::{build_mesh, GridMeshBuilder, TerrainMesh, MAX_VERTEX_COUNT},
        result::{TerrainMeshError, TerrainMeshResult},
        terrain::{ensure_aligned, TerrainTile},
        terrain_data::{
            elevation_grid::ElevationGrid,
            pixel_grid::{ColorGrid, EncodedPixelGrid},
            split_tiles, TileRegion,
        },
        TerrainMeshPlugin,
    };
}
