use crate::{
    manifest::MeshTile,
    progress::{CountingProgressCallback, ProgressCallback},
    result::{PreprocessError, PreprocessResult},
};
use bevy_terrain_mesh::prelude::*;
use itertools::Itertools;
use rayon::prelude::*;
use std::{fs, path::Path};

fn vertex_bytes(mesh: &TerrainMesh) -> Vec<u8> {
    mesh.vertices()
        .iter()
        .flatten()
        .flat_map(|value| value.to_le_bytes())
        .collect_vec()
}

fn index_bytes(mesh: &TerrainMesh) -> Vec<u8> {
    mesh.indices()
        .iter()
        .flat_map(|index| index.to_le_bytes())
        .collect_vec()
}

/// Triangulates all tiles in parallel and writes their vertex and index buffers
/// into the directory as little endian values.
///
/// Stops with [`PreprocessError::Cancelled`] once the progress callback returns `false`.
pub(crate) fn build_and_write(
    tiles: &[(TileRegion, TerrainTile)],
    directory: &Path,
    progress_callback: Option<&ProgressCallback>,
) -> PreprocessResult<Vec<MeshTile>> {
    let progress_callback = CountingProgressCallback::new(tiles.len() as u64, progress_callback);

    tiles
        .par_iter()
        .map(|(region, tile)| -> PreprocessResult<MeshTile> {
            let mesh = tile.build_mesh()?;

            let mesh_tile = MeshTile {
                region: *region,
                vertex_count: mesh.vertex_count(),
                index_count: mesh.index_count(),
            };

            fs::write(mesh_tile.vertex_path(directory), vertex_bytes(&mesh))?;
            fs::write(mesh_tile.index_path(directory), index_bytes(&mesh))?;

            if !progress_callback.increment() {
                return Err(PreprocessError::Cancelled);
            }

            Ok(mesh_tile)
        })
        .collect()
}
