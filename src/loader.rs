use crate::{
    mesh::TerrainMesh,
    result::{TerrainMeshError, TerrainMeshResult},
    terrain::TerrainTile,
    terrain_data::pixel_grid::EncodedPixelGrid,
};
use bevy::{
    asset::{io::Reader, AssetLoader, LoadContext},
    log::debug,
    render::mesh::Mesh,
};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug)]
pub struct HeightmapLoaderSettings {
    /// Only every `step`-th sample of the heightmap is turned into a vertex.
    pub step: usize,
}

impl Default for HeightmapLoaderSettings {
    fn default() -> Self {
        Self { step: 1 }
    }
}

/// Decodes an encoded terrain-RGB image (PNG, WebP, ...) and triangulates it.
pub fn load_heightmap_mesh(bytes: &[u8], step: usize) -> TerrainMeshResult<TerrainMesh> {
    let image = image::load_from_memory(bytes)?;
    let pixels = EncodedPixelGrid::from_image(image);

    TerrainTile::from_pixels(&pixels)?
        .downsample(step)
        .build_mesh()
}

/// Loads `*.height.png` terrain-RGB tiles as [`Mesh`] assets.
#[derive(Default)]
pub struct HeightmapLoader;

impl AssetLoader for HeightmapLoader {
    type Asset = Mesh;
    type Settings = HeightmapLoaderSettings;
    type Error = TerrainMeshError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        let mesh = load_heightmap_mesh(&bytes, settings.step)?;

        debug!(
            "Loaded terrain mesh {} with {} vertices.",
            load_context.path().display(),
            mesh.vertex_count()
        );

        Ok(mesh.into())
    }

    fn extensions(&self) -> &[&str] {
        &["height.png"]
    }
}
