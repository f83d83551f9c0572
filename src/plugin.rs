use crate::loader::HeightmapLoader;
use bevy::prelude::*;

/// Registers the [`HeightmapLoader`], so that `*.height.png` tiles can be loaded as meshes.
///
/// ```ignore
/// let mesh: Handle<Mesh> = asset_server.load("terrain/tile_0_0.height.png");
/// ```
pub struct TerrainMeshPlugin;

impl Plugin for TerrainMeshPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset_loader::<HeightmapLoader>();
    }
}
