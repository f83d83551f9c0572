use crate::terrain::TerrainTile;
use crate::terrain_data::{TileRegion, MAX_TILE_SIZE};
use anyhow::Result;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Configures how heightmaps are turned into meshes.
///
/// Stored as RON, missing fields fall back to their defaults.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TerrainMeshConfig {
    /// Only every `step`-th sample of the heightmap is used.
    pub step: usize,
    /// The side length of the tiles, in samples, large heightmaps are split into.
    /// Clamped to `2..=255`, so that every tile fits into a 16 bit index buffer.
    pub tile_size: usize,
}

impl Default for TerrainMeshConfig {
    fn default() -> Self {
        Self {
            step: 1,
            tile_size: MAX_TILE_SIZE,
        }
    }
}

impl TerrainMeshConfig {
    pub fn decode_str(encoded: &str) -> Result<Self> {
        Ok(ron::from_str(encoded)?)
    }

    pub fn encode_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(self, PrettyConfig::default())?)
    }

    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let encoded = fs::read_to_string(path)?;
        Self::decode_str(&encoded)
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let encoded = self.encode_string()?;
        fs::write(path, encoded)?;
        Ok(())
    }

    /// Downsamples the tile and splits it into mesh sized pieces.
    pub fn tiles(&self, tile: &TerrainTile) -> Vec<(TileRegion, TerrainTile)> {
        tile.downsample(self.step).split(self.tile_size)
    }
}
