use anyhow::Result;
use bevy_terrain_mesh::prelude::*;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

pub const MANIFEST_FILE: &str = "mesh.ron";

/// A single mesh written by the preprocessor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MeshTile {
    /// The samples of the (downsampled) heightmap covered by this mesh.
    pub region: TileRegion,
    pub vertex_count: usize,
    pub index_count: usize,
}

impl MeshTile {
    pub fn vertex_path(&self, directory: &Path) -> PathBuf {
        directory.join(format!("{}.vertices", self.region))
    }

    pub fn index_path(&self, directory: &Path) -> PathBuf {
        directory.join(format!("{}.indices", self.region))
    }
}

/// Describes all meshes generated from one heightmap.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MeshManifest {
    pub source: PathBuf,
    pub config: TerrainMeshConfig,
    /// The size of the heightmap after downsampling.
    pub width: usize,
    pub height: usize,
    pub min_elevation: f32,
    pub max_elevation: f32,
    /// Whether the meshes carry vertex colors.
    pub colored: bool,
    pub tiles: Vec<MeshTile>,
}

impl MeshManifest {
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let encoded = fs::read_to_string(path)?;
        Ok(ron::from_str(&encoded)?)
    }

    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let encoded = ron::ser::to_string_pretty(self, PrettyConfig::default())?;
        fs::write(path, encoded)?;
        Ok(())
    }
}
