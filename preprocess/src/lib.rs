mod cli;
mod dataset;
mod manifest;
mod progress;
mod result;
mod split;

use crate::{
    cli::PreprocessBar,
    dataset::{clear_directory, SourceTile},
    manifest::{MeshManifest, MANIFEST_FILE},
    result::{PreprocessError, PreprocessResult},
    split::build_and_write,
};
use std::{fs, time::Instant};

pub mod prelude {
    pub use crate::{
        cli::Cli,
        dataset::{PreprocessContext, SourceTile},
        manifest::{MeshManifest, MeshTile, MANIFEST_FILE},
        preprocess,
        result::{PreprocessError, PreprocessResult},
    };
}

fn preprocess_source(
    source: &SourceTile,
    context: &prelude::PreprocessContext,
) -> PreprocessResult<MeshManifest> {
    let directory = context.out_path.join(source.name());
    let manifest_path = directory.join(MANIFEST_FILE);

    if context.overwrite {
        clear_directory(&directory)?;
    } else if manifest_path.exists() {
        return Err(PreprocessError::OutputExists(directory));
    } else {
        fs::create_dir_all(&directory)?;
    }

    let tile = source.load()?.downsample(context.config.step);
    let tiles = tile.split(context.config.tile_size);

    let progress_bar = PreprocessBar::new(format!("Meshing {}", source.name()));
    let mesh_tiles = build_and_write(&tiles, &directory, Some(progress_bar.callback()))?;
    progress_bar.finish();

    let (min_elevation, max_elevation) = tile.elevation().min_max().unwrap_or_default();

    let manifest = MeshManifest {
        source: source.heightmap.clone(),
        config: context.config.clone(),
        width: tile.elevation().width(),
        height: tile.elevation().height(),
        min_elevation,
        max_elevation,
        colored: tile.colors().is_some(),
        tiles: mesh_tiles,
    };

    manifest.save_file(&manifest_path)?;

    Ok(manifest)
}

/// Converts every heightmap of the context into meshes and returns their manifests.
pub fn preprocess(context: &prelude::PreprocessContext) -> PreprocessResult<Vec<MeshManifest>> {
    let start_preprocessing = Instant::now();

    let manifests = context
        .sources
        .iter()
        .map(|source| preprocess_source(source, context))
        .collect::<PreprocessResult<Vec<_>>>()?;

    println!("Preprocessing took: {:?}", start_preprocessing.elapsed());

    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use bevy_terrain_mesh::prelude::*;
    use image::{Rgb, RgbImage};
    use std::{
        fs,
        path::{Path, PathBuf},
    };

    fn temp_directory(name: &str) -> PathBuf {
        let directory = std::env::temp_dir().join(format!(
            "bevy_terrain_mesh_preprocess_{name}_{}",
            std::process::id()
        ));
        crate::dataset::clear_directory(&directory).unwrap();
        directory
    }

    fn write_heightmap(directory: &Path, width: u32, height: u32) -> PathBuf {
        let path = directory.join("peak.height.png");
        RgbImage::from_fn(width, height, |x, y| {
            Rgb(encode_elevation((x * 2 + y) as f32))
        })
        .save(&path)
        .unwrap();
        path
    }

    #[test]
    fn heightmap_is_split_into_meshes() {
        let directory = temp_directory("split");
        let heightmap = write_heightmap(&directory, 300, 20);
        let out_path = directory.join("out");

        let context = PreprocessContext::new(
            vec![SourceTile {
                heightmap: heightmap.clone(),
                imagery: None,
            }],
            out_path.clone(),
            false,
            TerrainMeshConfig {
                step: 1,
                tile_size: 128,
            },
        )
        .unwrap();

        let manifests = preprocess(&context).unwrap();
        let manifest = &manifests[0];

        assert_eq!((manifest.width, manifest.height), (300, 20));
        assert_eq!(manifest.min_elevation, 0.0);
        assert_eq!(manifest.max_elevation, 299.0 * 2.0 + 19.0);
        assert_eq!(manifest.tiles.len(), 3);
        assert!(!manifest.colored);

        let mesh_directory = out_path.join("peak");
        let loaded = MeshManifest::load_file(mesh_directory.join(MANIFEST_FILE)).unwrap();
        assert_eq!(&loaded, manifest);

        for tile in &manifest.tiles {
            let vertices = fs::read(tile.vertex_path(&mesh_directory)).unwrap();
            let indices = fs::read(tile.index_path(&mesh_directory)).unwrap();

            assert_eq!(tile.vertex_count, tile.region.width * tile.region.height);
            assert_eq!(vertices.len(), tile.vertex_count * 3 * 4);
            assert_eq!(indices.len(), tile.index_count * 2);
        }

        assert!(matches!(
            preprocess(&context),
            Err(PreprocessError::OutputExists(_))
        ));

        fs::remove_dir_all(&directory).unwrap();
    }

    #[test]
    fn imagery_tints_meshes() {
        let directory = temp_directory("imagery");
        let heightmap = write_heightmap(&directory, 16, 16);

        let imagery = directory.join("peak.rgb.png");
        RgbImage::from_pixel(16, 16, Rgb([10, 200, 30]))
            .save(&imagery)
            .unwrap();

        let mismatched = directory.join("small.rgb.png");
        RgbImage::new(8, 16).save(&mismatched).unwrap();

        let context = |imagery: &PathBuf| {
            PreprocessContext::new(
                vec![SourceTile {
                    heightmap: heightmap.clone(),
                    imagery: Some(imagery.clone()),
                }],
                directory.join("out"),
                true,
                TerrainMeshConfig::default(),
            )
            .unwrap()
        };

        let manifests = preprocess(&context(&imagery)).unwrap();
        assert!(manifests[0].colored);
        assert_eq!(manifests[0].tiles.len(), 1);

        assert!(matches!(
            preprocess(&context(&mismatched)),
            Err(PreprocessError::TerrainMesh(
                TerrainMeshError::DimensionMismatch { .. }
            ))
        ));

        fs::remove_dir_all(&directory).unwrap();
    }
}
