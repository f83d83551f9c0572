use crate::{
    cli::Cli,
    result::{PreprocessError, PreprocessResult},
};
use bevy_terrain_mesh::prelude::*;
use itertools::Itertools;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// A heightmap and the imagery that belongs to it.
#[derive(Clone, Debug)]
pub struct SourceTile {
    pub heightmap: PathBuf,
    pub imagery: Option<PathBuf>,
}

impl SourceTile {
    /// The name of the heightmap file without any extensions.
    pub(crate) fn name(&self) -> String {
        self.heightmap
            .file_name()
            .map(|name| name.to_string_lossy())
            .and_then(|name| name.split('.').next().map(str::to_string))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "terrain".to_string())
    }

    /// Loads and decodes the heightmap and attaches the imagery, if any.
    pub(crate) fn load(&self) -> PreprocessResult<TerrainTile> {
        let heightmap = EncodedPixelGrid::from_image(image::open(&self.heightmap)?);
        let mut tile = TerrainTile::from_pixels(&heightmap)?;

        if let Some(imagery) = &self.imagery {
            let imagery = EncodedPixelGrid::from_image(image::open(imagery)?);
            tile = tile.with_colors(&imagery)?;
        }

        Ok(tile)
    }
}

pub struct PreprocessContext {
    pub(crate) sources: Vec<SourceTile>,
    pub(crate) out_path: PathBuf,
    pub(crate) overwrite: bool,
    pub(crate) config: TerrainMeshConfig,
}

impl PreprocessContext {
    /// Fails if two heightmaps would be written into the same output directory.
    pub fn new(
        sources: Vec<SourceTile>,
        out_path: PathBuf,
        overwrite: bool,
        config: TerrainMeshConfig,
    ) -> PreprocessResult<Self> {
        let collision = sources
            .iter()
            .tuple_combinations()
            .find(|(first, second)| first.name() == second.name());

        if let Some((first, second)) = collision {
            return Err(PreprocessError::DuplicateName {
                name: first.name(),
                first: first.heightmap.clone(),
                second: second.heightmap.clone(),
            });
        }

        Ok(Self {
            sources,
            out_path,
            overwrite,
            config,
        })
    }

    pub fn from_cli(args: Cli) -> PreprocessResult<Self> {
        let Cli {
            src_path,
            out_path,
            imagery,
            config,
            step,
            tile_size,
            overwrite,
        } = args;

        if !imagery.is_empty() && imagery.len() != src_path.len() {
            return Err(PreprocessError::ImageryCount {
                sources: src_path.len(),
                imagery: imagery.len(),
            });
        }

        let mut config = match config {
            Some(path) => TerrainMeshConfig::load_file(path)?,
            None => TerrainMeshConfig::default(),
        };

        if let Some(step) = step {
            config.step = step;
        }
        if let Some(tile_size) = tile_size {
            config.tile_size = tile_size;
        }

        let mut imagery = imagery.into_iter();
        let sources = src_path
            .into_iter()
            .map(|heightmap| SourceTile {
                heightmap,
                imagery: imagery.next(),
            })
            .collect();

        Self::new(sources, out_path, overwrite, config)
    }
}

pub fn delete_directory(directory: &Path) -> io::Result<()> {
    match fs::remove_dir_all(directory) {
        Err(error) if error.kind() != io::ErrorKind::NotFound => Err(error),
        _ => Ok(()),
    }
}

pub fn clear_directory(directory: &Path) -> io::Result<()> {
    delete_directory(directory)?;
    fs::create_dir_all(directory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn name_strips_all_extensions() {
        let source = SourceTile {
            heightmap: PathBuf::from("tiles/alps_12_2140.height.png"),
            imagery: None,
        };
        assert_eq!(source.name(), "alps_12_2140");

        let source = SourceTile {
            heightmap: PathBuf::from(".png"),
            imagery: None,
        };
        assert_eq!(source.name(), "terrain");
    }

    #[test]
    fn cli_options_override_defaults() {
        let cli = Cli::parse_from(["btmp", "a.png", "b.png", "out", "-s", "3"]);
        let context = PreprocessContext::from_cli(cli).unwrap();

        assert_eq!(context.config.step, 3);
        assert_eq!(
            context.config.tile_size,
            TerrainMeshConfig::default().tile_size
        );
        assert_eq!(context.sources.len(), 2);
        assert!(context.sources.iter().all(|source| source.imagery.is_none()));
    }

    #[test]
    fn sources_need_distinct_names() {
        let cli = Cli::parse_from(["btmp", "a/peak.height.png", "b/peak.png", "out"]);

        match PreprocessContext::from_cli(cli) {
            Err(PreprocessError::DuplicateName {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "peak");
                assert_eq!(first, PathBuf::from("a/peak.height.png"));
                assert_eq!(second, PathBuf::from("b/peak.png"));
            }
            _ => panic!("expected the duplicate name to be rejected"),
        }

        let cli = Cli::parse_from(["btmp", "a/peak.png", "b/valley.png", "out"]);
        assert!(PreprocessContext::from_cli(cli).is_ok());
    }

    #[test]
    fn imagery_count_must_match() {
        let cli = Cli::parse_from(["btmp", "a.png", "b.png", "out", "-i", "a_rgb.png"]);

        assert!(matches!(
            PreprocessContext::from_cli(cli),
            Err(PreprocessError::ImageryCount {
                sources: 2,
                imagery: 1
            })
        ));
    }
}
