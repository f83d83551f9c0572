use crate::{
    formats::terrain_rgb::decode_elevation,
    mesh::{GridMeshBuilder, TerrainMesh},
    result::TerrainMeshResult,
    terrain_data::{
        elevation_grid::ElevationGrid,
        ensure_shape,
        pixel_grid::{ColorGrid, EncodedPixelGrid},
        split_tiles, TileRegion,
    },
};

/// Makes sure the imagery covers exactly the same samples as the elevation grid.
///
/// Fails with [`DimensionMismatch`](crate::result::TerrainMeshError::DimensionMismatch)
/// otherwise, in which case the two grids must not be combined into a mesh.
pub fn ensure_aligned(elevation: &ElevationGrid, colors: &ColorGrid) -> TerrainMeshResult<()> {
    ensure_shape(elevation.shape(), colors.shape())
}

/// A decoded heightmap tile, optionally paired with aligned imagery.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainTile {
    elevation: ElevationGrid,
    colors: Option<ColorGrid>,
}

impl TerrainTile {
    pub fn new(elevation: ElevationGrid) -> Self {
        Self {
            elevation,
            colors: None,
        }
    }

    /// Decodes a terrain-RGB heightmap.
    pub fn from_pixels(heightmap: &EncodedPixelGrid) -> TerrainMeshResult<Self> {
        Ok(Self::new(decode_elevation(heightmap)?))
    }

    /// Attaches imagery, which has to have the same size as the heightmap.
    pub fn with_colors(self, imagery: &EncodedPixelGrid) -> TerrainMeshResult<Self> {
        let colors = ColorGrid::from_pixels(imagery)?;
        self.with_color_grid(colors)
    }

    pub fn with_color_grid(mut self, colors: ColorGrid) -> TerrainMeshResult<Self> {
        ensure_aligned(&self.elevation, &colors)?;
        self.colors = Some(colors);
        Ok(self)
    }

    pub fn elevation(&self) -> &ElevationGrid {
        &self.elevation
    }

    pub fn colors(&self) -> Option<&ColorGrid> {
        self.colors.as_ref()
    }

    /// Keeps every `step`-th sample of the elevation and the imagery.
    pub fn downsample(&self, step: usize) -> Self {
        Self {
            elevation: self.elevation.downsample(step),
            colors: self.colors.as_ref().map(|colors| colors.downsample(step)),
        }
    }

    /// Splits the tile into smaller tiles, which share their border samples.
    pub fn split(&self, tile_size: usize) -> Vec<(TileRegion, TerrainTile)> {
        split_tiles(self.elevation.width(), self.elevation.height(), tile_size)
            .into_iter()
            .map(|region| (region, self.region(&region)))
            .collect()
    }

    pub fn region(&self, region: &TileRegion) -> Self {
        Self {
            elevation: self.elevation.region(region),
            colors: self.colors.as_ref().map(|colors| colors.region(region)),
        }
    }

    /// Triangulates the tile, tinting the mesh with the imagery if present.
    pub fn build_mesh(&self) -> TerrainMeshResult<TerrainMesh> {
        let mut builder = GridMeshBuilder::new();

        if let Some(colors) = &self.colors {
            builder = builder.with_colors(colors);
        }

        builder.build(&self.elevation)
    }
}
