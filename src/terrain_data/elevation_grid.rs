use crate::{
    result::{TerrainMeshError, TerrainMeshResult},
    terrain_data::TileRegion,
};
use ndarray::{s, Array2};

/// A grid of elevation samples in meters.
///
/// The samples are stored row-major with the shape `(height, width)`,
/// so the sample at `(x, y)` lives at index `x + y * width` of [`Self::as_slice`].
#[derive(Clone, Debug, PartialEq)]
pub struct ElevationGrid {
    samples: Array2<f32>,
}

impl ElevationGrid {
    /// Creates a grid from row-major samples.
    pub fn from_samples(samples: Vec<f32>, width: usize, height: usize) -> TerrainMeshResult<Self> {
        let found = samples.len();

        let samples = Array2::from_shape_vec((height, width), samples).map_err(|_| {
            TerrainMeshError::PixelBufferSize {
                expected: width.saturating_mul(height),
                found,
            }
        })?;

        Ok(Self { samples })
    }

    pub fn from_elem(width: usize, height: usize, elevation: f32) -> Self {
        Self {
            samples: Array2::from_elem((height, width), elevation),
        }
    }

    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        Self {
            samples: Array2::from_shape_fn((height, width), |(y, x)| f(x, y)),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.samples.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.samples.nrows()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.samples[[y, x]]
    }

    /// The samples in raster order.
    pub fn as_slice(&self) -> &[f32] {
        // grids are only ever created in standard layout
        self.samples.as_slice().unwrap_or_default()
    }

    /// Iterates over the samples in raster order.
    pub fn iter(&self) -> impl Iterator<Item = &f32> {
        self.samples.iter()
    }

    /// The lowest and highest elevation of the grid, or `None` if it is empty.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        self.samples.iter().fold(None, |range, &elevation| {
            Some(match range {
                None => (elevation, elevation),
                Some((min, max)) => (min.min(elevation), max.max(elevation)),
            })
        })
    }

    /// Keeps every `step`-th sample along both axes, starting with the first one.
    pub fn downsample(&self, step: usize) -> Self {
        let step = step.max(1) as isize;

        Self {
            samples: self.samples.slice(s![..;step, ..;step]).to_owned(),
        }
    }

    /// Copies the samples covered by the region.
    pub fn region(&self, region: &TileRegion) -> Self {
        Self {
            samples: self
                .samples
                .slice(s![
                    region.y..region.y + region.height,
                    region.x..region.x + region.width
                ])
                .to_owned(),
        }
    }
}
