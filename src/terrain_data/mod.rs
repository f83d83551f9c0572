//! This module contains the grid data structures the mesh pipeline operates on:
//! the raw [`EncodedPixelGrid`](pixel_grid::EncodedPixelGrid) as it comes out of an
//! image decoder, the [`ElevationGrid`](elevation_grid::ElevationGrid) produced by
//! decoding it and the [`ColorGrid`](pixel_grid::ColorGrid) used to tint a mesh.
//!
//! # Tiling
//! A single mesh can address at most [`MAX_VERTEX_COUNT`](crate::mesh::MAX_VERTEX_COUNT)
//! vertices. Larger grids are either downsampled or split into [`TileRegion`]s.
//! Neighbouring regions share their border row/column, so the resulting meshes
//! line up without gaps.

pub mod elevation_grid;
pub mod pixel_grid;

use crate::result::{TerrainMeshError, TerrainMeshResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The largest tile side length, such that a full tile still fits into a 16 bit index buffer.
pub const MAX_TILE_SIZE: usize = 255;

/// A rectangular section of a grid, measured in samples.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileRegion {
    /// The x position of the first sample.
    pub x: usize,
    /// The y position of the first sample.
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

impl TileRegion {
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

impl fmt::Display for TileRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}_{}", self.x, self.y)
    }
}

/// Returns the start and length of the tiles along one axis.
/// Consecutive tiles overlap by one sample.
fn tile_spans(length: usize, tile_size: usize) -> Vec<(usize, usize)> {
    if length <= 1 {
        return vec![(0, length)];
    }

    let stride = tile_size - 1;

    (0..length - 1)
        .step_by(stride)
        .map(|start| (start, tile_size.min(length - start)))
        .collect()
}

/// Splits a `width` x `height` grid into regions of at most `tile_size` x `tile_size` samples.
///
/// The `tile_size` is clamped to `2..=MAX_TILE_SIZE`.
/// Regions are returned in row-major order.
pub fn split_tiles(width: usize, height: usize, tile_size: usize) -> Vec<TileRegion> {
    let tile_size = tile_size.clamp(2, MAX_TILE_SIZE);

    let columns = tile_spans(width, tile_size);
    let rows = tile_spans(height, tile_size);

    itertools::iproduct!(rows, columns)
        .map(|((y, tile_height), (x, tile_width))| TileRegion::new(x, y, tile_width, tile_height))
        .collect()
}

/// Makes sure two grids, which are meant to be combined, cover the same samples.
pub(crate) fn ensure_shape(
    expected: (usize, usize),
    found: (usize, usize),
) -> TerrainMeshResult<()> {
    if expected != found {
        return Err(TerrainMeshError::DimensionMismatch { expected, found });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_cover_grid_with_shared_borders() {
        let (width, height) = (600, 300);
        let tiles = split_tiles(width, height, 256);

        assert_eq!(tiles.len(), 3 * 2);

        for (x, y) in itertools::iproduct!(0..width, 0..height) {
            assert!(tiles.iter().any(|tile| tile.contains(x, y)), "({x}, {y})");
        }

        assert_eq!(tiles[0], TileRegion::new(0, 0, 255, 255));
        assert_eq!(tiles[1], TileRegion::new(254, 0, 255, 255));
        assert_eq!(tiles[2], TileRegion::new(508, 0, 92, 255));
        assert_eq!(tiles[3], TileRegion::new(0, 254, 255, 46));
    }

    #[test]
    fn tiles_have_at_least_two_samples() {
        for length in 2..40 {
            for tile in split_tiles(length, length, 5) {
                assert!(tile.width >= 2 && tile.height >= 2);
                assert!(tile.x + tile.width <= length);
            }
        }
    }

    #[test]
    fn degenerate_grids() {
        assert_eq!(split_tiles(1, 1, 16), vec![TileRegion::new(0, 0, 1, 1)]);
        assert_eq!(split_tiles(0, 4, 16), vec![TileRegion::new(0, 0, 0, 4)]);
        assert_eq!(split_tiles(2, 2, 0), vec![TileRegion::new(0, 0, 2, 2)]);
    }

    #[test]
    fn shape_mismatch() {
        assert!(ensure_shape((3, 4), (3, 4)).is_ok());
        assert!(matches!(
            ensure_shape((3, 4), (4, 3)),
            Err(TerrainMeshError::DimensionMismatch {
                expected: (3, 4),
                found: (4, 3)
            })
        ));
    }
}
