//! Triangulation of elevation grids into indexed triangle meshes.
//!
//! Every grid sample becomes exactly one vertex at `(x, y, elevation)`, stored at the
//! raster index `x + y * width`. Each quad of four neighbouring samples is covered by
//! two triangles, which are always split along the diagonal from `(x, y)` to `(x + 1, y + 1)`:
//!
//! ```text
//! (x, y) ---- (x + 1, y)
//!    |  \   A    |
//!    |    \      |
//!    |  B   \    |
//! (x, y + 1) - (x + 1, y + 1)
//! ```
//!
//! Both triangles share the same winding, so the whole mesh faces the same direction.
//! The indices are 16 bit wide, which limits a single mesh to [`MAX_VERTEX_COUNT`] vertices.
//! Normals are not generated.

use crate::{
    result::{TerrainMeshError, TerrainMeshResult},
    terrain_data::{elevation_grid::ElevationGrid, ensure_shape, pixel_grid::ColorGrid},
};
use bevy::{
    log::trace,
    render::{
        mesh::{Indices, Mesh},
        render_asset::RenderAssetUsages,
        render_resource::PrimitiveTopology,
    },
};
use bytemuck::cast_slice;
use itertools::iproduct;

/// The maximum number of vertices addressable by a 16 bit index buffer.
pub const MAX_VERTEX_COUNT: usize = u16::MAX as usize;

/// Calculates the index of the vertex belonging to the grid sample at the specified position.
#[inline]
pub(crate) fn vertex_index(x: usize, y: usize, width: usize) -> u16 {
    let index = x + y * width;
    debug_assert!(index <= MAX_VERTEX_COUNT, "vertex index {index} exceeds u16");
    index as u16
}

/// An indexed triangle list with one vertex per grid sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    vertices: Vec<[f32; 3]>,
    indices: Vec<u16>,
    colors: Option<Vec<[f32; 4]>>,
}

impl TerrainMesh {
    /// The vertex positions `(x, y, elevation)` in raster order.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// The vertex indices, three per triangle.
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    /// The vertex colors, if the mesh was built with imagery.
    pub fn colors(&self) -> Option<&[[f32; 4]]> {
        self.colors.as_deref()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|triangle| [triangle[0], triangle[1], triangle[2]])
    }

    /// The vertex buffer as tightly packed `f32` triples.
    pub fn vertex_bytes(&self) -> &[u8] {
        cast_slice(&self.vertices)
    }

    /// The index buffer as tightly packed `u16` values.
    pub fn index_bytes(&self) -> &[u8] {
        cast_slice(&self.indices)
    }

    /// Converts the mesh into a Bevy triangle list with a 16 bit index buffer.
    ///
    /// The positions are kept as they are, so the elevation ends up on the z axis.
    pub fn to_bevy_mesh(&self) -> Mesh {
        self.clone().into()
    }
}

impl From<TerrainMesh> for Mesh {
    fn from(mesh: TerrainMesh) -> Self {
        let TerrainMesh {
            vertices,
            indices,
            colors,
        } = mesh;

        let mut bevy_mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, vertices)
        .with_inserted_indices(Indices::U16(indices));

        if let Some(colors) = colors {
            bevy_mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
        }

        bevy_mesh
    }
}

/// Builds a [`TerrainMesh`] from an [`ElevationGrid`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GridMeshBuilder<'a> {
    colors: Option<&'a ColorGrid>,
}

impl<'a> GridMeshBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tints every vertex with the color of its grid sample.
    /// The color grid has to match the shape of the elevation grid.
    pub fn with_colors(mut self, colors: &'a ColorGrid) -> Self {
        self.colors = Some(colors);
        self
    }

    pub fn build(&self, elevation: &ElevationGrid) -> TerrainMeshResult<TerrainMesh> {
        let (width, height) = elevation.shape();
        let vertex_count = width * height;

        if vertex_count > MAX_VERTEX_COUNT {
            return Err(TerrainMeshError::MeshTooLarge { vertex_count });
        }

        if let Some(colors) = self.colors {
            ensure_shape(elevation.shape(), colors.shape())?;
        }

        let vertices = iproduct!(0..height, 0..width)
            .map(|(y, x)| [x as f32, y as f32, elevation.get(x, y)])
            .collect();

        let quad_count = width.saturating_sub(1) * height.saturating_sub(1);
        let mut indices = Vec::with_capacity(6 * quad_count);

        for (y, x) in iproduct!(0..height.saturating_sub(1), 0..width.saturating_sub(1)) {
            let top_left = vertex_index(x, y, width);
            let top_right = vertex_index(x + 1, y, width);
            let bottom_left = vertex_index(x, y + 1, width);
            let bottom_right = vertex_index(x + 1, y + 1, width);

            indices.extend([top_left, top_right, bottom_right]);
            indices.extend([top_left, bottom_right, bottom_left]);
        }

        let colors = self
            .colors
            .map(|colors| colors.iter().copied().collect());

        trace!(
            "Built terrain mesh with {vertex_count} vertices and {} triangles.",
            2 * quad_count
        );

        Ok(TerrainMesh {
            vertices,
            indices,
            colors,
        })
    }
}

/// Builds an untinted mesh, see [`GridMeshBuilder::build`].
pub fn build_mesh(elevation: &ElevationGrid) -> TerrainMeshResult<TerrainMesh> {
    GridMeshBuilder::new().build(elevation)
}
