//! The terrain-RGB elevation encoding.
//!
//! Each pixel stores its elevation as a 24 bit integer spread over the red, green and blue
//! channel (most significant byte first). The integer counts 0.1 m steps above -10000 m:
//!
//! `elevation = -10000 + (r * 256 * 256 + g * 256 + b) * 0.1`
//!
//! The encodable range is `-10000.0..=1667721.5` meters. Values are decoded as is,
//! implausible elevations are not clamped or rejected.

use crate::{
    result::{TerrainMeshError, TerrainMeshResult},
    terrain_data::{elevation_grid::ElevationGrid, pixel_grid::EncodedPixelGrid},
};
use bevy::log::debug;
use rayon::prelude::*;

/// The elevation encoded by `(0, 0, 0)`.
pub const ELEVATION_OFFSET: f64 = -10000.0;
/// The elevation difference between two consecutive encoded values.
pub const ELEVATION_INTERVAL: f64 = 0.1;
/// The largest encodable value.
pub const MAX_ENCODED_VALUE: u32 = 0xFF_FFFF;

#[inline]
fn combine(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Decodes the elevation in meters of a single pixel.
#[inline]
pub fn decode_pixel(r: u8, g: u8, b: u8) -> f32 {
    (ELEVATION_OFFSET + combine(r, g, b) as f64 * ELEVATION_INTERVAL) as f32
}

/// Encodes an elevation in meters, rounded to the closest representable value.
/// Elevations outside of the encodable range are clamped.
pub fn encode_elevation(elevation: f32) -> [u8; 3] {
    let value = ((elevation as f64 - ELEVATION_OFFSET) / ELEVATION_INTERVAL)
        .round()
        .clamp(0.0, MAX_ENCODED_VALUE as f64) as u32;

    [(value >> 16) as u8, (value >> 8) as u8, value as u8]
}

/// Decodes every pixel of a terrain-RGB tile into its elevation.
///
/// Only the first three channels are read, any further channels (alpha) are ignored.
pub fn decode_elevation(pixels: &EncodedPixelGrid) -> TerrainMeshResult<ElevationGrid> {
    let channels = pixels.channels();

    if channels < 3 {
        return Err(TerrainMeshError::InvalidPixelFormat { channels });
    }

    let samples = pixels
        .data()
        .par_chunks_exact(channels)
        .map(|pixel| decode_pixel(pixel[0], pixel[1], pixel[2]))
        .collect();

    debug!(
        "Decoded terrain-RGB tile of {}x{} pixels.",
        pixels.width(),
        pixels.height()
    );

    ElevationGrid::from_samples(samples, pixels.width(), pixels.height())
}
