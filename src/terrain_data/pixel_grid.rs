use crate::{
    result::{TerrainMeshError, TerrainMeshResult},
    terrain_data::TileRegion,
};
use image::DynamicImage;
use ndarray::{s, Array2};

/// A grid of encoded color samples, as produced by decoding a heightmap or imagery tile.
///
/// The samples are stored row-major, `channels` bytes per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedPixelGrid {
    data: Vec<u8>,
    width: usize,
    height: usize,
    channels: usize,
}

impl EncodedPixelGrid {
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> TerrainMeshResult<Self> {
        // A `Vec` never holds `usize::MAX` bytes, so a saturated size never matches.
        let expected = width.saturating_mul(height).saturating_mul(channels);

        if data.len() != expected {
            return Err(TerrainMeshError::PixelBufferSize {
                expected,
                found: data.len(),
            });
        }

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// Keeps 8 bit RGB and RGBA images as they are, everything else is converted to RGBA.
    pub fn from_image(image: DynamicImage) -> Self {
        let (width, height) = (image.width() as usize, image.height() as usize);

        let (data, channels) = match image {
            DynamicImage::ImageRgb8(image) => (image.into_raw(), 3),
            DynamicImage::ImageRgba8(image) => (image.into_raw(), 4),
            image => (image.into_rgba8().into_raw(), 4),
        };

        Self {
            data,
            width,
            height,
            channels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The channel bytes of the pixel at the specified position.
    pub fn pixel(&self, x: usize, y: usize) -> &[u8] {
        let start = (x + y * self.width) * self.channels;
        &self.data[start..start + self.channels]
    }

    /// Iterates over the pixels in raster order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(self.channels.max(1))
    }
}

/// Per sample RGBA colors, used to tint a terrain mesh with imagery.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorGrid {
    colors: Array2<[f32; 4]>,
}

impl ColorGrid {
    /// Normalizes the first three channels of every pixel (and the fourth, if present).
    pub fn from_pixels(pixels: &EncodedPixelGrid) -> TerrainMeshResult<Self> {
        if pixels.channels() < 3 {
            return Err(TerrainMeshError::InvalidPixelFormat {
                channels: pixels.channels(),
            });
        }

        let normalize = |value: u8| value as f32 / u8::MAX as f32;

        let colors = Array2::from_shape_fn((pixels.height(), pixels.width()), |(y, x)| {
            let pixel = pixels.pixel(x, y);
            let alpha = pixel.get(3).copied().map_or(1.0, normalize);

            [
                normalize(pixel[0]),
                normalize(pixel[1]),
                normalize(pixel[2]),
                alpha,
            ]
        });

        Ok(Self { colors })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.colors.ncols()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.colors.nrows()
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    pub fn get(&self, x: usize, y: usize) -> [f32; 4] {
        self.colors[[y, x]]
    }

    /// Iterates over the colors in raster order.
    pub fn iter(&self) -> impl Iterator<Item = &[f32; 4]> {
        self.colors.iter()
    }

    pub fn downsample(&self, step: usize) -> Self {
        let step = step.max(1) as isize;

        Self {
            colors: self.colors.slice(s![..;step, ..;step]).to_owned(),
        }
    }

    pub fn region(&self, region: &TileRegion) -> Self {
        Self {
            colors: self
                .colors
                .slice(s![
                    region.y..region.y + region.height,
                    region.x..region.x + region.width
                ])
                .to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    #[test]
    fn buffer_size_is_validated() {
        assert!(EncodedPixelGrid::new(vec![0; 2 * 3 * 4], 2, 3, 4).is_ok());
        assert!(matches!(
            EncodedPixelGrid::new(vec![0; 10], 2, 2, 3),
            Err(TerrainMeshError::PixelBufferSize {
                expected: 12,
                found: 10
            })
        ));
        assert!(matches!(
            EncodedPixelGrid::new(vec![], usize::MAX / 2 + 1, 2, 3),
            Err(TerrainMeshError::PixelBufferSize {
                expected: usize::MAX,
                found: 0
            })
        ));
    }

    #[test]
    fn pixel_lookup_is_row_major() {
        let data = (0..2 * 3 * 3).map(|value| value as u8).collect();
        let pixels = EncodedPixelGrid::new(data, 2, 3, 3).unwrap();

        assert_eq!(pixels.pixel(0, 0), &[0, 1, 2]);
        assert_eq!(pixels.pixel(1, 0), &[3, 4, 5]);
        assert_eq!(pixels.pixel(0, 1), &[6, 7, 8]);
        assert_eq!(pixels.pixels().count(), 6);
    }

    #[test]
    fn from_image_keeps_or_extends_channels() {
        let rgb = EncodedPixelGrid::from_image(RgbImage::new(4, 2).into());
        assert_eq!((rgb.shape(), rgb.channels()), ((4, 2), 3));

        let rgba = EncodedPixelGrid::from_image(RgbaImage::new(4, 2).into());
        assert_eq!(rgba.channels(), 4);

        let gray = EncodedPixelGrid::from_image(GrayImage::new(3, 5).into());
        assert_eq!((gray.shape(), gray.channels()), ((3, 5), 4));
    }

    #[test]
    fn colors_are_normalized() {
        let pixels = EncodedPixelGrid::new(vec![255, 0, 51, 0, 255, 102], 2, 1, 3).unwrap();
        let colors = ColorGrid::from_pixels(&pixels).unwrap();

        assert_eq!(colors.shape(), (2, 1));
        assert_eq!(colors.get(0, 0), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(colors.get(1, 0), [0.0, 1.0, 0.4, 1.0]);

        let pixels = EncodedPixelGrid::new(vec![0, 0, 0, 0], 1, 1, 4).unwrap();
        assert_eq!(ColorGrid::from_pixels(&pixels).unwrap().get(0, 0)[3], 0.0);
    }

    #[test]
    fn colors_need_three_channels() {
        let pixels = EncodedPixelGrid::new(vec![0; 4], 2, 2, 1).unwrap();

        assert!(matches!(
            ColorGrid::from_pixels(&pixels),
            Err(TerrainMeshError::InvalidPixelFormat { channels: 1 })
        ));
    }
}
