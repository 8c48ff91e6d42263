//! Conversions between `image` crate buffers and [`ImageBuffer`].
//!
//! Decoding stays with the caller; these helpers only move pixels that are
//! already in memory into the array-like `(H, W[, C])` layout.

use image::{GrayImage, Rgb, RgbImage};
use ndarray::{Array2, Array3};

use super::types::{ImageBuffer, Layout};
use crate::error::TransformError;

impl ImageBuffer<u8> {
    /// Copies an RGB image into an `(H, W, 3)` array-like buffer.
    pub fn from_rgb8(image: &RgbImage) -> Self {
        let (width, height) = image.dimensions();
        let data = Array3::from_shape_fn((height as usize, width as usize, 3), |(y, x, c)| {
            image.get_pixel(x as u32, y as u32)[c]
        });
        Self::array(data.into_dyn())
    }

    /// Copies a grayscale image into an `(H, W)` array-like buffer.
    pub fn from_luma8(image: &GrayImage) -> Self {
        let (width, height) = image.dimensions();
        let data = Array2::from_shape_fn((height as usize, width as usize), |(y, x)| {
            image.get_pixel(x as u32, y as u32)[0]
        });
        Self::array(data.into_dyn())
    }

    /// Copies an `(H, W, 3)` array-like buffer back into an RGB image.
    pub fn to_rgb8(&self) -> Result<RgbImage, TransformError> {
        if self.layout() != Layout::Array || self.ndim() != 3 {
            return Err(TransformError::InvalidShape {
                layout: self.layout(),
                ndim: self.ndim(),
            });
        }
        let channels = self.shape()[2];
        if channels != 3 {
            return Err(TransformError::ChannelMismatch {
                expected: 3,
                actual: channels,
            });
        }

        let (height, width) = self.spatial_shape()?;
        let data = self.data();
        Ok(RgbImage::from_fn(width as u32, height as u32, |x, y| {
            let (x, y) = (x as usize, y as usize);
            Rgb([data[[y, x, 0]], data[[y, x, 1]], data[[y, x, 2]]])
        }))
    }
}
