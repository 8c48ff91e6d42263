//! Core types for in-memory image buffers.

use std::fmt;
use std::ops::Range;

use ndarray::{ArrayD, Axis, Slice};
use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Memory layout of an image buffer.
///
/// The layout decides which two axes are spatial. It is carried by every
/// buffer, so operations never have to guess it from the element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Array-like `(H, W)` or `(H, W, C)`; spatial axes lead.
    #[default]
    Array,
    /// Tensor-like `(C, H, W)` or `(N, C, H, W)`; spatial axes trail.
    Tensor,
}

impl Layout {
    /// Returns the `(height, width)` axis indices for a buffer with `ndim`
    /// dimensions, or `None` if the layout does not support that rank.
    pub fn spatial_axes(self, ndim: usize) -> Option<(usize, usize)> {
        match (self, ndim) {
            (Layout::Array, 2 | 3) => Some((0, 1)),
            (Layout::Tensor, 3 | 4) => Some((ndim - 2, ndim - 1)),
            _ => None,
        }
    }

    /// Human-readable list of supported ranks, used in error messages.
    pub fn supported_ndim(self) -> &'static str {
        match self {
            Layout::Array => "2 or 3",
            Layout::Tensor => "3 or 4",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Array => f.write_str("array"),
            Layout::Tensor => f.write_str("tensor"),
        }
    }
}

/// A square crop region in a buffer's own coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRect {
    /// First row of the region.
    pub top: usize,
    /// First column of the region.
    pub left: usize,
    /// Side length of the region in pixels.
    pub size: usize,
}

impl CropRect {
    pub fn new(top: usize, left: usize, size: usize) -> Self {
        Self { top, left, size }
    }

    /// Maps an LQ-space rectangle into GT space, or `None` on overflow.
    #[inline]
    pub fn scaled(self, scale: usize) -> Option<Self> {
        Some(Self {
            top: self.top.checked_mul(scale)?,
            left: self.left.checked_mul(scale)?,
            size: self.size.checked_mul(scale)?,
        })
    }

    /// One past the last row.
    #[inline]
    pub fn bottom(&self) -> usize {
        self.top.saturating_add(self.size)
    }

    /// One past the last column.
    #[inline]
    pub fn right(&self) -> usize {
        self.left.saturating_add(self.size)
    }

    /// Whether the rectangle lies inside a `height x width` image.
    #[inline]
    pub fn fits_within(&self, height: usize, width: usize) -> bool {
        self.bottom() <= height && self.right() <= width
    }
}

/// An image buffer: pixel data plus its layout tag.
///
/// Construction never fails; the rank is checked by each operation through
/// [`ImageBuffer::spatial_axes`], so a malformed buffer is reported where it
/// is used rather than where it is wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer<T> {
    data: ArrayD<T>,
    layout: Layout,
}

impl<T> ImageBuffer<T> {
    pub fn new(data: ArrayD<T>, layout: Layout) -> Self {
        Self { data, layout }
    }

    /// Wraps an array-like `(H, W[, C])` buffer.
    pub fn array(data: ArrayD<T>) -> Self {
        Self::new(data, Layout::Array)
    }

    /// Wraps a tensor-like `([N,] C, H, W)` buffer.
    pub fn tensor(data: ArrayD<T>) -> Self {
        Self::new(data, Layout::Tensor)
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn data(&self) -> &ArrayD<T> {
        &self.data
    }

    pub fn into_data(self) -> ArrayD<T> {
        self.data
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn ndim(&self) -> usize {
        self.data.ndim()
    }

    /// Returns the `(height, width)` axis indices for this buffer.
    pub fn spatial_axes(&self) -> Result<(usize, usize), TransformError> {
        self.layout
            .spatial_axes(self.ndim())
            .ok_or(TransformError::InvalidShape {
                layout: self.layout,
                ndim: self.ndim(),
            })
    }

    /// Returns `(height, width)` in pixels.
    pub fn spatial_shape(&self) -> Result<(usize, usize), TransformError> {
        let (h_axis, w_axis) = self.spatial_axes()?;
        let shape = self.data.shape();
        Ok((shape[h_axis], shape[w_axis]))
    }
}

impl<T: Clone> ImageBuffer<T> {
    /// Extracts a square region, keeping every non-spatial axis whole.
    pub fn crop(&self, rect: CropRect) -> Result<Self, TransformError> {
        self.crop_region(
            rect.top..rect.bottom(),
            rect.left..rect.right(),
        )
    }

    /// Extracts the rows and columns given, keeping every non-spatial axis
    /// whole. The result is an owned copy; `self` is left untouched.
    pub fn crop_region(
        &self,
        rows: Range<usize>,
        cols: Range<usize>,
    ) -> Result<Self, TransformError> {
        let (h_axis, w_axis) = self.spatial_axes()?;
        let (height, width) = self.spatial_shape()?;

        if rows.start > rows.end || cols.start > cols.end || rows.end > height || cols.end > width
        {
            return Err(TransformError::CropOutOfBounds {
                top: rows.start,
                left: cols.start,
                height: rows.end.saturating_sub(rows.start),
                width: cols.end.saturating_sub(cols.start),
                image_height: height,
                image_width: width,
            });
        }

        let data = self
            .data
            .view()
            .slice_axis_move(Axis(h_axis), Slice::from(rows))
            .slice_axis_move(Axis(w_axis), Slice::from(cols))
            .to_owned();

        Ok(Self {
            data,
            layout: self.layout,
        })
    }

    /// Mirrors the buffer along its width axis.
    pub fn flip_horizontal(self) -> Result<Self, TransformError> {
        let (_, w_axis) = self.spatial_axes()?;
        Ok(self.reshuffle(|data| data.invert_axis(Axis(w_axis))))
    }

    /// Mirrors the buffer along its height axis.
    pub fn flip_vertical(self) -> Result<Self, TransformError> {
        let (h_axis, _) = self.spatial_axes()?;
        Ok(self.reshuffle(|data| data.invert_axis(Axis(h_axis))))
    }

    /// Swaps the height and width axes. Channel axes keep their position.
    pub fn transpose_spatial(self) -> Result<Self, TransformError> {
        let (h_axis, w_axis) = self.spatial_axes()?;
        Ok(self.reshuffle(|data| data.swap_axes(h_axis, w_axis)))
    }

    /// Applies a stride-only change and copies back into standard layout so
    /// callers can always rely on contiguous row-major data.
    fn reshuffle(self, f: impl FnOnce(&mut ArrayD<T>)) -> Self {
        let mut data = self.data;
        f(&mut data);
        let data = if data.is_standard_layout() {
            data
        } else {
            data.as_standard_layout().into_owned()
        };
        Self {
            data,
            layout: self.layout,
        }
    }
}
