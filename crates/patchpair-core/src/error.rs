//! Error types for buffer transforms.

use thiserror::Error;

use crate::buffer::Layout;

/// Error types for crop and augmentation operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// The buffer's dimensionality is not supported by its layout.
    #[error("Wrong image ndim: {ndim} ({layout} layout expects {})", .layout.supported_ndim())]
    InvalidShape { layout: Layout, ndim: usize },

    /// A size or scale argument was zero.
    #[error("{name} must be positive (got {value})")]
    InvalidParameter { name: &'static str, value: usize },

    /// A sequence group was passed with no buffers in it.
    #[error("Image group is empty")]
    EmptyGroup,

    /// A crop rectangle reaches outside the buffer.
    #[error(
        "Crop region at ({top}, {left}) of size {height}x{width} exceeds image ({image_height}, {image_width})"
    )]
    CropOutOfBounds {
        top: usize,
        left: usize,
        height: usize,
        width: usize,
        image_height: usize,
        image_width: usize,
    },

    /// The buffer does not carry the channel count a conversion needs.
    #[error("Expected {expected} channels, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// The GT/LQ pair failed validation.
    #[error(transparent)]
    ShapeValidation(#[from] ShapeValidationError),
}

/// Data-integrity failures of a GT/LQ pair.
///
/// These never occur with a correctly prepared dataset. They are reported
/// with the offending dimensions and the sample's source id, and it is up to
/// the caller whether to abort the run or skip the sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeValidationError {
    /// GT spatial size is not exactly `scale` times the LQ spatial size.
    #[error(
        "Scale mismatches. GT ({gt_height}, {gt_width}) is not {scale}x of LQ ({lq_height}, {lq_width}). Fix {}.",
        source_label(.source_id)
    )]
    ScaleMismatch {
        gt_height: usize,
        gt_width: usize,
        lq_height: usize,
        lq_width: usize,
        scale: usize,
        source_id: Option<String>,
    },

    /// The LQ image is smaller than the requested patch.
    #[error(
        "LQ ({lq_height}, {lq_width}) is smaller than patch size ({patch_size}, {patch_size}). Fix {}.",
        source_label(.source_id)
    )]
    PatchTooLarge {
        lq_height: usize,
        lq_width: usize,
        patch_size: usize,
        source_id: Option<String>,
    },

    /// GT and LQ buffers disagree on their memory layout.
    #[error("GT uses {gt} layout but LQ uses {lq} layout. Fix {}.", source_label(.source_id))]
    LayoutMismatch {
        gt: Layout,
        lq: Layout,
        source_id: Option<String>,
    },
}

impl ShapeValidationError {
    /// The source id attached to the failing sample, if any.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            ShapeValidationError::ScaleMismatch { source_id, .. }
            | ShapeValidationError::PatchTooLarge { source_id, .. }
            | ShapeValidationError::LayoutMismatch { source_id, .. } => source_id.as_deref(),
        }
    }
}

fn source_label(source_id: &Option<String>) -> &str {
    source_id.as_deref().unwrap_or("<unknown source>")
}
