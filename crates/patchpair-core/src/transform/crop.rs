//! Paired random cropping of GT/LQ images.
//!
//! One crop origin is sampled in LQ space and mapped into GT space by the
//! scale factor, so every LQ patch lines up with its GT patch pixel for
//! pixel.
//!
//! # Alignment
//!
//! The sampled LQ origin is floored to a multiple of [`CROP_ALIGNMENT`].
//! Patches then start on block boundaries, which suits downstream
//! convolution kernels. The flooring biases origins toward the top-left; that
//! is expected.

use rand::Rng;
use tracing::{debug, error};

use crate::buffer::{CropRect, ImageBuffer};
use crate::error::{ShapeValidationError, TransformError};
use crate::group::Group;

/// LQ crop origins are multiples of this many pixels.
pub const CROP_ALIGNMENT: usize = 16;

/// Crop GT and LQ groups at one shared random location.
///
/// The layout is taken from the first GT buffer, and spatial dimensions are
/// read from the first buffer of each group. Every LQ buffer is cropped to
/// `lq_patch_size` square at the sampled origin; every GT buffer is cropped
/// to `lq_patch_size * scale` square at the origin times `scale`.
///
/// Each group comes back in the shape it was passed in.
///
/// # Arguments
///
/// * `gt` - Ground-truth buffers
/// * `lq` - Low-quality buffers
/// * `lq_patch_size` - Patch side length in LQ pixels
/// * `scale` - GT/LQ resolution ratio
/// * `source_id` - Label for diagnostics, typically the GT file path
/// * `rng` - Random source; drawn from exactly twice
///
/// # Errors
///
/// - [`ShapeValidationError::ScaleMismatch`] if GT is not exactly `scale`
///   times LQ in both dimensions
/// - [`ShapeValidationError::PatchTooLarge`] if LQ is smaller than the patch
/// - [`ShapeValidationError::LayoutMismatch`] if GT and LQ layouts differ
/// - [`TransformError::EmptyGroup`], [`TransformError::InvalidShape`] or
///   [`TransformError::InvalidParameter`] for malformed arguments
///
/// Validation failures are logged at error level before being returned.
pub fn paired_random_crop<T: Clone, R: Rng + ?Sized>(
    gt: Group<ImageBuffer<T>>,
    lq: Group<ImageBuffer<T>>,
    lq_patch_size: usize,
    scale: usize,
    source_id: Option<&str>,
    rng: &mut R,
) -> Result<(Group<ImageBuffer<T>>, Group<ImageBuffer<T>>), TransformError> {
    let (gt, lq, _) = paired_random_crop_with_rect(gt, lq, lq_patch_size, scale, source_id, rng)?;
    Ok((gt, lq))
}

/// Same as [`paired_random_crop`], also returning the LQ-space rectangle.
pub fn paired_random_crop_with_rect<T: Clone, R: Rng + ?Sized>(
    gt: Group<ImageBuffer<T>>,
    lq: Group<ImageBuffer<T>>,
    lq_patch_size: usize,
    scale: usize,
    source_id: Option<&str>,
    rng: &mut R,
) -> Result<(Group<ImageBuffer<T>>, Group<ImageBuffer<T>>, CropRect), TransformError> {
    check_positive("lq_patch_size", lq_patch_size)?;
    check_positive("scale", scale)?;

    let gt_first = gt.require_first()?;
    let lq_first = lq.require_first()?;

    let layout = gt_first.layout();
    if lq_first.layout() != layout {
        let err = ShapeValidationError::LayoutMismatch {
            gt: layout,
            lq: lq_first.layout(),
            source_id: source_id.map(str::to_owned),
        };
        error!(source_id = source_id.unwrap_or("-"), "{err}");
        return Err(err.into());
    }

    let (gt_height, gt_width) = gt_first.spatial_shape()?;
    let (lq_height, lq_width) = lq_first.spatial_shape()?;

    if let Err(err) = validate_pair_shape(
        (gt_height, gt_width),
        (lq_height, lq_width),
        lq_patch_size,
        scale,
        source_id,
    ) {
        error!(
            gt_height,
            gt_width,
            lq_height,
            lq_width,
            lq_patch_size,
            scale,
            source_id = source_id.unwrap_or("-"),
            "{err}"
        );
        return Err(err.into());
    }

    let rect = sample_crop_origin(lq_height, lq_width, lq_patch_size, rng);
    debug!(
        top = rect.top,
        left = rect.left,
        size = rect.size,
        scale,
        %layout,
        "sampled paired crop"
    );

    let (gt, lq) = crop_pair_at(gt, lq, rect, scale)?;
    Ok((gt, lq, rect))
}

/// Crop GT and LQ groups at a known LQ-space rectangle.
///
/// The GT rectangle is `rect` scaled by `scale`. No shape validation is
/// performed beyond the bounds check of each crop.
///
/// # Errors
///
/// - [`TransformError::InvalidParameter`] if `scale` is zero or the scaled
///   rectangle overflows
/// - [`TransformError::CropOutOfBounds`] if either crop leaves its image
pub fn crop_pair_at<T: Clone>(
    gt: Group<ImageBuffer<T>>,
    lq: Group<ImageBuffer<T>>,
    rect: CropRect,
    scale: usize,
) -> Result<(Group<ImageBuffer<T>>, Group<ImageBuffer<T>>), TransformError> {
    check_positive("scale", scale)?;
    let gt_rect = rect.scaled(scale).ok_or(TransformError::InvalidParameter {
        name: "scale",
        value: scale,
    })?;
    let lq = lq.try_map(|img| img.crop(rect))?;
    let gt = gt.try_map(|img| img.crop(gt_rect))?;
    Ok((gt, lq))
}

/// Check that a GT/LQ pair can be cropped at `lq_patch_size`.
///
/// Shapes are `(height, width)`.
pub fn validate_pair_shape(
    gt_shape: (usize, usize),
    lq_shape: (usize, usize),
    lq_patch_size: usize,
    scale: usize,
    source_id: Option<&str>,
) -> Result<(), ShapeValidationError> {
    let (gt_height, gt_width) = gt_shape;
    let (lq_height, lq_width) = lq_shape;

    let matches_scale = |gt: usize, lq: usize| lq.checked_mul(scale) == Some(gt);
    if !matches_scale(gt_height, lq_height) || !matches_scale(gt_width, lq_width) {
        return Err(ShapeValidationError::ScaleMismatch {
            gt_height,
            gt_width,
            lq_height,
            lq_width,
            scale,
            source_id: source_id.map(str::to_owned),
        });
    }

    if lq_height < lq_patch_size || lq_width < lq_patch_size {
        return Err(ShapeValidationError::PatchTooLarge {
            lq_height,
            lq_width,
            patch_size: lq_patch_size,
            source_id: source_id.map(str::to_owned),
        });
    }

    Ok(())
}

/// Sample an aligned crop origin inside a `lq_height x lq_width` image.
///
/// Draws `top` then `left` uniformly from the inclusive ranges
/// `[0, lq_height - patch_size]` and `[0, lq_width - patch_size]`, and floors
/// each to a multiple of [`CROP_ALIGNMENT`]. The caller must ensure the patch
/// fits.
pub fn sample_crop_origin<R: Rng + ?Sized>(
    lq_height: usize,
    lq_width: usize,
    patch_size: usize,
    rng: &mut R,
) -> CropRect {
    let top = rng.random_range(0..=lq_height - patch_size);
    let left = rng.random_range(0..=lq_width - patch_size);
    CropRect::new(align_down(top), align_down(left), patch_size)
}

#[inline]
fn align_down(value: usize) -> usize {
    (value / CROP_ALIGNMENT) * CROP_ALIGNMENT
}

fn check_positive(name: &'static str, value: usize) -> Result<(), TransformError> {
    if value == 0 {
        return Err(TransformError::InvalidParameter { name, value });
    }
    Ok(())
}
