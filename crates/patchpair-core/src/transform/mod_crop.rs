//! Modulo cropping for evaluation.
//!
//! Trims trailing rows and columns so that both spatial dimensions become
//! exact multiples of the scale factor. Nothing random happens here.

use crate::buffer::{ImageBuffer, Layout};
use crate::error::TransformError;

/// Trim an image so height and width are divisible by `scale`.
///
/// Keeps the top-left `h - h % scale` by `w - w % scale` region and every
/// channel. The input is not modified.
///
/// # Errors
///
/// - [`TransformError::InvalidShape`] if the buffer is not a 2-D or 3-D
///   array-like buffer
/// - [`TransformError::InvalidParameter`] if `scale` is zero
///
/// # Example
///
/// ```ignore
/// let img = ImageBuffer::array(Array3::<u8>::zeros((101, 67, 3)).into_dyn());
/// let cropped = mod_crop(&img, 4)?;
/// assert_eq!(cropped.shape(), &[100, 64, 3]);
/// ```
pub fn mod_crop<T: Clone>(
    image: &ImageBuffer<T>,
    scale: usize,
) -> Result<ImageBuffer<T>, TransformError> {
    if image.layout() != Layout::Array {
        return Err(TransformError::InvalidShape {
            layout: image.layout(),
            ndim: image.ndim(),
        });
    }
    let (height, width) = image.spatial_shape()?;
    if scale == 0 {
        return Err(TransformError::InvalidParameter {
            name: "scale",
            value: scale,
        });
    }

    let height = height - height % scale;
    let width = width - width % scale;
    image.crop_region(0..height, 0..width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array, ArrayD, IxDyn};

    fn test_image(shape: &[usize]) -> ImageBuffer<u32> {
        let len = shape.iter().product::<usize>();
        let data: ArrayD<u32> =
            Array::from_shape_vec(IxDyn(shape), (0..len as u32).collect()).unwrap();
        ImageBuffer::array(data)
    }

    #[test]
    fn test_trims_to_multiple() {
        let img = test_image(&[101, 67, 3]);
        let out = mod_crop(&img, 4).unwrap();
        assert_eq!(out.shape(), &[100, 64, 3]);
    }

    #[test]
    fn test_grayscale() {
        let img = test_image(&[10, 9]);
        let out = mod_crop(&img, 3).unwrap();
        assert_eq!(out.shape(), &[9, 9]);
        // Top-left corner is preserved
        assert_eq!(out.data()[[0, 0]], 0);
        assert_eq!(out.data()[[8, 8]], 8 * 9 + 8);
    }

    #[test]
    fn test_already_divisible_is_unchanged() {
        let img = test_image(&[8, 12, 1]);
        let out = mod_crop(&img, 4).unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_scale_one_is_identity() {
        let img = test_image(&[7, 5, 3]);
        assert_eq!(mod_crop(&img, 1).unwrap(), img);
    }

    #[test]
    fn test_does_not_mutate_input() {
        let img = test_image(&[9, 9, 3]);
        let before = img.clone();
        let _ = mod_crop(&img, 2).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_rejects_one_dimensional() {
        let img = test_image(&[16]);
        assert_eq!(
            mod_crop(&img, 2),
            Err(TransformError::InvalidShape {
                layout: Layout::Array,
                ndim: 1
            })
        );
    }

    #[test]
    fn test_rejects_four_dimensional() {
        let img = test_image(&[1, 4, 4, 3]);
        assert!(matches!(
            mod_crop(&img, 2),
            Err(TransformError::InvalidShape { ndim: 4, .. })
        ));
    }

    #[test]
    fn test_rejects_zero_scale() {
        let img = test_image(&[4, 4]);
        assert!(matches!(
            mod_crop(&img, 0),
            Err(TransformError::InvalidParameter { name: "scale", .. })
        ));
    }

    #[test]
    fn test_rejects_tensor_layout() {
        let batched = Array::from_elem(IxDyn(&[1, 3, 10, 7]), 0u8);
        assert_eq!(
            mod_crop(&ImageBuffer::tensor(batched), 2),
            Err(TransformError::InvalidShape {
                layout: Layout::Tensor,
                ndim: 4
            })
        );

        let chw = Array::from_elem(IxDyn(&[3, 10, 7]), 0u8);
        assert_eq!(
            mod_crop(&ImageBuffer::tensor(chw), 2),
            Err(TransformError::InvalidShape {
                layout: Layout::Tensor,
                ndim: 3
            })
        );
    }
}
