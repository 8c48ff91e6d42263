//! Random flip and rotation augmentation.
//!
//! Rotations by 0/90/180/270 degrees are built from a vertical flip and a
//! transpose, which is why the vertical flip is enabled by the `rotation`
//! option rather than a flag of its own. Combined with the horizontal flip
//! this covers all eight dihedral orientations.
//!
//! Every buffer passed to one call receives the same decision. To keep a
//! GT group aligned with an LQ group, either replay the returned
//! [`AugmentDecision`] on the other group or use [`augment_pair`].

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::buffer::ImageBuffer;
use crate::error::TransformError;
use crate::group::Group;
use crate::AugmentOptions;

/// Which geometric transforms were chosen for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AugmentDecision {
    /// Mirror along the width axis.
    pub hflip: bool,
    /// Mirror along the height axis.
    pub vflip: bool,
    /// Swap the height and width axes.
    pub rot90: bool,
}

impl AugmentDecision {
    /// The decision that leaves buffers unchanged.
    pub const IDENTITY: Self = Self {
        hflip: false,
        vflip: false,
        rot90: false,
    };

    pub fn new(hflip: bool, vflip: bool, rot90: bool) -> Self {
        Self {
            hflip,
            vflip,
            rot90,
        }
    }

    /// Draw a decision.
    ///
    /// Three uniform samples in `[0, 1)` are always drawn, in the order
    /// hflip, vflip, rot90, whatever the options say. The generator therefore
    /// advances by the same amount for every configuration.
    pub fn sample<R: Rng + ?Sized>(options: &AugmentOptions, rng: &mut R) -> Self {
        let hflip_sample: f64 = rng.random();
        let vflip_sample: f64 = rng.random();
        let rot90_sample: f64 = rng.random();

        Self {
            hflip: options.hflip && hflip_sample <= options.flip_prob,
            vflip: options.rotation && vflip_sample <= options.flip_prob,
            rot90: options.rotation && rot90_sample <= options.rotation_prob,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Apply to one buffer: hflip, then vflip, then transpose.
    pub fn apply<T: Clone>(
        &self,
        mut image: ImageBuffer<T>,
    ) -> Result<ImageBuffer<T>, TransformError> {
        // Rank is checked even when nothing needs to move.
        image.spatial_axes()?;

        if self.hflip {
            image = image.flip_horizontal()?;
        }
        if self.vflip {
            image = image.flip_vertical()?;
        }
        if self.rot90 {
            image = image.transpose_spatial()?;
        }
        trace!(shape = ?image.shape(), "augmented buffer");
        Ok(image)
    }

    /// Apply to every buffer of a group, keeping its shape.
    pub fn apply_group<T: Clone>(
        &self,
        images: Group<ImageBuffer<T>>,
    ) -> Result<Group<ImageBuffer<T>>, TransformError> {
        images.try_map(|img| self.apply(img))
    }
}

impl From<(bool, bool, bool)> for AugmentDecision {
    fn from((hflip, vflip, rot90): (bool, bool, bool)) -> Self {
        Self::new(hflip, vflip, rot90)
    }
}

impl From<AugmentDecision> for (bool, bool, bool) {
    fn from(decision: AugmentDecision) -> Self {
        (decision.hflip, decision.vflip, decision.rot90)
    }
}

/// Randomly flip and rotate a group of images.
///
/// One decision is drawn and applied to every buffer.
///
/// # Arguments
///
/// * `images` - Buffers to augment
/// * `options` - Which transforms are eligible and how likely each is
/// * `rng` - Random source; drawn from exactly three times
pub fn basic_augment<T: Clone, R: Rng + ?Sized>(
    images: Group<ImageBuffer<T>>,
    options: &AugmentOptions,
    rng: &mut R,
) -> Result<Group<ImageBuffer<T>>, TransformError> {
    basic_augment_with_status(images, options, rng).map(|(images, _)| images)
}

/// Same as [`basic_augment`], also returning the decision so it can be
/// replayed on a paired group.
pub fn basic_augment_with_status<T: Clone, R: Rng + ?Sized>(
    images: Group<ImageBuffer<T>>,
    options: &AugmentOptions,
    rng: &mut R,
) -> Result<(Group<ImageBuffer<T>>, AugmentDecision), TransformError> {
    let decision = AugmentDecision::sample(options, rng);
    debug!(
        hflip = decision.hflip,
        vflip = decision.vflip,
        rot90 = decision.rot90,
        buffers = images.len(),
        "augmentation decision"
    );
    let images = decision.apply_group(images)?;
    Ok((images, decision))
}

/// Augment a GT group and an LQ group with one shared decision.
pub fn augment_pair<T: Clone, R: Rng + ?Sized>(
    gt: Group<ImageBuffer<T>>,
    lq: Group<ImageBuffer<T>>,
    options: &AugmentOptions,
    rng: &mut R,
) -> Result<(Group<ImageBuffer<T>>, Group<ImageBuffer<T>>, AugmentDecision), TransformError> {
    let (lq, decision) = basic_augment_with_status(lq, options, rng)?;
    let gt = decision.apply_group(gt)?;
    Ok((gt, lq, decision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, arr3, Array, ArrayD, IxDyn};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always() -> AugmentOptions {
        AugmentOptions {
            hflip: true,
            rotation: true,
            flip_prob: 1.0,
            rotation_prob: 1.0,
        }
    }

    fn disabled() -> AugmentOptions {
        AugmentOptions {
            hflip: false,
            rotation: false,
            ..AugmentOptions::default()
        }
    }

    fn ramp(height: usize, width: usize, channels: usize) -> ImageBuffer<u16> {
        let len = height * width * channels;
        let data: ArrayD<u16> =
            Array::from_shape_vec(IxDyn(&[height, width, channels]), (0..len as u16).collect())
                .unwrap();
        ImageBuffer::array(data)
    }

    #[test]
    fn test_forced_decision() {
        let mut rng = StdRng::seed_from_u64(0);
        let decision = AugmentDecision::sample(&always(), &mut rng);
        assert_eq!(decision, AugmentDecision::new(true, true, true));
    }

    #[test]
    fn test_disabled_flags_give_identity() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let decision = AugmentDecision::sample(&disabled(), &mut rng);
            assert!(decision.is_identity());
        }
    }

    #[test]
    fn test_disabled_flags_leave_image_unchanged() {
        let mut rng = StdRng::seed_from_u64(11);
        let img = ramp(5, 7, 3);
        let out = basic_augment(Group::single(img.clone()), &disabled(), &mut rng)
            .unwrap()
            .into_single()
            .unwrap();
        assert_eq!(out, img);
    }

    #[test]
    fn test_vflip_follows_rotation_flag() {
        // hflip enabled, rotation disabled: vflip and rot90 can never fire
        let options = AugmentOptions {
            hflip: true,
            rotation: false,
            flip_prob: 1.0,
            rotation_prob: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(0);
        let decision = AugmentDecision::sample(&options, &mut rng);
        assert_eq!(decision, AugmentDecision::new(true, false, false));

        // rotation enabled but rot90 unreachable: vflip still fires
        let options = AugmentOptions {
            hflip: false,
            rotation: true,
            flip_prob: 1.0,
            rotation_prob: -1.0,
        };
        let decision = AugmentDecision::sample(&options, &mut rng);
        assert_eq!(decision, AugmentDecision::new(false, true, false));
    }

    #[test]
    fn test_full_transform_order() {
        // hflip -> vflip = 180 degree rotation, then transpose
        let img = ImageBuffer::array(arr2(&[[1u8, 2, 3], [4, 5, 6]]).into_dyn());
        let out = AugmentDecision::new(true, true, true).apply(img).unwrap();
        assert_eq!(out.data(), &arr2(&[[6u8, 3], [5, 2], [4, 1]]).into_dyn());
    }

    #[test]
    fn test_hflip_only() {
        let img = ImageBuffer::array(
            arr3(&[[[1u8, 10], [2, 20]], [[3, 30], [4, 40]]]).into_dyn(),
        );
        let out = AugmentDecision::new(true, false, false).apply(img).unwrap();
        assert_eq!(
            out.data(),
            &arr3(&[[[2u8, 20], [1, 10]], [[4, 40], [3, 30]]]).into_dyn()
        );
    }

    #[test]
    fn test_rot90_on_rectangular_image_swaps_dims() {
        let img = ramp(4, 6, 3);
        let out = AugmentDecision::new(false, false, true).apply(img).unwrap();
        assert_eq!(out.shape(), &[6, 4, 3]);
    }

    #[test]
    fn test_status_replay_reproduces_output() {
        let options = AugmentOptions::default();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let img = ramp(6, 4, 3);

            let (out, decision) =
                basic_augment_with_status(Group::single(img.clone()), &options, &mut rng).unwrap();

            let mut manual = img;
            if decision.hflip {
                manual = manual.flip_horizontal().unwrap();
            }
            if decision.vflip {
                manual = manual.flip_vertical().unwrap();
            }
            if decision.rot90 {
                manual = manual.transpose_spatial().unwrap();
            }
            assert_eq!(out.into_single().unwrap(), manual);
        }
    }

    #[test]
    fn test_group_gets_identical_transform() {
        let options = AugmentOptions::default();
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let inputs: Vec<_> = (0..3u16)
                .map(|i| {
                    let data = ramp(4, 4, 3).into_data().mapv(|v| v * 3 + i);
                    ImageBuffer::array(data)
                })
                .collect();

            let (out, decision) =
                basic_augment_with_status(Group::many(inputs.clone()), &options, &mut rng)
                    .unwrap();
            let out = out.into_vec();
            assert_eq!(out.len(), 3);
            for (input, output) in inputs.into_iter().zip(out) {
                assert_eq!(output, decision.apply(input).unwrap());
            }
        }
    }

    #[test]
    fn test_augment_pair_keeps_correspondence() {
        // GT is LQ upscaled 2x by pixel repetition; after a shared transform
        // it must still be the upscaled LQ.
        let lq = ramp(3, 5, 1);
        let gt_data = Array::from_shape_fn(IxDyn(&[6, 10, 1]), |idx| {
            lq.data()[[idx[0] / 2, idx[1] / 2, 0]]
        });
        let gt = ImageBuffer::array(gt_data);

        let mut rng = StdRng::seed_from_u64(21);
        let (gt, lq, _) =
            augment_pair(Group::single(gt), Group::single(lq), &always(), &mut rng).unwrap();
        let gt = gt.into_single().unwrap();
        let lq = lq.into_single().unwrap();

        assert_eq!(gt.shape(), &[10, 6, 1]);
        for (idx, v) in gt.data().indexed_iter() {
            assert_eq!(*v, lq.data()[[idx[0] / 2, idx[1] / 2, 0]]);
        }
    }

    #[test]
    fn test_decision_tuple_conversion() {
        let decision = AugmentDecision::from((true, false, true));
        let tuple: (bool, bool, bool) = decision.into();
        assert_eq!(tuple, (true, false, true));
    }

    #[test]
    fn test_rejects_bad_rank() {
        let img = ImageBuffer::array(Array::<u8, _>::zeros(IxDyn(&[4])));
        assert!(matches!(
            AugmentDecision::IDENTITY.apply(img),
            Err(TransformError::InvalidShape { ndim: 1, .. })
        ));
    }

    #[test]
    fn test_rng_advances_by_three_draws() {
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        let _ = AugmentDecision::sample(&disabled(), &mut a);
        let _ = AugmentDecision::sample(&always(), &mut b);
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }
}
