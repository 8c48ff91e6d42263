//! Patchpair Core - paired patch preprocessing for super-resolution training
//!
//! This crate provides the geometric preprocessing applied to a low-quality
//! (LQ) image and its ground-truth (GT) counterpart before they are fed to a
//! super-resolution model: scale-consistent random cropping, shared
//! flip/rotation augmentation, and modulo cropping for evaluation.
//!
//! All operations take an explicit random generator, so sampling is
//! reproducible and each data-loading worker can own its own seeded source.

pub mod buffer;
pub mod error;
pub mod group;
pub mod sampler;
pub mod transform;

pub use buffer::{CropRect, ImageBuffer, Layout};
pub use error::{ShapeValidationError, TransformError};
pub use group::Group;
pub use sampler::{PairedPatch, PairedSampler, PairedSamplerConfig};
pub use transform::{
    augment_pair, basic_augment, basic_augment_with_status, crop_pair_at, mod_crop,
    paired_random_crop, paired_random_crop_with_rect, AugmentDecision, CROP_ALIGNMENT,
};

/// Patch size and scale for paired random cropping
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// Side length of the LQ patch in pixels
    pub lq_patch_size: usize,
    /// GT/LQ resolution ratio
    pub scale: usize,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            lq_patch_size: 32,
            scale: 4,
        }
    }
}

impl CropOptions {
    /// Create a new CropOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Side length of the matching GT patch in pixels
    pub fn gt_patch_size(&self) -> usize {
        self.lq_patch_size * self.scale
    }
}

/// Flip/rotation augmentation settings
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AugmentOptions {
    /// Allow horizontal flips
    pub hflip: bool,
    /// Allow rotations (vertical flip and transpose)
    pub rotation: bool,
    /// Probability of each flip (0.0 to 1.0)
    pub flip_prob: f64,
    /// Probability of the transpose (0.0 to 1.0)
    pub rotation_prob: f64,
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            hflip: true,
            rotation: true,
            flip_prob: 0.5,
            rotation_prob: 0.5,
        }
    }
}

impl AugmentOptions {
    /// Create a new AugmentOptions with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Settings that never change a buffer
    pub fn disabled() -> Self {
        Self {
            hflip: false,
            rotation: false,
            ..Self::default()
        }
    }

    /// Check if no transform can ever be chosen
    pub fn is_disabled(&self) -> bool {
        !self.hflip && !self.rotation
    }
}
