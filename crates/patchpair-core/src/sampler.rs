//! Training-sample construction: crop, then augment with one decision.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::buffer::{CropRect, ImageBuffer};
use crate::error::TransformError;
use crate::group::Group;
use crate::transform::{augment_pair, paired_random_crop_with_rect, AugmentDecision};
use crate::{AugmentOptions, CropOptions};

/// Configuration for building paired training patches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairedSamplerConfig {
    pub crop: CropOptions,
    pub augment: AugmentOptions,
}

/// A GT/LQ patch pair plus how it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct PairedPatch<T> {
    pub gt: Group<ImageBuffer<T>>,
    pub lq: Group<ImageBuffer<T>>,
    /// Crop rectangle in LQ space.
    pub crop: CropRect,
    /// Augmentation shared by GT and LQ.
    pub augment: AugmentDecision,
}

/// Builds paired training patches from full-size GT/LQ images.
#[derive(Debug, Clone, Default)]
pub struct PairedSampler {
    config: PairedSamplerConfig,
}

impl PairedSampler {
    pub fn new(config: PairedSamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PairedSamplerConfig {
        &self.config
    }

    /// Crop a shared random patch and augment GT and LQ identically.
    ///
    /// `source_id` only appears in diagnostics. Validation errors are
    /// returned unchanged so the caller can skip the sample or stop.
    pub fn sample<T: Clone, R: Rng + ?Sized>(
        &self,
        gt: Group<ImageBuffer<T>>,
        lq: Group<ImageBuffer<T>>,
        source_id: Option<&str>,
        rng: &mut R,
    ) -> Result<PairedPatch<T>, TransformError> {
        let CropOptions {
            lq_patch_size,
            scale,
        } = self.config.crop;

        let (gt, lq, crop) =
            paired_random_crop_with_rect(gt, lq, lq_patch_size, scale, source_id, rng)?;
        let (gt, lq, augment) = augment_pair(gt, lq, &self.config.augment, rng)?;

        debug!(
            top = crop.top,
            left = crop.left,
            hflip = augment.hflip,
            vflip = augment.vflip,
            rot90 = augment.rot90,
            source_id = source_id.unwrap_or("-"),
            "built paired patch"
        );

        Ok(PairedPatch {
            gt,
            lq,
            crop,
            augment,
        })
    }
}
