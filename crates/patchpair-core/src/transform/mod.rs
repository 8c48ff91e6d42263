//! Geometric preprocessing of GT/LQ training pairs.
//!
//! This module provides the three operations applied to image buffers
//! before they reach a super-resolution model.
//!
//! # Operation Order
//!
//! When building a training sample, operations are applied in this order:
//! 1. Paired random crop (LQ and GT together)
//! 2. Flip/rotation augmentation with one shared decision
//!
//! Evaluation images only go through modulo cropping.
//!
//! # Coordinate System
//!
//! - Crop rectangles are in pixels, in each buffer's own space
//! - GT coordinates are LQ coordinates times the scale factor
//! - Origin is top-left corner

mod augment;
mod crop;
mod mod_crop;

pub use augment::{
    augment_pair, basic_augment, basic_augment_with_status, AugmentDecision,
};
pub use crop::{
    crop_pair_at, paired_random_crop, paired_random_crop_with_rect, sample_crop_origin,
    validate_pair_shape, CROP_ALIGNMENT,
};
pub use mod_crop::mod_crop;
