//! WASM bindings for patch preprocessing operations.
//!
//! This module provides JavaScript bindings for modulo cropping, paired random
//! cropping and flip/rotation augmentation. Random operations take an explicit
//! seed so that a JS caller can reproduce any patch.

use crate::types::JsImageBuffer;
use patchpair_core::transform::{
    basic_augment_with_status, mod_crop as core_mod_crop,
    paired_random_crop_with_rect as core_paired_crop, AugmentDecision,
};
use patchpair_core::{AugmentOptions, Group, ImageBuffer, TransformError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

/// A GT/LQ patch pair returned by [`paired_random_crop`].
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsPairedPatch {
    gt: JsImageBuffer,
    lq: JsImageBuffer,
    top: usize,
    left: usize,
}

#[wasm_bindgen]
impl JsPairedPatch {
    /// The GT patch (copied)
    pub fn gt(&self) -> JsImageBuffer {
        self.gt.clone()
    }

    /// The LQ patch (copied)
    pub fn lq(&self) -> JsImageBuffer {
        self.lq.clone()
    }

    /// First LQ row of the crop
    #[wasm_bindgen(getter)]
    pub fn top(&self) -> usize {
        self.top
    }

    /// First LQ column of the crop
    #[wasm_bindgen(getter)]
    pub fn left(&self) -> usize {
        self.left
    }
}

/// An augmented buffer plus the decision that produced it.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsAugmented {
    image: JsImageBuffer,
    decision: AugmentDecision,
}

#[wasm_bindgen]
impl JsAugmented {
    /// The augmented buffer (copied)
    pub fn image(&self) -> JsImageBuffer {
        self.image.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn hflip(&self) -> bool {
        self.decision.hflip
    }

    #[wasm_bindgen(getter)]
    pub fn vflip(&self) -> bool {
        self.decision.vflip
    }

    #[wasm_bindgen(getter)]
    pub fn rot90(&self) -> bool {
        self.decision.rot90
    }

    /// The decision as a plain `{ hflip, vflip, rot90 }` object
    pub fn status(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.decision)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Trim an image so its height and width are multiples of `scale`.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const img = new JsImageBuffer([101, 67, 3], pixels, false);
/// const trimmed = mod_crop(img, 4); // shape [100, 64, 3]
/// ```
#[wasm_bindgen]
pub fn mod_crop(image: &JsImageBuffer, scale: u32) -> Result<JsImageBuffer, JsValue> {
    mod_crop_impl(image, scale).map_err(to_js_error)
}

/// Crop a GT/LQ pair at one shared, 16-pixel-aligned random location.
///
/// # Arguments
///
/// * `gt` - Ground-truth image
/// * `lq` - Low-quality image, `scale` times smaller than `gt`
/// * `lq_patch_size` - Patch side length in LQ pixels
/// * `scale` - GT/LQ resolution ratio
/// * `source_id` - Label included in error messages
/// * `seed` - Random seed
///
/// # Errors
///
/// Fails if GT is not exactly `scale` times LQ, or LQ is smaller than the
/// patch. The message is also written to the browser console.
#[wasm_bindgen]
pub fn paired_random_crop(
    gt: &JsImageBuffer,
    lq: &JsImageBuffer,
    lq_patch_size: u32,
    scale: u32,
    source_id: Option<String>,
    seed: u64,
) -> Result<JsPairedPatch, JsValue> {
    paired_random_crop_impl(gt, lq, lq_patch_size, scale, source_id.as_deref(), seed)
        .map_err(to_js_error)
}

/// Randomly flip and rotate an image.
///
/// `options` is a partial `{ hflip, rotation, flip_prob, rotation_prob }`
/// object; missing fields and `undefined` fall back to the defaults.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const lqAug = basic_augment(lq, { flip_prob: 0.5 }, 7n);
/// const gtAug = apply_augment(gt, lqAug.hflip, lqAug.vflip, lqAug.rot90);
/// ```
#[wasm_bindgen]
pub fn basic_augment(
    image: &JsImageBuffer,
    options: JsValue,
    seed: u64,
) -> Result<JsAugmented, JsValue> {
    let options: AugmentOptions = if options.is_undefined() || options.is_null() {
        AugmentOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid augment options: {}", e)))?
    };
    basic_augment_impl(image, &options, seed).map_err(to_js_error)
}

/// Apply a known flip/rotation decision, e.g. to replay an LQ decision on GT.
#[wasm_bindgen]
pub fn apply_augment(
    image: &JsImageBuffer,
    hflip: bool,
    vflip: bool,
    rot90: bool,
) -> Result<JsImageBuffer, JsValue> {
    AugmentDecision::new(hflip, vflip, rot90)
        .apply(image.to_core())
        .map(JsImageBuffer::from_core)
        .map_err(|e| to_js_error(e.to_string()))
}

pub(crate) fn mod_crop_impl(image: &JsImageBuffer, scale: u32) -> Result<JsImageBuffer, String> {
    core_mod_crop(&image.to_core(), scale as usize)
        .map(JsImageBuffer::from_core)
        .map_err(|e| e.to_string())
}

pub(crate) fn paired_random_crop_impl(
    gt: &JsImageBuffer,
    lq: &JsImageBuffer,
    lq_patch_size: u32,
    scale: u32,
    source_id: Option<&str>,
    seed: u64,
) -> Result<JsPairedPatch, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (gt, lq, rect) = core_paired_crop(
        Group::single(gt.to_core()),
        Group::single(lq.to_core()),
        lq_patch_size as usize,
        scale as usize,
        source_id,
        &mut rng,
    )
    .map_err(|e| e.to_string())?;

    Ok(JsPairedPatch {
        gt: single(gt)?,
        lq: single(lq)?,
        top: rect.top,
        left: rect.left,
    })
}

pub(crate) fn basic_augment_impl(
    image: &JsImageBuffer,
    options: &AugmentOptions,
    seed: u64,
) -> Result<JsAugmented, String> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (images, decision) =
        basic_augment_with_status(Group::single(image.to_core()), options, &mut rng)
            .map_err(|e| e.to_string())?;
    Ok(JsAugmented {
        image: single(images)?,
        decision,
    })
}

fn single(group: Group<ImageBuffer<f32>>) -> Result<JsImageBuffer, String> {
    group
        .into_single()
        .map(JsImageBuffer::from_core)
        .ok_or_else(|| TransformError::EmptyGroup.to_string())
}

/// Log to the browser console and wrap as a JS `Error`.
fn to_js_error(message: String) -> JsValue {
    report_error(&message);
    js_sys::Error::new(&message).into()
}

#[cfg(target_arch = "wasm32")]
fn report_error(message: &str) {
    web_sys::console::error_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn report_error(_message: &str) {}


/// WASM-specific tests that require JsValue.
///
/// These tests cross the JS boundary and can only run on wasm32 targets.
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn test_image(height: u32, width: u32) -> JsImageBuffer {
        let pixels: Vec<f32> = (0..height * width).map(|i| i as f32).collect();
        JsImageBuffer::new(vec![height, width], pixels, false).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_basic_augment_undefined_options() {
        let img = test_image(4, 4);
        let result = basic_augment(&img, JsValue::UNDEFINED, 1);
        assert!(result.is_ok());
    }

    #[wasm_bindgen_test]
    fn test_basic_augment_partial_options() {
        #[derive(serde::Serialize)]
        struct Partial {
            hflip: bool,
            rotation: bool,
        }
        let options = serde_wasm_bindgen::to_value(&Partial {
            hflip: false,
            rotation: false,
        })
        .unwrap();
        let img = test_image(4, 4);
        let result = basic_augment(&img, options, 1).unwrap();
        assert_eq!(result.image().data(), img.data());
    }

    #[wasm_bindgen_test]
    fn test_status_object() {
        let img = test_image(4, 4);
        let result = basic_augment(&img, JsValue::UNDEFINED, 2).unwrap();
        assert!(result.status().unwrap().is_object());
    }

    #[wasm_bindgen_test]
    fn test_paired_crop_error_surfaces() {
        let gt = test_image(101, 100);
        let lq = test_image(50, 50);
        assert!(paired_random_crop(&gt, &lq, 16, 2, None, 0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_apply_augment_replays() {
        let img = test_image(2, 3);
        let out = apply_augment(&img, false, false, true).unwrap();
        assert_eq!(out.shape(), vec![3, 2]);
    }
}
