//! Patchpair WASM - WebAssembly bindings for Patchpair
//!
//! This crate provides WASM bindings to expose the patchpair-core preprocessing
//! operations to JavaScript/TypeScript applications, e.g. for previewing the
//! training patches a dataset will produce.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image buffers
//! - `transform` - Modulo crop, paired random crop and augmentation bindings
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageBuffer, paired_random_crop } from '@patchpair/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const gt = new JsImageBuffer([256, 256, 3], gtPixels, false);
//! const lq = new JsImageBuffer([64, 64, 3], lqPixels, false);
//! const patch = paired_random_crop(gt, lq, 32, 4, 'img_001.png', 42n);
//! console.log(`Patch at (${patch.top}, ${patch.left})`);
//! ```

use wasm_bindgen::prelude::*;

mod transform;
mod types;

// Re-export public types
pub use transform::{
    apply_augment, basic_augment, mod_crop, paired_random_crop, JsAugmented, JsPairedPatch,
};
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// LQ crop origins are multiples of this many pixels
#[wasm_bindgen]
pub fn crop_alignment() -> usize {
    patchpair_core::CROP_ALIGNMENT
}
