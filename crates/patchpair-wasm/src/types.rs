//! WASM-compatible wrapper types for image buffers.
//!
//! This module provides JavaScript-friendly types that wrap the core patchpair
//! types, handling the conversion between Rust and JavaScript data
//! representations.

use ndarray::{ArrayD, IxDyn};
use patchpair_core::{ImageBuffer, Layout};
use wasm_bindgen::prelude::*;

/// An image buffer wrapper for JavaScript.
///
/// Pixels are `f32` values stored row-major in the order given by `shape`.
/// With `channels_first` unset the shape is `(H, W)` or `(H, W, C)`; with it
/// set the shape is `(C, H, W)` or `(N, C, H, W)`.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `data()`, a copy is
/// made to JavaScript memory as a `Float32Array`.
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct JsImageBuffer {
    inner: ImageBuffer<f32>,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Create a new JsImageBuffer from a shape and pixel data.
    ///
    /// # Arguments
    /// * `shape` - Dimension sizes, outermost first
    /// * `data` - Pixel values, `shape` product in length
    /// * `channels_first` - Tensor-like layout instead of array-like
    #[wasm_bindgen(constructor)]
    pub fn new(
        shape: Vec<u32>,
        data: Vec<f32>,
        channels_first: bool,
    ) -> Result<JsImageBuffer, JsValue> {
        Self::from_parts(&shape, data, channels_first).map_err(|e| JsValue::from_str(&e))
    }

    /// Get the dimension sizes
    #[wasm_bindgen(getter)]
    pub fn shape(&self) -> Vec<u32> {
        self.inner.shape().iter().map(|&d| d as u32).collect()
    }

    /// Whether the layout is tensor-like (channels before height and width)
    #[wasm_bindgen(getter)]
    pub fn channels_first(&self) -> bool {
        self.inner.layout() == Layout::Tensor
    }

    /// Get the number of pixel values
    #[wasm_bindgen(getter)]
    pub fn value_count(&self) -> usize {
        self.inner.data().len()
    }

    /// Returns pixel values as Float32Array in row-major order.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn data(&self) -> Vec<f32> {
        self.inner.data().iter().copied().collect()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImageBuffer {
    /// Build from raw parts, reporting a readable error for bad shapes.
    pub(crate) fn from_parts(
        shape: &[u32],
        data: Vec<f32>,
        channels_first: bool,
    ) -> Result<JsImageBuffer, String> {
        let dims: Vec<usize> = shape.iter().map(|&d| d as usize).collect();
        let array = ArrayD::from_shape_vec(IxDyn(&dims), data)
            .map_err(|e| format!("Invalid buffer shape {:?}: {}", dims, e))?;
        let layout = if channels_first {
            Layout::Tensor
        } else {
            Layout::Array
        };
        Ok(JsImageBuffer {
            inner: ImageBuffer::new(array, layout),
        })
    }

    pub(crate) fn from_core(inner: ImageBuffer<f32>) -> Self {
        Self { inner }
    }

    pub(crate) fn to_core(&self) -> ImageBuffer<f32> {
        self.inner.clone()
    }
}
