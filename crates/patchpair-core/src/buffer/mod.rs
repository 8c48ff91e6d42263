//! In-memory image buffers.
//!
//! Buffers come in two layouts:
//! - **Array**: `(H, W)` or `(H, W, C)`, pixel grid first
//! - **Tensor**: `(C, H, W)` or `(N, C, H, W)`, pixel grid last
//!
//! The layout is an explicit tag on [`ImageBuffer`]. Every crop, flip and
//! transpose resolves the spatial axes from it once and leaves all other
//! axes untouched.

mod convert;
mod types;

pub use types::{CropRect, ImageBuffer, Layout};
