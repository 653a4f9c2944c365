//! Filter modules used by the sketch pipeline.
//!
//! ## Supported Formats
//!
//! Filters take ndarray views of u8 images with 1, 3, or 4 channels:
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single lightness channel, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! ## Architecture
//!
//! - **In place** - Filters mutate the view they are given, no per-call output image
//! - **Alpha preservation** - Alpha channel (if present) is never written
//! - **Consistent rounding** - Float results are stored with [`core::quantize`]
//! - **Thread-safe** - Blur rows run in parallel with rayon
//!
//! ## Filter Categories
//!
//! - **Pixel-wise**: desaturate (lightness), invert
//! - **Convolution**: gaussian blur
//! - **Blend**: color dodge
//! - **Tonal**: shadow crush levels

pub mod core;
pub mod grayscale;
pub mod color_adjust;
pub mod blur;
pub mod blend;
pub mod levels_curves;
