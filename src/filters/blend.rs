//! Layer blend modes: Color Dodge.
//!
//! Both layers are expected to be desaturated (R=G=B), so the blend reads
//! the first channel of each layer and writes the result to every color
//! channel of the base. Alpha of the base is preserved.

use ndarray::{ArrayView3, ArrayViewMut3};

use super::core::{color_channels, quantize_unit};
use crate::error::{Result, SketchError};

/// Color dodge of one normalized sample pair: `base / (1 - top)`, clamped to 1.
///
/// A fully white top layer always yields white, which also covers the
/// division by zero.
#[inline]
pub fn color_dodge(base: f32, top: f32) -> f32 {
    if top == 1.0 {
        1.0
    } else {
        (base / (1.0 - top)).min(1.0)
    }
}

/// Color-dodge `top` onto `base` in place (u8 version).
///
/// # Arguments
/// * `base` - Bottom layer, modified in place (height, width, channels)
/// * `top` - Top layer with the same shape
///
/// # Errors
/// `InvalidArgument` if the layer shapes differ.
pub fn color_dodge_u8(mut base: ArrayViewMut3<u8>, top: ArrayView3<u8>) -> Result<()> {
    if base.dim() != top.dim() {
        return Err(SketchError::invalid(format!(
            "layer shapes differ: base {:?}, top {:?}",
            base.dim(),
            top.dim()
        )));
    }

    let (height, width, channels) = base.dim();
    let color_channels = color_channels(channels);

    for y in 0..height {
        for x in 0..width {
            let bl = base[[y, x, 0]] as f32 / 255.0;
            let tl = top[[y, x, 0]] as f32 / 255.0;
            let l = quantize_unit(color_dodge(bl, tl));
            for c in 0..color_channels {
                base[[y, x, c]] = l;
            }
        }
    }
    Ok(())
}
