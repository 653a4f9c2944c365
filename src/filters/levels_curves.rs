//! Levels filter: shadow crush.
//!
//! Maps every lightness at or below a shadow threshold to black and
//! stretches the remaining range linearly back to 0.0-1.0. Applied to a
//! color-dodged layer this leaves dark "ink" lines on a white page.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1)
//! - **RGB / RGBA**: reads the first channel (input is expected to be
//!   desaturated), writes all color channels, preserves alpha

use ndarray::ArrayViewMut3;

use super::core::{color_channels, quantize_unit};

/// Remap one normalized lightness `l` against shadow point `s` (both 0.0-1.0).
///
/// With `s == 0` this degenerates to a hard threshold at pure white.
#[inline]
pub fn shadow_crush(l: f32, s: f32) -> f32 {
    if s == 0.0 {
        if l == 1.0 {
            1.0
        } else {
            0.0
        }
    } else if l <= s {
        0.0
    } else {
        (l - s) / (1.0 - s)
    }
}

/// Apply the shadow-crush levels remap in place (u8 version).
///
/// # Arguments
/// * `image` - Mutable view with 1, 3, or 4 channels (height, width, channels)
/// * `shadow_threshold` - Shadow point (0-255); lightness at or below it becomes black
pub fn shadow_crush_u8(mut image: ArrayViewMut3<u8>, shadow_threshold: u8) {
    let (height, width, channels) = image.dim();
    let color_channels = color_channels(channels);
    let s = shadow_threshold as f32 / 255.0;

    for y in 0..height {
        for x in 0..width {
            let l = image[[y, x, 0]] as f32 / 255.0;
            let v = quantize_unit(shadow_crush(l, s));
            for c in 0..color_channels {
                image[[y, x, c]] = v;
            }
        }
    }
}
