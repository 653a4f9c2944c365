//! Grayscale conversion by HSL lightness.
//!
//! Lightness is `(max(R, G, B) + min(R, G, B)) / 2`, the L of HSL. It is
//! not a luma: pure red, pure green and pure blue all map to the same
//! gray (127.5), which is what gives the sketch its flat, color-blind
//! line weight.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1) - already gray, left untouched
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - alpha preserved

use ndarray::ArrayViewMut3;

use super::core::quantize;

/// HSL lightness of an RGB triple, on the 0.0-255.0 scale.
#[inline]
pub fn lightness(r: u8, g: u8, b: u8) -> f32 {
    let max = r.max(g).max(b) as f32;
    let min = r.min(g).min(b) as f32;
    (max + min) / 2.0
}

/// Desaturate an image in place using HSL lightness.
///
/// Sets R=G=B=lightness for every pixel. Alpha is not touched.
///
/// # Arguments
/// * `image` - Mutable view of shape (height, width, channels), u8
pub fn desaturate_lightness_u8(mut image: ArrayViewMut3<u8>) {
    let (height, width, channels) = image.dim();
    if channels < 3 {
        return;
    }

    for y in 0..height {
        for x in 0..width {
            let l = quantize(lightness(
                image[[y, x, 0]],
                image[[y, x, 1]],
                image[[y, x, 2]],
            ));
            image[[y, x, 0]] = l;
            image[[y, x, 1]] = l;
            image[[y, x, 2]] = l;
        }
    }
}
