//! Color adjustment filters: Invert.
//!
//! ## Supported Formats
//!
//! - **Grayscale**: (height, width, 1)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4) - processes RGB, preserves alpha

use ndarray::ArrayViewMut3;

use super::core::color_channels;

/// Invert image colors in place (u8 version).
///
/// Each color sample becomes `255 - v`. Alpha is preserved if present.
///
/// # Arguments
/// * `image` - Mutable view with 1, 3, or 4 channels (height, width, channels)
pub fn invert_u8(mut image: ArrayViewMut3<u8>) {
    let (height, width, channels) = image.dim();
    let color_channels = color_channels(channels);

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                image[[y, x, c]] = 255 - image[[y, x, c]];
            }
        }
    }
}
