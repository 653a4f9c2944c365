//! WebAssembly exports for framesketch.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Frames are
//! passed as the flat RGBA bytes of a canvas `ImageData`; the sketch is
//! written back into the same array.

use wasm_bindgen::prelude::*;

use crate::sketch::{stylize_rgba, SketchParams};

// ============================================================================
// Sketch Pipeline
// ============================================================================

/// Render an RGBA frame as a pencil sketch, in place.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes (length = width * height * 4)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `sigma` - Blur standard deviation of the detail layer (>= 0, default 1.5)
/// * `shadow_threshold` - Shadow point, 0-255 (default 150)
///
/// Throws if the dimensions do not match the data or a parameter is out
/// of range; `data` is left unchanged in that case.
#[wasm_bindgen]
pub fn sketch_rgba_wasm(
    data: &mut [u8],
    width: usize,
    height: usize,
    sigma: f32,
    shadow_threshold: i32,
) -> Result<(), JsError> {
    let params = SketchParams::new(sigma, shadow_threshold);
    stylize_rgba(data, width, height, &params)?;
    Ok(())
}

// ============================================================================
// Capture Naming
// ============================================================================

/// File name for a capture of `source_name` at `seconds`:
/// `{stem}_{frame}.png` or `{stem}_{frame}.jpg`.
#[cfg(feature = "capture")]
#[wasm_bindgen]
pub fn capture_file_name_wasm(source_name: &str, seconds: f64, jpeg: bool) -> String {
    use crate::capture::{capture_file_name, OutputFormat};

    let format = if jpeg {
        OutputFormat::Jpeg
    } else {
        OutputFormat::Png
    };
    capture_file_name(source_name, seconds, format)
}
