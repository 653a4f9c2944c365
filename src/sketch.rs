//! Pencil-sketch stylization of a captured frame.
//!
//! The pipeline works on two layers of the same frame:
//!
//! 1. **Base**: desaturated to HSL lightness
//! 2. **Detail**: a copy of the original, desaturated and inverted
//! 3. The detail layer is Gaussian blurred
//! 4. The detail layer is color-dodged onto the base
//! 5. A levels pass crushes the shadows, leaving dark lines on white
//!
//! The base layer is the caller's buffer and is rewritten in place. The
//! detail layer lives in a scratch buffer owned by [`Sketcher`], so base and
//! detail never alias and the scratch allocation is reused across frames.

use log::{debug, trace, warn};
use ndarray::ArrayViewMut3;

use crate::buffer::PixelBuffer;
use crate::error::{Result, SketchError};
use crate::filters::blend::color_dodge_u8;
use crate::filters::blur::gaussian_blur_u8;
use crate::filters::color_adjust::invert_u8;
use crate::filters::core::MAX_SIGMA;
use crate::filters::grayscale::desaturate_lightness_u8;
use crate::filters::levels_curves::shadow_crush_u8;

pub const DEFAULT_SIGMA: f32 = 1.5;
pub const DEFAULT_SHADOW_THRESHOLD: i32 = 150;

/// Parameters of one sketch pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SketchParams {
    /// Blur standard deviation of the detail layer, within 0-`MAX_SIGMA`;
    /// 0 disables the blur.
    pub sigma: f32,
    /// Shadow point (0-255). Lightness at or below it becomes ink.
    pub shadow_threshold: i32,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            sigma: DEFAULT_SIGMA,
            shadow_threshold: DEFAULT_SHADOW_THRESHOLD,
        }
    }
}

impl SketchParams {
    pub fn new(sigma: f32, shadow_threshold: i32) -> Self {
        Self {
            sigma,
            shadow_threshold,
        }
    }

    pub fn with_sigma(mut self, sigma: f32) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_shadow_threshold(mut self, shadow_threshold: i32) -> Self {
        self.shadow_threshold = shadow_threshold;
        self
    }

    /// Check the parameter ranges and return the threshold as a sample value.
    ///
    /// # Errors
    /// `InvalidArgument` if `sigma` is not within `0..=MAX_SIGMA`, or if
    /// `shadow_threshold` is outside 0-255.
    pub fn validate(&self) -> Result<u8> {
        if !(0.0..=MAX_SIGMA).contains(&self.sigma) {
            return Err(SketchError::invalid(format!(
                "sigma must be within 0-{}, got {}",
                MAX_SIGMA, self.sigma
            )));
        }
        shadow_point(self.shadow_threshold)
    }
}

/// Convert a shadow threshold to a sample value.
///
/// # Errors
/// `InvalidArgument` if `shadow_threshold` is outside 0-255.
pub fn shadow_point(shadow_threshold: i32) -> Result<u8> {
    u8::try_from(shadow_threshold).map_err(|_| {
        SketchError::invalid(format!(
            "shadow threshold must be within 0-255, got {}",
            shadow_threshold
        ))
    })
}

/// Reusable sketch renderer.
///
/// Holds validated parameters and the detail-layer scratch buffer. The
/// scratch buffer grows to the largest frame seen and is reused.
#[derive(Debug, Clone)]
pub struct Sketcher {
    params: SketchParams,
    shadow: u8,
    scratch: Vec<u8>,
}

impl Sketcher {
    /// # Errors
    /// `InvalidArgument` if `params` are out of range.
    pub fn new(params: SketchParams) -> Result<Self> {
        let shadow = params
            .validate()
            .inspect_err(|e| warn!("rejected sketch parameters: {}", e))?;
        Ok(Self {
            params,
            shadow,
            scratch: Vec::new(),
        })
    }

    pub fn params(&self) -> &SketchParams {
        &self.params
    }

    /// Run the full pipeline on `buffer` in place.
    pub fn apply(&mut self, buffer: &mut PixelBuffer) -> Result<()> {
        debug!(
            "sketch {}x{} sigma={} shadow={}",
            buffer.width(),
            buffer.height(),
            self.params.sigma,
            self.shadow
        );
        self.dodge(buffer)?;

        trace!("levels: shadow crush at {}", self.shadow);
        shadow_crush_u8(buffer.view_mut(), self.shadow);
        Ok(())
    }

    /// Run every stage up to and including the color dodge, without the
    /// levels pass. Useful for inspecting the unthresholded sketch.
    pub fn dodge(&mut self, buffer: &mut PixelBuffer) -> Result<()> {
        let shape = buffer.shape();

        self.scratch.clear();
        self.scratch.extend_from_slice(buffer.as_bytes());
        let mut detail = ArrayViewMut3::from_shape(shape, self.scratch.as_mut_slice())
            .map_err(|e| SketchError::invalid(format!("detail layer: {}", e)))?;

        trace!("desaturate base and detail layers");
        desaturate_lightness_u8(buffer.view_mut());
        desaturate_lightness_u8(detail.view_mut());

        trace!("invert detail layer");
        invert_u8(detail.view_mut());

        trace!("blur detail layer, sigma={}", self.params.sigma);
        gaussian_blur_u8(detail.view_mut(), self.params.sigma);

        trace!("color dodge");
        color_dodge_u8(buffer.view_mut(), detail.view())
    }
}

/// Stylize `buffer` in place as a pencil sketch.
///
/// Parameters are checked before any pixel is written; on error the
/// buffer is left untouched.
pub fn stylize(buffer: &mut PixelBuffer, params: &SketchParams) -> Result<()> {
    Sketcher::new(*params)?.apply(buffer)
}

/// Stylize a flat RGBA8 frame of `width` x `height` pixels in place.
pub fn stylize_rgba(
    data: &mut [u8],
    width: usize,
    height: usize,
    params: &SketchParams,
) -> Result<()> {
    let mut buffer = PixelBuffer::new(data, width, height)
        .inspect_err(|e| warn!("rejected sketch frame: {}", e))?;
    stylize(&mut buffer, params)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(pixels: &[[u8; 4]]) -> Vec<u8> {
        pixels.iter().flatten().copied().collect()
    }

    /// Non-uniform 8x6 frame with varying color and alpha.
    fn frame() -> (Vec<u8>, usize, usize) {
        let (w, h) = (8, 6);
        let mut data = Vec::with_capacity(w * h * 4);
        for y in 0..h {
            for x in 0..w {
                data.push(((x * 31 + y * 7) % 256) as u8);
                data.push(((x * 5 + y * 43) % 256) as u8);
                data.push(((x * y * 17) % 256) as u8);
                data.push(((x * 29 + y * 3 + 1) % 256) as u8);
            }
        }
        (data, w, h)
    }

    #[test]
    fn test_defaults() {
        let params = SketchParams::default();
        assert_eq!(params.sigma, 1.5);
        assert_eq!(params.shadow_threshold, 150);
        assert_eq!(params.validate().unwrap(), 150);
    }

    #[test]
    fn test_primary_colors_with_zero_sigma_become_white() {
        let mut data = rgba(&[[255, 0, 0, 255], [0, 0, 255, 255]]);
        stylize_rgba(&mut data, 2, 1, &SketchParams::new(0.0, 150)).unwrap();
        assert_eq!(data, rgba(&[[255, 255, 255, 255], [255, 255, 255, 255]]));
    }

    #[test]
    fn test_zero_sigma_whitens_any_frame() {
        let (mut data, w, h) = frame();
        let alpha: Vec<u8> = data.iter().skip(3).step_by(4).copied().collect();
        stylize_rgba(&mut data, w, h, &SketchParams::new(0.0, 150)).unwrap();
        for (i, px) in data.chunks_exact(4).enumerate() {
            assert_eq!(&px[..3], &[255, 255, 255]);
            assert_eq!(px[3], alpha[i]);
        }
    }

    #[test]
    fn test_black_frame_is_white_after_dodge() {
        let mut data = rgba(&[[0, 0, 0, 255]; 6]);
        let mut buffer = PixelBuffer::new(&mut data, 3, 2).unwrap();
        let mut sketcher = Sketcher::new(SketchParams::default()).unwrap();
        sketcher.dodge(&mut buffer).unwrap();
        assert!(buffer.as_bytes().chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_black_frame_full_pipeline_is_white() {
        let mut data = rgba(&[[0, 0, 0, 255]; 6]);
        stylize_rgba(&mut data, 3, 2, &SketchParams::default()).unwrap();
        assert!(data.chunks_exact(4).all(|px| px == [255, 255, 255, 255]));
    }

    #[test]
    fn test_dimensions_and_alpha_preserved() {
        let (mut data, w, h) = frame();
        let original = data.clone();
        stylize_rgba(&mut data, w, h, &SketchParams::default()).unwrap();

        assert_eq!(data.len(), original.len());
        for (out, inp) in data.chunks_exact(4).zip(original.chunks_exact(4)) {
            assert_eq!(out[3], inp[3]);
            // Output is gray
            assert_eq!(out[0], out[1]);
            assert_eq!(out[1], out[2]);
        }
    }

    #[test]
    fn test_zero_shadow_threshold_is_binary() {
        let (mut data, w, h) = frame();
        stylize_rgba(&mut data, w, h, &SketchParams::new(1.5, 0)).unwrap();
        for px in data.chunks_exact(4) {
            assert!(px[0] == 0 || px[0] == 255, "midtone {}", px[0]);
        }
    }

    #[test]
    fn test_second_pass_is_not_a_noop() {
        // Two gray pixels; blur mixes them across the clamped edge.
        let mut data = rgba(&[[200, 200, 200, 255], [100, 100, 100, 255]]);
        let params = SketchParams::default();

        stylize_rgba(&mut data, 2, 1, &params).unwrap();
        let first = data.clone();
        assert_eq!(first[0], 255);
        assert!(first[4] > 0 && first[4] < 255, "expected midtone, got {}", first[4]);

        stylize_rgba(&mut data, 2, 1, &params).unwrap();
        assert_ne!(data, first);
    }

    #[test]
    fn test_negative_sigma_rejected_without_mutation() {
        let (mut data, w, h) = frame();
        let original = data.clone();
        let err = stylize_rgba(&mut data, w, h, &SketchParams::new(-1.0, 150)).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(data, original);
    }

    #[test]
    fn test_out_of_range_threshold_rejected_without_mutation() {
        let (mut data, w, h) = frame();
        let original = data.clone();
        for threshold in [300, -1, 256] {
            let err =
                stylize_rgba(&mut data, w, h, &SketchParams::new(1.5, threshold)).unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(data, original);
        }
    }

    #[test]
    fn test_non_finite_sigma_rejected() {
        assert!(SketchParams::new(f32::NAN, 150).validate().is_err());
        assert!(SketchParams::new(f32::INFINITY, 150).validate().is_err());
    }

    #[test]
    fn test_sigma_above_max_rejected_without_mutation() {
        assert!(SketchParams::new(MAX_SIGMA, 150).validate().is_ok());

        let (mut data, w, h) = frame();
        let original = data.clone();
        for sigma in [MAX_SIGMA * 2.0, 1e11, f32::MAX] {
            let err = stylize_rgba(&mut data, w, h, &SketchParams::new(sigma, 150)).unwrap_err();
            assert!(err.is_invalid_argument());
            assert_eq!(data, original);
        }
    }

    #[test]
    fn test_tiny_sigma_matches_zero_sigma() {
        let mut data = rgba(&[[255, 0, 0, 255], [0, 0, 255, 255]]);
        stylize_rgba(&mut data, 2, 1, &SketchParams::new(1e-23, 150)).unwrap();
        assert_eq!(data, rgba(&[[255, 255, 255, 255], [255, 255, 255, 255]]));
    }

    #[test]
    fn test_shadow_point_range() {
        assert_eq!(shadow_point(0).unwrap(), 0);
        assert_eq!(shadow_point(255).unwrap(), 255);
        assert!(shadow_point(300).unwrap_err().is_invalid_argument());
        assert!(shadow_point(-1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_bad_dimensions_rejected_without_mutation() {
        let (mut data, _, _) = frame();
        let original = data.clone();
        let err = stylize_rgba(&mut data, 5, 5, &SketchParams::default()).unwrap_err();
        assert!(err.is_invalid_argument());
        assert_eq!(data, original);
    }

    #[test]
    fn test_sketcher_reuse_matches_fresh_runs() {
        let params = SketchParams::default().with_sigma(2.0).with_shadow_threshold(120);
        let mut sketcher = Sketcher::new(params).unwrap();

        let (big, w, h) = frame();
        let small = rgba(&[[10, 200, 30, 255], [250, 250, 250, 128], [0, 90, 180, 0]]);

        for (input, w, h) in [(big.clone(), w, h), (small, 3, 1), (big, w, h)] {
            let mut reused = input.clone();
            let mut fresh = input;
            sketcher
                .apply(&mut PixelBuffer::new(&mut reused, w, h).unwrap())
                .unwrap();
            stylize_rgba(&mut fresh, w, h, &params).unwrap();
            assert_eq!(reused, fresh);
        }
    }
}
