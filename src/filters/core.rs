//! Core utilities shared by the sketch filters.
//!
//! - Gaussian kernel generation
//! - Float to 8-bit sample quantization
//! - Channel layout helpers

/// Largest blur standard deviation accepted by the sketch pipeline.
///
/// Larger values are clamped to this by [`gaussian_kernel_1d`].
pub const MAX_SIGMA: f32 = 1024.0;

/// Generate a 1D Gaussian kernel.
///
/// # Arguments
/// * `sigma` - Standard deviation of the Gaussian, clamped to [`MAX_SIGMA`]
///
/// # Returns
/// Normalized 1D kernel as Vec<f32>. `sigma <= 0`, NaN, and any sigma
/// too small to reach a neighbouring tap yield the identity kernel `[1.0]`.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if !(sigma > 0.0) {
        return vec![1.0];
    }
    let sigma = sigma.min(MAX_SIGMA);

    // Kernel size = 6 sigma (covers 99.7% of distribution), ensure odd
    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let two_var = 2.0 * sigma * sigma;
    if kernel_size == 1 || !two_var.is_normal() {
        return vec![1.0];
    }
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / two_var).exp()
        })
        .collect();

    // Normalize
    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Store a float sample (0.0-255.0 scale) as u8.
///
/// Clamps to the valid range and rounds half to even, which is what a
/// canvas does when floats are written into its pixel array. Every stage
/// goes through this so the rounding rule is the same everywhere.
#[inline]
pub fn quantize(v: f32) -> u8 {
    v.clamp(0.0, 255.0).round_ties_even() as u8
}

/// Store a normalized sample (0.0-1.0) as u8.
#[inline]
pub fn quantize_unit(v: f32) -> u8 {
    quantize(v * 255.0)
}

/// Number of color channels to process; alpha (channel 3 of RGBA) is skipped.
#[inline]
pub fn color_channels(channels: usize) -> usize {
    if channels == 4 {
        3
    } else {
        channels
    }
}
