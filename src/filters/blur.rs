//! Gaussian blur for u8 images.
//!
//! Separable 2-pass convolution (horizontal then vertical) with a
//! truncated Gaussian kernel. Pixels outside the frame take the value of
//! the nearest edge pixel (clamp boundary). Rows are processed in
//! parallel with rayon; every output sample depends only on the input,
//! so the result is identical to a sequential run.

use ndarray::{Array3, ArrayViewMut3, Axis};
use rayon::prelude::*;

use super::core::{color_channels, gaussian_kernel_1d, quantize};

/// Apply Gaussian blur in place.
///
/// Color channels are blurred independently; alpha (channel 3 of RGBA) is
/// left as is. `sigma <= 0` leaves the image unchanged.
///
/// # Arguments
/// * `image` - Mutable view with 1, 3, or 4 channels (height, width, channels)
/// * `sigma` - Standard deviation of Gaussian kernel
pub fn gaussian_blur_u8(mut image: ArrayViewMut3<u8>, sigma: f32) {
    let (height, width, channels) = image.dim();
    if !(sigma > 0.0) || height == 0 || width == 0 {
        return;
    }

    let kernel = gaussian_kernel_1d(sigma);
    let half = kernel.len() as isize / 2;
    let color_channels = color_channels(channels);

    // Work in f32 for precision
    let mut temp = Array3::<f32>::zeros((height, width, color_channels));

    // Horizontal pass
    {
        let input = image.view();
        temp.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(y, mut row)| {
                for x in 0..width {
                    for c in 0..color_channels {
                        let mut sum = 0.0f32;
                        for (ki, &kv) in kernel.iter().enumerate() {
                            let sx = (x as isize + ki as isize - half)
                                .clamp(0, width as isize - 1) as usize;
                            sum += input[[y, sx, c]] as f32 * kv;
                        }
                        row[[x, c]] = sum;
                    }
                }
            });
    }

    // Vertical pass
    image
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(y, mut row)| {
            for x in 0..width {
                for c in 0..color_channels {
                    let mut sum = 0.0f32;
                    for (ki, &kv) in kernel.iter().enumerate() {
                        let sy = (y as isize + ki as isize - half)
                            .clamp(0, height as isize - 1) as usize;
                        sum += temp[[sy, x, c]] * kv;
                    }
                    row[[x, c]] = quantize(sum);
                }
            }
        });
}
