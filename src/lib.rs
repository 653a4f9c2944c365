//! framesketch
//!
//! Pencil-sketch stylization for captured video frames, with Python
//! bindings via PyO3 and WASM bindings for browser canvases.
//!
//! ## Image Format
//! Frames are flat row-major RGBA8 buffers (`width * height * 4` bytes),
//! the layout of a canvas `ImageData`. [`PixelBuffer`] wraps such a buffer
//! and exposes it as an ndarray view of shape (height, width, 4).
//!
//! ## Pipeline
//! [`stylize`] rewrites a frame in place as a line drawing:
//! lightness desaturation, inverted and blurred detail layer, color dodge,
//! then a levels pass that crushes the shadows to black. Alpha is never
//! modified. See [`sketch`] for the stages and [`filters`] for the
//! individual filters.
//!
//! ## Features
//! - `capture` (default): frame naming and PNG/JPEG encoding via `image`
//! - `python`: PyO3/numpy extension module
//! - `wasm`: wasm-bindgen exports

pub mod buffer;
pub mod error;
pub mod filters;
pub mod sketch;

#[cfg(feature = "capture")]
pub mod capture;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use buffer::PixelBuffer;
pub use error::{Result, SketchError};
pub use sketch::{stylize, stylize_rgba, SketchParams, Sketcher};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use ndarray::Array3;
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::filters::blend::color_dodge_u8;
    use crate::filters::grayscale::desaturate_lightness_u8;
    use crate::filters::levels_curves::shadow_crush_u8;
    use crate::sketch::{
        shadow_point, stylize_rgba, SketchParams, DEFAULT_SHADOW_THRESHOLD, DEFAULT_SIGMA,
    };
    use crate::SketchError;

    impl From<SketchError> for PyErr {
        fn from(err: SketchError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    /// Copy a numpy view into a standard-layout array.
    fn to_standard(image: &PyReadonlyArray3<'_, u8>) -> Array3<u8> {
        let input = image.as_array();
        let dim = input.dim();
        Array3::from_shape_fn(dim, |(y, x, c)| input[[y, x, c]])
    }

    // ========================================================================
    // Sketch Pipeline
    // ========================================================================

    /// Render an RGBA u8 image as a pencil sketch.
    ///
    /// # Arguments
    /// * `image` - RGBA image (height, width, 4) as u8
    /// * `sigma` - Blur standard deviation of the detail layer (0-1024)
    /// * `shadow_threshold` - Shadow point, 0-255
    ///
    /// Raises `ValueError` for a non-RGBA image or out-of-range parameters.
    #[pyfunction]
    #[pyo3(signature = (image, sigma=DEFAULT_SIGMA, shadow_threshold=DEFAULT_SHADOW_THRESHOLD))]
    pub fn sketch<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        sigma: f32,
        shadow_threshold: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut output = to_standard(&image);
        let (height, width, channels) = output.dim();
        if channels != 4 {
            return Err(PyValueError::new_err(format!(
                "sketch expects an RGBA image, got {} channels",
                channels
            )));
        }

        let params = SketchParams::new(sigma, shadow_threshold);
        let data = output
            .as_slice_mut()
            .ok_or_else(|| PyValueError::new_err("image is not contiguous"))?;
        stylize_rgba(data, width, height, &params)?;
        Ok(output.into_pyarray(py))
    }

    // ========================================================================
    // Individual Stages
    // ========================================================================

    /// Desaturate to HSL lightness, R=G=B=(max+min)/2, alpha preserved.
    #[pyfunction]
    pub fn desaturate_lightness<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        let mut output = to_standard(&image);
        desaturate_lightness_u8(output.view_mut());
        output.into_pyarray(py)
    }

    /// Color-dodge `top` onto `base`. Both must have the same shape.
    #[pyfunction]
    pub fn color_dodge<'py>(
        py: Python<'py>,
        base: PyReadonlyArray3<'py, u8>,
        top: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let mut output = to_standard(&base);
        color_dodge_u8(output.view_mut(), top.as_array())?;
        Ok(output.into_pyarray(py))
    }

    /// Crush lightness at or below `shadow_threshold` to black and stretch the rest.
    ///
    /// Raises `ValueError` if `shadow_threshold` is outside 0-255.
    #[pyfunction]
    #[pyo3(signature = (image, shadow_threshold=DEFAULT_SHADOW_THRESHOLD))]
    pub fn shadow_crush<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        shadow_threshold: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let shadow = shadow_point(shadow_threshold)?;
        let mut output = to_standard(&image);
        shadow_crush_u8(output.view_mut(), shadow);
        Ok(output.into_pyarray(py))
    }

    /// Python module definition
    #[pymodule]
    pub fn framesketch(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(sketch, m)?)?;

        m.add_function(wrap_pyfunction!(desaturate_lightness, m)?)?;
        m.add_function(wrap_pyfunction!(color_dodge, m)?)?;
        m.add_function(wrap_pyfunction!(shadow_crush, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::framesketch;
