//! Frame capture: file naming, playback stepping and still-image encoding.
//!
//! A capture takes one rasterized video frame, optionally runs the sketch
//! pipeline on it, and encodes it as PNG or JPEG under the name
//! `{source stem}_{frame index}.{ext}`. Frame indices and stepping assume
//! a nominal 24 fps timeline.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use log::debug;

use crate::buffer::PixelBuffer;
use crate::error::{Result, SketchError};
use crate::sketch::{stylize, SketchParams};

/// Nominal frame rate used for frame numbering and single-frame steps.
pub const FRAME_RATE: f64 = 24.0;

/// Still-image format of a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    /// The other format (PNG <-> JPEG).
    pub fn toggled(self) -> Self {
        match self {
            OutputFormat::Png => OutputFormat::Jpeg,
            OutputFormat::Jpeg => OutputFormat::Png,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    /// Short label for on-screen display.
    pub fn label(self) -> &'static str {
        match self {
            OutputFormat::Png => "PNG",
            OutputFormat::Jpeg => "JPG",
        }
    }
}

/// Frame number of a playback position: `floor(seconds * 24)`.
pub fn frame_index(seconds: f64) -> u64 {
    if seconds.is_finite() && seconds > 0.0 {
        (seconds * FRAME_RATE).floor() as u64
    } else {
        0
    }
}

/// Move one frame forward or back. Never goes below zero.
pub fn step_frame(seconds: f64, forward: bool) -> f64 {
    let delta = 1.0 / FRAME_RATE;
    step_seconds(seconds, if forward { delta } else { -delta })
}

/// Move by `delta` seconds. Never goes below zero.
pub fn step_seconds(seconds: f64, delta: f64) -> f64 {
    (seconds + delta).max(0.0)
}

/// Source name without directories and without everything from the first
/// `.` on (`"clip.final.mp4"` -> `"clip"`).
pub fn source_stem(source_name: &str) -> &str {
    let name = Path::new(source_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source_name);
    match name.find('.') {
        Some(i) if i + 1 < name.len() => &name[..i],
        _ => name,
    }
}

/// File name of a capture: `{stem}_{frame}.{ext}`.
pub fn capture_file_name(source_name: &str, seconds: f64, format: OutputFormat) -> String {
    format!(
        "{}_{}.{}",
        source_stem(source_name),
        frame_index(seconds),
        format.extension()
    )
}

/// How a frame is captured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureOptions {
    pub format: OutputFormat,
    /// JPEG quality, 1-100. Ignored for PNG.
    pub quality: u8,
    /// Sketch the frame before encoding.
    pub sketch: Option<SketchParams>,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Png,
            quality: 100,
            sketch: None,
        }
    }
}

impl CaptureOptions {
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_sketch(mut self, params: SketchParams) -> Self {
        self.sketch = Some(params);
        self
    }

    fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.quality) {
            return Err(SketchError::invalid(format!(
                "quality must be within 1-100, got {}",
                self.quality
            )));
        }
        if let Some(params) = &self.sketch {
            params.validate()?;
        }
        Ok(())
    }
}

/// An encoded capture ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFrame {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Encode an RGBA frame. PNG keeps alpha; JPEG drops it.
pub fn encode_frame(buffer: &PixelBuffer, format: OutputFormat, quality: u8) -> Result<Vec<u8>> {
    let width = u32::try_from(buffer.width())
        .map_err(|_| SketchError::invalid("frame width exceeds u32"))?;
    let height = u32::try_from(buffer.height())
        .map_err(|_| SketchError::invalid("frame height exceeds u32"))?;

    let mut bytes = Vec::new();
    match format {
        OutputFormat::Png => {
            PngEncoder::new(&mut bytes).write_image(
                buffer.as_bytes(),
                width,
                height,
                ColorType::Rgba8,
            )?;
        }
        OutputFormat::Jpeg => {
            let rgb: Vec<u8> = buffer
                .as_bytes()
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            JpegEncoder::new_with_quality(&mut bytes, quality).encode(
                &rgb,
                width,
                height,
                ColorType::Rgb8,
            )?;
        }
    }
    Ok(bytes)
}

/// Capture the frame in `buffer` taken at `seconds` from `source_name`.
///
/// When sketching is enabled the buffer is stylized in place before
/// encoding. Options are checked first; on error nothing is modified.
pub fn capture_frame(
    buffer: &mut PixelBuffer,
    source_name: &str,
    seconds: f64,
    options: &CaptureOptions,
) -> Result<CapturedFrame> {
    options.validate()?;

    if let Some(params) = &options.sketch {
        stylize(buffer, params)?;
    }

    let bytes = encode_frame(buffer, options.format, options.quality)?;
    let file_name = capture_file_name(source_name, seconds, options.format);
    debug!(
        "captured {} ({}x{}, {} bytes, sketch={})",
        file_name,
        buffer.width(),
        buffer.height(),
        bytes.len(),
        options.sketch.is_some()
    );

    Ok(CapturedFrame {
        file_name,
        mime_type: options.format.mime_type(),
        bytes,
    })
}
