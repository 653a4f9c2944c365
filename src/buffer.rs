//! RGBA pixel buffer borrowed from the caller.
//!
//! Frames arrive as flat row-major RGBA8 bytes (the layout of a canvas
//! `ImageData` or a decoded video frame). `PixelBuffer` checks the
//! dimensions once and hands out `(height, width, 4)` ndarray views so the
//! filters can address pixels as `[[y, x, c]]`.

use ndarray::{ArrayView3, ArrayViewMut3};

use crate::error::{Result, SketchError};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// Mutable view over a caller-owned RGBA8 frame.
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap `data` as a `width` x `height` RGBA frame.
    ///
    /// # Errors
    /// `InvalidArgument` if a dimension is zero or
    /// `data.len() != width * height * 4`.
    pub fn new(data: &'a mut [u8], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SketchError::invalid(format!(
                "frame dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                SketchError::invalid(format!("frame {}x{} is too large", width, height))
            })?;
        if data.len() != expected {
            return Err(SketchError::invalid(format!(
                "buffer length {} does not match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                CHANNELS,
                expected
            )));
        }
        Ok(Self { data, width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &*self.data
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        (self.height, self.width, CHANNELS)
    }

    /// Read-only `(height, width, 4)` view.
    pub fn view(&self) -> ArrayView3<'_, u8> {
        // Length was checked in `new`.
        ArrayView3::from_shape(self.shape(), &*self.data)
            .unwrap_or_else(|_| unreachable!("pixel buffer shape validated on construction"))
    }

    /// Mutable `(height, width, 4)` view.
    pub fn view_mut(&mut self) -> ArrayViewMut3<'_, u8> {
        let shape = self.shape();
        ArrayViewMut3::from_shape(shape, &mut *self.data)
            .unwrap_or_else(|_| unreachable!("pixel buffer shape validated on construction"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_matching_length() {
        let mut data = vec![0u8; 3 * 2 * 4];
        let buf = PixelBuffer::new(&mut data, 3, 2).unwrap();
        assert_eq!(buf.width(), 3);
        assert_eq!(buf.height(), 2);
        assert_eq!(buf.view().dim(), (2, 3, 4));
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let mut data = vec![0u8; 10];
        let err = PixelBuffer::new(&mut data, 2, 2).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_new_rejects_zero_dimension() {
        let mut data: Vec<u8> = Vec::new();
        assert!(PixelBuffer::new(&mut data, 0, 4).is_err());
        assert!(PixelBuffer::new(&mut data, 4, 0).is_err());
    }

    #[test]
    fn test_view_is_row_major() {
        let mut data = vec![0u8; 2 * 2 * 4];
        // Pixel (x=1, y=0) red channel
        data[4] = 200;
        // Pixel (x=0, y=1) alpha channel
        data[8 + 3] = 77;
        let buf = PixelBuffer::new(&mut data, 2, 2).unwrap();
        let view = buf.view();
        assert_eq!(view[[0, 1, 0]], 200);
        assert_eq!(view[[1, 0, 3]], 77);
    }
}
