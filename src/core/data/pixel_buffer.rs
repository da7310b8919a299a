use crate::core::data::colour::Colour;
use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

pub const BYTES_PER_PIXEL: usize = 3;

// Scanlines of 24-bit bitmaps are padded to whole 32-bit words
pub const DEFAULT_ROW_ALIGNMENT: usize = 4;

#[must_use]
pub fn stride_for(width: u32, row_alignment: usize) -> usize {
    let alignment = row_alignment.max(1);
    (width as usize * BYTES_PER_PIXEL).div_ceil(alignment) * alignment
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    PixelOutsideBounds {
        x: u32,
        y: u32,
        resolution: Resolution,
    },
    BoundsMismatch {
        expected_size: usize,
        buffer_size: usize,
    },
    StrideTooSmall {
        stride: usize,
        row_bytes: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                expected_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "expected buffer size {} does not match buffer size {}",
                    expected_size, buffer_size
                )
            }
            Self::StrideTooSmall { stride, row_bytes } => {
                write!(f, "stride {} is shorter than a row of {} bytes", stride, row_bytes)
            }
            Self::PixelOutsideBounds { x, y, resolution } => {
                write!(
                    f,
                    "pixel at x:{}, y:{} outside of image bounds {}",
                    x, y, resolution
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Packed 24-bit pixels in B, G, R byte order, each row padded to `stride`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    resolution: Resolution,
    stride: usize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    #[must_use]
    pub fn new(resolution: Resolution, row_alignment: usize) -> Self {
        let stride = stride_for(resolution.width(), row_alignment);

        Self {
            resolution,
            stride,
            buffer: vec![0; stride * resolution.height() as usize],
        }
    }

    pub fn from_data(
        resolution: Resolution,
        stride: usize,
        buffer: PixelBufferData,
    ) -> Result<Self, PixelBufferError> {
        let expected_size = stride * resolution.height() as usize;
        let row_bytes = resolution.width() as usize * BYTES_PER_PIXEL;

        if stride < row_bytes {
            return Err(PixelBufferError::StrideTooSmall { stride, row_bytes });
        }

        if expected_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                expected_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self {
            resolution,
            stride,
            buffer,
        })
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    pub(crate) fn buffer_mut(&mut self) -> &mut PixelBufferData {
        &mut self.buffer
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    fn index_of(&self, x: u32, y: u32) -> Result<usize, PixelBufferError> {
        if x >= self.resolution.width() || y >= self.resolution.height() {
            return Err(PixelBufferError::PixelOutsideBounds {
                x,
                y,
                resolution: self.resolution,
            });
        }

        Ok(y as usize * self.stride + x as usize * BYTES_PER_PIXEL)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Result<Colour, PixelBufferError> {
        let index = self.index_of(x, y)?;

        Ok(Colour {
            b: self.buffer[index],
            g: self.buffer[index + 1],
            r: self.buffer[index + 2],
        })
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, colour: Colour) -> Result<(), PixelBufferError> {
        let index = self.index_of(x, y)?;

        self.buffer[index] = colour.b;
        self.buffer[index + 1] = colour.g;
        self.buffer[index + 2] = colour.r;

        Ok(())
    }

    /// Tightly packed R, G, B bytes without row padding.
    #[must_use]
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let width = self.resolution.width() as usize;
        let mut rgb = Vec::with_capacity(self.resolution.pixel_count() * BYTES_PER_PIXEL);

        for row in self.buffer.chunks_exact(self.stride) {
            for bgr in row[..width * BYTES_PER_PIXEL].chunks_exact(BYTES_PER_PIXEL) {
                rgb.extend_from_slice(&[bgr[2], bgr[1], bgr[0]]);
            }
        }

        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution(width: u32, height: u32) -> Resolution {
        Resolution::new(width, height).unwrap()
    }

    #[test]
    fn test_stride_is_padded_to_alignment() {
        assert_eq!(stride_for(100, 4), 300);
        assert_eq!(stride_for(3, 4), 12);
        assert_eq!(stride_for(5, 4), 16);
        assert_eq!(stride_for(5, 1), 15);
        assert_eq!(stride_for(5, 0), 15);
    }

    #[test]
    fn test_new_creates_zeroed_padded_buffer() {
        let buffer = PixelBuffer::new(resolution(5, 2), DEFAULT_ROW_ALIGNMENT);

        assert_eq!(buffer.stride(), 16);
        assert_eq!(buffer.buffer_size(), 32);
        assert!(buffer.buffer().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_from_data_valid() {
        let data: Vec<u8> = vec![0; 24];
        let buffer = PixelBuffer::from_data(resolution(2, 2), 12, data.clone()).unwrap();

        assert_eq!(buffer.buffer(), &data);
        assert_eq!(buffer.stride(), 12);
    }

    #[test]
    fn test_from_data_size_mismatch() {
        let result = PixelBuffer::from_data(resolution(2, 2), 8, vec![0; 12]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::BoundsMismatch {
                expected_size: 16,
                buffer_size: 12
            }
        );
    }

    #[test]
    fn test_from_data_stride_shorter_than_row() {
        let result = PixelBuffer::from_data(resolution(2, 2), 4, vec![0; 8]);

        assert_eq!(
            result.unwrap_err(),
            PixelBufferError::StrideTooSmall {
                stride: 4,
                row_bytes: 6
            }
        );
    }

    #[test]
    fn test_set_pixel_writes_bgr_with_stride() {
        let mut buffer = PixelBuffer::new(resolution(5, 2), DEFAULT_ROW_ALIGNMENT);
        let colour = Colour { r: 10, g: 20, b: 30 };

        buffer.set_pixel(1, 1, colour).unwrap();

        // row 1 starts at the 16 byte stride, pixel 1 is 3 bytes in
        assert_eq!(&buffer.buffer()[19..22], &[30, 20, 10]);
        assert_eq!(buffer.pixel(1, 1).unwrap(), colour);
    }

    #[test]
    fn test_set_pixel_outside_bounds() {
        let mut buffer = PixelBuffer::new(resolution(3, 3), DEFAULT_ROW_ALIGNMENT);
        let result = buffer.set_pixel(3, 1, Colour::BLACK);

        assert_eq!(
            result,
            Err(PixelBufferError::PixelOutsideBounds {
                x: 3,
                y: 1,
                resolution: resolution(3, 3)
            })
        );
    }

    #[test]
    fn test_to_rgb_bytes_drops_padding_and_swaps_channels() {
        let mut buffer = PixelBuffer::new(resolution(1, 2), DEFAULT_ROW_ALIGNMENT);
        buffer.set_pixel(0, 0, Colour { r: 1, g: 2, b: 3 }).unwrap();
        buffer.set_pixel(0, 1, Colour { r: 4, g: 5, b: 6 }).unwrap();

        assert_eq!(buffer.buffer_size(), 8);
        assert_eq!(buffer.to_rgb_bytes(), vec![1, 2, 3, 4, 5, 6]);
    }
}
