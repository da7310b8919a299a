use crate::core::data::kernel_input::{KernelFloat, KernelInput};
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PixelToComplexCoordsError {
    PointOutsideRaster { point: Point, width: u32, height: u32 },
}

impl fmt::Display for PixelToComplexCoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointOutsideRaster {
                point,
                width,
                height,
            } => {
                write!(
                    f,
                    "point (x: {}, y: {}) is outside the {}x{} raster",
                    point.x, point.y, width, height
                )
            }
        }
    }
}

impl Error for PixelToComplexCoordsError {}

/// Maps a pixel to its complex coordinate. Pixel `(0, 0)` is the viewport's
/// top-left corner; the right and bottom edges are never reached.
///
/// Both backends evaluate this exact operation order so that they agree on
/// every coordinate.
pub fn pixel_to_complex_coords<F: KernelFloat>(
    point: Point,
    input: &KernelInput<F>,
) -> Result<(F, F), PixelToComplexCoordsError> {
    if point.x >= input.width || point.y >= input.height {
        return Err(PixelToComplexCoordsError::PointOutsideRaster {
            point,
            width: input.width,
            height: input.height,
        });
    }

    let imag = input.top
        - (input.top - input.bottom) * F::from_u32(point.y) / F::from_u32(input.height);
    let real = input.left
        + (input.right - input.left) * F::from_u32(point.x) / F::from_u32(input.width);

    Ok((real, imag))
}
