use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_map::{MandelbrotColourMap, MandelbrotColourMapKind};
use crate::core::fractals::mandelbrot::colour_maps::errors::{
    check_iterations, MandelbrotColourMapError,
};

/// Extracts each channel from the iteration count with a different modulus.
/// Interior points are not special-cased.
#[derive(Debug)]
pub struct MandelbrotLegacyModulo {
    max_iterations: u32,
}

impl ColourMap<u32> for MandelbrotLegacyModulo {
    type Failure = MandelbrotColourMapError;

    fn map(&self, iterations: u32) -> Result<Colour, Self::Failure> {
        check_iterations(iterations, self.max_iterations)?;

        Ok(Colour {
            r: (iterations % 3 * 64) as u8,
            g: (iterations % 8 * 32) as u8,
            b: (iterations % 16 * 16) as u8,
        })
    }

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

impl MandelbrotColourMap for MandelbrotLegacyModulo {
    fn kind(&self) -> MandelbrotColourMapKind {
        MandelbrotColourMapKind::LegacyModulo
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl MandelbrotLegacyModulo {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}
