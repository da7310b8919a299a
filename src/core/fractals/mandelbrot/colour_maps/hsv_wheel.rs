use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_map::{MandelbrotColourMap, MandelbrotColourMapKind};
use crate::core::fractals::mandelbrot::colour_maps::errors::{
    check_iterations, MandelbrotColourMapError,
};
use crate::core::util::hsv_to_rgb::hsv_to_rgb;

const PERIOD: u32 = 256;

/// Cycles the hue wheel every 256 iterations; points that never escaped are
/// black. The banding does not depend on the iteration cap.
#[derive(Debug)]
pub struct MandelbrotHsvWheel {
    max_iterations: u32,
}

impl ColourMap<u32> for MandelbrotHsvWheel {
    type Failure = MandelbrotColourMapError;

    fn map(&self, iterations: u32) -> Result<Colour, Self::Failure> {
        check_iterations(iterations, self.max_iterations)?;

        if iterations == self.max_iterations {
            return Ok(Colour::BLACK);
        }

        let hue = (iterations % PERIOD) as f64 / (PERIOD - 1) as f64 * 359.0;

        Ok(hsv_to_rgb(hue, 1.0, 1.0))
    }

    fn display_name(&self) -> &str {
        self.kind().display_name()
    }
}

impl MandelbrotColourMap for MandelbrotHsvWheel {
    fn kind(&self) -> MandelbrotColourMapKind {
        MandelbrotColourMapKind::HsvWheel
    }

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

impl MandelbrotHsvWheel {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_returns_black_at_max_iterations() {
        for max_iterations in [1, 50, 255, 256, 1000] {
            let mapper = MandelbrotHsvWheel::new(max_iterations);

            assert_eq!(mapper.map(max_iterations).unwrap(), Colour::BLACK);
        }
    }

    #[test]
    fn test_map_zero_iterations_is_red() {
        let mapper = MandelbrotHsvWheel::new(100);

        assert_eq!(mapper.map(0).unwrap(), Colour { r: 255, g: 0, b: 0 });
    }

    #[test]
    fn test_map_is_periodic_below_cap() {
        let mapper = MandelbrotHsvWheel::new(2000);

        for iterations in 0..700 {
            assert_eq!(
                mapper.map(iterations).unwrap(),
                mapper.map(iterations + 256).unwrap(),
                "period broken at {}",
                iterations
            );
        }
    }

    #[test]
    fn test_escaped_points_are_never_black() {
        let mapper = MandelbrotHsvWheel::new(1000);

        for iterations in 0..256 {
            assert_ne!(mapper.map(iterations).unwrap(), Colour::BLACK);
        }
    }

    #[test]
    fn test_banding_is_independent_of_cap() {
        let small = MandelbrotHsvWheel::new(100);
        let large = MandelbrotHsvWheel::new(10_000);

        for iterations in 0..100 {
            assert_eq!(small.map(iterations).unwrap(), large.map(iterations).unwrap());
        }
    }

    #[test]
    fn test_map_returns_error_when_iterations_exceed_max() {
        let mapper = MandelbrotHsvWheel::new(100);

        assert_eq!(
            mapper.map(101),
            Err(MandelbrotColourMapError::IterationsExceedMax {
                iterations: 101,
                max_iterations: 100
            })
        );
    }
}
