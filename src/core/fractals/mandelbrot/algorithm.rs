use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::kernel_input::{KernelFloat, KernelInput};
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::util::pixel_to_complex_coords::{
    pixel_to_complex_coords, PixelToComplexCoordsError,
};

/// Number of steps of `z ← z² + c`, starting from `z = c`, before `|z| > 2`.
/// Returns `iterations` when the orbit stays bounded for the whole budget.
#[must_use]
pub fn escape_time<F: KernelFloat>(c_real: F, c_imag: F, iterations: u32) -> u32 {
    let c = F::complex(c_real, c_imag);
    let mut z = c;
    let mut iteration = 0;

    while iteration < iterations {
        if F::magnitude(&z) > F::ESCAPE_RADIUS {
            break;
        }
        z = z * z + c;
        iteration += 1;
    }

    iteration
}

#[derive(Debug)]
pub struct MandelbrotAlgorithm<F> {
    input: KernelInput<F>,
}

impl<F: KernelFloat> FractalAlgorithm for MandelbrotAlgorithm<F> {
    type Success = u32;
    type Failure = PixelToComplexCoordsError;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure> {
        let (real, imag) = pixel_to_complex_coords(pixel, &self.input)?;

        Ok(escape_time(real, imag, self.input.iterations))
    }
}

impl<F: KernelFloat> MandelbrotAlgorithm<F> {
    pub fn new(input: KernelInput<F>) -> Result<Self, MandelbrotError> {
        if input.iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterationsError);
        }

        if input.width == 0 || input.height == 0 {
            return Err(MandelbrotError::EmptyRasterError);
        }

        Ok(Self { input })
    }

    #[must_use]
    pub fn input(&self) -> &KernelInput<F> {
        &self.input
    }
}
