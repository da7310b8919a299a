use crate::core::data::complex::{Complex, Complex32};
use crate::core::data::resolution::Resolution;
use crate::core::data::viewport::Viewport;
use std::ops::{Add, Div, Mul, Sub};

/// Floating-point type an escape-time kernel can run in.
pub trait KernelFloat:
    Copy
    + PartialOrd
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    type Complex: Copy + Add<Output = Self::Complex> + Mul<Output = Self::Complex>;

    const ESCAPE_RADIUS: Self;

    fn from_u32(value: u32) -> Self;
    fn from_f64(value: f64) -> Self;
    fn complex(real: Self, imag: Self) -> Self::Complex;
    fn magnitude(z: &Self::Complex) -> Self;
}

impl KernelFloat for f64 {
    type Complex = Complex;

    const ESCAPE_RADIUS: Self = 2.0;

    fn from_u32(value: u32) -> Self {
        value as f64
    }

    fn from_f64(value: f64) -> Self {
        value
    }

    fn complex(real: Self, imag: Self) -> Complex {
        Complex { real, imag }
    }

    fn magnitude(z: &Complex) -> Self {
        z.magnitude()
    }
}

impl KernelFloat for f32 {
    type Complex = Complex32;

    const ESCAPE_RADIUS: Self = 2.0;

    fn from_u32(value: u32) -> Self {
        value as f32
    }

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn complex(real: Self, imag: Self) -> Complex32 {
        Complex32 { real, imag }
    }

    fn magnitude(z: &Complex32) -> Self {
        z.magnitude()
    }
}

/// The read-only scalars every escape-time work unit receives: raster size,
/// iteration cap and the four viewport bounds in the kernel's precision.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KernelInput<F> {
    pub width: u32,
    pub height: u32,
    pub iterations: u32,
    pub top: F,
    pub bottom: F,
    pub left: F,
    pub right: F,
}

impl<F: KernelFloat> KernelInput<F> {
    #[must_use]
    pub fn new(resolution: Resolution, viewport: Viewport, iterations: u32) -> Self {
        Self {
            width: resolution.width(),
            height: resolution.height(),
            iterations,
            top: F::from_f64(viewport.top()),
            bottom: F::from_f64(viewport.bottom()),
            left: F::from_f64(viewport.left()),
            right: F::from_f64(viewport.right()),
        }
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
