use crate::core::data::complex::Complex;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidSize { width: f64, height: f64 },
    NotFinite,
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "viewport size must be positive: {}x{}", width, height)
            }
            Self::NotFinite => write!(f, "viewport bounds must be finite numbers"),
        }
    }
}

impl Error for ViewportError {}

/// Rectangle of the complex plane, `top > bottom` and `right > left`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    top: f64,
    bottom: f64,
    left: f64,
    right: f64,
}

impl Viewport {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Result<Self, ViewportError> {
        if !(top.is_finite() && bottom.is_finite() && left.is_finite() && right.is_finite()) {
            return Err(ViewportError::NotFinite);
        }

        let width = right - left;
        let height = top - bottom;

        if width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::InvalidSize { width, height });
        }

        Ok(Self {
            top,
            bottom,
            left,
            right,
        })
    }

    /// Square viewport of side `2 * half_span` around `centre`.
    pub fn centred_on(centre: Complex, half_span: f64) -> Result<Self, ViewportError> {
        Self::new(
            centre.imag + half_span,
            centre.imag - half_span,
            centre.real - half_span,
            centre.real + half_span,
        )
    }

    #[must_use]
    pub fn top(&self) -> f64 {
        self.top
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    #[must_use]
    pub fn left(&self) -> f64 {
        self.left
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width() / self.height()
    }

    #[must_use]
    pub fn centre(&self) -> Complex {
        Complex {
            real: (self.left + self.right) / 2.0,
            imag: (self.top + self.bottom) / 2.0,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top: {}, bottom: {}, left: {}, right: {}",
            self.top, self.bottom, self.left, self.right
        )
    }
}
