use crate::core::data::iteration_grid::IterationGridError;
use crate::core::data::render_params::CalculationMethod;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;
use crate::core::util::pixel_to_complex_coords::PixelToComplexCoordsError;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    InvalidInput(MandelbrotError),
    PixelMapping(PixelToComplexCoordsError),
    Grid(IterationGridError),
    OutputTooLarge {
        bytes: u64,
        limit: u64,
    },
    Accelerator {
        method: CalculationMethod,
        reason: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid kernel input: {}", err),
            Self::PixelMapping(err) => write!(f, "pixel mapping failed: {}", err),
            Self::Grid(err) => write!(f, "invalid iteration grid: {}", err),
            Self::OutputTooLarge { bytes, limit } => {
                write!(
                    f,
                    "output of {} bytes exceeds the device storage limit of {} bytes",
                    bytes, limit
                )
            }
            Self::Accelerator { method, reason } => {
                write!(f, "{} computation failed: {}", method, reason)
            }
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::PixelMapping(err) => Some(err),
            Self::Grid(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MandelbrotError> for EngineError {
    fn from(err: MandelbrotError) -> Self {
        Self::InvalidInput(err)
    }
}

impl From<PixelToComplexCoordsError> for EngineError {
    fn from(err: PixelToComplexCoordsError) -> Self {
        Self::PixelMapping(err)
    }
}

impl From<IterationGridError> for EngineError {
    fn from(err: IterationGridError) -> Self {
        Self::Grid(err)
    }
}
