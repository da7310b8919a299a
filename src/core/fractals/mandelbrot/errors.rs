use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MandelbrotError {
    ZeroMaxIterationsError,
    EmptyRasterError,
}

impl fmt::Display for MandelbrotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroMaxIterationsError => {
                write!(f, "Maximum iterations must be greater than zero")
            }
            Self::EmptyRasterError => {
                write!(f, "Raster must be at least one pixel wide and tall")
            }
        }
    }
}

impl Error for MandelbrotError {}
