use std::{error::Error, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MandelbrotColourMapError {
    IterationsExceedMax {
        iterations: u32,
        max_iterations: u32,
    },
}

impl fmt::Display for MandelbrotColourMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IterationsExceedMax {
                iterations,
                max_iterations,
            } => {
                write!(
                    f,
                    "iterations {} exceeds maximum {}",
                    iterations, max_iterations
                )
            }
        }
    }
}

impl Error for MandelbrotColourMapError {}

pub(crate) fn check_iterations(
    iterations: u32,
    max_iterations: u32,
) -> Result<(), MandelbrotColourMapError> {
    if iterations > max_iterations {
        return Err(MandelbrotColourMapError::IterationsExceedMax {
            iterations,
            max_iterations,
        });
    }

    Ok(())
}
