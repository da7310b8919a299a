use crate::core::data::resolution::Resolution;
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationGridError {
    SizeMismatch { expected: usize, actual: usize },
    CountExceedsCap { index: usize, count: u32, iterations: u32 },
}

impl fmt::Display for IterationGridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "expected {} iteration counts, got {}", expected, actual)
            }
            Self::CountExceedsCap {
                index,
                count,
                iterations,
            } => {
                write!(
                    f,
                    "iteration count {} at index {} exceeds the cap of {}",
                    count, index, iterations
                )
            }
        }
    }
}

impl Error for IterationGridError {}

/// Row-major escape counts, one per pixel, each in `0..=iterations`.
/// A count equal to `iterations` marks a point that never escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationGrid {
    resolution: Resolution,
    iterations: u32,
    counts: Vec<u32>,
}

impl IterationGrid {
    pub fn from_counts(
        resolution: Resolution,
        iterations: u32,
        counts: Vec<u32>,
    ) -> Result<Self, IterationGridError> {
        if counts.len() != resolution.pixel_count() {
            return Err(IterationGridError::SizeMismatch {
                expected: resolution.pixel_count(),
                actual: counts.len(),
            });
        }

        if let Some((index, &count)) = counts.iter().enumerate().find(|(_, c)| **c > iterations) {
            return Err(IterationGridError::CountExceedsCap {
                index,
                count,
                iterations,
            });
        }

        Ok(Self {
            resolution,
            iterations,
            counts,
        })
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.resolution.width() || y >= self.resolution.height() {
            return None;
        }

        self.counts
            .get(y as usize * self.resolution.width() as usize + x as usize)
            .copied()
    }

    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.resolution.height() {
            return None;
        }

        let width = self.resolution.width() as usize;
        let start = y as usize * width;
        Some(&self.counts[start..start + width])
    }

    #[must_use]
    pub fn into_counts(self) -> Vec<u32> {
        self.counts
    }
}
