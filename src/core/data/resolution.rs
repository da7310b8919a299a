use std::error::Error;
use std::fmt;

pub const MAX_DIMENSION: u32 = 65_535;

// 24 bits per pixel with the byte count held in a signed 32-bit integer
pub const MAX_PIXELS: u64 = 715_776_516;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    ZeroSize { width: u32, height: u32 },
    DimensionTooLarge { width: u32, height: u32 },
    TooManyPixels { pixels: u64 },
}

impl fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSize { width, height } => {
                write!(f, "resolution must be positive: {}x{}", width, height)
            }
            Self::DimensionTooLarge { width, height } => {
                write!(
                    f,
                    "resolution {}x{} exceeds the maximum pixel dimension of {}",
                    width, height, MAX_DIMENSION
                )
            }
            Self::TooManyPixels { pixels } => {
                write!(
                    f,
                    "{} pixels exceeds the maximum of {} pixels per image",
                    pixels, MAX_PIXELS
                )
            }
        }
    }
}

impl Error for ResolutionError {}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Resolution {
    width: u32,
    height: u32,
}

impl Resolution {
    pub fn new(width: u32, height: u32) -> Result<Self, ResolutionError> {
        if width == 0 || height == 0 {
            return Err(ResolutionError::ZeroSize { width, height });
        }

        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ResolutionError::DimensionTooLarge { width, height });
        }

        let pixels = width as u64 * height as u64;

        if pixels > MAX_PIXELS {
            return Err(ResolutionError::TooManyPixels { pixels });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Resolution of one cell when this resolution is split into a
    /// `divisor` x `divisor` grid. Remainder pixels are dropped.
    pub fn divided_by(&self, divisor: u32) -> Result<Self, ResolutionError> {
        let divisor = divisor.max(1);
        Self::new(self.width / divisor, self.height / divisor)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_new_valid() {
        let resolution = Resolution::new(1920, 1080).unwrap();

        assert_eq!(resolution.width(), 1920);
        assert_eq!(resolution.height(), 1080);
        assert_eq!(resolution.pixel_count(), 2_073_600);
        assert_eq!(resolution.to_string(), "1920x1080");
    }

    #[test]
    fn test_resolution_must_be_positive() {
        assert_eq!(
            Resolution::new(0, 10),
            Err(ResolutionError::ZeroSize { width: 0, height: 10 })
        );
        assert_eq!(
            Resolution::new(10, 0),
            Err(ResolutionError::ZeroSize { width: 10, height: 0 })
        );
    }

    #[test]
    fn test_resolution_dimension_limit() {
        assert!(Resolution::new(65_535, 1).is_ok());
        assert_eq!(
            Resolution::new(65_536, 1),
            Err(ResolutionError::DimensionTooLarge { width: 65_536, height: 1 })
        );
        assert_eq!(
            Resolution::new(1, 70_000),
            Err(ResolutionError::DimensionTooLarge { width: 1, height: 70_000 })
        );
    }

    #[test]
    fn test_resolution_pixel_limit() {
        // 26'754² = 715'776'516, the largest square image
        assert!(Resolution::new(26_754, 26_754).is_ok());
        assert_eq!(
            Resolution::new(26_755, 26_755),
            Err(ResolutionError::TooManyPixels { pixels: 715_830_025 })
        );
        assert!(Resolution::new(35_664, 20_061).is_ok());
    }

    #[test]
    fn test_divided_by() {
        let resolution = Resolution::new(1000, 500).unwrap();

        assert_eq!(resolution.divided_by(3).unwrap(), Resolution::new(333, 166).unwrap());
        assert_eq!(resolution.divided_by(1).unwrap(), resolution);
        assert!(resolution.divided_by(501).is_err());
    }
}
