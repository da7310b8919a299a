use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::colour_maps::errors::MandelbrotColourMapError;
use std::fmt;

/// Iteration count to colour schemes. Exactly one is used per render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MandelbrotColourMapKind {
    #[default]
    HsvWheel,
    LegacyModulo,
}

impl MandelbrotColourMapKind {
    pub const ALL: &'static [Self] = &[Self::HsvWheel, Self::LegacyModulo];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::HsvWheel => "HSV wheel",
            Self::LegacyModulo => "Legacy modulo",
        }
    }
}

impl fmt::Display for MandelbrotColourMapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).display_name())
    }
}

pub trait MandelbrotColourMap:
    ColourMap<u32, Failure = MandelbrotColourMapError> + Send + Sync
{
    fn kind(&self) -> MandelbrotColourMapKind;

    fn max_iterations(&self) -> u32;
}

impl ColourMap<u32> for Box<dyn MandelbrotColourMap> {
    type Failure = MandelbrotColourMapError;

    fn map(&self, value: u32) -> Result<Colour, Self::Failure> {
        (**self).map(value)
    }

    fn display_name(&self) -> &str {
        (**self).display_name()
    }
}
