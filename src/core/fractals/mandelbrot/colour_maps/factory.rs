use crate::core::fractals::mandelbrot::colour_map::{MandelbrotColourMap, MandelbrotColourMapKind};
use crate::core::fractals::mandelbrot::colour_maps::{
    hsv_wheel::MandelbrotHsvWheel, legacy_modulo::MandelbrotLegacyModulo,
};

#[must_use]
pub fn mandelbrot_colour_map_factory(
    kind: MandelbrotColourMapKind,
    max_iterations: u32,
) -> Box<dyn MandelbrotColourMap> {
    match kind {
        MandelbrotColourMapKind::HsvWheel => Box::new(MandelbrotHsvWheel::new(max_iterations)),
        MandelbrotColourMapKind::LegacyModulo => {
            Box::new(MandelbrotLegacyModulo::new(max_iterations))
        }
    }
}
