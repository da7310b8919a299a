use log::warn;

use crate::core::data::resolution::Resolution;
use crate::core::data::viewport::Viewport;

/// Grows the viewport symmetrically along one axis until its aspect ratio
/// matches the raster's, so pixels map to squares of the complex plane.
///
/// A viewport that is too tall gets wider, one that is too wide gets taller.
/// The centre never moves and neither extent shrinks. Bounds that would grow
/// past the f64 range leave the viewport uncorrected, with a warning.
#[must_use]
pub fn adapt_viewport(resolution: Resolution, viewport: Viewport) -> Viewport {
    let (top, bottom, left, right) = adapt_coordinates(
        resolution.width(),
        resolution.height(),
        viewport.top(),
        viewport.bottom(),
        viewport.left(),
        viewport.right(),
    );

    match Viewport::new(top, bottom, left, right) {
        Ok(adapted) => adapted,
        Err(err) => {
            warn!(
                "Keeping viewport {} uncorrected for {}: {}",
                viewport, resolution, err
            );
            viewport
        }
    }
}

#[must_use]
pub fn adapt_coordinates(
    resolution_x: u32,
    resolution_y: u32,
    mut top: f64,
    mut bottom: f64,
    mut left: f64,
    mut right: f64,
) -> (f64, f64, f64, f64) {
    let target_ratio = resolution_x as f64 / resolution_y as f64;
    let current_ratio = (right - left) / (top - bottom);

    if target_ratio > current_ratio {
        let width = (top - bottom) * target_ratio;
        let delta_width = width - (right - left);
        right += delta_width / 2.0;
        left -= delta_width / 2.0;
    } else if target_ratio < current_ratio {
        let height = (right - left) / target_ratio;
        let delta_height = height - (top - bottom);
        top += delta_height / 2.0;
        bottom -= delta_height / 2.0;
    }

    (top, bottom, left, right)
}
