use crate::core::data::render_params::{RenderParameters, RenderParametersError};
use crate::core::data::resolution::ResolutionError;
use crate::core::data::viewport::{Viewport, ViewportError};
use std::error::Error;
use std::fmt;

pub const MATRIX_DIRECTORY: &str = "Matrix";

#[derive(Debug, Clone, PartialEq)]
pub enum TileLayoutError {
    ZeroDimension,
    Resolution(ResolutionError),
    Viewport(ViewportError),
    Parameters(RenderParametersError),
}

impl fmt::Display for TileLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "matrix dimension must be at least 1"),
            Self::Resolution(err) => write!(f, "tile resolution is invalid: {}", err),
            Self::Viewport(err) => write!(f, "tile viewport is invalid: {}", err),
            Self::Parameters(err) => write!(f, "tile parameters are invalid: {}", err),
        }
    }
}

impl Error for TileLayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ZeroDimension => None,
            Self::Resolution(err) => Some(err),
            Self::Viewport(err) => Some(err),
            Self::Parameters(err) => Some(err),
        }
    }
}

impl From<ResolutionError> for TileLayoutError {
    fn from(err: ResolutionError) -> Self {
        Self::Resolution(err)
    }
}

impl From<ViewportError> for TileLayoutError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

impl From<RenderParametersError> for TileLayoutError {
    fn from(err: RenderParametersError) -> Self {
        Self::Parameters(err)
    }
}

/// One cell of the matrix: its position, its row-major index and the
/// parameters that render it.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSpec {
    pub index: u32,
    pub column: u32,
    pub row: u32,
    pub params: RenderParameters,
}

/// Splits `base` into `dimension` x `dimension` tiles of the complex plane.
///
/// Tile `(column, row)` covers the base viewport scaled by `1 / dimension`
/// and offset by whole tile extents from the top-left corner. Every tile is
/// rendered at the base resolution divided by `dimension` and written to
/// `Matrix/{width}x{height}_{index}.png` below the base output directory.
/// The base viewport is expected to be aspect-corrected already; tiles are
/// not corrected again.
pub fn tile_parameters(
    base: &RenderParameters,
    dimension: u32,
) -> Result<Vec<TileSpec>, TileLayoutError> {
    if dimension == 0 {
        return Err(TileLayoutError::ZeroDimension);
    }

    let resolution = base.resolution().divided_by(dimension)?;
    let viewport = base.viewport();
    let tile_width = viewport.width() / dimension as f64;
    let tile_height = viewport.height() / dimension as f64;
    let output = base.output().in_subdirectory(MATRIX_DIRECTORY);

    let mut tiles = Vec::with_capacity(dimension as usize * dimension as usize);

    for row in 0..dimension {
        for column in 0..dimension {
            let index = row * dimension + column;
            let top = viewport.top() - tile_height * row as f64;
            let left = viewport.left() + tile_width * column as f64;
            let tile_viewport = Viewport::new(top, top - tile_height, left, left + tile_width)?;
            let filename = format!("{}x{}_{}", resolution.width(), resolution.height(), index);

            tiles.push(TileSpec {
                index,
                column,
                row,
                params: base
                    .with_resolution(resolution)
                    .with_viewport(tile_viewport)
                    .with_output(output.with_filename(&filename)?),
            });
        }
    }

    Ok(tiles)
}
