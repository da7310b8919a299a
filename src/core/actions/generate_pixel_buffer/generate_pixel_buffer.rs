use rayon::prelude::*;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::pixel_buffer::{PixelBuffer, BYTES_PER_PIXEL};
use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum GeneratePixelBufferError {
    ColourMap(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for GeneratePixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColourMap(err) => write!(f, "colour map error: {}", err),
        }
    }
}

impl Error for GeneratePixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ColourMap(err) => Some(err.as_ref()),
        }
    }
}

/// Maps every iteration count to a colour and packs it as B, G, R into a
/// buffer whose rows are padded to `row_alignment` bytes.
///
/// Rows are filled in parallel; each worker owns one row of the output.
pub fn generate_pixel_buffer<CMap>(
    grid: &IterationGrid,
    mapper: &CMap,
    row_alignment: usize,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    CMap: ColourMap<u32> + Sync,
    CMap::Failure: Sync + 'static,
{
    let resolution = grid.resolution();
    let width = resolution.width() as usize;
    let mut pixels = PixelBuffer::new(resolution, row_alignment);
    let stride = pixels.stride();

    pixels
        .buffer_mut()
        .par_chunks_mut(stride)
        .zip(grid.counts().par_chunks(width))
        .try_for_each(|(row, counts)| -> Result<(), GeneratePixelBufferError> {
            for (bgr, &count) in row.chunks_exact_mut(BYTES_PER_PIXEL).zip(counts) {
                let Colour { r, g, b } = mapper
                    .map(count)
                    .map_err(|err| GeneratePixelBufferError::ColourMap(Box::new(err)))?;

                bgr[0] = b;
                bgr[1] = g;
                bgr[2] = r;
            }

            Ok(())
        })?;

    Ok(pixels)
}
