use rayon::prelude::*;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;

/// Computes every pixel of the raster in parallel, one row per rayon task.
///
/// The result vector is allocated up front and split into disjoint rows, so
/// workers never share a write target. Results are row-major.
pub fn generate_fractal_parallel_rayon<Alg>(
    resolution: Resolution,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure>
where
    Alg: FractalAlgorithm + Sync,
    Alg::Success: Send + Default + Clone,
    Alg::Failure: Send,
{
    let width = resolution.width() as usize;
    let mut results = vec![Alg::Success::default(); resolution.pixel_count()];

    results
        .par_chunks_mut(width)
        .enumerate()
        .try_for_each(|(y, row)| -> Result<(), Alg::Failure> {
            for (x, slot) in row.iter_mut().enumerate() {
                *slot = algorithm.compute(Point {
                    x: x as u32,
                    y: y as u32,
                })?;
            }

            Ok(())
        })?;

    Ok(results)
}
