use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::point::Point;
use crate::core::data::resolution::Resolution;

/// Single-threaded reference for [`generate_fractal_parallel_rayon`].
///
/// [`generate_fractal_parallel_rayon`]: super::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon
pub fn generate_fractal<Alg: FractalAlgorithm>(
    resolution: Resolution,
    algorithm: &Alg,
) -> Result<Vec<Alg::Success>, Alg::Failure> {
    let width = resolution.width();

    (0..resolution.height())
        .flat_map(|y| (0..width).map(move |x| Point { x, y }))
        .map(|pixel| algorithm.compute(pixel))
        .collect()
}
