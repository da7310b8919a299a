use crate::core::actions::generate_fractal::errors::EngineError;
use crate::core::actions::generate_fractal::generate_fractal_parallel_rayon::generate_fractal_parallel_rayon;
use crate::core::actions::generate_fractal::ports::escape_time_engine::EscapeTimeEngine;
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::kernel_input::KernelInput;
use crate::core::data::render_params::CalculationMethod;
use crate::core::data::resolution::Resolution;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

/// Double-precision escape-time engine running on the rayon thread pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuEscapeTimeEngine;

impl CpuEscapeTimeEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EscapeTimeEngine for CpuEscapeTimeEngine {
    fn method(&self) -> CalculationMethod {
        CalculationMethod::Cpu
    }

    fn display_name(&self) -> &str {
        "CPU (rayon)"
    }

    fn compute(
        &self,
        resolution: Resolution,
        viewport: Viewport,
        iterations: u32,
    ) -> Result<IterationGrid, EngineError> {
        let input = KernelInput::<f64>::new(resolution, viewport, iterations);
        let algorithm = MandelbrotAlgorithm::new(input)?;
        let counts = generate_fractal_parallel_rayon(resolution, &algorithm)?;

        Ok(IterationGrid::from_counts(resolution, iterations, counts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::mandelbrot::errors::MandelbrotError;

    fn full_set() -> Viewport {
        Viewport::new(1.5, -1.5, -2.0, 1.0).unwrap()
    }

    #[test]
    fn test_grid_has_one_count_per_pixel_within_cap() {
        let resolution = Resolution::new(60, 40).unwrap();
        let grid = CpuEscapeTimeEngine::new()
            .compute(resolution, full_set(), 30)
            .unwrap();

        assert_eq!(grid.counts().len(), 2400);
        assert_eq!(grid.iterations(), 30);
        assert!(grid.counts().iter().all(|&count| count <= 30));
    }

    #[test]
    fn test_grid_contains_interior_and_escaped_points() {
        let resolution = Resolution::new(30, 30).unwrap();
        let grid = CpuEscapeTimeEngine::new()
            .compute(resolution, full_set(), 50)
            .unwrap();

        // pixel (20, 15) maps to c = 0
        assert_eq!(grid.get(20, 15), Some(50));
        // top-left corner is -2 + 1.5i
        assert_eq!(grid.get(0, 0), Some(0));
    }

    #[test]
    fn test_zero_iterations_is_invalid_input() {
        let resolution = Resolution::new(4, 4).unwrap();
        let result = CpuEscapeTimeEngine::new().compute(resolution, full_set(), 0);

        assert_eq!(
            result,
            Err(EngineError::InvalidInput(MandelbrotError::ZeroMaxIterationsError))
        );
    }

    #[test]
    fn test_engine_reports_cpu_method() {
        assert_eq!(CpuEscapeTimeEngine::new().method(), CalculationMethod::Cpu);
    }
}
