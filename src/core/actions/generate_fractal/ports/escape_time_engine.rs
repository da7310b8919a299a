use crate::core::actions::generate_fractal::errors::EngineError;
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::render_params::CalculationMethod;
use crate::core::data::resolution::Resolution;
use crate::core::data::viewport::Viewport;

/// One backend of the escape-time computation. Every implementation takes
/// the same scalars and returns the same row-major grid, so backends can be
/// swapped per render and compared against each other.
pub trait EscapeTimeEngine: Send + Sync {
    fn method(&self) -> CalculationMethod;

    fn display_name(&self) -> &str;

    fn compute(
        &self,
        resolution: Resolution,
        viewport: Viewport,
        iterations: u32,
    ) -> Result<IterationGrid, EngineError>;
}
