use crate::core::data::point::Point;
use std::error::Error;

/// Per-pixel computation. Implementations hold no state that changes
/// between pixels, so any pixel can be computed on any worker.
pub trait FractalAlgorithm {
    type Success;
    type Failure: Error;

    fn compute(&self, pixel: Point) -> Result<Self::Success, Self::Failure>;
}
