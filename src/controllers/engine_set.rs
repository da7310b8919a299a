use std::sync::atomic::{AtomicBool, Ordering};

use log::warn;

use crate::adapters::accelerator::AcceleratorEngines;
use crate::adapters::accelerator_error::AcceleratorError;
use crate::controllers::render_error::RenderError;
use crate::core::actions::generate_fractal::cpu_engine::CpuEscapeTimeEngine;
use crate::core::actions::generate_fractal::ports::escape_time_engine::EscapeTimeEngine;
use crate::core::data::render_params::CalculationMethod;

/// The engines available for this session. Accelerator slots keep the
/// initialisation failure so every render asking for them can report it.
pub struct EngineSet {
    cpu: Box<dyn EscapeTimeEngine>,
    single: Result<Box<dyn EscapeTimeEngine>, AcceleratorError>,
    double: Result<Box<dyn EscapeTimeEngine>, AcceleratorError>,
    fallback_to_cpu: bool,
    fallback_reported: AtomicBool,
}

impl EngineSet {
    #[must_use]
    pub fn new(accelerators: AcceleratorEngines, fallback_to_cpu: bool) -> Self {
        Self {
            cpu: Box::new(CpuEscapeTimeEngine::new()),
            single: accelerators.single,
            double: accelerators.double,
            fallback_to_cpu,
            fallback_reported: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn cpu_only() -> Self {
        Self::new(
            AcceleratorEngines::unavailable(AcceleratorError::NotInitialised),
            false,
        )
    }

    #[must_use]
    pub fn fallback_to_cpu(&self) -> bool {
        self.fallback_to_cpu
    }

    /// Why `method` cannot run on its own engine, if it cannot.
    #[must_use]
    pub fn unavailable_reason(&self, method: CalculationMethod) -> Option<&AcceleratorError> {
        match method {
            CalculationMethod::Cpu => None,
            CalculationMethod::GpuFloat => self.single.as_ref().err(),
            CalculationMethod::GpuDouble => self.double.as_ref().err(),
        }
    }

    /// Engine for `method`. A missing accelerator is an error unless CPU
    /// fallback was requested, in which case the CPU engine is returned and
    /// its method is what gets recorded.
    pub fn select(&self, method: CalculationMethod) -> Result<&dyn EscapeTimeEngine, RenderError> {
        let slot = match method {
            CalculationMethod::Cpu => return Ok(self.cpu.as_ref()),
            CalculationMethod::GpuFloat => &self.single,
            CalculationMethod::GpuDouble => &self.double,
        };

        match slot {
            Ok(engine) => Ok(engine.as_ref()),
            Err(err) if self.fallback_to_cpu => {
                if !self.fallback_reported.swap(true, Ordering::Relaxed) {
                    warn!("{} is unavailable ({}), rendering on {}", method, err, self.cpu.display_name());
                }
                Ok(self.cpu.as_ref())
            }
            Err(err) => Err(RenderError::DeviceInitialisation {
                method,
                source: err.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::generate_fractal::errors::EngineError;
    use crate::core::data::iteration_grid::IterationGrid;
    use crate::core::data::resolution::Resolution;
    use crate::core::data::viewport::Viewport;

    struct StubEngine;

    impl EscapeTimeEngine for StubEngine {
        fn method(&self) -> CalculationMethod {
            CalculationMethod::GpuFloat
        }

        fn display_name(&self) -> &str {
            "stub"
        }

        fn compute(
            &self,
            resolution: Resolution,
            _viewport: Viewport,
            iterations: u32,
        ) -> Result<IterationGrid, EngineError> {
            Ok(IterationGrid::from_counts(
                resolution,
                iterations,
                vec![0; resolution.pixel_count()],
            )?)
        }
    }

    #[test]
    fn test_cpu_is_always_available() {
        let engines = EngineSet::cpu_only();

        assert_eq!(engines.select(CalculationMethod::Cpu).unwrap().method(), CalculationMethod::Cpu);
        assert_eq!(engines.unavailable_reason(CalculationMethod::Cpu), None);
    }

    #[test]
    fn test_missing_accelerator_is_device_initialisation_error() {
        let engines = EngineSet::cpu_only();

        let result = engines.select(CalculationMethod::GpuDouble);

        assert!(matches!(
            result,
            Err(RenderError::DeviceInitialisation {
                method: CalculationMethod::GpuDouble,
                source: AcceleratorError::NotInitialised
            })
        ));
    }

    #[test]
    fn test_fallback_selects_cpu_engine() {
        let engines = EngineSet::new(AcceleratorEngines::unavailable(AcceleratorError::NoAdapter), true);

        let engine = engines.select(CalculationMethod::GpuFloat).unwrap();

        assert_eq!(engine.method(), CalculationMethod::Cpu);
        assert_eq!(
            engines.unavailable_reason(CalculationMethod::GpuFloat),
            Some(&AcceleratorError::NoAdapter)
        );
    }

    #[test]
    fn test_available_accelerator_is_selected() {
        let engines = EngineSet::new(
            AcceleratorEngines {
                single: Ok(Box::new(StubEngine)),
                double: Err(AcceleratorError::MissingCapability {
                    adapter: "stub".to_string(),
                    capability: "SHADER_F64",
                }),
            },
            false,
        );

        assert_eq!(engines.select(CalculationMethod::GpuFloat).unwrap().display_name(), "stub");
        assert!(engines.select(CalculationMethod::GpuDouble).is_err());
    }
}
