use crate::adapters::accelerator_error::AcceleratorError;
use crate::core::actions::generate_fractal::ports::escape_time_engine::EscapeTimeEngine;
use std::fmt;

/// Which adapter to run accelerator engines on.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeviceSelection {
    #[default]
    First,
    /// Case-insensitive substring of the adapter name.
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSummary {
    pub name: String,
    pub backend: String,
    pub device_type: String,
    pub supports_double: bool,
}

impl fmt::Display for AdapterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {}, double precision: {})",
            self.name,
            self.backend,
            self.device_type,
            if self.supports_double { "yes" } else { "no" }
        )
    }
}

/// Outcome of bringing up the single and double precision kernels. Either
/// can fail on its own, e.g. when the adapter has no 64-bit float support.
pub struct AcceleratorEngines {
    pub single: Result<Box<dyn EscapeTimeEngine>, AcceleratorError>,
    pub double: Result<Box<dyn EscapeTimeEngine>, AcceleratorError>,
}

impl AcceleratorEngines {
    #[must_use]
    pub fn unavailable(err: AcceleratorError) -> Self {
        Self {
            single: Err(err.clone()),
            double: Err(err),
        }
    }
}

#[cfg(feature = "gpu")]
#[must_use]
pub fn initialise_accelerators(selection: &DeviceSelection) -> AcceleratorEngines {
    crate::adapters::gpu::initialise(selection)
}

#[cfg(not(feature = "gpu"))]
#[must_use]
pub fn initialise_accelerators(_selection: &DeviceSelection) -> AcceleratorEngines {
    AcceleratorEngines::unavailable(AcceleratorError::NotCompiled)
}

#[cfg(feature = "gpu")]
pub fn list_accelerators() -> Result<Vec<AdapterSummary>, AcceleratorError> {
    Ok(crate::adapters::gpu::device::list_adapters())
}

#[cfg(not(feature = "gpu"))]
pub fn list_accelerators() -> Result<Vec<AdapterSummary>, AcceleratorError> {
    Err(AcceleratorError::NotCompiled)
}
