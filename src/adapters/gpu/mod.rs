//! wgpu compute backend for the escape-time kernel.

pub mod device;
pub mod engine;
pub mod pipeline;

use std::sync::Arc;

use crate::adapters::accelerator::{AcceleratorEngines, DeviceSelection};
use crate::adapters::accelerator_error::AcceleratorError;
use crate::core::actions::generate_fractal::ports::escape_time_engine::EscapeTimeEngine;
use device::GpuContext;
use engine::GpuEscapeTimeEngine;
use pipeline::KernelPrecision;

fn engine(
    context: &Arc<GpuContext>,
    precision: KernelPrecision,
) -> Result<Box<dyn EscapeTimeEngine>, AcceleratorError> {
    let engine = GpuEscapeTimeEngine::new(Arc::clone(context), precision)?;
    Ok(Box::new(engine))
}

/// Opens the selected device once and compiles both kernels on it.
#[must_use]
pub fn initialise(selection: &DeviceSelection) -> AcceleratorEngines {
    let context = match GpuContext::init(selection) {
        Ok(context) => Arc::new(context),
        Err(err) => {
            log::warn!("accelerator initialisation failed: {}", err);
            return AcceleratorEngines::unavailable(err);
        }
    };

    let single = engine(&context, KernelPrecision::Single);
    let double = if context.supports_double {
        engine(&context, KernelPrecision::Double)
    } else {
        Err(AcceleratorError::MissingCapability {
            adapter: context.adapter_name.clone(),
            capability: "64-bit floating point shaders",
        })
    };

    for (precision, result) in [("single", &single), ("double", &double)] {
        match result {
            Ok(engine) => {
                log::info!("{} precision kernel ready on {}", precision, engine.display_name())
            }
            Err(err) => log::warn!("{} precision kernel unavailable: {}", precision, err),
        }
    }

    AcceleratorEngines { single, double }
}
