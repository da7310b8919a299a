//! Adapter discovery and device creation.

use crate::adapters::accelerator::{AdapterSummary, DeviceSelection};
use crate::adapters::accelerator_error::AcceleratorError;

/// Device and queue of the chosen adapter plus what the kernels need to know
/// about it.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_name: String,
    pub supports_double: bool,
    pub limits: wgpu::Limits,
}

fn instance() -> wgpu::Instance {
    wgpu::Instance::new(wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    })
}

/// Hardware adapters only; software rasterisers are skipped.
fn hardware_adapters(instance: &wgpu::Instance) -> Vec<wgpu::Adapter> {
    instance
        .enumerate_adapters(wgpu::Backends::all())
        .into_iter()
        .filter(|adapter| adapter.get_info().device_type != wgpu::DeviceType::Cpu)
        .collect()
}

fn summarise(adapter: &wgpu::Adapter) -> AdapterSummary {
    let info = adapter.get_info();

    AdapterSummary {
        name: info.name,
        backend: format!("{:?}", info.backend),
        device_type: format!("{:?}", info.device_type),
        supports_double: adapter.features().contains(wgpu::Features::SHADER_F64),
    }
}

#[must_use]
pub fn list_adapters() -> Vec<AdapterSummary> {
    hardware_adapters(&instance()).iter().map(summarise).collect()
}

fn select_adapter(
    adapters: Vec<wgpu::Adapter>,
    selection: &DeviceSelection,
) -> Result<wgpu::Adapter, AcceleratorError> {
    match selection {
        DeviceSelection::First => adapters.into_iter().next().ok_or(AcceleratorError::NoAdapter),
        DeviceSelection::Named(requested) => {
            let needle = requested.to_lowercase();
            let available = adapters
                .iter()
                .map(|adapter| adapter.get_info().name)
                .collect::<Vec<_>>()
                .join(", ");

            adapters
                .into_iter()
                .find(|adapter| adapter.get_info().name.to_lowercase().contains(&needle))
                .ok_or_else(|| AcceleratorError::AdapterNotFound {
                    requested: requested.clone(),
                    available,
                })
        }
    }
}

impl GpuContext {
    pub fn init(selection: &DeviceSelection) -> Result<Self, AcceleratorError> {
        pollster::block_on(Self::init_internal(selection))
    }

    async fn init_internal(selection: &DeviceSelection) -> Result<Self, AcceleratorError> {
        let instance = instance();
        let adapter = select_adapter(hardware_adapters(&instance), selection)?;
        let summary = summarise(&adapter);

        log::info!("accelerator adapter: {}", summary);

        let required_features = if summary.supports_double {
            wgpu::Features::SHADER_F64
        } else {
            wgpu::Features::empty()
        };

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("mandelbaker"),
                    required_features,
                    // Storage buffers and the largest dispatches need the
                    // adapter's own limits rather than the defaults
                    required_limits: adapter.limits(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|err| AcceleratorError::DeviceCreation(err.to_string()))?;

        Ok(Self {
            limits: device.limits(),
            device,
            queue,
            adapter_name: summary.name,
            supports_double: summary.supports_double,
        })
    }
}
