use crate::adapters::accelerator_error::AcceleratorError;
use std::borrow::Cow;

const ESCAPE_TIME_WGSL: &str = include_str!("shaders/escape_time.wgsl");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelPrecision {
    Single,
    Double,
}

impl KernelPrecision {
    #[must_use]
    pub const fn wgsl_type(self) -> &'static str {
        match self {
            Self::Single => "f32",
            Self::Double => "f64",
        }
    }

    #[must_use]
    pub fn shader_source(self) -> String {
        format!("alias Float = {};\n\n{}", self.wgsl_type(), ESCAPE_TIME_WGSL)
    }
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

/// Compiled escape-time kernel of one precision.
pub struct EscapeTimePipeline {
    pub bind_group_layout: wgpu::BindGroupLayout,
    pub compute_pipeline: wgpu::ComputePipeline,
}

impl EscapeTimePipeline {
    /// Compile errors surface through a validation error scope instead of
    /// the device's uncaptured error handler.
    pub fn new(device: &wgpu::Device, precision: KernelPrecision) -> Result<Self, AcceleratorError> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("escape_time_shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Owned(precision.shader_source())),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("escape_time_bind_group_layout"),
            entries: &[
                storage_entry(0, true),
                storage_entry(1, true),
                storage_entry(2, false),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("escape_time_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let compute_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("escape_time_pipeline"),
            layout: Some(&pipeline_layout),
            module: &module,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        if let Some(err) = pollster::block_on(device.pop_error_scope()) {
            return Err(AcceleratorError::KernelCompilation(err.to_string()));
        }

        Ok(Self {
            bind_group_layout,
            compute_pipeline,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shader_source_declares_precision() {
        assert!(KernelPrecision::Single
            .shader_source()
            .starts_with("alias Float = f32;"));
        assert!(KernelPrecision::Double
            .shader_source()
            .starts_with("alias Float = f64;"));
        assert!(KernelPrecision::Double.shader_source().contains("fn main("));
    }
}
