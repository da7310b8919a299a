use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::adapters::accelerator_error::AcceleratorError;
use crate::adapters::gpu::device::GpuContext;
use crate::adapters::gpu::pipeline::{EscapeTimePipeline, KernelPrecision};
use crate::core::actions::generate_fractal::errors::EngineError;
use crate::core::actions::generate_fractal::ports::escape_time_engine::EscapeTimeEngine;
use crate::core::data::iteration_grid::IterationGrid;
use crate::core::data::render_params::CalculationMethod;
use crate::core::data::resolution::Resolution;
use crate::core::data::viewport::Viewport;

pub const WORKGROUP_SIZE: u32 = 64;

/// Workgroup grid covering `pixel_count` invocations without exceeding the
/// per-dimension dispatch limit.
#[must_use]
pub fn dispatch_size(pixel_count: u32, max_per_dimension: u32) -> (u32, u32) {
    let groups = pixel_count.div_ceil(WORKGROUP_SIZE).max(1);
    let x = groups.min(max_per_dimension.max(1));

    (x, groups.div_ceil(x))
}

/// Escape-time engine dispatching one invocation per pixel to the device.
pub struct GpuEscapeTimeEngine {
    context: Arc<GpuContext>,
    pipeline: EscapeTimePipeline,
    precision: KernelPrecision,
    display_name: String,
}

impl GpuEscapeTimeEngine {
    pub fn new(
        context: Arc<GpuContext>,
        precision: KernelPrecision,
    ) -> Result<Self, AcceleratorError> {
        let pipeline = EscapeTimePipeline::new(&context.device, precision)?;
        let display_name = format!("{} ({})", context.adapter_name, precision.wgsl_type());

        Ok(Self {
            context,
            pipeline,
            precision,
            display_name,
        })
    }

    fn failure(&self, reason: impl Into<String>) -> EngineError {
        EngineError::Accelerator {
            method: self.method(),
            reason: reason.into(),
        }
    }

    fn bounds_bytes(&self, viewport: Viewport) -> Vec<u8> {
        let bounds = [
            viewport.top(),
            viewport.bottom(),
            viewport.left(),
            viewport.right(),
        ];

        match self.precision {
            KernelPrecision::Single => {
                let single = bounds.map(|bound| bound as f32);
                bytemuck::cast_slice(&single).to_vec()
            }
            KernelPrecision::Double => bytemuck::cast_slice(&bounds).to_vec(),
        }
    }

    fn check_output_size(&self, output_bytes: u64) -> Result<(), EngineError> {
        let limits = &self.context.limits;
        let limit = (limits.max_storage_buffer_binding_size as u64).min(limits.max_buffer_size);

        if output_bytes > limit {
            return Err(EngineError::OutputTooLarge {
                bytes: output_bytes,
                limit,
            });
        }

        Ok(())
    }

    async fn read_counts(&self, staging: &wgpu::Buffer) -> Result<Vec<u32>, EngineError> {
        let slice = staging.slice(..);

        let (tx, rx) = futures_channel::oneshot::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        self.context.device.poll(wgpu::Maintain::Wait);

        rx.await
            .map_err(|_| self.failure("readback channel closed"))?
            .map_err(|err| self.failure(format!("buffer mapping failed: {}", err)))?;

        let counts = {
            let view = slice.get_mapped_range();
            bytemuck::cast_slice(&view).to_vec()
        };
        staging.unmap();

        Ok(counts)
    }

    async fn dispatch(
        &self,
        resolution: Resolution,
        viewport: Viewport,
        iterations: u32,
    ) -> Result<Vec<u32>, EngineError> {
        let device = &self.context.device;
        let pixel_count = resolution.pixel_count() as u32;
        let output_bytes = pixel_count as u64 * std::mem::size_of::<u32>() as u64;

        self.check_output_size(output_bytes)?;

        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let params = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("escape_time_params"),
            contents: bytemuck::cast_slice(&[
                resolution.width(),
                resolution.height(),
                iterations,
                pixel_count,
            ]),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let bounds = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("escape_time_bounds"),
            contents: &self.bounds_bytes(viewport),
            usage: wgpu::BufferUsages::STORAGE,
        });

        let counts = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape_time_counts"),
            size: output_bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("escape_time_staging"),
            size: output_bytes,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("escape_time_bind_group"),
            layout: &self.pipeline.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: params.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: bounds.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: counts.as_entire_binding(),
                },
            ],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("escape_time_encoder"),
        });

        {
            let (groups_x, groups_y) = dispatch_size(
                pixel_count,
                self.context.limits.max_compute_workgroups_per_dimension,
            );
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("escape_time_pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline.compute_pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(groups_x, groups_y, 1);
        }

        encoder.copy_buffer_to_buffer(&counts, 0, &staging, 0, output_bytes);
        self.context.queue.submit(std::iter::once(encoder.finish()));

        // Both scopes come off the stack before either error is reported
        let validation = device.pop_error_scope().await;
        let out_of_memory = device.pop_error_scope().await;
        if let Some(err) = first_scope_error(validation, out_of_memory) {
            return Err(self.failure(err.to_string()));
        }

        self.read_counts(&staging).await
    }
}

fn first_scope_error<E>(validation: Option<E>, out_of_memory: Option<E>) -> Option<E> {
    validation.or(out_of_memory)
}

impl EscapeTimeEngine for GpuEscapeTimeEngine {
    fn method(&self) -> CalculationMethod {
        match self.precision {
            KernelPrecision::Single => CalculationMethod::GpuFloat,
            KernelPrecision::Double => CalculationMethod::GpuDouble,
        }
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn compute(
        &self,
        resolution: Resolution,
        viewport: Viewport,
        iterations: u32,
    ) -> Result<IterationGrid, EngineError> {
        let counts = pollster::block_on(self.dispatch(resolution, viewport, iterations))?;

        // A short or corrupt readback is rejected here, never passed on
        Ok(IterationGrid::from_counts(resolution, iterations, counts)?)
    }
}
