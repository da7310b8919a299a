use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use mandelbaker::core::actions::generate_fractal::cpu_engine::CpuEscapeTimeEngine;
use mandelbaker::core::actions::generate_fractal::ports::escape_time_engine::EscapeTimeEngine;
use mandelbaker::core::actions::generate_pixel_buffer::generate_pixel_buffer::generate_pixel_buffer;
use mandelbaker::core::data::pixel_buffer::DEFAULT_ROW_ALIGNMENT;
use mandelbaker::core::data::resolution::Resolution;
use mandelbaker::core::data::viewport::Viewport;
use mandelbaker::core::fractals::mandelbrot::colour_map::MandelbrotColourMapKind;
use mandelbaker::core::fractals::mandelbrot::colour_maps::factory::mandelbrot_colour_map_factory;

fn bench_pixel_packing(c: &mut Criterion) {
    let resolution = Resolution::new(1000, 1000).unwrap();
    let viewport = Viewport::new(1.5, -1.5, -2.0, 1.0).unwrap();
    let grid = CpuEscapeTimeEngine::new()
        .compute(resolution, viewport, 255)
        .unwrap();

    for kind in MandelbrotColourMapKind::ALL {
        let colour_map = mandelbrot_colour_map_factory(*kind, 255);

        c.bench_function(&format!("pack_1000x1000_{}", kind), |b| {
            b.iter(|| generate_pixel_buffer(black_box(&grid), &colour_map, DEFAULT_ROW_ALIGNMENT).unwrap())
        });
    }

    let pixels = generate_pixel_buffer(
        &grid,
        &mandelbrot_colour_map_factory(MandelbrotColourMapKind::HsvWheel, 255),
        DEFAULT_ROW_ALIGNMENT,
    )
    .unwrap();
    c.bench_function("to_rgb_bytes_1000x1000", |b| b.iter(|| black_box(&pixels).to_rgb_bytes()));
}

criterion_group!(benches, bench_pixel_packing);
criterion_main!(benches);
