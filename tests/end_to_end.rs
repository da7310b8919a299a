use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use mandelbaker::controllers::ports::file_presenter::ImageFilePresenterPort;
use mandelbaker::controllers::ports::telemetry_sink::{TelemetryKind, TelemetrySinkPort};
use mandelbaker::controllers::ports::video_encoder::{VideoEncoderError, VideoEncoderPort};
use mandelbaker::core::actions::animate_zoom::animation_settings::AnimationSettings;
use mandelbaker::core::data::colour::Colour;
use mandelbaker::core::data::complex::Complex;
use mandelbaker::core::data::pixel_buffer::PixelBuffer;
use mandelbaker::{EngineSet, JsonTelemetrySink, PngFilePresenter, RenderController, RenderParameters};

#[derive(Default)]
struct MemoryPresenter {
    images: RefCell<Vec<PixelBuffer>>,
}

impl ImageFilePresenterPort for MemoryPresenter {
    fn present(&self, buffer: &PixelBuffer, _filepath: impl AsRef<Path>) -> std::io::Result<()> {
        self.images.borrow_mut().push(buffer.clone());
        Ok(())
    }
}

/// Checks the frames exist when the encoder runs, then writes a marker file.
struct CheckingEncoder {
    frames_seen: RefCell<usize>,
}

impl VideoEncoderPort for CheckingEncoder {
    fn encode(&self, frames: &[PathBuf], _fps: u32, output: &Path) -> Result<(), VideoEncoderError> {
        assert!(frames.iter().all(|frame| frame.is_file()));
        *self.frames_seen.borrow_mut() = frames.len();
        fs::write(output, b"video")?;
        Ok(())
    }
}

fn full_set(width: u32, height: u32, directory: &Path) -> RenderParameters {
    RenderParameters::builder()
        .resolution(width, height)
        .viewport(1.5, -1.5, -2.0, 1.0)
        .iterations(50)
        .directory(directory)
        .build()
        .unwrap()
}

#[test]
fn test_single_render_has_interior_and_escaped_pixels() {
    let controller = RenderController::new(MemoryPresenter::default(), EngineSet::cpu_only());

    controller
        .render_single(&full_set(100, 100, Path::new("unused")))
        .unwrap();

    let images = controller.presenter().images.borrow();
    let image = &images[0];
    assert_eq!(image.resolution().pixel_count(), 100 * 100);
    assert_eq!(image.to_rgb_bytes().len(), 100 * 100 * 3);

    let pixels: Vec<Colour> = (0..100)
        .flat_map(|y| (0..100).map(move |x| (x, y)))
        .map(|(x, y)| image.pixel(x, y).unwrap())
        .collect();
    assert!(pixels.contains(&Colour::BLACK));
    assert!(pixels.iter().any(|&colour| colour != Colour::BLACK));
}

#[test]
fn test_single_render_writes_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let controller = RenderController::new(PngFilePresenter::new(), EngineSet::cpu_only());

    let timing = controller.render_single(&full_set(64, 48, dir.path())).unwrap();

    let decoded = image::open(dir.path().join("MB_64x48.png")).unwrap().to_rgb8();
    assert_eq!(decoded.dimensions(), (64, 48));
    assert!(timing.start_time() <= timing.computed_time());
    assert!(timing.computed_time() <= timing.end_time());
}

#[test]
fn test_matrix_tiles_and_telemetry() {
    let dir = tempfile::tempdir().unwrap();
    let controller = RenderController::new(PngFilePresenter::new(), EngineSet::cpu_only());

    let (aggregate, tiles) = controller.render_matrix(&full_set(60, 60, dir.path()), 3).unwrap();
    let report = JsonTelemetrySink::below(dir.path())
        .store(TelemetryKind::Matrix, &aggregate, &tiles)
        .unwrap();

    for index in 0..9 {
        let tile = dir.path().join("Matrix").join(format!("20x20_{}.png", index));
        assert!(tile.is_file(), "missing {}", tile.display());
    }
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(report).unwrap()).unwrap();
    assert_eq!(json["units"].as_array().unwrap().len(), 9);
    assert_eq!(json["summary"]["method"], "RenderMatrix");
}

#[test]
fn test_animation_cleans_frames_after_encoding() {
    let dir = tempfile::tempdir().unwrap();
    let controller = RenderController::new(PngFilePresenter::new(), EngineSet::cpu_only());
    let encoder = CheckingEncoder {
        frames_seen: RefCell::new(0),
    };
    let stale = dir.path().join("Animation").join("stale.png");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, b"old").unwrap();
    let settings = AnimationSettings::new(4, 1, Complex::new(-0.75, 0.1), 50.0, true);

    let (aggregate, frames) = controller
        .render_animation(&full_set(32, 32, dir.path()), &settings, Some(&encoder))
        .unwrap();

    assert_eq!(frames.len(), 4);
    assert_eq!(*encoder.frames_seen.borrow(), 4);
    assert_eq!(aggregate.method(), "RenderAnimation");
    assert!(dir.path().join("Animation_32x32_1s_4Fps_-0.75x0.1.mp4").is_file());
    assert!(!dir.path().join("Animation").exists());
}

#[test]
fn test_animation_keeps_frames_when_asked() {
    let dir = tempfile::tempdir().unwrap();
    let controller = RenderController::new(PngFilePresenter::new(), EngineSet::cpu_only());
    let settings = AnimationSettings::new(2, 1, Complex::new(-0.75, 0.1), 50.0, false);

    controller
        .render_animation(&full_set(16, 16, dir.path()), &settings, None)
        .unwrap();

    assert!(dir.path().join("Animation").join("MB_16x16_0.png").is_file());
    assert!(dir.path().join("Animation").join("MB_16x16_1.png").is_file());
}
