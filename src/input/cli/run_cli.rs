use std::error::Error;

use log::{info, warn};

use crate::adapters::accelerator::{initialise_accelerators, list_accelerators};
use crate::controllers::engine_set::EngineSet;
use crate::controllers::ports::telemetry_sink::{TelemetryKind, TelemetrySinkPort};
use crate::controllers::ports::video_encoder::VideoEncoderPort;
use crate::controllers::render_controller::RenderController;
use crate::core::data::calculation_information::CalculationInformation;
use crate::core::data::render_params::CalculationMethod;
use crate::input::cli::args::{CliArgs, CliCommand, RenderArgs};
use crate::presenters::file::png::PngFilePresenter;
use crate::presenters::video::ffmpeg::FfmpegVideoEncoder;
use crate::storage::write_calculation_information::JsonTelemetrySink;

/// Executes one parsed command line.
pub struct RunCliCommand {
    args: CliArgs,
}

impl RunCliCommand {
    pub fn new(args: CliArgs) -> Self {
        Self { args }
    }

    pub fn execute(&self) -> Result<(), Box<dyn Error>> {
        match &self.args.command {
            CliCommand::Devices => list_devices(),
            CliCommand::Single { render, filename } => {
                let params = render.parameters(filename.as_deref())?;
                let timing = controller(render).render_single(&params)?;

                println!("{}", timing);
                Ok(())
            }
            CliCommand::Matrix { render, dimension } => {
                let params = render.parameters(None)?;
                let (aggregate, tiles) = controller(render).render_matrix(&params, *dimension)?;

                report(render, TelemetryKind::Matrix, &aggregate, &tiles)
            }
            CliCommand::Animation { render, animation } => {
                let params = render.parameters(None)?;
                let settings = animation.settings();
                let ffmpeg = FfmpegVideoEncoder::new(&animation.ffmpeg);
                let encoder: Option<&dyn VideoEncoderPort> =
                    if animation.no_video { None } else { Some(&ffmpeg) };

                let (aggregate, frames) =
                    controller(render).render_animation(&params, &settings, encoder)?;

                let kind = TelemetryKind::Animation {
                    fps: settings.fps(),
                    duration_seconds: settings.duration_seconds(),
                };
                report(render, kind, &aggregate, &frames)
            }
        }
    }
}

fn controller(render: &RenderArgs) -> RenderController<PngFilePresenter> {
    let method = CalculationMethod::from(render.method);
    let engines = if method.uses_accelerator() {
        EngineSet::new(
            initialise_accelerators(&render.device_selection()),
            render.fallback_to_cpu,
        )
    } else {
        EngineSet::cpu_only()
    };

    RenderController::new(PngFilePresenter::new(), engines).with_colour_map(render.colour_map.into())
}

fn report(
    render: &RenderArgs,
    kind: TelemetryKind,
    aggregate: &CalculationInformation,
    units: &[CalculationInformation],
) -> Result<(), Box<dyn Error>> {
    let sink = JsonTelemetrySink::new(render.telemetry_directory());
    let path = sink.store(kind, aggregate, units)?;

    println!("{}", aggregate);
    println!("Calculation information written to {}", path.display());
    Ok(())
}

fn list_devices() -> Result<(), Box<dyn Error>> {
    match list_accelerators() {
        Ok(adapters) if adapters.is_empty() => warn!("No accelerator adapters found"),
        Ok(adapters) => {
            info!("Found {} accelerator adapters", adapters.len());
            for adapter in adapters {
                println!("{}", adapter);
            }
        }
        Err(err) => warn!("Accelerators unavailable: {}", err),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn command(args: &[&str]) -> RunCliCommand {
        RunCliCommand::new(CliArgs::try_parse_from(args).unwrap())
    }

    #[test]
    fn test_single_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().to_string_lossy().into_owned();

        command(&[
            "mandelbaker", "single", "--width", "30", "--height", "20", "--iterations", "20",
            "--output", &output,
        ])
        .execute()
        .unwrap();

        assert!(dir.path().join("MB_30x20.png").is_file());
    }

    #[test]
    fn test_matrix_writes_tiles_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().to_string_lossy().into_owned();

        command(&[
            "mandelbaker", "matrix", "--width", "20", "--height", "20", "--iterations", "10",
            "--dimension", "2", "--output", &output,
        ])
        .execute()
        .unwrap();

        for index in 0..4 {
            assert!(dir.path().join("Matrix").join(format!("10x10_{}.png", index)).is_file());
        }
        let reports = std::fs::read_dir(dir.path().join("CalculationInformation"))
            .unwrap()
            .count();
        assert_eq!(reports, 1);
    }

    #[test]
    fn test_accelerator_without_fallback_fails() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().to_string_lossy().into_owned();

        let result = command(&[
            "mandelbaker", "single", "--width", "10", "--height", "10", "--method", "gpu-float",
            "--device", "no-such-adapter-anywhere", "--output", &output,
        ])
        .execute();

        assert!(result.is_err());
        assert!(!dir.path().join("MB_10x10.png").exists());
    }

    #[test]
    fn test_devices_always_succeeds() {
        assert!(command(&["mandelbaker", "devices"]).execute().is_ok());
    }
}
