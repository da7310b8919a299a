use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::adapters::accelerator::DeviceSelection;
use crate::core::actions::animate_zoom::animation_settings::AnimationSettings;
use crate::core::data::complex::Complex;
use crate::core::data::render_params::{CalculationMethod, RenderParameters, RenderParametersError};
use crate::core::fractals::mandelbrot::colour_map::MandelbrotColourMapKind;
use crate::storage::write_calculation_information::TELEMETRY_DIRECTORY;

#[derive(Debug, Parser)]
#[command(name = "mandelbaker", version, about = "Renders the Mandelbrot set as images, tile matrices and zoom videos")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Render one image
    Single {
        #[command(flatten)]
        render: RenderArgs,

        /// File name inside the output directory, `.png` is appended if missing
        #[arg(long)]
        filename: Option<String>,
    },
    /// Render the viewport as a grid of separate tile images
    Matrix {
        #[command(flatten)]
        render: RenderArgs,

        /// Tiles per side
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
        dimension: u32,
    },
    /// Render a zoom towards a focus point and encode it as a video
    Animation {
        #[command(flatten)]
        render: RenderArgs,

        #[command(flatten)]
        animation: AnimationArgs,
    },
    /// List the accelerator adapters that can run the GPU methods
    Devices,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MethodArg {
    Cpu,
    GpuFloat,
    GpuDouble,
}

impl From<MethodArg> for CalculationMethod {
    fn from(method: MethodArg) -> Self {
        match method {
            MethodArg::Cpu => Self::Cpu,
            MethodArg::GpuFloat => Self::GpuFloat,
            MethodArg::GpuDouble => Self::GpuDouble,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColourMapArg {
    Hsv,
    Legacy,
}

impl From<ColourMapArg> for MandelbrotColourMapKind {
    fn from(colour_map: ColourMapArg) -> Self {
        match colour_map {
            ColourMapArg::Hsv => Self::HsvWheel,
            ColourMapArg::Legacy => Self::LegacyModulo,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    #[arg(long, default_value_t = 1000)]
    pub width: u32,

    #[arg(long, default_value_t = 1000)]
    pub height: u32,

    /// Escape iteration cap
    #[arg(long, default_value_t = 255)]
    pub iterations: u32,

    #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
    pub top: f64,

    #[arg(long, default_value_t = -1.5, allow_negative_numbers = true)]
    pub bottom: f64,

    #[arg(long, default_value_t = -2.0, allow_negative_numbers = true)]
    pub left: f64,

    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub right: f64,

    #[arg(long, value_enum, default_value_t = MethodArg::Cpu)]
    pub method: MethodArg,

    #[arg(long, value_enum, default_value_t = ColourMapArg::Hsv)]
    pub colour_map: ColourMapArg,

    /// Directory all images, videos and reports are written below
    #[arg(long, default_value = "output")]
    pub output: PathBuf,

    /// Accelerator adapter to use, matched case-insensitively against its name
    #[arg(long)]
    pub device: Option<String>,

    /// Render on the CPU when the requested accelerator cannot be initialised
    #[arg(long)]
    pub fallback_to_cpu: bool,

    /// Directory for timing reports of matrix and animation renders
    #[arg(long)]
    pub telemetry: Option<PathBuf>,
}

impl RenderArgs {
    pub fn parameters(&self, filename: Option<&str>) -> Result<RenderParameters, RenderParametersError> {
        let builder = RenderParameters::builder()
            .resolution(self.width, self.height)
            .viewport(self.top, self.bottom, self.left, self.right)
            .iterations(self.iterations)
            .method(self.method.into())
            .directory(&self.output);

        match filename {
            Some(filename) => builder.filename(filename).build(),
            None => builder.build(),
        }
    }

    #[must_use]
    pub fn device_selection(&self) -> DeviceSelection {
        match &self.device {
            Some(name) => DeviceSelection::Named(name.clone()),
            None => DeviceSelection::First,
        }
    }

    #[must_use]
    pub fn telemetry_directory(&self) -> PathBuf {
        self.telemetry
            .clone()
            .unwrap_or_else(|| self.output.join(TELEMETRY_DIRECTORY))
    }
}

#[derive(Debug, Clone, Args)]
pub struct AnimationArgs {
    /// Frames per second, clamped to 1..=120
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Length in seconds, clamped to 1..=36000
    #[arg(long, default_value_t = 10)]
    pub duration: u32,

    #[arg(long, default_value_t = 0.36024044343761435, allow_negative_numbers = true)]
    pub end_x: f64,

    #[arg(long, default_value_t = -0.6413130610648031, allow_negative_numbers = true)]
    pub end_y: f64,

    #[arg(long, default_value_t = 3e15)]
    pub end_zoom: f64,

    /// Keep the rendered frames instead of clearing the frame directory
    #[arg(long)]
    pub keep_frames: bool,

    /// Only render frames, do not encode a video
    #[arg(long)]
    pub no_video: bool,

    /// Video encoder executable
    #[arg(long, default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,
}

impl AnimationArgs {
    #[must_use]
    pub fn settings(&self) -> AnimationSettings {
        AnimationSettings::new(
            self.fps,
            self.duration,
            Complex::new(self.end_x, self.end_y),
            self.end_zoom,
            !self.keep_frames,
        )
    }
}
