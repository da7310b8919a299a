use std::error::Error;
use std::fmt;
use std::io;

use crate::adapters::accelerator_error::AcceleratorError;
use crate::controllers::ports::telemetry_sink::TelemetryError;
use crate::controllers::ports::video_encoder::VideoEncoderError;
use crate::core::actions::animate_zoom::frame_layout::FrameLayoutError;
use crate::core::actions::animate_zoom::zoom_trajectory::ZoomTrajectoryError;
use crate::core::actions::compose_matrix::tile_layout::TileLayoutError;
use crate::core::actions::generate_fractal::errors::EngineError;
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::GeneratePixelBufferError;
use crate::core::data::calculation_information::CalculationInformationError;
use crate::core::data::render_params::{CalculationMethod, RenderParametersError};

/// Failure of a render, tagged with the stage that failed.
#[derive(Debug)]
pub enum RenderError {
    Parameters(RenderParametersError),
    TileLayout(TileLayoutError),
    Trajectory(ZoomTrajectoryError),
    FrameLayout(FrameLayoutError),
    DeviceInitialisation {
        method: CalculationMethod,
        source: AcceleratorError,
    },
    Computation(EngineError),
    Encoding(GeneratePixelBufferError),
    Timing(CalculationInformationError),
    Storage(io::Error),
    Telemetry(TelemetryError),
    Video(VideoEncoderError),
}

impl RenderError {
    /// Short name of the failing stage for user facing messages.
    #[must_use]
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Parameters(_) | Self::TileLayout(_) | Self::Trajectory(_) | Self::FrameLayout(_) => {
                "parameter validation"
            }
            Self::DeviceInitialisation { .. } => "device initialisation",
            Self::Computation(_) => "computation",
            Self::Encoding(_) | Self::Timing(_) => "encoding",
            Self::Storage(_) | Self::Telemetry(_) => "storage",
            Self::Video(_) => "video encoding",
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: ", self.stage())?;

        match self {
            Self::Parameters(err) => write!(f, "{}", err),
            Self::TileLayout(err) => write!(f, "{}", err),
            Self::Trajectory(err) => write!(f, "{}", err),
            Self::FrameLayout(err) => write!(f, "{}", err),
            Self::DeviceInitialisation { method, source } => {
                write!(f, "{} is unavailable: {}", method, source)
            }
            Self::Computation(err) => write!(f, "{}", err),
            Self::Encoding(err) => write!(f, "{}", err),
            Self::Timing(err) => write!(f, "{}", err),
            Self::Storage(err) => write!(f, "{}", err),
            Self::Telemetry(err) => write!(f, "{}", err),
            Self::Video(err) => write!(f, "{}", err),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parameters(err) => Some(err),
            Self::TileLayout(err) => Some(err),
            Self::Trajectory(err) => Some(err),
            Self::FrameLayout(err) => Some(err),
            Self::DeviceInitialisation { source, .. } => Some(source),
            Self::Computation(err) => Some(err),
            Self::Encoding(err) => Some(err),
            Self::Timing(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Telemetry(err) => Some(err),
            Self::Video(err) => Some(err),
        }
    }
}

impl From<RenderParametersError> for RenderError {
    fn from(err: RenderParametersError) -> Self {
        Self::Parameters(err)
    }
}

impl From<TileLayoutError> for RenderError {
    fn from(err: TileLayoutError) -> Self {
        Self::TileLayout(err)
    }
}

impl From<ZoomTrajectoryError> for RenderError {
    fn from(err: ZoomTrajectoryError) -> Self {
        Self::Trajectory(err)
    }
}

impl From<FrameLayoutError> for RenderError {
    fn from(err: FrameLayoutError) -> Self {
        Self::FrameLayout(err)
    }
}

impl From<EngineError> for RenderError {
    fn from(err: EngineError) -> Self {
        Self::Computation(err)
    }
}

impl From<GeneratePixelBufferError> for RenderError {
    fn from(err: GeneratePixelBufferError) -> Self {
        Self::Encoding(err)
    }
}

impl From<CalculationInformationError> for RenderError {
    fn from(err: CalculationInformationError) -> Self {
        Self::Timing(err)
    }
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        Self::Storage(err)
    }
}

impl From<TelemetryError> for RenderError {
    fn from(err: TelemetryError) -> Self {
        Self::Telemetry(err)
    }
}

impl From<VideoEncoderError> for RenderError {
    fn from(err: VideoEncoderError) -> Self {
        Self::Video(err)
    }
}
