use crate::core::actions::adapt_viewport::adapt_viewport::adapt_viewport;
use crate::core::actions::animate_zoom::zoom_trajectory::{ZoomTrajectory, ZoomTrajectoryError};
use crate::core::data::render_params::{RenderParameters, RenderParametersError};
use std::error::Error;
use std::fmt;

pub const ANIMATION_DIRECTORY: &str = "Animation";

#[derive(Debug, Clone, PartialEq)]
pub enum FrameLayoutError {
    Trajectory(ZoomTrajectoryError),
    Parameters(RenderParametersError),
}

impl fmt::Display for FrameLayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trajectory(err) => write!(f, "{}", err),
            Self::Parameters(err) => write!(f, "frame parameters are invalid: {}", err),
        }
    }
}

impl Error for FrameLayoutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Trajectory(err) => Some(err),
            Self::Parameters(err) => Some(err),
        }
    }
}

impl From<ZoomTrajectoryError> for FrameLayoutError {
    fn from(err: ZoomTrajectoryError) -> Self {
        Self::Trajectory(err)
    }
}

impl From<RenderParametersError> for FrameLayoutError {
    fn from(err: RenderParametersError) -> Self {
        Self::Parameters(err)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    pub index: u32,
    pub zoom: f64,
    pub params: RenderParameters,
}

/// Parameters of one animation frame: the trajectory's viewport for `frame`
/// fitted to the base resolution, written to
/// `Animation/MB_{width}x{height}_{frame}.png` below the base output directory.
pub fn frame_spec(
    base: &RenderParameters,
    trajectory: &ZoomTrajectory,
    frame: u32,
) -> Result<FrameSpec, FrameLayoutError> {
    let resolution = base.resolution();
    let viewport = adapt_viewport(resolution, trajectory.viewport(frame)?);
    let filename = format!("MB_{}x{}_{}", resolution.width(), resolution.height(), frame);
    let output = base
        .output()
        .in_subdirectory(ANIMATION_DIRECTORY)
        .with_filename(&filename)?;

    Ok(FrameSpec {
        index: frame,
        zoom: trajectory.zoom(frame)?,
        params: base.with_viewport(viewport).with_output(output),
    })
}
