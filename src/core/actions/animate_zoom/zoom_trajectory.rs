use crate::core::data::complex::Complex;
use crate::core::data::viewport::{Viewport, ViewportError};
use std::error::Error;
use std::fmt;

/// A viewport `3 / zoom` units tall has zoom 1 when it spans the whole set.
const UNIT_SPAN: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZoomTrajectoryError {
    ZeroFrames,
    InvalidEndZoom { end_zoom: f64 },
    FrameOutOfRange { frame: u32, frame_count: u32 },
    Viewport(ViewportError),
}

impl fmt::Display for ZoomTrajectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroFrames => write!(f, "an animation needs at least one frame"),
            Self::InvalidEndZoom { end_zoom } => {
                write!(f, "end zoom must be a positive finite number, got {}", end_zoom)
            }
            Self::FrameOutOfRange { frame, frame_count } => {
                write!(f, "frame {} is outside of 0..{}", frame, frame_count)
            }
            Self::Viewport(err) => write!(f, "frame viewport is invalid: {}", err),
        }
    }
}

impl Error for ZoomTrajectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Viewport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ViewportError> for ZoomTrajectoryError {
    fn from(err: ViewportError) -> Self {
        Self::Viewport(err)
    }
}

/// Geometric zoom from the start viewport's zoom level to `end_zoom`, every
/// frame centred on the end focus.
///
/// `zoom(i) = start_zoom * zoom_step^i`. With a single frame the step is 1
/// and the only frame sits at the start zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomTrajectory {
    focus: Complex,
    start_zoom: f64,
    zoom_step: f64,
    frame_count: u32,
}

impl ZoomTrajectory {
    pub fn new(
        start: Viewport,
        focus: Complex,
        end_zoom: f64,
        frame_count: u32,
    ) -> Result<Self, ZoomTrajectoryError> {
        if frame_count == 0 {
            return Err(ZoomTrajectoryError::ZeroFrames);
        }

        if !end_zoom.is_finite() || end_zoom <= 0.0 {
            return Err(ZoomTrajectoryError::InvalidEndZoom { end_zoom });
        }

        let start_zoom = 1.0 / (start.height() / UNIT_SPAN);
        let zoom_step = if frame_count == 1 {
            1.0
        } else {
            (end_zoom / start_zoom).powf(1.0 / (frame_count - 1) as f64)
        };

        Ok(Self {
            focus,
            start_zoom,
            zoom_step,
            frame_count,
        })
    }

    #[must_use]
    pub fn start_zoom(&self) -> f64 {
        self.start_zoom
    }

    #[must_use]
    pub fn zoom_step(&self) -> f64 {
        self.zoom_step
    }

    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    #[must_use]
    pub fn focus(&self) -> Complex {
        self.focus
    }

    pub fn zoom(&self, frame: u32) -> Result<f64, ZoomTrajectoryError> {
        if frame >= self.frame_count {
            return Err(ZoomTrajectoryError::FrameOutOfRange {
                frame,
                frame_count: self.frame_count,
            });
        }

        Ok(self.start_zoom * self.zoom_step.powf(frame as f64))
    }

    /// Square viewport of half-span `1.5 / zoom(frame)` around the focus.
    pub fn viewport(&self, frame: u32) -> Result<Viewport, ZoomTrajectoryError> {
        let half_span = UNIT_SPAN / 2.0 / self.zoom(frame)?;

        Ok(Viewport::centred_on(self.focus, half_span)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> Viewport {
        Viewport::new(1.5, -1.5, -2.0, 1.0).unwrap()
    }

    fn focus() -> Complex {
        Complex::new(0.36024044343761435, -0.6413130610648031)
    }

    fn assert_relative(a: f64, b: f64) {
        assert!(((a - b) / b).abs() < 1e-9, "{} != {}", a, b);
    }

    #[test]
    fn test_start_zoom_comes_from_viewport_height() {
        let trajectory = ZoomTrajectory::new(start(), focus(), 1e6, 10).unwrap();
        let half_height = Viewport::new(0.75, -0.75, -1.0, 1.0).unwrap();

        assert_eq!(trajectory.start_zoom(), 1.0);
        assert_eq!(
            ZoomTrajectory::new(half_height, focus(), 1e6, 10).unwrap().start_zoom(),
            2.0
        );
    }

    #[test]
    fn test_first_and_last_frames_hit_start_and_end_zoom() {
        let trajectory = ZoomTrajectory::new(start(), focus(), 3e15, 300).unwrap();

        assert_eq!(trajectory.zoom(0).unwrap(), trajectory.start_zoom());
        assert_relative(trajectory.zoom(299).unwrap(), 3e15);
    }

    #[test]
    fn test_zoom_is_strictly_monotonic() {
        let zooming_in = ZoomTrajectory::new(start(), focus(), 1e9, 120).unwrap();
        let zooming_out = ZoomTrajectory::new(start(), focus(), 1e-3, 120).unwrap();

        for frame in 1..120 {
            assert!(zooming_in.zoom(frame).unwrap() > zooming_in.zoom(frame - 1).unwrap());
            assert!(zooming_out.zoom(frame).unwrap() < zooming_out.zoom(frame - 1).unwrap());
        }
    }

    #[test]
    fn test_constant_zoom_when_end_equals_start() {
        let trajectory = ZoomTrajectory::new(start(), focus(), 1.0, 5).unwrap();

        assert_eq!(trajectory.zoom_step(), 1.0);
        assert_eq!(trajectory.zoom(4).unwrap(), 1.0);
    }

    #[test]
    fn test_single_frame_sits_at_start_zoom() {
        let trajectory = ZoomTrajectory::new(start(), focus(), 3e15, 1).unwrap();

        assert_eq!(trajectory.zoom_step(), 1.0);
        assert_eq!(trajectory.zoom(0).unwrap(), 1.0);
        assert!(trajectory.zoom(1).is_err());
    }

    #[test]
    fn test_frame_viewport_is_centred_on_focus() {
        let trajectory = ZoomTrajectory::new(start(), focus(), 1e4, 50).unwrap();
        let last = trajectory.viewport(49).unwrap();

        assert!((last.height() - 3e-4).abs() < 1e-12);
        assert!((last.width() - 3e-4).abs() < 1e-12);
        assert!((last.centre().real - focus().real).abs() < 1e-12);
        assert!((last.centre().imag - focus().imag).abs() < 1e-12);

        let first = trajectory.viewport(0).unwrap();
        assert!((first.top() - (focus().imag + 1.5)).abs() < 1e-12);
        assert!((first.left() - (focus().real - 1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert_eq!(
            ZoomTrajectory::new(start(), focus(), 1e3, 0),
            Err(ZoomTrajectoryError::ZeroFrames)
        );
        assert_eq!(
            ZoomTrajectory::new(start(), focus(), 0.0, 10),
            Err(ZoomTrajectoryError::InvalidEndZoom { end_zoom: 0.0 })
        );
        assert!(ZoomTrajectory::new(start(), focus(), f64::INFINITY, 10).is_err());
    }
}
