use crate::core::data::complex::Complex;
use crate::core::data::resolution::Resolution;

pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 120;
pub const MIN_DURATION_SECONDS: u32 = 1;
pub const MAX_DURATION_SECONDS: u32 = 36_000;

/// How a zoom animation is timed and where it ends.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AnimationSettings {
    fps: u32,
    duration_seconds: u32,
    end_focus: Complex,
    end_zoom: f64,
    clean_directory: bool,
}

impl AnimationSettings {
    /// Frame rate and duration are clamped to their supported ranges.
    #[must_use]
    pub fn new(
        fps: u32,
        duration_seconds: u32,
        end_focus: Complex,
        end_zoom: f64,
        clean_directory: bool,
    ) -> Self {
        Self {
            fps: fps.clamp(MIN_FPS, MAX_FPS),
            duration_seconds: duration_seconds.clamp(MIN_DURATION_SECONDS, MAX_DURATION_SECONDS),
            end_focus,
            end_zoom,
            clean_directory,
        }
    }

    #[must_use]
    pub fn fps(&self) -> u32 {
        self.fps
    }

    #[must_use]
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    #[must_use]
    pub fn end_focus(&self) -> Complex {
        self.end_focus
    }

    #[must_use]
    pub fn end_zoom(&self) -> f64 {
        self.end_zoom
    }

    #[must_use]
    pub fn clean_directory(&self) -> bool {
        self.clean_directory
    }

    #[must_use]
    pub fn frame_count(&self) -> u32 {
        self.fps * self.duration_seconds
    }

    /// `Animation_{w}x{h}_{duration}s_{fps}Fps_{x}x{y}.mp4` with the focus
    /// rounded to three decimals.
    #[must_use]
    pub fn video_filename(&self, resolution: Resolution) -> String {
        format!(
            "Animation_{}x{}_{}s_{}Fps_{}x{}.mp4",
            resolution.width(),
            resolution.height(),
            self.duration_seconds,
            self.fps,
            round_to_thousandths(self.end_focus.real),
            round_to_thousandths(self.end_focus.imag)
        )
    }
}

fn round_to_thousandths(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}
