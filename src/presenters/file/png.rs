use std::fs;
use std::io;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::controllers::ports::file_presenter::ImageFilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes pixel buffers as 24-bit PNG files.
pub struct PngFilePresenter {}

impl ImageFilePresenterPort for PngFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> io::Result<()> {
        let filepath = filepath.as_ref();

        if let Some(parent) = filepath.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let resolution = buffer.resolution();
        let image = RgbImage::from_raw(resolution.width(), resolution.height(), buffer.to_rgb_bytes())
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("pixel buffer does not hold a full {} image", resolution),
                )
            })?;

        image
            .save_with_format(filepath, ImageFormat::Png)
            .map_err(io::Error::other)
    }
}

impl Default for PngFilePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl PngFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}
