use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes a finished raster to an image file. Missing parent directories
/// are created by the presenter.
pub trait ImageFilePresenterPort {
    fn present(&self, buffer: &PixelBuffer, filepath: impl AsRef<Path>) -> std::io::Result<()>;
}
