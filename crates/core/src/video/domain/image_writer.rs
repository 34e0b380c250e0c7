use std::path::Path;

use crate::shared::frame::Frame;

/// Persists a single frame as an image file.
pub trait ImageWriter {
    /// Writes `frame` to `path`; the image format follows the extension.
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
