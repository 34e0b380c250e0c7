use std::path::Path;

use image::{GrayImage, RgbImage, RgbaImage};

use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Writes frames to image files using the `image` crate.
///
/// Accepts grayscale, RGB and RGBA frames.
pub struct ImageFileWriter;

impl ImageFileWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ImageFileWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageWriter for ImageFileWriter {
    fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let (w, h) = (frame.width(), frame.height());
        let data = frame.data().to_vec();
        let invalid = || format!("frame data does not fit {w}x{h}x{}", frame.channels());

        match frame.channels() {
            1 => GrayImage::from_raw(w, h, data).ok_or_else(invalid)?.save(path)?,
            3 => RgbImage::from_raw(w, h, data).ok_or_else(invalid)?.save(path)?,
            4 => RgbaImage::from_raw(w, h, data).ok_or_else(invalid)?.save(path)?,
            n => return Err(format!("unsupported channel count {n}").into()),
        }
        Ok(())
    }
}
