use thiserror::Error;

use crate::rendering::domain::camera::{Camera, CameraLookup};
use crate::shared::frame::Frame;

#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("no camera named `{name}` (available: {available})")]
    UnknownCamera { name: String, available: String },
    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { height: u32, width: u32 },
    #[error("renderer failed: {0}")]
    Backend(String),
}

/// Draws a simulation state from a camera into a fixed-size frame.
///
/// One instance serves a single model at a single resolution; see
/// [`RendererCache`](crate::rendering::renderer_cache::RendererCache).
pub trait SceneRenderer: Sized {
    type Model: CameraLookup;
    type State;

    fn create(model: &Self::Model, height: u32, width: u32) -> Result<Self, RenderError>;

    /// `(height, width)` of the frames this renderer produces.
    fn resolution(&self) -> (u32, u32);

    fn render(
        &mut self,
        model: &Self::Model,
        state: &Self::State,
        camera: &Camera,
    ) -> Result<Frame, RenderError>;
}
