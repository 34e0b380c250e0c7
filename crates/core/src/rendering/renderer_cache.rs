use crate::rendering::domain::camera::CameraLookup;
use crate::rendering::domain::scene_renderer::{RenderError, SceneRenderer};
use crate::shared::frame::Frame;

/// Holds the renderer for one model between frames.
///
/// Keep the cache next to the model it renders and drop both together.
/// Asking for a different resolution replaces the cached renderer.
pub struct RendererCache<R> {
    renderer: Option<R>,
}

impl<R: SceneRenderer> RendererCache<R> {
    pub fn new() -> Self {
        Self { renderer: None }
    }

    pub fn is_empty(&self) -> bool {
        self.renderer.is_none()
    }

    pub fn clear(&mut self) {
        self.renderer = None;
    }

    /// Returns the cached renderer if it matches `height` x `width`,
    /// creating a new one otherwise.
    pub fn get_or_create(
        &mut self,
        model: &R::Model,
        height: u32,
        width: u32,
    ) -> Result<&mut R, RenderError> {
        match self.renderer.take() {
            Some(renderer) if renderer.resolution() == (height, width) => {
                Ok(self.renderer.insert(renderer))
            }
            previous => {
                if previous.is_some() {
                    log::debug!("resolution changed to {width}x{height}, recreating renderer");
                }
                let renderer = R::create(model, height, width)?;
                Ok(self.renderer.insert(renderer))
            }
        }
    }

    /// Renders `state` from the camera called `camera_name`.
    pub fn render(
        &mut self,
        model: &R::Model,
        state: &R::State,
        camera_name: &str,
        height: u32,
        width: u32,
    ) -> Result<Frame, RenderError> {
        let camera = model
            .camera(camera_name)
            .ok_or_else(|| RenderError::UnknownCamera {
                name: camera_name.to_string(),
                available: model.camera_names().join(", "),
            })?;
        let renderer = self.get_or_create(model, height, width)?;
        renderer.render(model, state, camera)
    }
}

impl<R: SceneRenderer> Default for RendererCache<R> {
    fn default() -> Self {
        Self::new()
    }
}
