pub mod camera;
pub mod scene_renderer;
