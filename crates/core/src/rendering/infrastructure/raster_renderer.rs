use crate::rendering::domain::camera::Camera;
use crate::rendering::domain::scene_renderer::{RenderError, SceneRenderer};
use crate::shared::frame::Frame;
use crate::simulation::infrastructure::bouncing_ball::{BouncingBallModel, BouncingBallState};

const SKY_TOP: [u8; 3] = [118, 166, 222];
const SKY_HORIZON: [u8; 3] = [206, 226, 245];
const GROUND: [u8; 3] = [92, 112, 78];
const BALL: [u8; 3] = [214, 74, 52];
const BALL_CONTACT: [u8; 3] = [240, 160, 40];

/// Software rasterizer for [`BouncingBallModel`] scenes.
///
/// Draws a vertical sky gradient, the ground half-plane and the ball as
/// a filled disc, one sample per pixel centre.
pub struct RasterRenderer {
    height: u32,
    width: u32,
}

impl SceneRenderer for RasterRenderer {
    type Model = BouncingBallModel;
    type State = BouncingBallState;

    fn create(_model: &BouncingBallModel, height: u32, width: u32) -> Result<Self, RenderError> {
        if height == 0 || width == 0 {
            return Err(RenderError::InvalidResolution { height, width });
        }
        Ok(Self { height, width })
    }

    fn resolution(&self) -> (u32, u32) {
        (self.height, self.width)
    }

    fn render(
        &mut self,
        model: &BouncingBallModel,
        state: &BouncingBallState,
        camera: &Camera,
    ) -> Result<Frame, RenderError> {
        if !(camera.pixels_per_meter.is_finite() && camera.pixels_per_meter > 0.0) {
            return Err(RenderError::Backend(format!(
                "camera `{}` has scale {}",
                camera.name, camera.pixels_per_meter
            )));
        }

        let (height, width) = (self.height, self.width);
        let mut frame = Frame::filled(width, height, 3, 0);
        let mut pixels = frame.as_ndarray_mut();
        let ball_color = if state.in_contact { BALL_CONTACT } else { BALL };
        let radius_sq = model.radius * model.radius;

        for row in 0..height as usize {
            let sky_t = row as f64 / height as f64;
            for col in 0..width as usize {
                let [x, y] = camera.unproject(row, col, height, width);
                let dx = x - state.position[0];
                let dy = y - state.position[1];

                let color = if dx * dx + dy * dy <= radius_sq {
                    ball_color
                } else if y < 0.0 {
                    GROUND
                } else {
                    lerp(SKY_TOP, SKY_HORIZON, sky_t)
                };
                for (channel, value) in color.into_iter().enumerate() {
                    pixels[[row, col, channel]] = value;
                }
            }
        }
        Ok(frame)
    }
}

fn lerp(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let t = t.clamp(0.0, 1.0);
    let mix = |i: usize| (a[i] as f64 + (b[i] as f64 - a[i] as f64) * t).round() as u8;
    [mix(0), mix(1), mix(2)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::renderer_cache::RendererCache;

    fn pixel(frame: &Frame, row: usize, col: usize) -> [u8; 3] {
        let view = frame.as_ndarray();
        [view[[row, col, 0]], view[[row, col, 1]], view[[row, col, 2]]]
    }

    #[test]
    fn test_zero_resolution_is_rejected() {
        let model = BouncingBallModel::default();
        assert!(matches!(
            RasterRenderer::create(&model, 0, 10),
            Err(RenderError::InvalidResolution { height: 0, width: 10 })
        ));
    }

    #[test]
    fn test_ball_ground_and_sky_land_where_expected() {
        let model = BouncingBallModel::default();
        let state = model.make_state(0.5, 0.0);
        let camera = Camera::new("test", [0.0, 0.5], 100.0);
        let mut renderer = RasterRenderer::create(&model, 120, 160).unwrap();
        let frame = renderer.render(&model, &state, &camera).unwrap();

        assert_eq!(frame.shape(), (120, 160, 3));
        // Ball sits at the camera centre.
        assert_eq!(pixel(&frame, 60, 80), BALL);
        // Ground starts 0.5 m below the centre.
        assert_eq!(pixel(&frame, 115, 5), GROUND);
        assert_eq!(pixel(&frame, 0, 0), SKY_TOP);
    }

    #[test]
    fn test_contact_changes_ball_color() {
        let model = BouncingBallModel::default();
        let mut state = model.make_state(model.radius, 0.0);
        state.in_contact = true;
        let camera = Camera::new("test", [0.0, model.radius], 100.0);
        let mut renderer = RasterRenderer::create(&model, 40, 40).unwrap();
        let frame = renderer.render(&model, &state, &camera).unwrap();
        assert_eq!(pixel(&frame, 20, 20), BALL_CONTACT);
    }

    #[test]
    fn test_degenerate_camera_scale_is_an_error() {
        let model = BouncingBallModel::default();
        let state = model.make_state(1.0, 0.0);
        let camera = Camera::new("flat", [0.0, 0.0], 0.0);
        let mut renderer = RasterRenderer::create(&model, 10, 10).unwrap();
        assert!(matches!(
            renderer.render(&model, &state, &camera),
            Err(RenderError::Backend(_))
        ));
    }

    #[test]
    fn test_renders_through_cache_by_camera_name() {
        let model = BouncingBallModel::default();
        let state = model.make_state(0.6, 0.0);
        let mut cache = RendererCache::<RasterRenderer>::new();
        let frame = cache.render(&model, &state, "side", 48, 64).unwrap();
        assert_eq!(frame.shape(), (48, 64, 3));
        // "side" is centred on the ball's start height.
        assert_eq!(pixel(&frame, 24, 32), BALL);
    }

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp(SKY_TOP, SKY_HORIZON, 0.0), SKY_TOP);
        assert_eq!(lerp(SKY_TOP, SKY_HORIZON, 1.0), SKY_HORIZON);
        assert_eq!(lerp([0, 0, 0], [100, 200, 50], 0.5), [50, 100, 25]);
    }
}
