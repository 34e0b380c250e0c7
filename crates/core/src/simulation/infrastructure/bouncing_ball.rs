use crate::rendering::domain::camera::{Camera, CameraLookup};
use crate::simulation::domain::dynamics::{Dynamics, SimulationState};

pub const DEFAULT_TIMESTEP: f64 = 0.002;
pub const GRAVITY: f64 = 9.81;

/// A ball dropped onto flat ground in the x/y plane.
///
/// Small enough to drive the recorder end-to-end without a physics
/// engine: semi-implicit Euler with a restitution coefficient at the
/// ground contact.
#[derive(Clone, Debug)]
pub struct BouncingBallModel {
    pub timestep: f64,
    pub gravity: f64,
    pub radius: f64,
    pub restitution: f64,
    pub cameras: Vec<Camera>,
}

impl Default for BouncingBallModel {
    fn default() -> Self {
        Self {
            timestep: DEFAULT_TIMESTEP,
            gravity: GRAVITY,
            radius: 0.1,
            restitution: 0.8,
            cameras: vec![
                Camera::new("side", [0.0, 0.6], 200.0),
                Camera::new("wide", [0.0, 1.0], 80.0),
            ],
        }
    }
}

impl BouncingBallModel {
    /// State with the ball at rest `height` metres above the ground.
    pub fn make_state(&self, height: f64, horizontal_speed: f64) -> BouncingBallState {
        BouncingBallState {
            time: 0.0,
            position: [0.0, height.max(self.radius)],
            velocity: [horizontal_speed, 0.0],
            in_contact: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BouncingBallState {
    pub time: f64,
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub in_contact: bool,
}

impl SimulationState for BouncingBallState {
    fn time(&self) -> f64 {
        self.time
    }
}

impl Dynamics for BouncingBallModel {
    type State = BouncingBallState;

    fn step(&self, state: &mut BouncingBallState) {
        let dt = self.timestep;
        state.velocity[1] -= self.gravity * dt;
        state.position[0] += state.velocity[0] * dt;
        state.position[1] += state.velocity[1] * dt;

        if state.position[1] < self.radius {
            state.position[1] = self.radius;
            if state.velocity[1] < 0.0 {
                state.velocity[1] = -state.velocity[1] * self.restitution;
            }
        }
        state.time += dt;
        self.forward(state);
    }

    fn forward(&self, state: &mut BouncingBallState) {
        state.in_contact = state.position[1] <= self.radius + 1e-9;
    }
}

impl CameraLookup for BouncingBallModel {
    fn camera(&self, name: &str) -> Option<&Camera> {
        self.cameras.iter().find(|c| c.name == name)
    }

    fn camera_names(&self) -> Vec<&str> {
        self.cameras.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::stepper::advance;
    use approx::assert_relative_eq;

    #[test]
    fn test_step_advances_clock_by_timestep() {
        let model = BouncingBallModel::default();
        let mut state = model.make_state(1.0, 0.0);
        model.step(&mut state);
        assert_relative_eq!(state.time, DEFAULT_TIMESTEP);
        assert!(state.velocity[1] < 0.0);
    }

    #[test]
    fn test_ball_never_sinks_below_ground() {
        let model = BouncingBallModel::default();
        let mut state = model.make_state(1.0, 0.5);
        for _ in 0..5000 {
            model.step(&mut state);
            assert!(state.position[1] >= model.radius);
        }
        assert!(state.position[0] > 0.0);
    }

    #[test]
    fn test_ball_bounces_lower_each_time() {
        let model = BouncingBallModel::default();
        let mut state = model.make_state(1.0, 0.0);
        let mut peaks = Vec::new();
        let mut rising = false;
        let mut prev_y = state.position[1];
        for _ in 0..1500 {
            model.step(&mut state);
            let y = state.position[1];
            if rising && y < prev_y {
                peaks.push(prev_y);
            }
            rising = y > prev_y;
            prev_y = y;
        }
        assert!(peaks.len() >= 3);
        assert!(peaks[1] < peaks[0]);
        assert!(peaks[2] < peaks[1]);
        assert!(peaks[0] < 1.0);
    }

    #[test]
    fn test_free_fall_matches_kinematics_before_impact() {
        let model = BouncingBallModel::default();
        let mut state = model.make_state(2.0, 0.0);
        advance(&model, &mut state, 0.3).unwrap();
        let expected = 2.0 - 0.5 * GRAVITY * state.time * state.time;
        assert_relative_eq!(state.position[1], expected, epsilon = 0.02);
        assert!(!state.in_contact);
    }

    #[test]
    fn test_forward_updates_contact_flag() {
        let model = BouncingBallModel::default();
        let mut state = model.make_state(0.0, 0.0);
        assert!(!state.in_contact);
        advance(&model, &mut state, 0.0).unwrap();
        assert!(state.in_contact);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_cameras_are_found_by_name() {
        let model = BouncingBallModel::default();
        assert_eq!(model.camera("side").unwrap().pixels_per_meter, 200.0);
        assert!(model.camera("top").is_none());
        assert_eq!(model.camera_names(), vec!["side", "wide"]);
    }
}
