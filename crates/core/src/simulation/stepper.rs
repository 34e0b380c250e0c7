use thiserror::Error;

use crate::simulation::domain::dynamics::{Dynamics, SimulationState};

#[derive(Error, Debug, PartialEq)]
pub enum StepError {
    #[error("simulation time stuck at {time} while advancing to {target}")]
    Stalled { time: f64, target: f64 },
}

/// Brings `state` to simulation time `t_min` or later.
///
/// A state already at or past `t_min` only gets a `forward` pass so
/// derived quantities match the current time; otherwise whole steps are
/// taken until the clock reaches the target. Returns the number of steps.
pub fn advance<M: Dynamics>(model: &M, state: &mut M::State, t_min: f64) -> Result<usize, StepError> {
    if state.time() >= t_min {
        model.forward(state);
        return Ok(0);
    }

    let mut steps = 0;
    while state.time() < t_min {
        let before = state.time();
        model.step(state);
        steps += 1;
        if state.time() <= before {
            return Err(StepError::Stalled {
                time: state.time(),
                target: t_min,
            });
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Clock {
        dt: f64,
    }

    #[derive(Default)]
    struct ClockState {
        time: f64,
        forwards: usize,
    }

    impl SimulationState for ClockState {
        fn time(&self) -> f64 {
            self.time
        }
    }

    impl Dynamics for Clock {
        type State = ClockState;

        fn step(&self, state: &mut ClockState) {
            state.time += self.dt;
        }

        fn forward(&self, state: &mut ClockState) {
            state.forwards += 1;
        }
    }

    #[rstest]
    #[case(0.25, 1.0, 4)]
    #[case(0.3, 1.0, 4)]
    #[case(0.001, 0.0105, 11)]
    fn test_steps_until_target_reached(#[case] dt: f64, #[case] target: f64, #[case] steps: usize) {
        let mut state = ClockState::default();
        assert_eq!(advance(&Clock { dt }, &mut state, target), Ok(steps));
        assert!(state.time >= target);
        assert_eq!(state.forwards, 0);
    }

    #[test]
    fn test_state_past_target_only_runs_forward() {
        let mut state = ClockState {
            time: 2.0,
            forwards: 0,
        };
        assert_eq!(advance(&Clock { dt: 0.1 }, &mut state, 1.5), Ok(0));
        assert_eq!(state.time, 2.0);
        assert_eq!(state.forwards, 1);
    }

    #[test]
    fn test_state_exactly_at_target_runs_forward() {
        let mut state = ClockState::default();
        assert_eq!(advance(&Clock { dt: 0.1 }, &mut state, 0.0), Ok(0));
        assert_eq!(state.forwards, 1);
    }

    #[test]
    fn test_frozen_clock_is_reported() {
        let mut state = ClockState::default();
        let err = advance(&Clock { dt: 0.0 }, &mut state, 1.0).unwrap_err();
        assert_eq!(
            err,
            StepError::Stalled {
                time: 0.0,
                target: 1.0
            }
        );
    }
}
