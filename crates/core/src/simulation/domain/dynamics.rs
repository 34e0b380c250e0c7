/// Mutable simulation data that carries its own clock.
pub trait SimulationState {
    /// Current simulation time in seconds.
    fn time(&self) -> f64;
}

/// The static half of a simulation: integrates a state forward in time.
pub trait Dynamics {
    type State: SimulationState;

    /// Integrates one fixed timestep.
    fn step(&self, state: &mut Self::State);

    /// Recomputes derived quantities (contacts, sensors) without
    /// advancing time.
    fn forward(&self, state: &mut Self::State);
}
