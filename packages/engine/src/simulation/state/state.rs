/// Height (m, positive above the profile's zero) and velocity (m/s,
/// positive upward) of the floating body.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SimulationState {
    pub height: f64,
    pub velocity: f64,
}

impl SimulationState {
    pub fn at_rest(height: f64) -> Self {
        Self { height, velocity: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.height.is_finite() && self.velocity.is_finite()
    }
}

/// `Created -> Running -> Stopped`. Stopped is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    Created,
    Running,
    Stopped,
}
