use super::state::SimulationState;

/// Semi-implicit Euler over `dt` seconds. The position step uses the updated
/// velocity, and height moves opposite to the velocity sign:
/// `h -= dt * (v + dv)`.
pub fn integrate(state: SimulationState, net_force: f64, weight: f64, dt: f64) -> SimulationState {
    let velocity_delta = dt * (net_force / weight);
    let height_delta = dt * (state.velocity + velocity_delta);

    SimulationState {
        height: state.height - height_delta,
        velocity: state.velocity + velocity_delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_step_uses_updated_velocity() {
        let next = integrate(SimulationState { height: 1.0, velocity: 0.5 }, 4.0, 2.0, 0.1);
        // dv = 0.1 * 2 = 0.2, dh = 0.1 * 0.7 = 0.07
        assert!((next.velocity - 0.7).abs() < 1e-12);
        assert!((next.height - 0.93).abs() < 1e-12);
    }

    #[test]
    fn zero_dt_leaves_state_untouched() {
        let state = SimulationState { height: -0.3, velocity: 1.5 };
        assert_eq!(integrate(state, 100.0, 1.0, 0.0), state);
    }
}
