use crate::domain::profile::AreaProfile;

use super::settings::PhysicsConfig;
use super::state::SimulationState;

/// Forces acting on the body for one step (N, volume in m^3).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ForceBreakdown {
    pub volume: f64,
    pub force_down: f64,
    pub force_up: f64,
    pub force_drag: f64,
    /// Upward positive, drag included
    pub net_force: f64,
}

/// Buoyancy against weight, with quadratic drag opposing the velocity.
///
/// The shape is the 2-D profile extruded along `shape_depth`. Drag is
/// `v^2 * Cd` scaled by the weight force rather than by fluid properties.
pub fn evaluate_forces(
    config: &PhysicsConfig,
    profile: &AreaProfile,
    weight: f64,
    state: &SimulationState,
) -> ForceBreakdown {
    let volume = config.shape_depth * profile.evaluate(state.height);

    let force_down = weight * config.gravity;
    let force_up = config.water_density * volume * config.gravity;
    let force_drag = state.velocity.abs().powi(2) * config.drag_coefficient * force_down;

    let mut net_force = force_up - force_down;
    if state.velocity >= 0.0 {
        net_force -= force_drag;
    } else {
        net_force += force_drag;
    }

    ForceBreakdown {
        volume,
        force_down,
        force_up,
        force_drag,
        net_force,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> AreaProfile {
        AreaProfile::build([(0.0, 0.0), (0.4, 0.12)]).unwrap()
    }

    #[test]
    fn dry_body_feels_only_its_weight() {
        let config = PhysicsConfig::default();
        let forces = evaluate_forces(&config, &profile(), 7.5, &SimulationState::at_rest(-0.2));
        assert_eq!(forces.volume, 0.0);
        assert_eq!(forces.force_up, 0.0);
        assert_eq!(forces.force_drag, 0.0);
        assert!((forces.force_down - 73.575).abs() < 1e-9);
        assert!((forces.net_force + 73.575).abs() < 1e-9);
    }

    #[test]
    fn buoyancy_uses_extruded_volume() {
        let config = PhysicsConfig::default();
        let forces = evaluate_forces(&config, &profile(), 7.5, &SimulationState::at_rest(0.2));
        // area 0.06 m^2 * depth 0.2 m
        assert!((forces.volume - 0.012).abs() < 1e-12);
        assert!((forces.force_up - 997.0 * 0.012 * 9.81).abs() < 1e-9);
    }

    #[test]
    fn drag_opposes_velocity() {
        let config = PhysicsConfig::default();
        let up = SimulationState { height: -1.0, velocity: 0.5 };
        let down = SimulationState { height: -1.0, velocity: -0.5 };

        let rising = evaluate_forces(&config, &profile(), 2.0, &up);
        let falling = evaluate_forces(&config, &profile(), 2.0, &down);

        let drag = 0.25 * 1.12 * 2.0 * 9.81;
        assert!((rising.force_drag - drag).abs() < 1e-9);
        assert!((rising.net_force - (-rising.force_down - drag)).abs() < 1e-9);
        assert!((falling.net_force - (-falling.force_down + drag)).abs() < 1e-9);
    }
}
