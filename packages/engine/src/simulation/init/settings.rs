use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Constants of the force model and the start-up timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct PhysicsConfig {
    /// m/s^2
    pub gravity: f64,

    /// kg/m^3
    pub water_density: f64,

    /// Constant third dimension the 2-D profile is extruded along (m)
    pub shape_depth: f64,

    /// Quadratic drag, scaled by the body's own weight force
    pub drag_coefficient: f64,

    /// Delay between `start()` and the first tick
    pub startup_delay_ms: f64,

    /// Elapsed time assumed by the first tick
    pub first_tick_ms: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 9.81,
            water_density: 997.0,
            shape_depth: 0.2,
            drag_coefficient: 1.12,
            startup_delay_ms: 500.0,
            first_tick_ms: 20.0,
        }
    }
}

impl PhysicsConfig {
    /// Parse camelCase JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let config: PhysicsConfig = serde_json::from_str(json)
            .map_err(|e| SimulationError::InvalidParameters(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("gravity", self.gravity),
            ("waterDensity", self.water_density),
            ("shapeDepth", self.shape_depth),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimulationError::InvalidParameters(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("dragCoefficient", self.drag_coefficient),
            ("startupDelayMs", self.startup_delay_ms),
            ("firstTickMs", self.first_tick_ms),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SimulationError::InvalidParameters(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
