//! Area profile: cross-sectional area of the floating shape as a
//! piecewise-linear function of submerged height.

use std::collections::HashMap;

use crate::error::SimulationError;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaSample {
    pub height: f64,
    pub area: f64,
}

/// Immutable once built. Samples are sorted ascending by height and heights
/// are pairwise distinct, so every bracket has a non-zero width.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaProfile {
    samples: Vec<AreaSample>,
}

impl AreaProfile {
    /// Build from `(height, area)` pairs in any order.
    pub fn build<I>(samples: I) -> Result<Self, SimulationError>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut samples: Vec<AreaSample> = samples
            .into_iter()
            .map(|(height, area)| AreaSample { height, area })
            .collect();

        if samples.is_empty() {
            return Err(SimulationError::InvalidProfile(
                "at least one sample is required".to_string(),
            ));
        }

        if let Some(bad) = samples
            .iter()
            .find(|s| !s.height.is_finite() || !s.area.is_finite())
        {
            return Err(SimulationError::InvalidProfile(format!(
                "sample ({}, {}) is not finite",
                bad.height, bad.area
            )));
        }

        samples.sort_by(|a, b| a.height.total_cmp(&b.height));

        if let Some(pair) = samples.windows(2).find(|w| w[0].height == w[1].height) {
            return Err(SimulationError::InvalidProfile(format!(
                "duplicate sample height {}",
                pair[0].height
            )));
        }

        Ok(Self { samples })
    }

    /// Build from string-keyed samples such as `("0.5", 12.0)`.
    pub fn from_keyed<K, I>(samples: I) -> Result<Self, SimulationError>
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let parsed = samples
            .into_iter()
            .map(|(key, area)| {
                let key = key.as_ref();
                key.trim()
                    .parse::<f64>()
                    .map(|height| (height, area))
                    .map_err(|_| {
                        SimulationError::InvalidProfile(format!("sample key {:?} is not a number", key))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::build(parsed)
    }

    /// Parse a JSON object of `"height": area` entries.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let raw: HashMap<String, f64> =
            serde_json::from_str(json).map_err(|e| SimulationError::InvalidProfile(e.to_string()))?;
        Self::from_keyed(raw)
    }

    pub fn to_json(&self) -> String {
        let map: serde_json::Map<String, serde_json::Value> = self
            .samples
            .iter()
            .map(|s| (s.height.to_string(), serde_json::Value::from(s.area)))
            .collect();
        serde_json::Value::Object(map).to_string()
    }

    pub fn samples(&self) -> &[AreaSample] {
        &self.samples
    }

    pub fn max_height(&self) -> f64 {
        self.top().height
    }

    pub fn top_area(&self) -> f64 {
        self.top().area
    }

    /// Area at submerged height `h`. Total over all inputs:
    /// NaN and `h <= 0` give 0, anything at or past the topmost sample gives
    /// the topmost area, everything else interpolates linearly.
    pub fn evaluate(&self, h: f64) -> f64 {
        if h.is_nan() || h <= 0.0 {
            return 0.0;
        }

        let top = self.top();
        if h >= top.height {
            return top.area;
        }

        // First sample strictly above h; exists because h < top.height.
        let upper = self.samples.partition_point(|s| s.height <= h);
        let hi = self.samples[upper];
        let lo = if upper == 0 {
            // Every sample sits above h > 0: ramp up from the origin.
            AreaSample { height: 0.0, area: 0.0 }
        } else {
            self.samples[upper - 1]
        };

        let t = (h - lo.height) / (hi.height - lo.height);
        lo.area + t * (hi.area - lo.area)
    }

    fn top(&self) -> AreaSample {
        // Non-empty by construction.
        self.samples[self.samples.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> AreaProfile {
        AreaProfile::build([(0.0, 0.0), (10.0, 100.0)]).unwrap()
    }

    #[test]
    fn interpolates_between_samples() {
        let profile = linear();
        assert_eq!(profile.evaluate(5.0), 50.0);
        assert_eq!(profile.evaluate(-3.0), 0.0);
        assert_eq!(profile.evaluate(15.0), 100.0);
        assert_eq!(profile.evaluate(10.0), 100.0);
    }

    #[test]
    fn degenerate_heights_resolve_to_defined_values() {
        let profile = linear();
        assert_eq!(profile.evaluate(f64::NAN), 0.0);
        assert_eq!(profile.evaluate(f64::NEG_INFINITY), 0.0);
        assert_eq!(profile.evaluate(f64::INFINITY), 100.0);
        assert_eq!(profile.evaluate(0.0), 0.0);
        assert_eq!(profile.evaluate(-0.0), 0.0);
    }

    #[test]
    fn non_positive_heights_are_zero_even_with_negative_samples() {
        let profile = AreaProfile::build([(-2.0, 40.0), (-1.0, 50.0), (1.0, 70.0)]).unwrap();
        for h in [-5.0, -2.0, -1.5, -0.001, 0.0] {
            assert_eq!(profile.evaluate(h), 0.0, "h = {}", h);
        }
        assert_eq!(profile.evaluate(0.5), 65.0);
    }

    #[test]
    fn samples_are_sorted_regardless_of_input_order() {
        let profile = AreaProfile::build([(3.0, 9.0), (1.0, 1.0), (2.0, 4.0)]).unwrap();
        let heights: Vec<f64> = profile.samples().iter().map(|s| s.height).collect();
        assert_eq!(heights, vec![1.0, 2.0, 3.0]);
        assert_eq!(profile.max_height(), 3.0);
        assert_eq!(profile.top_area(), 9.0);
        assert_eq!(profile.evaluate(2.5), 6.5);
    }

    #[test]
    fn ramps_from_origin_below_lowest_sample() {
        let profile = AreaProfile::build([(2.0, 8.0), (4.0, 10.0)]).unwrap();
        assert_eq!(profile.evaluate(1.0), 4.0);
        assert_eq!(profile.evaluate(2.0), 8.0);
        assert_eq!(profile.evaluate(3.0), 9.0);
    }

    #[test]
    fn single_sample_profile_is_a_step() {
        let profile = AreaProfile::build([(0.0, 5.0)]).unwrap();
        assert_eq!(profile.evaluate(-1.0), 0.0);
        assert_eq!(profile.evaluate(0.0), 0.0);
        assert_eq!(profile.evaluate(0.1), 5.0);
    }

    #[test]
    fn interpolation_never_overshoots_monotonic_segments() {
        let profile =
            AreaProfile::build([(0.0, 0.0), (0.1, 0.02), (0.25, 0.05), (0.4, 0.04)]).unwrap();
        let samples = profile.samples().to_vec();
        for pair in samples.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let min = lo.area.min(hi.area);
            let max = lo.area.max(hi.area);
            let mut prev = profile.evaluate(lo.height.max(1e-12));
            for step in 1..=50 {
                let h = lo.height + (hi.height - lo.height) * step as f64 / 50.0;
                let a = profile.evaluate(h);
                assert!(a >= min - 1e-12 && a <= max + 1e-12, "h = {} a = {}", h, a);
                if hi.area >= lo.area {
                    assert!(a >= prev - 1e-12);
                } else {
                    assert!(a <= prev + 1e-12);
                }
                prev = a;
            }
        }
    }

    #[test]
    fn empty_profile_is_rejected() {
        let err = AreaProfile::build(Vec::<(f64, f64)>::new()).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidProfile(_)));
        assert!(matches!(
            AreaProfile::from_json("{}"),
            Err(SimulationError::InvalidProfile(_))
        ));
    }

    #[test]
    fn duplicate_and_non_finite_samples_are_rejected() {
        assert!(matches!(
            AreaProfile::build([(1.0, 1.0), (1.0, 2.0)]),
            Err(SimulationError::InvalidProfile(_))
        ));
        assert!(matches!(
            AreaProfile::build([(f64::NAN, 1.0)]),
            Err(SimulationError::InvalidProfile(_))
        ));
        assert!(matches!(
            AreaProfile::build([(1.0, f64::INFINITY)]),
            Err(SimulationError::InvalidProfile(_))
        ));
    }

    #[test]
    fn parses_string_keyed_json() {
        let profile = AreaProfile::from_json(r#"{"10": 100, "0.0": 0, "5": 20.5}"#).unwrap();
        assert_eq!(profile.samples().len(), 3);
        assert_eq!(profile.evaluate(5.0), 20.5);
        assert_eq!(profile.evaluate(7.5), 60.25);
    }

    #[test]
    fn keys_that_normalize_to_the_same_height_are_rejected() {
        let err = AreaProfile::from_json(r#"{"0.5": 1, "0.50": 2}"#).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidProfile(_)));
    }

    #[test]
    fn bad_keys_and_bad_json_are_rejected() {
        assert!(matches!(
            AreaProfile::from_keyed([("deep", 1.0)]),
            Err(SimulationError::InvalidProfile(_))
        ));
        assert!(matches!(
            AreaProfile::from_json("[1, 2]"),
            Err(SimulationError::InvalidProfile(_))
        ));
    }

    #[test]
    fn json_output_parses_back_to_the_same_profile() {
        let profile = AreaProfile::build([(0.0, 0.0), (0.5, 0.1), (1.0, 0.25)]).unwrap();
        let again = AreaProfile::from_json(&profile.to_json()).unwrap();
        assert_eq!(profile, again);
    }
}
