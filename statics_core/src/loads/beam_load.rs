//! Beam Load Definitions
//!
//! Loads are positioned by their distance from the beam origin (left end, m).
//! Forces are in kN (distributed: kN/m), moments in kN·m.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

use super::EquivalentLoad;

/// A single load applied to a beam
///
/// ## JSON Example
///
/// ```json
/// [
///   { "type": "Point", "position": 3.0, "magnitude": -10.0 },
///   { "type": "UniformDistributed", "start": 0.0, "end": 6.0, "magnitude": -2.0 },
///   { "type": "Triangular", "start": 2.0, "end": 5.0, "peak_magnitude": -4.0 },
///   { "type": "Moment", "position": 1.5, "magnitude": 8.0 }
/// ]
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Load {
    /// Concentrated force (kN) at a position
    Point { position: f64, magnitude: f64 },

    /// Constant intensity (kN/m) between `start` and `end`
    UniformDistributed { start: f64, end: f64, magnitude: f64 },

    /// Linearly increasing intensity: zero at `start`, `peak_magnitude` (kN/m) at `end`
    Triangular {
        start: f64,
        end: f64,
        peak_magnitude: f64,
    },

    /// Applied couple (kN·m), counterclockwise positive
    Moment { position: f64, magnitude: f64 },
}

impl Load {
    /// Create a point load
    pub fn point(position: f64, magnitude: f64) -> Self {
        Load::Point { position, magnitude }
    }

    /// Create a uniformly distributed load
    pub fn uniform(start: f64, end: f64, magnitude: f64) -> Self {
        Load::UniformDistributed { start, end, magnitude }
    }

    /// Create a triangular load rising from zero at `start` to `peak_magnitude` at `end`
    pub fn triangular(start: f64, end: f64, peak_magnitude: f64) -> Self {
        Load::Triangular {
            start,
            end,
            peak_magnitude,
        }
    }

    /// Create an applied moment
    pub fn moment(position: f64, magnitude: f64) -> Self {
        Load::Moment { position, magnitude }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Load::Point { .. } => "Point",
            Load::UniformDistributed { .. } => "Uniform",
            Load::Triangular { .. } => "Triangular",
            Load::Moment { .. } => "Moment",
        }
    }

    /// Positions where the load introduces a kink or jump in the diagrams
    pub fn critical_positions(&self) -> Vec<f64> {
        match *self {
            Load::Point { position, .. } | Load::Moment { position, .. } => vec![position],
            Load::UniformDistributed { start, end, .. } | Load::Triangular { start, end, .. } => {
                vec![start, end]
            }
        }
    }

    /// Resultant force, centroid and pure moment of the whole load
    pub fn equivalent(&self) -> EquivalentLoad {
        match *self {
            Load::Point { position, magnitude } => EquivalentLoad::force(magnitude, position),
            Load::UniformDistributed { start, end, magnitude } => {
                EquivalentLoad::force(magnitude * (end - start), (start + end) / 2.0)
            }
            Load::Triangular {
                start,
                end,
                peak_magnitude,
            } => {
                let length = end - start;
                EquivalentLoad::force(peak_magnitude * length / 2.0, start + 2.0 * length / 3.0)
            }
            Load::Moment { position, magnitude } => EquivalentLoad::couple(magnitude, position),
        }
    }

    /// Equivalent of the part of the load lying at or left of `x`.
    ///
    /// Returns `None` when nothing of the load has been reached yet. Range
    /// loads contribute only their covered portion, with its own centroid.
    pub fn passed_by(&self, x: f64) -> Option<EquivalentLoad> {
        match *self {
            Load::Point { position, .. } | Load::Moment { position, .. } => {
                (position <= x).then(|| self.equivalent())
            }
            Load::UniformDistributed { start, end, magnitude } => {
                if x <= start {
                    None
                } else if x >= end {
                    Some(self.equivalent())
                } else {
                    let covered = x - start;
                    Some(EquivalentLoad::force(magnitude * covered, start + covered / 2.0))
                }
            }
            Load::Triangular {
                start,
                end,
                peak_magnitude,
            } => {
                if x <= start {
                    None
                } else if x >= end {
                    Some(self.equivalent())
                } else {
                    // Covered part is itself a triangle from zero to q(x)
                    let covered = x - start;
                    let intensity_at_x = peak_magnitude * covered / (end - start);
                    Some(EquivalentLoad::force(
                        intensity_at_x * covered / 2.0,
                        start + 2.0 * covered / 3.0,
                    ))
                }
            }
        }
    }

    /// Validate the load against a beam of the given length.
    ///
    /// `index` is the load's position in the caller's list, used in the field name.
    pub fn validate(&self, index: usize, beam_length: f64) -> CalcResult<()> {
        let field = |name: &str| format!("loads[{}].{}", index, name);

        let finite = |name: &str, value: f64| -> CalcResult<()> {
            if value.is_finite() {
                Ok(())
            } else {
                Err(CalcError::invalid_input(field(name), value.to_string(), "Value must be finite"))
            }
        };

        let within = |name: &str, value: f64| -> CalcResult<()> {
            if (0.0..=beam_length).contains(&value) {
                Ok(())
            } else {
                Err(CalcError::invalid_input(
                    field(name),
                    value.to_string(),
                    format!("Position must lie within [0, {}]", beam_length),
                ))
            }
        };

        match *self {
            Load::Point { position, magnitude } | Load::Moment { position, magnitude } => {
                finite("magnitude", magnitude)?;
                finite("position", position)?;
                within("position", position)
            }
            Load::UniformDistributed { start, end, magnitude }
            | Load::Triangular {
                start,
                end,
                peak_magnitude: magnitude,
            } => {
                finite("magnitude", magnitude)?;
                finite("start", start)?;
                finite("end", end)?;
                within("start", start)?;
                within("end", end)?;
                if start >= end {
                    return Err(CalcError::invalid_input(
                        field("end"),
                        end.to_string(),
                        "Range load must end after it starts",
                    ));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_point_equivalent() {
        let eq = Load::point(2.5, -10.0).equivalent();
        assert!(approx_eq(eq.force, -10.0));
        assert!(approx_eq(eq.position, 2.5));
        assert!(approx_eq(eq.moment, 0.0));
    }

    #[test]
    fn test_uniform_equivalent_at_midpoint() {
        let eq = Load::uniform(1.0, 5.0, -3.0).equivalent();
        assert!(approx_eq(eq.force, -12.0));
        assert!(approx_eq(eq.position, 3.0));
    }

    #[test]
    fn test_triangular_equivalent_at_two_thirds() {
        // Zero at 0, 6 kN/m at 3 m: F = 9 kN at x = 2 m
        let eq = Load::triangular(0.0, 3.0, -6.0).equivalent();
        assert!(approx_eq(eq.force, -9.0));
        assert!(approx_eq(eq.position, 2.0));
    }

    #[test]
    fn test_moment_equivalent_has_no_force() {
        let eq = Load::moment(4.0, 12.0).equivalent();
        assert!(approx_eq(eq.force, 0.0));
        assert!(approx_eq(eq.moment, 12.0));
        assert!(approx_eq(eq.position, 4.0));
    }

    #[test]
    fn test_partial_uniform_coverage() {
        let load = Load::uniform(2.0, 6.0, -1.0);
        assert!(load.passed_by(2.0).is_none());

        let half = load.passed_by(4.0).unwrap();
        assert!(approx_eq(half.force, -2.0));
        assert!(approx_eq(half.position, 3.0));

        let full = load.passed_by(10.0).unwrap();
        assert!(approx_eq(full.force, -4.0));
        assert!(approx_eq(full.position, 4.0));
    }

    #[test]
    fn test_partial_triangular_coverage() {
        // Zero at 0, -6 kN/m at 3 m; at x = 1.5 intensity is -3 kN/m
        let load = Load::triangular(0.0, 3.0, -6.0);
        let part = load.passed_by(1.5).unwrap();
        assert!(approx_eq(part.force, -2.25));
        assert!(approx_eq(part.position, 1.0));
    }

    #[test]
    fn test_point_reached_at_its_position() {
        let load = Load::point(3.0, -10.0);
        assert!(load.passed_by(2.999).is_none());
        assert!(load.passed_by(3.0).is_some());
    }

    #[test]
    fn test_validation() {
        assert!(Load::point(3.0, -10.0).validate(0, 6.0).is_ok());
        assert!(Load::point(7.0, -10.0).validate(0, 6.0).is_err());
        assert!(Load::uniform(4.0, 2.0, -1.0).validate(0, 6.0).is_err());
        assert!(Load::uniform(2.0, 2.0, -1.0).validate(0, 6.0).is_err());
        assert!(Load::triangular(0.0, 6.5, -1.0).validate(0, 6.0).is_err());
        assert!(Load::moment(1.0, f64::NAN).validate(0, 6.0).is_err());
    }

    #[test]
    fn test_validation_field_name() {
        let err = Load::uniform(4.0, 2.0, -1.0).validate(3, 6.0).unwrap_err();
        match err {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "loads[3].end"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_serialization() {
        let load = Load::triangular(1.0, 4.0, -5.0);
        let json = serde_json::to_string(&load).unwrap();
        assert!(json.contains("\"type\":\"Triangular\""));
        assert!(json.contains("\"peak_magnitude\":-5.0"));
        let roundtrip: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(load, roundtrip);
    }
}
