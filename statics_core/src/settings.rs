//! # Solver Settings
//!
//! Numeric knobs shared by the beam and truss solvers. Settings are stored
//! with each project so an analysis can be reproduced exactly.
//!
//! ## JSON Example
//!
//! ```json
//! { "diagram_samples": 200, "equilibrium_tolerance": 0.0001 }
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Default number of uniformly spaced diagram samples along a beam
pub const DEFAULT_DIAGRAM_SAMPLES: usize = 200;

/// Largest accepted diagram sample count
pub const MAX_DIAGRAM_SAMPLES: usize = 100_000;

/// Default absolute tolerance of the equilibrium check (kN, kN·m)
pub const DEFAULT_EQUILIBRIUM_TOLERANCE: f64 = 1e-4;

/// Solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Uniform sample count for shear/moment diagrams (critical points are added on top)
    pub diagram_samples: usize,

    /// Largest residual force or moment still accepted as equilibrium
    pub equilibrium_tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            diagram_samples: DEFAULT_DIAGRAM_SAMPLES,
            equilibrium_tolerance: DEFAULT_EQUILIBRIUM_TOLERANCE,
        }
    }
}

impl SolverSettings {
    /// Set the diagram sample count
    pub fn with_diagram_samples(mut self, samples: usize) -> Self {
        self.diagram_samples = samples;
        self
    }

    /// Set the equilibrium tolerance
    pub fn with_equilibrium_tolerance(mut self, tolerance: f64) -> Self {
        self.equilibrium_tolerance = tolerance;
        self
    }

    /// Validate settings
    pub fn validate(&self) -> CalcResult<()> {
        if self.diagram_samples < 2 {
            return Err(CalcError::invalid_input(
                "diagram_samples",
                self.diagram_samples.to_string(),
                "At least two samples are needed to span the beam",
            ));
        }
        if self.diagram_samples > MAX_DIAGRAM_SAMPLES {
            return Err(CalcError::invalid_input(
                "diagram_samples",
                self.diagram_samples.to_string(),
                format!("At most {} samples are allowed", MAX_DIAGRAM_SAMPLES),
            ));
        }
        if !(self.equilibrium_tolerance.is_finite() && self.equilibrium_tolerance > 0.0) {
            return Err(CalcError::invalid_input(
                "equilibrium_tolerance",
                self.equilibrium_tolerance.to_string(),
                "Tolerance must be a positive number",
            ));
        }
        Ok(())
    }
}
