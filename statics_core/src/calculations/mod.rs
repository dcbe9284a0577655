//! # Structural Calculations
//!
//! Beam and truss solvers. Each analysis follows the same shape:
//!
//! - `*Config` - Input model (JSON-serializable)
//! - `*Result` - Output, with `is_valid` and an optional user-facing error
//! - `analyze_*(config) -> CalcResult<*Result>` - Pure, deterministic analysis
//!
//! `Err` is reserved for malformed input. Structures that cannot be solved
//! (unstable, unsupported, unsolved) come back as invalid results.
//!
//! ## Available Calculations
//!
//! - [`beam`] - Single-span beams on one or two supports
//! - [`truss`] - Pin-jointed plane trusses via the method of joints

pub mod beam;
pub mod beam_analysis;
pub mod beam_reactions;
pub mod equilibrium;
pub mod method_of_joints;
pub mod presets;
pub mod supports;
pub mod truss;

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::settings::SolverSettings;

// Re-export commonly used types
pub use beam::{analyze_beam, analyze_beam_with, AnalysisResult, BeamConfig};
pub use presets::{BeamPreset, Preset, TrussPreset};
pub use supports::{Determinacy, Support, SupportKind};
pub use truss::{analyze_truss, analyze_truss_with, TrussConfig, TrussResult};

/// A labelled calculation stored in a project.
///
/// ## JSON Example
///
/// ```json
/// {
///   "type": "Beam",
///   "label": "B-1",
///   "config": { "length": 4.0, "supports": [{ "kind": "Fixed", "position": 0.0 }], "loads": [] }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    Beam { label: String, config: BeamConfig },
    Truss { label: String, config: TrussConfig },
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Beam { label, .. } | CalculationItem::Truss { label, .. } => label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Beam { .. } => "Beam",
            CalculationItem::Truss { .. } => "Truss",
        }
    }

    /// Run the matching solver
    pub fn analyze(&self, settings: &SolverSettings) -> CalcResult<CalculationOutput> {
        let label = self.label().to_string();
        Ok(match self {
            CalculationItem::Beam { config, .. } => CalculationOutput::Beam {
                label,
                result: analyze_beam_with(config, settings)?,
            },
            CalculationItem::Truss { config, .. } => CalculationOutput::Truss {
                label,
                result: analyze_truss_with(config, settings)?,
            },
        })
    }
}

/// Result of analyzing a [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    Beam { label: String, result: AnalysisResult },
    Truss { label: String, result: TrussResult },
}

impl CalculationOutput {
    pub fn label(&self) -> &str {
        match self {
            CalculationOutput::Beam { label, .. } | CalculationOutput::Truss { label, .. } => label,
        }
    }

    pub fn is_valid(&self) -> bool {
        match self {
            CalculationOutput::Beam { result, .. } => result.is_valid,
            CalculationOutput::Truss { result, .. } => result.is_valid,
        }
    }

    /// User-facing error message of an invalid result
    pub fn error(&self) -> Option<&str> {
        match self {
            CalculationOutput::Beam { result, .. } => result.error.as_deref(),
            CalculationOutput::Truss { result, .. } => result.error.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_serialization() {
        let item = CalculationItem::Beam {
            label: "B-1".to_string(),
            config: BeamPreset::Cantilever.config(),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with(r#"{"type":"Beam","label":"B-1""#));
        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, item);
    }

    #[test]
    fn test_analyze_dispatches() {
        let settings = SolverSettings::default();
        let beam = Preset::Beam(BeamPreset::SimplySupported).to_item().analyze(&settings).unwrap();
        assert!(matches!(beam, CalculationOutput::Beam { .. }));
        assert!(beam.is_valid());

        let truss = Preset::Truss(TrussPreset::Triangle).to_item().analyze(&settings).unwrap();
        assert!(matches!(truss, CalculationOutput::Truss { .. }));
        assert_eq!(truss.label(), "triangle");
    }

    #[test]
    fn test_invalid_output_exposes_error() {
        let output = Preset::Beam(BeamPreset::Continuous)
            .to_item()
            .analyze(&SolverSettings::default())
            .unwrap();
        assert!(!output.is_valid());
        assert!(output.error().is_some());
    }
}
