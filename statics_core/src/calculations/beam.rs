//! # Beam Analysis
//!
//! Reactions, shear/moment diagrams and stress/deflection estimates for a
//! single straight beam on one or two restraining supports.
//!
//! ## Pipeline
//!
//! 1. Validate the configuration (bad input is an `Err`)
//! 2. Classify determinacy; unstable support sets stop here
//! 3. Recognize the support pattern and solve reactions
//! 4. Verify equilibrium
//! 5. Sample diagrams, then estimate stress and deflection
//!
//! Steps 2-4 report engineering failures on the result (`is_valid = false`)
//! instead of returning an error.
//!
//! ## Example
//!
//! ```rust
//! use statics_core::calculations::beam::{analyze_beam, BeamConfig};
//! use statics_core::calculations::supports::Support;
//! use statics_core::loads::Load;
//!
//! let config = BeamConfig::new(6.0)
//!     .with_support(Support::pinned(0.0))
//!     .with_support(Support::roller(6.0))
//!     .with_load(Load::point(3.0, -10.0));
//!
//! let result = analyze_beam(&config).unwrap();
//! assert!(result.is_valid);
//! println!("Max moment: {:.2} kN·m at {:.2} m", result.max_moment.value, result.max_moment.position);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::loads::Load;
use crate::settings::SolverSettings;

use super::beam_analysis::{estimate_deflection, max_bending_stress, sample_diagram};
use super::beam_reactions::{solve_reactions, SupportPattern};
use super::equilibrium::check_beam_equilibrium;
use super::supports::{classify_beam, restraining_supports, Determinacy, Support, PLANAR_EQUATIONS};

pub use super::beam_analysis::{DiagramPoint, Extremum};
pub use super::beam_reactions::ReactionForce;

/// Elastic modulus used when none is given (MPa, structural steel)
pub const DEFAULT_ELASTIC_MODULUS_MPA: f64 = 200_000.0;

/// Section modulus used when none is given (cm³)
pub const DEFAULT_SECTION_MODULUS_CM3: f64 = 500.0;

/// Moment of inertia used when none is given (cm⁴)
pub const DEFAULT_MOMENT_OF_INERTIA_CM4: f64 = 10_000.0;

/// Beam geometry, supports, loads and optional section properties.
///
/// Lengths in m, forces in kN, moments in kN·m.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length": 6.0,
///   "supports": [
///     { "kind": "Pinned", "position": 0.0 },
///     { "kind": "Roller", "position": 6.0 }
///   ],
///   "loads": [
///     { "type": "Point", "position": 3.0, "magnitude": -10.0 }
///   ],
///   "elastic_modulus": 210000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamConfig {
    /// Beam length (m)
    pub length: f64,

    /// Supports in insertion order; reactions are keyed by index into this list
    #[serde(default)]
    pub supports: Vec<Support>,

    #[serde(default)]
    pub loads: Vec<Load>,

    /// Elastic modulus E (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_modulus: Option<f64>,

    /// Elastic section modulus S (cm³)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_modulus: Option<f64>,

    /// Second moment of area I (cm⁴)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moment_of_inertia: Option<f64>,
}

impl BeamConfig {
    /// Create an unloaded, unsupported beam of the given length
    pub fn new(length: f64) -> Self {
        BeamConfig {
            length,
            supports: Vec::new(),
            loads: Vec::new(),
            elastic_modulus: None,
            section_modulus: None,
            moment_of_inertia: None,
        }
    }

    /// Add a support
    pub fn with_support(mut self, support: Support) -> Self {
        self.supports.push(support);
        self
    }

    /// Add a load
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    /// Set section properties: E (MPa), S (cm³), I (cm⁴)
    pub fn with_section(mut self, elastic_modulus: f64, section_modulus: f64, moment_of_inertia: f64) -> Self {
        self.elastic_modulus = Some(elastic_modulus);
        self.section_modulus = Some(section_modulus);
        self.moment_of_inertia = Some(moment_of_inertia);
        self
    }

    /// Elastic modulus (MPa), defaulted
    pub fn elastic_modulus_mpa(&self) -> f64 {
        self.elastic_modulus.unwrap_or(DEFAULT_ELASTIC_MODULUS_MPA)
    }

    /// Section modulus (cm³), defaulted
    pub fn section_modulus_cm3(&self) -> f64 {
        self.section_modulus.unwrap_or(DEFAULT_SECTION_MODULUS_CM3)
    }

    /// Moment of inertia (cm⁴), defaulted
    pub fn moment_of_inertia_cm4(&self) -> f64 {
        self.moment_of_inertia.unwrap_or(DEFAULT_MOMENT_OF_INERTIA_CM4)
    }

    /// Validate input parameters
    pub fn validate(&self) -> CalcResult<()> {
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(CalcError::invalid_input(
                "length",
                self.length.to_string(),
                "Beam length must be positive",
            ));
        }

        for (i, support) in self.supports.iter().enumerate() {
            if !(0.0..=self.length).contains(&support.position) {
                return Err(CalcError::invalid_input(
                    format!("supports[{}].position", i),
                    support.position.to_string(),
                    format!("Support must lie within [0, {}]", self.length),
                ));
            }
        }

        for (i, load) in self.loads.iter().enumerate() {
            load.validate(i, self.length)?;
        }

        let properties = [
            ("elastic_modulus", self.elastic_modulus),
            ("section_modulus", self.section_modulus),
            ("moment_of_inertia", self.moment_of_inertia),
        ];
        for (field, value) in properties {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(CalcError::invalid_input(field, v.to_string(), "Section property must be positive"));
                }
            }
        }

        Ok(())
    }
}

/// Beam analysis output.
///
/// When `is_valid` is false, `error` holds a user-facing message and
/// `error_code` its machine-readable code. An equilibrium failure still
/// carries the computed reactions and diagrams for inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Reactions keyed by support index (input order), one entry per support
    pub reactions: BTreeMap<usize, ReactionForce>,

    pub is_valid: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    pub determinacy: Determinacy,

    /// Recognized support pattern, if reactions were solved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<SupportPattern>,

    /// Shear/moment samples sorted by position
    pub diagram: Vec<DiagramPoint>,

    /// Largest absolute shear (kN)
    pub max_shear: Extremum,
    /// Most positive moment (kN·m)
    pub max_moment: Extremum,
    /// Most negative moment (kN·m)
    pub min_moment: Extremum,

    /// Peak bending stress (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stress: Option<f64>,

    /// Largest deflection (mm, negative downward) and its position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deflection: Option<Extremum>,
}

impl AnalysisResult {
    /// An empty result marked invalid with the given failure
    fn failed(determinacy: Determinacy, error: &CalcError) -> Self {
        AnalysisResult {
            reactions: BTreeMap::new(),
            is_valid: false,
            error: Some(error.to_string()),
            error_code: Some(error.error_code().to_string()),
            determinacy,
            pattern: None,
            diagram: Vec::new(),
            max_shear: Extremum::default(),
            max_moment: Extremum::default(),
            min_moment: Extremum::default(),
            max_stress: None,
            deflection: None,
        }
    }

    /// Reaction at the support with the given input index
    pub fn reaction(&self, support_index: usize) -> Option<&ReactionForce> {
        self.reactions.get(&support_index)
    }
}

/// Analyze a beam with default solver settings
pub fn analyze_beam(config: &BeamConfig) -> CalcResult<AnalysisResult> {
    analyze_beam_with(config, &SolverSettings::default())
}

/// Analyze a beam.
///
/// Returns `Err` only for malformed input. Unstable or unsupported support
/// sets, and results that fail the equilibrium check, come back as
/// `Ok` with `is_valid = false`.
pub fn analyze_beam_with(config: &BeamConfig, settings: &SolverSettings) -> CalcResult<AnalysisResult> {
    settings.validate()?;
    config.validate()?;

    let determinacy = classify_beam(&config.supports);
    debug!(
        length = config.length,
        supports = config.supports.len(),
        loads = config.loads.len(),
        ?determinacy,
        "analyzing beam"
    );

    if let Determinacy::Unstable { unknowns } = determinacy {
        let error = CalcError::unstable(unknowns, PLANAR_EQUATIONS);
        warn!(unknowns, "beam is unstable");
        return Ok(AnalysisResult::failed(determinacy, &error));
    }

    let restraints = restraining_supports(&config.supports);
    let solved = match solve_reactions(&restraints, &config.loads) {
        Ok(solved) => solved,
        Err(error) if error.is_analysis_failure() => {
            warn!(code = error.error_code(), "beam reactions not solved: {}", error);
            return Ok(AnalysisResult::failed(determinacy, &error));
        }
        Err(error) => return Err(error),
    };

    // Every support gets an entry; free ends stay at zero
    let mut reactions: BTreeMap<usize, ReactionForce> = (0..config.supports.len())
        .map(|i| (i, ReactionForce::default()))
        .collect();
    for (support, reaction) in &solved.reactions {
        reactions.insert(support.original_index, *reaction);
    }

    let forces = sample_diagram(
        config.length,
        &config.supports,
        &reactions,
        &config.loads,
        settings.diagram_samples,
    );
    let max_stress = max_bending_stress(&forces, config.section_modulus_cm3()).value();
    let deflection = estimate_deflection(
        &forces.diagram,
        &restraints,
        config.elastic_modulus_mpa(),
        config.moment_of_inertia_cm4(),
    );

    let mut result = AnalysisResult {
        reactions,
        is_valid: true,
        error: None,
        error_code: None,
        determinacy,
        pattern: Some(solved.pattern),
        diagram: forces.diagram,
        max_shear: forces.max_shear,
        max_moment: forces.max_moment,
        min_moment: forces.min_moment,
        max_stress: Some(max_stress),
        deflection,
    };

    let check = check_beam_equilibrium(&config.supports, &result.reactions, &config.loads);
    if !check.is_satisfied(settings.equilibrium_tolerance) {
        let error = check.to_error();
        warn!(residual = check.max_residual(), "beam reactions fail equilibrium");
        result.is_valid = false;
        result.error = Some(error.to_string());
        result.error_code = Some(error.error_code().to_string());
    }

    Ok(result)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
