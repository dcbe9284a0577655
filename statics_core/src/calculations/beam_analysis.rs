//! Beam Diagram Sampling and Post-Processing
//!
//! Turns solved reactions and applied loads into shear/moment diagrams, then
//! estimates bending stress and deflection from the moment diagram.
//!
//! ## Sign Convention
//! - Positive shear: net upward force left of the section
//! - Positive moment: sagging (tension on the bottom fiber)
//! - Positive deflection: upward (gravity loads give negative values)
//!
//! Reaction moments and applied couples are counterclockwise positive, so a
//! couple left of the section reduces the sagging moment.
//!
//! ## Example
//! ```rust
//! use statics_core::calculations::beam_analysis::sample_diagram;
//! use statics_core::calculations::beam_reactions::ReactionForce;
//! use statics_core::calculations::supports::Support;
//! use statics_core::loads::Load;
//!
//! let supports = [Support::pinned(0.0), Support::roller(6.0)];
//! let reactions = [(0, ReactionForce::vertical(5.0)), (1, ReactionForce::vertical(5.0))];
//! let forces = sample_diagram(6.0, &supports, &reactions.into(), &[Load::point(3.0, -10.0)], 200);
//! assert!((forces.max_moment.value - 15.0).abs() < 1e-9);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loads::{EquivalentLoad, Load};
use crate::units::{bending_stress, flexural_rigidity, Cm3, Cm4, KnM, MegaPascals};

use super::beam_reactions::ReactionForce;
use super::supports::{IndexedSupport, Support, SupportKind};

/// Relative tolerance for merging sample positions
const DEDUP_TOLERANCE: f64 = 1e-9;

/// One sample of the shear/moment diagrams
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    /// Position from the beam origin (m)
    pub x: f64,
    /// Shear force (kN)
    pub shear: f64,
    /// Bending moment (kN·m)
    pub moment: f64,
}

/// An extreme value and where it occurs
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extremum {
    pub value: f64,
    /// Position from the beam origin (m)
    pub position: f64,
}

/// Sampled diagrams with their extremes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InternalForces {
    pub diagram: Vec<DiagramPoint>,
    /// Largest absolute shear (kN)
    pub max_shear: Extremum,
    /// Most positive moment (kN·m)
    pub max_moment: Extremum,
    /// Most negative moment (kN·m)
    pub min_moment: Extremum,
}

// =============================================================================
// SAMPLING
// =============================================================================

/// Sorted, deduplicated sample positions along the beam.
///
/// `samples` uniform points over [0, length] plus every support position and
/// load boundary, so jumps and kinks land exactly on a sample.
pub fn sample_positions(length: f64, supports: &[Support], loads: &[Load], samples: usize) -> Vec<f64> {
    let samples = samples.max(2);
    let tolerance = DEDUP_TOLERANCE * length.max(1.0);

    let mut positions: Vec<f64> = (0..samples)
        .map(|i| length * i as f64 / (samples - 1) as f64)
        .collect();

    // A critical point replaces a uniform sample it nearly coincides with
    let critical = supports
        .iter()
        .map(|s| s.position)
        .chain(loads.iter().flat_map(|l| l.critical_positions()))
        .filter(|x| (0.0..=length).contains(x));
    for x in critical {
        match positions.iter().position(|p| (p - x).abs() < tolerance) {
            Some(i) => positions[i] = x,
            None => positions.push(x),
        }
    }

    positions.sort_by(|a, b| a.total_cmp(b));
    positions
}

/// Shear and moment at `x` from everything at or left of it.
///
/// Shear is the sum of passed forces. Moment is the sagging moment of those
/// forces and couples about the section.
fn section_forces(
    x: f64,
    supports: &[Support],
    reactions: &BTreeMap<usize, ReactionForce>,
    loads: &[Load],
) -> (f64, f64) {
    let reaction_loads = reactions.iter().filter_map(|(index, reaction)| {
        let support = supports.get(*index)?;
        (support.position <= x).then(|| EquivalentLoad {
            force: reaction.vertical,
            position: support.position,
            moment: reaction.moment,
        })
    });
    let passed_loads = loads.iter().filter_map(|load| load.passed_by(x));

    reaction_loads
        .chain(passed_loads)
        .fold((0.0, 0.0), |(shear, moment), eq| (shear + eq.force, moment - eq.moment_about(x)))
}

/// Sample shear and moment along the beam and track their extremes
pub fn sample_diagram(
    length: f64,
    supports: &[Support],
    reactions: &BTreeMap<usize, ReactionForce>,
    loads: &[Load],
    samples: usize,
) -> InternalForces {
    let positions = sample_positions(length, supports, loads, samples);
    let mut forces = InternalForces {
        diagram: Vec::with_capacity(positions.len()),
        ..Default::default()
    };

    for (i, &x) in positions.iter().enumerate() {
        let (shear, moment) = section_forces(x, supports, reactions, loads);
        forces.diagram.push(DiagramPoint { x, shear, moment });

        if i == 0 {
            forces.max_shear = Extremum { value: shear.abs(), position: x };
            forces.max_moment = Extremum { value: moment, position: x };
            forces.min_moment = Extremum { value: moment, position: x };
            continue;
        }
        if shear.abs() > forces.max_shear.value {
            forces.max_shear = Extremum { value: shear.abs(), position: x };
        }
        if moment > forces.max_moment.value {
            forces.max_moment = Extremum { value: moment, position: x };
        }
        if moment < forces.min_moment.value {
            forces.min_moment = Extremum { value: moment, position: x };
        }
    }

    debug!(
        samples = forces.diagram.len(),
        max_shear = forces.max_shear.value,
        max_moment = forces.max_moment.value,
        min_moment = forces.min_moment.value,
        "sampled beam diagrams"
    );
    forces
}

// =============================================================================
// STRESS AND DEFLECTION
// =============================================================================

/// Peak bending stress (MPa) from the larger moment magnitude and section modulus (cm³)
pub fn max_bending_stress(forces: &InternalForces, section_modulus_cm3: f64) -> MegaPascals {
    let governing = forces.max_moment.value.abs().max(forces.min_moment.value.abs());
    bending_stress(KnM(governing), Cm3(section_modulus_cm3))
}

/// Linear interpolation of `values` sampled at `xs` (sorted)
fn interpolate(xs: &[f64], values: &[f64], x: f64) -> f64 {
    let upper = xs.partition_point(|&xi| xi < x);
    if upper == 0 {
        return values[0];
    }
    if upper >= xs.len() {
        return values[xs.len() - 1];
    }
    let (x0, x1) = (xs[upper - 1], xs[upper]);
    let t = if x1 > x0 { (x - x0) / (x1 - x0) } else { 0.0 };
    values[upper - 1] + t * (values[upper] - values[upper - 1])
}

/// Estimate the largest deflection (mm, upward positive) by integrating the
/// moment diagram twice.
///
/// Slope and deflection are accumulated with the trapezoidal rule, then a
/// rigid-body line is removed so the supports are honored: zero deflection
/// and slope at a lone fixed support, or zero deflection at the outermost
/// two restraining supports. Returns `None` when the supports do not pin
/// the beam down or the diagram is empty.
///
/// `elastic_modulus_mpa` and `moment_of_inertia_cm4` give EI in kN·m².
pub fn estimate_deflection(
    diagram: &[DiagramPoint],
    restraints: &[IndexedSupport],
    elastic_modulus_mpa: f64,
    moment_of_inertia_cm4: f64,
) -> Option<Extremum> {
    let ei = flexural_rigidity(MegaPascals(elastic_modulus_mpa), Cm4(moment_of_inertia_cm4)).value();
    if diagram.is_empty() || ei <= 0.0 {
        return None;
    }

    let xs: Vec<f64> = diagram.iter().map(|p| p.x).collect();
    let mut slope = vec![0.0; diagram.len()];
    let mut raw = vec![0.0; diagram.len()];
    for k in 1..diagram.len() {
        let dx = xs[k] - xs[k - 1];
        slope[k] = slope[k - 1] + (diagram[k - 1].moment + diagram[k].moment) / 2.0 * dx / ei;
        raw[k] = raw[k - 1] + (slope[k - 1] + slope[k]) / 2.0 * dx;
    }

    // Rigid-body correction v0 + θ0·(x − origin)
    let (origin, v0, theta0) = match restraints {
        [only] if only.kind == SupportKind::Fixed => (
            only.position,
            interpolate(&xs, &raw, only.position),
            interpolate(&xs, &slope, only.position),
        ),
        [first, .., last] => {
            let span = last.position - first.position;
            if span <= 0.0 {
                return None;
            }
            let v_first = interpolate(&xs, &raw, first.position);
            let v_last = interpolate(&xs, &raw, last.position);
            (first.position, v_first, (v_last - v_first) / span)
        }
        _ => return None,
    };

    let mut peak = Extremum::default();
    for (x, v) in xs.iter().zip(&raw) {
        let corrected = v - v0 - theta0 * (x - origin);
        if corrected.abs() > peak.value.abs() {
            peak = Extremum {
                value: corrected,
                position: *x,
            };
        }
    }

    let deflection_mm = Extremum {
        value: peak.value * 1000.0,
        position: peak.position,
    };
    debug!(
        deflection_mm = deflection_mm.value,
        position = deflection_mm.position,
        ei_knm2 = ei,
        "estimated beam deflection"
    );
    Some(deflection_mm)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
