//! # Beam Reaction Solvers
//!
//! Recognizes the support pattern of a beam and solves its reactions in
//! closed form. Patterns are tried in this order:
//!
//! 1. **Pinned + Roller** (any order, any positions) - moments about the pin
//! 2. **Single Fixed** (cantilever) - direct equilibrium
//! 3. **Fixed + Fixed** - fixed-end moments, end shears from equilibrium
//! 4. **Fixed + Roller** (propped cantilever) - deflection compatibility
//!
//! Anything else is an unsupported configuration. `Free` supports never
//! take part in recognition; callers pass only restraining supports.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::{
    fem_applied_moment, fem_partial_uniform, fem_point_load, propped_linear_load_reaction,
    propped_moment_reaction, propped_point_reaction,
};
use crate::errors::{CalcError, CalcResult};
use crate::loads::{total_force, total_moment_about, Load};

use super::supports::{IndexedSupport, SupportKind};

/// Supports closer than this (m) are treated as coincident
const COINCIDENT_TOLERANCE: f64 = 1e-9;

/// Reaction components at a support
///
/// Forces in kN (positive right / up), moment in kN·m (counterclockwise positive).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReactionForce {
    pub horizontal: f64,
    pub vertical: f64,
    pub moment: f64,
}

impl ReactionForce {
    /// A purely vertical reaction
    pub fn vertical(vertical: f64) -> Self {
        ReactionForce {
            vertical,
            ..Default::default()
        }
    }

    /// A vertical reaction with a moment (fixed support)
    pub fn with_moment(vertical: f64, moment: f64) -> Self {
        ReactionForce {
            horizontal: 0.0,
            vertical,
            moment,
        }
    }
}

/// Recognized support patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SupportPattern {
    /// Pinned + roller
    SimplySupported,
    /// One fixed support, nothing else
    Cantilever,
    /// Fixed at both supports
    FixedFixed,
    /// Fixed + roller
    ProppedCantilever,
}

impl SupportPattern {
    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportPattern::SimplySupported => "Simply supported",
            SupportPattern::Cantilever => "Cantilever",
            SupportPattern::FixedFixed => "Fixed-fixed",
            SupportPattern::ProppedCantilever => "Propped cantilever",
        }
    }

    /// Match a position-sorted list of restraining supports
    pub fn recognize(supports: &[IndexedSupport]) -> Option<Self> {
        use SupportKind::*;
        let kinds: Vec<SupportKind> = supports.iter().map(|s| s.kind).collect();
        match kinds.as_slice() {
            [Pinned, Roller] | [Roller, Pinned] => Some(SupportPattern::SimplySupported),
            [Fixed] => Some(SupportPattern::Cantilever),
            [Fixed, Fixed] => Some(SupportPattern::FixedFixed),
            [Fixed, Roller] | [Roller, Fixed] => Some(SupportPattern::ProppedCantilever),
            _ => None,
        }
    }
}

/// Reactions produced by one of the pattern solvers
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedReactions {
    pub pattern: SupportPattern,
    /// One entry per restraining support, in the order they were passed in
    pub reactions: Vec<(IndexedSupport, ReactionForce)>,
}

/// Describe a support list for error messages, e.g. "Pinned@0 + Pinned@6"
fn describe(supports: &[IndexedSupport]) -> String {
    if supports.is_empty() {
        return "mesnet yok".to_string();
    }
    supports
        .iter()
        .map(|s| format!("{}@{}", s.kind, s.position))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Recognize the support pattern and solve the reactions.
///
/// `supports` must be restraining supports sorted by position
/// (see [`restraining_supports`](super::supports::restraining_supports)).
pub fn solve_reactions(supports: &[IndexedSupport], loads: &[Load]) -> CalcResult<SolvedReactions> {
    let pattern = SupportPattern::recognize(supports)
        .ok_or_else(|| CalcError::unsupported(describe(supports)))?;

    if let [first, second] = supports {
        if (second.position - first.position).abs() < COINCIDENT_TOLERANCE {
            return Err(CalcError::unsupported(format!(
                "{} (çakışık mesnetler)",
                describe(supports)
            )));
        }
    }

    debug!(pattern = pattern.display_name(), loads = loads.len(), "solving beam reactions");

    let reactions = match (pattern, supports) {
        (SupportPattern::SimplySupported, [a, b]) => {
            let (pin, roller) = if a.kind == SupportKind::Pinned { (a, b) } else { (b, a) };
            let (r_pin, r_roller) = simply_supported(pin.position, roller.position, loads);
            vec![(*pin, r_pin), (*roller, r_roller)]
        }
        (SupportPattern::Cantilever, [fixed]) => vec![(*fixed, cantilever(fixed.position, loads))],
        (SupportPattern::FixedFixed, [left, right]) => {
            let (r_left, r_right) = fixed_fixed(left.position, right.position, loads);
            vec![(*left, r_left), (*right, r_right)]
        }
        (SupportPattern::ProppedCantilever, [a, b]) => {
            let (fixed, roller) = if a.kind == SupportKind::Fixed { (a, b) } else { (b, a) };
            let (r_fixed, r_roller) = propped_cantilever(fixed.position, roller.position, loads);
            vec![(*fixed, r_fixed), (*roller, r_roller)]
        }
        _ => {
            return Err(CalcError::Internal {
                message: format!("pattern {:?} recognized for {} supports", pattern, supports.len()),
            })
        }
    };

    Ok(SolvedReactions { pattern, reactions })
}

/// Pinned + roller: moments about the pin give the roller, ΣFy gives the pin.
///
/// Returns (pin, roller) reactions.
pub fn simply_supported(pin: f64, roller: f64, loads: &[Load]) -> (ReactionForce, ReactionForce) {
    let r_roller = -total_moment_about(loads, pin) / (roller - pin);
    let r_pin = -total_force(loads) - r_roller;
    (ReactionForce::vertical(r_pin), ReactionForce::vertical(r_roller))
}

/// Single fixed support carries everything.
///
/// - V = −ΣF
/// - M = −Σ(F·d + M_applied), d measured from the support
pub fn cantilever(fixed: f64, loads: &[Load]) -> ReactionForce {
    ReactionForce::with_moment(-total_force(loads), -total_moment_about(loads, fixed))
}

/// Fixed at both ends: sum fixed-end moments per load, then back-solve shears.
///
/// Loads past either support are moved onto that support as a force plus a
/// couple; the couple then enters through the applied-moment formula.
///
/// Returns (left, right) reactions.
pub fn fixed_fixed(left: f64, right: f64, loads: &[Load]) -> (ReactionForce, ReactionForce) {
    let span = right - left;

    // Point force at local position u, transferring overhang loads to the nearest support
    let point_fem = |force: f64, u: f64| -> (f64, f64) {
        if u < 0.0 {
            fem_applied_moment(force * u, 0.0, span)
        } else if u > span {
            fem_applied_moment(force * (u - span), span, span)
        } else {
            fem_point_load(force, u, span)
        }
    };

    let mut m_left = 0.0;
    let mut m_right = 0.0;
    for load in loads {
        let (ma, mb) = match *load {
            Load::Point { position, magnitude } => point_fem(magnitude, position - left),
            Load::Moment { position, magnitude } => {
                fem_applied_moment(magnitude, (position - left).clamp(0.0, span), span)
            }
            Load::UniformDistributed { start, end, magnitude } => {
                let (s, e) = (start - left, end - left);
                let mut sum = (0.0, 0.0);
                let (lo, hi) = (s.max(0.0), e.min(span));
                if hi > lo {
                    sum = fem_partial_uniform(magnitude, lo, hi, span);
                }
                // Overhanging portions as resultants at their own centroids
                for (a, b) in [(s, e.min(0.0)), (s.max(span), e)] {
                    if b > a {
                        let (ma, mb) = point_fem(magnitude * (b - a), (a + b) / 2.0);
                        sum.0 += ma;
                        sum.1 += mb;
                    }
                }
                sum
            }
            Load::Triangular { .. } => {
                let eq = load.equivalent();
                point_fem(eq.force, eq.position - left)
            }
        };
        m_left += ma;
        m_right += mb;
    }

    let v_right = -(total_moment_about(loads, left) + m_left + m_right) / span;
    let v_left = -total_force(loads) - v_right;

    (
        ReactionForce::with_moment(v_left, m_left),
        ReactionForce::with_moment(v_right, m_right),
    )
}

/// Fixed + roller: roller reaction from deflection compatibility, the fixed
/// support from equilibrium.
///
/// Works with the roller on either side of the fixed support by measuring
/// positions from the fixed support toward the roller. Mirroring reverses
/// the sense of applied couples.
///
/// Returns (fixed, roller) reactions.
pub fn propped_cantilever(fixed: f64, roller: f64, loads: &[Load]) -> (ReactionForce, ReactionForce) {
    let direction = (roller - fixed).signum();
    let span = (roller - fixed).abs();
    let local = |x: f64| (x - fixed) * direction;

    let r_roller: f64 = loads
        .iter()
        .map(|load| match *load {
            Load::Point { position, magnitude } => {
                propped_point_reaction(magnitude, local(position), span)
            }
            Load::Moment { position, magnitude } => {
                propped_moment_reaction(magnitude * direction, local(position), span)
            }
            Load::UniformDistributed { start, end, magnitude } => {
                propped_linear_load_reaction(local(start), magnitude, local(end), magnitude, span)
            }
            Load::Triangular {
                start,
                end,
                peak_magnitude,
            } => propped_linear_load_reaction(local(start), 0.0, local(end), peak_magnitude, span),
        })
        .sum();

    let v_fixed = -total_force(loads) - r_roller;
    let m_fixed = -(total_moment_about(loads, fixed) + r_roller * (roller - fixed));

    (
        ReactionForce::with_moment(v_fixed, m_fixed),
        ReactionForce::vertical(r_roller),
    )
}
