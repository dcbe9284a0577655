//! # Equilibrium Check
//!
//! Sums forces and moments of solved reactions together with the applied
//! loads. A correct solution leaves residuals at round-off level.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcError;
use crate::loads::{total_force, total_moment_about, Load};

use super::beam_reactions::ReactionForce;
use super::supports::Support;

/// Residual force and moment sums (kN, kN·m about the beam origin)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquilibriumCheck {
    pub sum_fx: f64,
    pub sum_fy: f64,
    pub sum_m: f64,
}

impl EquilibriumCheck {
    /// True when every residual is within `tolerance`
    pub fn is_satisfied(&self, tolerance: f64) -> bool {
        self.sum_fx.abs() <= tolerance && self.sum_fy.abs() <= tolerance && self.sum_m.abs() <= tolerance
    }

    /// Largest absolute residual
    pub fn max_residual(&self) -> f64 {
        self.sum_fx.abs().max(self.sum_fy.abs()).max(self.sum_m.abs())
    }

    /// Convert the residuals into an analysis failure
    pub fn to_error(&self) -> CalcError {
        CalcError::EquilibriumNotSatisfied {
            sum_fx: self.sum_fx,
            sum_fy: self.sum_fy,
            sum_m: self.sum_m,
        }
    }
}

/// Sum reactions and loads of a beam.
///
/// `reactions` is keyed by index into `supports`; keys without a matching
/// support are ignored.
pub fn check_beam_equilibrium(
    supports: &[Support],
    reactions: &BTreeMap<usize, ReactionForce>,
    loads: &[Load],
) -> EquilibriumCheck {
    let mut check = EquilibriumCheck {
        sum_fx: 0.0,
        sum_fy: total_force(loads),
        sum_m: total_moment_about(loads, 0.0),
    };

    for (index, reaction) in reactions {
        let Some(support) = supports.get(*index) else {
            continue;
        };
        check.sum_fx += reaction.horizontal;
        check.sum_fy += reaction.vertical;
        check.sum_m += reaction.vertical * support.position + reaction.moment;
    }

    debug!(
        sum_fx = check.sum_fx,
        sum_fy = check.sum_fy,
        sum_m = check.sum_m,
        "beam equilibrium residuals"
    );
    check
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balanced_simply_supported() {
        let supports = [Support::pinned(0.0), Support::roller(6.0)];
        let reactions = BTreeMap::from([
            (0, ReactionForce::vertical(5.0)),
            (1, ReactionForce::vertical(5.0)),
        ]);
        let check = check_beam_equilibrium(&supports, &reactions, &[Load::point(3.0, -10.0)]);
        assert!(check.is_satisfied(1e-9), "{:?}", check);
    }

    #[test]
    fn test_balanced_cantilever_with_moment() {
        let supports = [Support::fixed(0.0)];
        let reactions = BTreeMap::from([(0, ReactionForce::with_moment(10.0, 40.0))]);
        let check = check_beam_equilibrium(&supports, &reactions, &[Load::point(4.0, -10.0)]);
        assert!(check.is_satisfied(1e-9), "{:?}", check);
    }

    #[test]
    fn test_unbalanced_reports_residuals() {
        let supports = [Support::pinned(0.0), Support::roller(6.0)];
        let reactions = BTreeMap::from([
            (0, ReactionForce::vertical(4.0)),
            (1, ReactionForce::vertical(5.0)),
        ]);
        let check = check_beam_equilibrium(&supports, &reactions, &[Load::point(3.0, -10.0)]);
        assert!(!check.is_satisfied(1e-4));
        assert!((check.sum_fy + 1.0).abs() < 1e-12);
        assert!((check.max_residual() - 1.0).abs() < 1e-12);
        assert_eq!(check.to_error().error_code(), "EQUILIBRIUM_NOT_SATISFIED");
    }
}
