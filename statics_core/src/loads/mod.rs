//! Beam loads and equivalent-load reduction
//!
//! This module defines the loads a beam can carry and reduces each of them to
//! an equivalent concentrated force for equilibrium equations.
//!
//! # Overview
//!
//! - [`Load`] - Point, uniform, triangular, and moment loads
//! - [`EquivalentLoad`] - Resultant force, centroid, and pure moment of a load
//! - [`total_force`] / [`total_moment_about`] - Sums over a load list
//!
//! # Sign Convention
//!
//! - Vertical forces: positive upward (a gravity load is negative)
//! - Moments: positive counterclockwise
//!
//! # Example
//!
//! ```
//! use statics_core::loads::{Load, total_force};
//!
//! let loads = vec![
//!     Load::point(3.0, -10.0),
//!     Load::uniform(0.0, 6.0, -2.0),
//! ];
//!
//! // 10 kN point load + 2 kN/m over 6 m
//! assert_eq!(total_force(&loads), -22.0);
//! ```

pub mod beam_load;
pub mod equivalent;

pub use beam_load::Load;
pub use equivalent::EquivalentLoad;

/// Sum of the vertical equivalent forces of all loads (kN, positive upward)
pub fn total_force(loads: &[Load]) -> f64 {
    loads.iter().map(|load| load.equivalent().force).sum()
}

/// Sum of the moments of all loads about `pivot` (kN·m, counterclockwise positive)
///
/// Includes applied moment loads directly.
pub fn total_moment_about(loads: &[Load], pivot: f64) -> f64 {
    loads
        .iter()
        .map(|load| load.equivalent().moment_about(pivot))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_force_mixed() {
        let loads = vec![
            Load::point(2.0, -5.0),
            Load::uniform(0.0, 4.0, -1.0),
            Load::triangular(0.0, 3.0, -2.0),
            Load::moment(1.0, 7.0),
        ];
        // -5 - 4 - 3 + 0
        assert!((total_force(&loads) + 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_moment_includes_applied_moments() {
        let loads = vec![Load::point(2.0, -5.0), Load::moment(1.0, 7.0)];
        // -5 * 2 + 7
        assert!((total_moment_about(&loads, 0.0) + 3.0).abs() < 1e-12);
        // -5 * (2 - 4) + 7
        assert!((total_moment_about(&loads, 4.0) - 17.0).abs() < 1e-12);
    }
}
