//! Equivalent concentrated loads

use serde::{Deserialize, Serialize};

/// Resultant of a load for global equilibrium.
///
/// A distributed load reduces to `force` acting at `position` (its centroid).
/// An applied couple has zero force and carries its value in `moment`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EquivalentLoad {
    /// Resultant vertical force (kN, positive upward)
    pub force: f64,
    /// Point of application (m from the beam origin)
    pub position: f64,
    /// Pure moment (kN·m, counterclockwise positive)
    pub moment: f64,
}

impl EquivalentLoad {
    /// A pure force at `position`
    pub fn force(force: f64, position: f64) -> Self {
        EquivalentLoad {
            force,
            position,
            moment: 0.0,
        }
    }

    /// A pure couple located at `position`
    pub fn couple(moment: f64, position: f64) -> Self {
        EquivalentLoad {
            force: 0.0,
            position,
            moment,
        }
    }

    /// Counterclockwise moment about `pivot`: F·(x − pivot) + M
    pub fn moment_about(&self, pivot: f64) -> f64 {
        self.force * (self.position - pivot) + self.moment
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_moment_about_sign() {
        // Downward force right of the pivot turns clockwise
        let eq = EquivalentLoad::force(-10.0, 3.0);
        assert_eq!(eq.moment_about(0.0), -30.0);
        // ...and counterclockwise when left of it
        assert_eq!(eq.moment_about(5.0), 20.0);
    }

    #[test]
    fn test_couple_is_pivot_independent() {
        let eq = EquivalentLoad::couple(4.0, 1.0);
        assert_eq!(eq.moment_about(0.0), 4.0);
        assert_eq!(eq.moment_about(9.0), 4.0);
    }
}
