//! # Beam Supports and Determinacy
//!
//! Support definitions for single-span beams and the classification of a
//! support set by counting unknown reactions against the three planar
//! equilibrium equations.

use serde::{Deserialize, Serialize};

/// Number of independent equilibrium equations for a planar rigid body
pub const PLANAR_EQUATIONS: usize = 3;

// =============================================================================
// SUPPORT KIND
// =============================================================================

/// Support condition at a point along the beam
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SupportKind {
    /// Fixed support - restrains horizontal, vertical displacement and rotation
    ///
    /// - Unknowns: Rx, Ry, M
    Fixed,

    /// Pinned/hinged support - restrains horizontal and vertical displacement
    ///
    /// - Unknowns: Rx, Ry
    #[default]
    Pinned,

    /// Roller support - restrains vertical displacement only
    ///
    /// - Unknowns: Ry
    Roller,

    /// Free end - no restraint
    ///
    /// - Unknowns: none
    Free,
}

impl SupportKind {
    /// Number of reaction components this support introduces
    pub fn unknowns(&self) -> usize {
        match self {
            SupportKind::Fixed => 3,
            SupportKind::Pinned => 2,
            SupportKind::Roller => 1,
            SupportKind::Free => 0,
        }
    }

    /// Get display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SupportKind::Free => "Free",
            SupportKind::Pinned => "Pinned",
            SupportKind::Roller => "Roller",
            SupportKind::Fixed => "Fixed",
        }
    }
}

impl std::fmt::Display for SupportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// =============================================================================
// SUPPORT
// =============================================================================

/// A support at a position along the beam (m from the origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Support {
    pub kind: SupportKind,
    pub position: f64,
}

impl Support {
    /// Create a support
    pub fn new(kind: SupportKind, position: f64) -> Self {
        Support { kind, position }
    }

    /// Create a fixed support
    pub fn fixed(position: f64) -> Self {
        Support::new(SupportKind::Fixed, position)
    }

    /// Create a pinned support
    pub fn pinned(position: f64) -> Self {
        Support::new(SupportKind::Pinned, position)
    }

    /// Create a roller support
    pub fn roller(position: f64) -> Self {
        Support::new(SupportKind::Roller, position)
    }

    /// Create a free end marker
    pub fn free(position: f64) -> Self {
        Support::new(SupportKind::Free, position)
    }
}

/// A support tagged with its index in the caller's list
///
/// Solvers work on supports sorted by position; results are scattered back
/// by `original_index`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedSupport {
    pub original_index: usize,
    pub kind: SupportKind,
    pub position: f64,
}

/// Restraining supports sorted by position, each remembering its input index.
///
/// `Free` supports carry no reaction and are left out.
pub fn restraining_supports(supports: &[Support]) -> Vec<IndexedSupport> {
    let mut indexed: Vec<IndexedSupport> = supports
        .iter()
        .enumerate()
        .filter(|(_, s)| s.kind != SupportKind::Free)
        .map(|(original_index, s)| IndexedSupport {
            original_index,
            kind: s.kind,
            position: s.position,
        })
        .collect();
    indexed.sort_by(|a, b| a.position.total_cmp(&b.position));
    indexed
}

// =============================================================================
// DETERMINACY
// =============================================================================

/// Static determinacy of a support set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Determinacy {
    /// Fewer unknowns than equilibrium equations
    Unstable { unknowns: usize },
    /// Equilibrium alone gives every reaction
    Determinate,
    /// Compatibility equations are needed; `degree` extra unknowns
    Indeterminate { degree: usize },
}

impl Determinacy {
    /// Classify by comparing `unknowns` with `equations`
    pub fn from_counts(unknowns: usize, equations: usize) -> Self {
        match unknowns.cmp(&equations) {
            std::cmp::Ordering::Less => Determinacy::Unstable { unknowns },
            std::cmp::Ordering::Equal => Determinacy::Determinate,
            std::cmp::Ordering::Greater => Determinacy::Indeterminate {
                degree: unknowns - equations,
            },
        }
    }

    /// Whether the structure can carry load at all
    pub fn is_stable(&self) -> bool {
        !matches!(self, Determinacy::Unstable { .. })
    }
}

/// Total unknown reaction components of a support set
pub fn count_unknowns(supports: &[Support]) -> usize {
    supports.iter().map(|s| s.kind.unknowns()).sum()
}

/// Classify a beam's support set
pub fn classify_beam(supports: &[Support]) -> Determinacy {
    Determinacy::from_counts(count_unknowns(supports), PLANAR_EQUATIONS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_support_kind_display() {
        assert_eq!(SupportKind::Pinned.to_string(), "Pinned");
        assert_eq!(SupportKind::Fixed.symbol(), "▣");
    }

    #[test]
    fn test_unknown_counts() {
        assert_eq!(SupportKind::Fixed.unknowns(), 3);
        assert_eq!(SupportKind::Pinned.unknowns(), 2);
        assert_eq!(SupportKind::Roller.unknowns(), 1);
        assert_eq!(SupportKind::Free.unknowns(), 0);
    }

    #[test]
    fn test_classify_simply_supported() {
        let supports = [Support::pinned(0.0), Support::roller(6.0)];
        assert_eq!(classify_beam(&supports), Determinacy::Determinate);
    }

    #[test]
    fn test_classify_two_rollers_unstable() {
        let supports = [Support::roller(0.0), Support::roller(6.0)];
        assert_eq!(classify_beam(&supports), Determinacy::Unstable { unknowns: 2 });
        assert!(!classify_beam(&supports).is_stable());
    }

    #[test]
    fn test_classify_fixed_fixed() {
        let supports = [Support::fixed(0.0), Support::fixed(8.0)];
        assert_eq!(classify_beam(&supports), Determinacy::Indeterminate { degree: 3 });
    }

    #[test]
    fn test_classify_cantilever_with_free_end() {
        let supports = [Support::fixed(0.0), Support::free(4.0)];
        assert_eq!(classify_beam(&supports), Determinacy::Determinate);
    }

    #[test]
    fn test_restraining_supports_keep_original_index() {
        let supports = [Support::roller(6.0), Support::free(8.0), Support::pinned(0.0)];
        let sorted = restraining_supports(&supports);
        assert_eq!(sorted.len(), 2);
        assert_eq!(sorted[0].original_index, 2);
        assert_eq!(sorted[0].kind, SupportKind::Pinned);
        assert_eq!(sorted[1].original_index, 0);
        assert_eq!(sorted[1].kind, SupportKind::Roller);
    }

    #[test]
    fn test_serialization() {
        let support = Support::roller(2.5);
        let json = serde_json::to_string(&support).unwrap();
        assert_eq!(json, r#"{"kind":"Roller","position":2.5}"#);
        let roundtrip: Support = serde_json::from_str(&json).unwrap();
        assert_eq!(support, roundtrip);
    }
}
