//! # Presets
//!
//! Ready-made beams and trusses for demonstrations and quick checks. Names
//! parse case-insensitively and ignore `-`, `_` and spaces, so
//! `"fixed-fixed"`, `"FixedFixed"` and `"fixed fixed"` are the same preset.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;
use crate::loads::Load;

use super::beam::BeamConfig;
use super::supports::Support;
use super::truss::{TrussConfig, TrussLoad, TrussMember, TrussNode};
use super::CalculationItem;

/// Normalize a preset name for matching
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

// =============================================================================
// BEAM PRESETS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeamPreset {
    /// 6 m, pinned + roller, 10 kN at midspan
    SimplySupported,
    /// 4 m, fixed at the origin, 10 kN at the tip
    Cantilever,
    /// 8 m, fixed at both ends, 20 kN at midspan
    FixedFixed,
    /// 6 m, fixed + roller, 5 kN/m over the span
    ProppedCantilever,
    /// 8 m, pinned + roller at 6 m, 4 kN/m plus 10 kN at the free end
    Overhang,
    /// 10 m on three supports; no solver handles it
    Continuous,
}

impl BeamPreset {
    pub const ALL: [BeamPreset; 6] = [
        BeamPreset::SimplySupported,
        BeamPreset::Cantilever,
        BeamPreset::FixedFixed,
        BeamPreset::ProppedCantilever,
        BeamPreset::Overhang,
        BeamPreset::Continuous,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BeamPreset::SimplySupported => "simply-supported",
            BeamPreset::Cantilever => "cantilever",
            BeamPreset::FixedFixed => "fixed-fixed",
            BeamPreset::ProppedCantilever => "propped-cantilever",
            BeamPreset::Overhang => "overhang",
            BeamPreset::Continuous => "continuous",
        }
    }

    /// Build the beam
    pub fn config(&self) -> BeamConfig {
        match self {
            BeamPreset::SimplySupported => BeamConfig::new(6.0)
                .with_support(Support::pinned(0.0))
                .with_support(Support::roller(6.0))
                .with_load(Load::point(3.0, -10.0)),
            BeamPreset::Cantilever => BeamConfig::new(4.0)
                .with_support(Support::fixed(0.0))
                .with_load(Load::point(4.0, -10.0)),
            BeamPreset::FixedFixed => BeamConfig::new(8.0)
                .with_support(Support::fixed(0.0))
                .with_support(Support::fixed(8.0))
                .with_load(Load::point(4.0, -20.0)),
            BeamPreset::ProppedCantilever => BeamConfig::new(6.0)
                .with_support(Support::fixed(0.0))
                .with_support(Support::roller(6.0))
                .with_load(Load::uniform(0.0, 6.0, -5.0)),
            BeamPreset::Overhang => BeamConfig::new(8.0)
                .with_support(Support::pinned(0.0))
                .with_support(Support::roller(6.0))
                .with_load(Load::uniform(0.0, 8.0, -4.0))
                .with_load(Load::point(8.0, -10.0)),
            BeamPreset::Continuous => BeamConfig::new(10.0)
                .with_support(Support::pinned(0.0))
                .with_support(Support::roller(5.0))
                .with_support(Support::roller(10.0))
                .with_load(Load::uniform(0.0, 10.0, -5.0)),
        }
    }
}

impl fmt::Display for BeamPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BeamPreset {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        BeamPreset::ALL
            .into_iter()
            .find(|p| normalize(p.name()) == wanted)
            .ok_or_else(|| CalcError::invalid_input("preset", s, "Unknown beam preset"))
    }
}

// =============================================================================
// TRUSS PRESETS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrussPreset {
    /// 3-4-5 triangle, 10 kN at the apex
    Triangle,
    /// 4 panels of 3 m, 3 m deep, 10 kN at each interior bottom joint
    Pratt,
    /// 3 panels of 4 m, 3 m deep, 10 kN at each top joint
    Warren,
}

impl TrussPreset {
    pub const ALL: [TrussPreset; 3] = [TrussPreset::Triangle, TrussPreset::Pratt, TrussPreset::Warren];

    pub fn name(&self) -> &'static str {
        match self {
            TrussPreset::Triangle => "triangle",
            TrussPreset::Pratt => "pratt",
            TrussPreset::Warren => "warren",
        }
    }

    /// Build the truss
    pub fn config(&self) -> TrussConfig {
        match self {
            TrussPreset::Triangle => TrussConfig {
                nodes: vec![
                    TrussNode::pin("A", 0.0, 0.0),
                    TrussNode::roller("B", 6.0, 0.0),
                    TrussNode::free("C", 3.0, 4.0),
                ],
                members: vec![
                    TrussMember::new("AB", "A", "B"),
                    TrussMember::new("AC", "A", "C"),
                    TrussMember::new("BC", "B", "C"),
                ],
                loads: vec![TrussLoad::new("C", 0.0, -10.0)],
            },
            TrussPreset::Pratt => TrussConfig {
                nodes: vec![
                    TrussNode::pin("L0", 0.0, 0.0),
                    TrussNode::free("L1", 3.0, 0.0),
                    TrussNode::free("L2", 6.0, 0.0),
                    TrussNode::free("L3", 9.0, 0.0),
                    TrussNode::roller("L4", 12.0, 0.0),
                    TrussNode::free("U1", 3.0, 3.0),
                    TrussNode::free("U2", 6.0, 3.0),
                    TrussNode::free("U3", 9.0, 3.0),
                ],
                members: chain(&[
                    ("L0", "L1"),
                    ("L1", "L2"),
                    ("L2", "L3"),
                    ("L3", "L4"),
                    ("U1", "U2"),
                    ("U2", "U3"),
                    ("L0", "U1"),
                    ("U3", "L4"),
                    ("L1", "U1"),
                    ("L2", "U2"),
                    ("L3", "U3"),
                    ("U1", "L2"),
                    ("U3", "L2"),
                ]),
                loads: ["L1", "L2", "L3"].iter().map(|id| TrussLoad::new(*id, 0.0, -10.0)).collect(),
            },
            TrussPreset::Warren => TrussConfig {
                nodes: vec![
                    TrussNode::pin("L0", 0.0, 0.0),
                    TrussNode::free("L1", 4.0, 0.0),
                    TrussNode::free("L2", 8.0, 0.0),
                    TrussNode::roller("L3", 12.0, 0.0),
                    TrussNode::free("U1", 2.0, 3.0),
                    TrussNode::free("U2", 6.0, 3.0),
                    TrussNode::free("U3", 10.0, 3.0),
                ],
                members: chain(&[
                    ("L0", "L1"),
                    ("L1", "L2"),
                    ("L2", "L3"),
                    ("U1", "U2"),
                    ("U2", "U3"),
                    ("L0", "U1"),
                    ("U1", "L1"),
                    ("L1", "U2"),
                    ("U2", "L2"),
                    ("L2", "U3"),
                    ("U3", "L3"),
                ]),
                loads: ["U1", "U2", "U3"].iter().map(|id| TrussLoad::new(*id, 0.0, -10.0)).collect(),
            },
        }
    }
}

/// Members named after their end nodes, e.g. "L0-U1"
fn chain(pairs: &[(&str, &str)]) -> Vec<TrussMember> {
    pairs
        .iter()
        .map(|(start, end)| TrussMember::new(format!("{}-{}", start, end), *start, *end))
        .collect()
}

impl fmt::Display for TrussPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrussPreset {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        TrussPreset::ALL
            .into_iter()
            .find(|p| normalize(p.name()) == wanted)
            .ok_or_else(|| CalcError::invalid_input("preset", s, "Unknown truss preset"))
    }
}

// =============================================================================
// ANY PRESET
// =============================================================================

/// A beam or truss preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Beam(BeamPreset),
    Truss(TrussPreset),
}

impl Preset {
    /// Every preset, beams first
    pub fn all() -> impl Iterator<Item = Preset> {
        BeamPreset::ALL
            .into_iter()
            .map(Preset::Beam)
            .chain(TrussPreset::ALL.into_iter().map(Preset::Truss))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Beam(p) => p.name(),
            Preset::Truss(p) => p.name(),
        }
    }

    /// Wrap the preset's model in a calculation item labelled with its name
    pub fn to_item(&self) -> CalculationItem {
        match self {
            Preset::Beam(p) => CalculationItem::Beam {
                label: p.name().to_string(),
                config: p.config(),
            },
            Preset::Truss(p) => CalculationItem::Truss {
                label: p.name().to_string(),
                config: p.config(),
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<BeamPreset>()
            .map(Preset::Beam)
            .or_else(|_| s.parse::<TrussPreset>().map(Preset::Truss))
            .map_err(|_| CalcError::invalid_input("preset", s, "Unknown preset"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::supports::Determinacy;
    use crate::calculations::truss::classify_truss;

    #[test]
    fn test_parse_names() {
        assert_eq!("fixed-fixed".parse::<BeamPreset>().unwrap(), BeamPreset::FixedFixed);
        assert_eq!("Propped_Cantilever".parse::<BeamPreset>().unwrap(), BeamPreset::ProppedCantilever);
        assert_eq!("simply supported".parse::<Preset>().unwrap(), Preset::Beam(BeamPreset::SimplySupported));
        assert_eq!("PRATT".parse::<Preset>().unwrap(), Preset::Truss(TrussPreset::Pratt));
        assert!("howe".parse::<Preset>().is_err());
    }

    #[test]
    fn test_names_round_trip() {
        for preset in Preset::all() {
            assert_eq!(preset.to_string().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!(Preset::all().count(), 9);
    }

    #[test]
    fn test_beam_presets_validate() {
        for preset in BeamPreset::ALL {
            assert!(preset.config().validate().is_ok(), "{}", preset);
        }
    }

    #[test]
    fn test_truss_presets_are_determinate() {
        for preset in TrussPreset::ALL {
            let config = preset.config();
            assert!(config.validate().is_ok(), "{}", preset);
            assert_eq!(classify_truss(&config), Determinacy::Determinate, "{}", preset);
        }
    }

    #[test]
    fn test_to_item_uses_preset_name() {
        let item = Preset::Truss(TrussPreset::Warren).to_item();
        assert_eq!(item.label(), "warren");
        assert_eq!(item.calc_type(), "Truss");
    }
}
