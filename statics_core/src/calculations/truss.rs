//! # Planar Truss Analysis
//!
//! Reactions and member axial forces for a statically determinate,
//! pin-jointed plane truss carried by one pin and one roller.
//!
//! ## Pipeline
//!
//! 1. Validate ids, coordinates and member geometry (bad input is an `Err`)
//! 2. Classify with the planar truss rule `m + r = 2j`
//! 3. Solve reactions from global equilibrium about the pin
//! 4. Solve member forces with the method of joints
//! 5. Check every joint for leftover force
//!
//! Steps 2-5 report failures on the result (`is_valid = false`).
//!
//! ## Example
//!
//! ```rust
//! use statics_core::calculations::truss::{analyze_truss, TrussConfig, TrussLoad, TrussMember, TrussNode};
//!
//! let config = TrussConfig {
//!     nodes: vec![
//!         TrussNode::pin("A", 0.0, 0.0),
//!         TrussNode::roller("B", 6.0, 0.0),
//!         TrussNode::free("C", 3.0, 4.0),
//!     ],
//!     members: vec![
//!         TrussMember::new("AB", "A", "B"),
//!         TrussMember::new("AC", "A", "C"),
//!         TrussMember::new("BC", "B", "C"),
//!     ],
//!     loads: vec![TrussLoad::new("C", 0.0, -10.0)],
//! };
//!
//! let result = analyze_truss(&config).unwrap();
//! assert!(result.is_valid);
//! for force in &result.member_forces {
//!     println!("{}: {:.2} kN", force.member_id, force.axial_force);
//! }
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};
use crate::settings::SolverSettings;
use crate::units::{axial_stress, KiloNewtons, Meters, Millimeters, Mm2};

use super::method_of_joints::{solve_joints, JointMember};
use super::supports::Determinacy;

/// Member elastic modulus used when none is given (MPa)
pub const DEFAULT_MEMBER_ELASTIC_MODULUS_MPA: f64 = 200_000.0;

/// Member cross-section area used when none is given (mm²)
pub const DEFAULT_MEMBER_AREA_MM2: f64 = 500.0;

/// Members shorter than this (m) are rejected
const MIN_MEMBER_LENGTH: f64 = 1e-9;

// =============================================================================
// MODEL
// =============================================================================

/// Truss support condition at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrussSupport {
    /// Restrains both directions: Rx, Ry
    Pin,
    /// Restrains vertical movement only: Ry
    Roller,
}

impl TrussSupport {
    /// Number of reaction components
    pub fn reactions(&self) -> usize {
        match self {
            TrussSupport::Pin => 2,
            TrussSupport::Roller => 1,
        }
    }
}

/// A truss joint (coordinates in m)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussNode {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support: Option<TrussSupport>,
}

impl TrussNode {
    /// Unsupported joint
    pub fn free(id: impl Into<String>, x: f64, y: f64) -> Self {
        TrussNode {
            id: id.into(),
            x,
            y,
            support: None,
        }
    }

    /// Pinned joint
    pub fn pin(id: impl Into<String>, x: f64, y: f64) -> Self {
        TrussNode {
            support: Some(TrussSupport::Pin),
            ..TrussNode::free(id, x, y)
        }
    }

    /// Roller joint
    pub fn roller(id: impl Into<String>, x: f64, y: f64) -> Self {
        TrussNode {
            support: Some(TrussSupport::Roller),
            ..TrussNode::free(id, x, y)
        }
    }
}

/// A two-force member between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussMember {
    pub id: String,
    /// Start node id; fixes the member's direction
    pub start: String,
    /// End node id
    pub end: String,
    /// Elastic modulus E (MPa)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elastic_modulus: Option<f64>,
    /// Cross-section area A (mm²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
}

impl TrussMember {
    /// Member with default material and section
    pub fn new(id: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        TrussMember {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            elastic_modulus: None,
            area: None,
        }
    }

    /// Set E (MPa) and A (mm²)
    pub fn with_section(mut self, elastic_modulus: f64, area: f64) -> Self {
        self.elastic_modulus = Some(elastic_modulus);
        self.area = Some(area);
        self
    }

    pub fn elastic_modulus_mpa(&self) -> f64 {
        self.elastic_modulus.unwrap_or(DEFAULT_MEMBER_ELASTIC_MODULUS_MPA)
    }

    pub fn area_mm2(&self) -> f64 {
        self.area.unwrap_or(DEFAULT_MEMBER_AREA_MM2)
    }
}

/// An external force at a node (kN, positive right / up)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussLoad {
    pub node_id: String,
    #[serde(default)]
    pub fx: f64,
    #[serde(default)]
    pub fy: f64,
}

impl TrussLoad {
    pub fn new(node_id: impl Into<String>, fx: f64, fy: f64) -> Self {
        TrussLoad {
            node_id: node_id.into(),
            fx,
            fy,
        }
    }
}

/// Complete truss definition
///
/// ## JSON Example
///
/// ```json
/// {
///   "nodes": [
///     { "id": "A", "x": 0.0, "y": 0.0, "support": "pin" },
///     { "id": "B", "x": 6.0, "y": 0.0, "support": "roller" },
///     { "id": "C", "x": 3.0, "y": 4.0 }
///   ],
///   "members": [
///     { "id": "AB", "start": "A", "end": "B" },
///     { "id": "AC", "start": "A", "end": "C", "area": 800.0 },
///     { "id": "BC", "start": "B", "end": "C" }
///   ],
///   "loads": [ { "node_id": "C", "fy": -10.0 } ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrussConfig {
    #[serde(default)]
    pub nodes: Vec<TrussNode>,
    #[serde(default)]
    pub members: Vec<TrussMember>,
    #[serde(default)]
    pub loads: Vec<TrussLoad>,
}

impl TrussConfig {
    /// Map node ids to their index, checking every reference in the model
    pub fn validate(&self) -> CalcResult<HashMap<&str, usize>> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if node.id.is_empty() {
                return Err(CalcError::invalid_input(format!("nodes[{}].id", i), "", "Node id must not be empty"));
            }
            if !(node.x.is_finite() && node.y.is_finite()) {
                return Err(CalcError::invalid_input(
                    format!("nodes[{}]", i),
                    format!("({}, {})", node.x, node.y),
                    "Coordinates must be finite",
                ));
            }
            if index.insert(node.id.as_str(), i).is_some() {
                return Err(CalcError::invalid_input(
                    format!("nodes[{}].id", i),
                    node.id.clone(),
                    "Duplicate node id",
                ));
            }
        }

        let lookup = |field: String, id: &str| -> CalcResult<usize> {
            index
                .get(id)
                .copied()
                .ok_or_else(|| CalcError::invalid_input(field, id, "Unknown node id"))
        };

        let mut member_ids = HashSet::with_capacity(self.members.len());
        for (i, member) in self.members.iter().enumerate() {
            if !member_ids.insert(member.id.as_str()) {
                return Err(CalcError::invalid_input(
                    format!("members[{}].id", i),
                    member.id.clone(),
                    "Duplicate member id",
                ));
            }
            let start = lookup(format!("members[{}].start", i), &member.start)?;
            let end = lookup(format!("members[{}].end", i), &member.end)?;
            let (a, b) = (&self.nodes[start], &self.nodes[end]);
            if (b.x - a.x).hypot(b.y - a.y) < MIN_MEMBER_LENGTH {
                return Err(CalcError::invalid_input(
                    format!("members[{}]", i),
                    member.id.clone(),
                    "Member has zero length",
                ));
            }
            for (name, value) in [("elastic_modulus", member.elastic_modulus), ("area", member.area)] {
                if let Some(v) = value {
                    if !(v.is_finite() && v > 0.0) {
                        return Err(CalcError::invalid_input(
                            format!("members[{}].{}", i, name),
                            v.to_string(),
                            "Section property must be positive",
                        ));
                    }
                }
            }
        }

        for (i, load) in self.loads.iter().enumerate() {
            lookup(format!("loads[{}].node_id", i), &load.node_id)?;
            if !(load.fx.is_finite() && load.fy.is_finite()) {
                return Err(CalcError::invalid_input(
                    format!("loads[{}]", i),
                    format!("({}, {})", load.fx, load.fy),
                    "Load components must be finite",
                ));
            }
        }

        Ok(index)
    }

    /// Number of reaction components over all supported nodes
    pub fn reaction_count(&self) -> usize {
        self.nodes.iter().filter_map(|n| n.support).map(|s| s.reactions()).sum()
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// Support reaction at a node (kN)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussReaction {
    pub node_id: String,
    pub rx: f64,
    pub ry: f64,
}

/// Axial response of one member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberForce {
    pub member_id: String,
    /// Axial force (kN), tension positive
    pub axial_force: f64,
    /// Axial stress (MPa)
    pub stress: f64,
    /// Axial strain (dimensionless)
    pub strain: f64,
    /// Change in length (mm)
    pub elongation: f64,
}

impl MemberForce {
    pub fn is_tension(&self) -> bool {
        self.axial_force > 0.0
    }
}

/// Truss analysis output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrussResult {
    /// Reactions at supported nodes, in node order
    pub reactions: Vec<TrussReaction>,
    /// Member forces in member order; empty unless every member was solved
    pub member_forces: Vec<MemberForce>,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    pub determinacy: Determinacy,
}

impl TrussResult {
    fn failed(determinacy: Determinacy, reactions: Vec<TrussReaction>, error: &CalcError) -> Self {
        TrussResult {
            reactions,
            member_forces: Vec::new(),
            is_valid: false,
            error: Some(error.to_string()),
            error_code: Some(error.error_code().to_string()),
            determinacy,
        }
    }

    /// Force in the member with the given id
    pub fn member(&self, member_id: &str) -> Option<&MemberForce> {
        self.member_forces.iter().find(|f| f.member_id == member_id)
    }

    /// Reaction at the node with the given id
    pub fn reaction(&self, node_id: &str) -> Option<&TrussReaction> {
        self.reactions.iter().find(|r| r.node_id == node_id)
    }
}

// =============================================================================
// ANALYSIS
// =============================================================================

/// Classify with the planar truss rule: members + reactions vs 2 × joints
pub fn classify_truss(config: &TrussConfig) -> Determinacy {
    Determinacy::from_counts(config.members.len() + config.reaction_count(), 2 * config.nodes.len())
}

/// Reactions of a truss on exactly one pin and one roller.
///
/// Moments about the pin give the roller's vertical reaction, then force
/// balance gives the pin. The roller carries no horizontal force.
pub fn solve_truss_reactions(config: &TrussConfig) -> CalcResult<Vec<TrussReaction>> {
    let supported: Vec<&TrussNode> = config.nodes.iter().filter(|n| n.support.is_some()).collect();
    if supported.is_empty() {
        return Err(CalcError::MissingSupport);
    }

    let pins: Vec<&TrussNode> = supported.iter().copied().filter(|n| n.support == Some(TrussSupport::Pin)).collect();
    let rollers: Vec<&TrussNode> = supported
        .iter()
        .copied()
        .filter(|n| n.support == Some(TrussSupport::Roller))
        .collect();
    let (pin, roller) = match (pins.as_slice(), rollers.as_slice()) {
        ([pin], [roller]) => (*pin, *roller),
        _ => {
            return Err(CalcError::unsupported(format!(
                "{} pin + {} roller (tam olarak bir pin ve bir roller gerekli)",
                pins.len(),
                rollers.len()
            )))
        }
    };

    let lever = roller.x - pin.x;
    if lever.abs() < MIN_MEMBER_LENGTH {
        return Err(CalcError::unsupported(format!(
            "pin {} ve roller {} aynı düşey hat üzerinde",
            pin.id, roller.id
        )));
    }

    let positions: HashMap<&str, (f64, f64)> = config.nodes.iter().map(|n| (n.id.as_str(), (n.x, n.y))).collect();
    let (mut sum_fx, mut sum_fy, mut sum_m) = (0.0, 0.0, 0.0);
    for load in &config.loads {
        let (x, y) = positions.get(load.node_id.as_str()).copied().unwrap_or((pin.x, pin.y));
        sum_fx += load.fx;
        sum_fy += load.fy;
        sum_m += (x - pin.x) * load.fy - (y - pin.y) * load.fx;
    }

    let roller_ry = -sum_m / lever;
    let pin_ry = -sum_fy - roller_ry;
    let pin_rx = -sum_fx;

    let reactions = config
        .nodes
        .iter()
        .filter_map(|node| {
            if node.id == pin.id {
                Some(TrussReaction { node_id: node.id.clone(), rx: pin_rx, ry: pin_ry })
            } else if node.id == roller.id {
                Some(TrussReaction { node_id: node.id.clone(), rx: 0.0, ry: roller_ry })
            } else {
                None
            }
        })
        .collect();
    Ok(reactions)
}

/// Net external force (loads plus reactions) per node, in node order
fn external_forces(config: &TrussConfig, index: &HashMap<&str, usize>, reactions: &[TrussReaction]) -> Vec<(f64, f64)> {
    let mut external = vec![(0.0, 0.0); config.nodes.len()];
    let loads = config.loads.iter().map(|l| (l.node_id.as_str(), l.fx, l.fy));
    let supports = reactions.iter().map(|r| (r.node_id.as_str(), r.rx, r.ry));
    for (id, fx, fy) in loads.chain(supports) {
        if let Some(&i) = index.get(id) {
            external[i].0 += fx;
            external[i].1 += fy;
        }
    }
    external
}

/// Analyze a truss with default solver settings
pub fn analyze_truss(config: &TrussConfig) -> CalcResult<TrussResult> {
    analyze_truss_with(config, &SolverSettings::default())
}

/// Analyze a truss.
///
/// Returns `Err` only for malformed input (dangling or duplicate ids,
/// zero-length members, non-finite values).
pub fn analyze_truss_with(config: &TrussConfig, settings: &SolverSettings) -> CalcResult<TrussResult> {
    settings.validate()?;
    let index = config.validate()?;

    let determinacy = classify_truss(config);
    debug!(
        nodes = config.nodes.len(),
        members = config.members.len(),
        reactions = config.reaction_count(),
        ?determinacy,
        "analyzing truss"
    );

    if config.reaction_count() == 0 {
        warn!("truss has no supports");
        return Ok(TrussResult::failed(determinacy, Vec::new(), &CalcError::MissingSupport));
    }

    let unknowns = config.members.len() + config.reaction_count();
    let equations = 2 * config.nodes.len();
    match determinacy {
        Determinacy::Unstable { .. } => {
            warn!(unknowns, equations, "truss is unstable");
            return Ok(TrussResult::failed(determinacy, Vec::new(), &CalcError::unstable(unknowns, equations)));
        }
        Determinacy::Indeterminate { .. } => {
            warn!(unknowns, equations, "truss is indeterminate");
            let error = CalcError::Indeterminate { unknowns, equations };
            return Ok(TrussResult::failed(determinacy, Vec::new(), &error));
        }
        Determinacy::Determinate => {}
    }

    let reactions = match solve_truss_reactions(config) {
        Ok(reactions) => reactions,
        Err(error) if error.is_analysis_failure() => {
            warn!(code = error.error_code(), "truss reactions not solved: {}", error);
            return Ok(TrussResult::failed(determinacy, Vec::new(), &error));
        }
        Err(error) => return Err(error),
    };

    let geometry: Vec<JointMember> = config
        .members
        .iter()
        .map(|m| {
            let (i, j) = (index[m.start.as_str()], index[m.end.as_str()]);
            let (a, b) = (&config.nodes[i], &config.nodes[j]);
            JointMember::between(i, j, (a.x, a.y), (b.x, b.y))
        })
        .collect();
    let external = external_forces(config, &index, &reactions);

    let forces = match solve_joints(&geometry, &external) {
        Ok(forces) => forces,
        Err(error) if error.is_analysis_failure() => {
            return Ok(TrussResult::failed(determinacy, reactions, &error));
        }
        Err(error) => return Err(error),
    };

    let member_forces = config
        .members
        .iter()
        .zip(&geometry)
        .zip(&forces)
        .map(|((member, joint), &force)| {
            let stress = axial_stress(KiloNewtons(force), Mm2(member.area_mm2())).value();
            let strain = stress / member.elastic_modulus_mpa();
            let length_mm: Millimeters = Meters(joint.length).into();
            MemberForce {
                member_id: member.id.clone(),
                axial_force: force,
                stress,
                strain,
                elongation: strain * length_mm.value(),
            }
        })
        .collect();

    let mut result = TrussResult {
        reactions,
        member_forces,
        is_valid: true,
        error: None,
        error_code: None,
        determinacy,
    };

    // Any joint left out of balance means the force set is inconsistent
    for node in &config.nodes {
        let (rx, ry) = joint_residual(config, &result, &node.id)?;
        if rx.abs() > settings.equilibrium_tolerance || ry.abs() > settings.equilibrium_tolerance {
            let error = CalcError::EquilibriumNotSatisfied { sum_fx: rx, sum_fy: ry, sum_m: 0.0 };
            warn!(node = %node.id, rx, ry, "truss joint out of balance");
            result.is_valid = false;
            result.error = Some(error.to_string());
            result.error_code = Some(error.error_code().to_string());
            break;
        }
    }

    Ok(result)
}

/// Force imbalance (kN) at a node: loads + reactions + member pulls.
///
/// Members without a solved force are skipped.
pub fn joint_residual(config: &TrussConfig, result: &TrussResult, node_id: &str) -> CalcResult<(f64, f64)> {
    let node = config
        .nodes
        .iter()
        .find(|n| n.id == node_id)
        .ok_or_else(|| CalcError::invalid_input("node_id", node_id, "Unknown node id"))?;

    let mut residual = (0.0, 0.0);
    for load in config.loads.iter().filter(|l| l.node_id == node_id) {
        residual.0 += load.fx;
        residual.1 += load.fy;
    }
    if let Some(reaction) = result.reaction(node_id) {
        residual.0 += reaction.rx;
        residual.1 += reaction.ry;
    }

    for member in config.members.iter().filter(|m| m.start == node_id || m.end == node_id) {
        let Some(force) = result.member(&member.id) else {
            continue;
        };
        let other_id = if member.start == node_id { &member.end } else { &member.start };
        let Some(other) = config.nodes.iter().find(|n| &n.id == other_id) else {
            continue;
        };
        let (dx, dy) = (other.x - node.x, other.y - node.y);
        let length = dx.hypot(dy);
        if length > 0.0 {
            residual.0 += force.axial_force * dx / length;
            residual.1 += force.axial_force * dy / length;
        }
    }

    Ok(residual)
}

// =============================================================================
// UNIT TESTS
// =============================================================================
