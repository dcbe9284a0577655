//! Integration tests for truss analysis by the method of joints.

use statics_core::calculations::presets::TrussPreset;
use statics_core::calculations::supports::Determinacy;
use statics_core::calculations::truss::{
    analyze_truss, joint_residual, TrussConfig, TrussLoad, TrussMember, TrussNode, TrussResult,
};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() < tol
}

fn force(result: &TrussResult, member_id: &str) -> f64 {
    result.member(member_id).map(|f| f.axial_force).unwrap_or(f64::NAN)
}

fn assert_joints_balanced(config: &TrussConfig, result: &TrussResult) {
    for node in &config.nodes {
        let (rx, ry) = joint_residual(config, result, &node.id).expect("node exists");
        assert!(rx.abs() < 1e-9 && ry.abs() < 1e-9, "joint {} residual ({}, {})", node.id, rx, ry);
    }
}

/// 3-4-5 triangle with a load at the apex:
///
/// ```text
///             C (3,4)
///             ↓ 10 kN
///            / \
///           /   \
///          /     \
///   A △──────────── ○ B
///   (0,0)          (6,0)
/// ```
///
/// Expected: Ry = 5 kN each, AB = +3.75 kN (T), AC = BC = -6.25 kN (C)
#[test]
fn test_triangle_apex_load() {
    let config = TrussPreset::Triangle.config();
    let result = analyze_truss(&config).expect("well-formed truss");

    assert!(result.is_valid, "{:?}", result.error);
    assert_eq!(result.determinacy, Determinacy::Determinate);

    let a = result.reaction("A").unwrap();
    let b = result.reaction("B").unwrap();
    assert!(approx_eq(a.ry, 5.0, 1e-9));
    assert!(approx_eq(b.ry, 5.0, 1e-9));
    assert!(approx_eq(a.rx, 0.0, 1e-12));

    assert!(approx_eq(force(&result, "AB"), 3.75, 1e-9), "AB = {}", force(&result, "AB"));
    assert!(approx_eq(force(&result, "AC"), -6.25, 1e-9), "AC = {}", force(&result, "AC"));
    assert!(approx_eq(force(&result, "BC"), -6.25, 1e-9), "BC = {}", force(&result, "BC"));
    assert!(result.member("AB").unwrap().is_tension());
    assert!(!result.member("AC").unwrap().is_tension());

    assert_joints_balanced(&config, &result);
}

/// Four-panel Pratt truss, 10 kN at each interior bottom node:
///
/// ```text
///          U1─────U2─────U3
///         ╱│     ╱│╲     │╲
///        ╱ │   ╱  │  ╲   │ ╲
///   L0 △───L1───L2───L3───○ L4
///          ↓    ↓    ↓
/// ```
#[test]
fn test_pratt_truss() {
    let config = TrussPreset::Pratt.config();
    let result = analyze_truss(&config).expect("well-formed truss");

    assert!(result.is_valid, "{:?}", result.error);
    assert!(approx_eq(result.reaction("L0").unwrap().ry, 15.0, 1e-9));
    assert!(approx_eq(result.reaction("L4").unwrap().ry, 15.0, 1e-9));

    // End diagonal at 45° carries the full reaction
    assert!(approx_eq(force(&result, "L0-U1"), -15.0 * 2f64.sqrt(), 1e-9));
    assert!(approx_eq(force(&result, "L0-L1"), 15.0, 1e-9));
    // Hanger under the L1 load
    assert!(approx_eq(force(&result, "L1-U1"), 10.0, 1e-9));
    // Top chord: midspan moment 60 kN·m over a 3 m depth
    assert!(approx_eq(force(&result, "U1-U2"), -20.0, 1e-9), "U1-U2 = {}", force(&result, "U1-U2"));

    assert_joints_balanced(&config, &result);
}

#[test]
fn test_warren_truss() {
    let config = TrussPreset::Warren.config();
    let result = analyze_truss(&config).expect("well-formed truss");

    assert!(result.is_valid, "{:?}", result.error);
    assert!(approx_eq(result.reaction("L0").unwrap().ry, 15.0, 1e-9));
    assert!(approx_eq(result.reaction("L3").unwrap().ry, 15.0, 1e-9));

    // L0-U1 rises 3 over 2: F·3/√13 = -15
    assert!(approx_eq(force(&result, "L0-U1"), -5.0 * 13f64.sqrt(), 1e-9));
    assert!(approx_eq(force(&result, "L0-L1"), 10.0, 1e-9));

    assert_joints_balanced(&config, &result);
}

/// Member stress, strain and elongation follow from the axial force
#[test]
fn test_member_response() {
    let result = analyze_truss(&TrussPreset::Triangle.config()).unwrap();
    let ab = result.member("AB").unwrap();

    // 3.75 kN over 500 mm²
    assert!(approx_eq(ab.stress, 7.5, 1e-9));
    assert!(approx_eq(ab.strain, 7.5 / 200_000.0, 1e-15));
    // 6 m member
    assert!(approx_eq(ab.elongation, 7.5 / 200_000.0 * 6000.0, 1e-9));
}

#[test]
fn test_square_without_diagonal_is_unstable() {
    let config = TrussConfig {
        nodes: vec![
            TrussNode::pin("A", 0.0, 0.0),
            TrussNode::roller("B", 4.0, 0.0),
            TrussNode::free("C", 4.0, 4.0),
            TrussNode::free("D", 0.0, 4.0),
        ],
        members: vec![
            TrussMember::new("AB", "A", "B"),
            TrussMember::new("BC", "B", "C"),
            TrussMember::new("CD", "C", "D"),
            TrussMember::new("DA", "D", "A"),
        ],
        loads: vec![TrussLoad::new("C", 5.0, 0.0)],
    };
    let result = analyze_truss(&config).unwrap();

    assert!(!result.is_valid);
    assert_eq!(result.determinacy, Determinacy::Unstable { unknowns: 7 });
    assert_eq!(result.error_code.as_deref(), Some("UNSTABLE"));
    assert!(result.member_forces.is_empty());
}

/// Two nested triangles tied corner to corner:
///
/// ```text
///               C
///              /|\
///             / F \
///            / / \ \
///           / D───E \
///          / /     \ \
///       A △───────────○ B
/// ```
///
/// Counts balance (9 + 3 = 2 × 6), but every joint meets three members,
/// so no joint can be solved on its own.
#[test]
fn test_nested_triangles_report_unsolved_members() {
    let config = TrussConfig {
        nodes: vec![
            TrussNode::pin("A", 0.0, 0.0),
            TrussNode::roller("B", 6.0, 0.0),
            TrussNode::free("C", 3.0, 5.0),
            TrussNode::free("D", 2.0, 1.0),
            TrussNode::free("E", 4.0, 1.0),
            TrussNode::free("F", 3.0, 3.0),
        ],
        members: vec![
            TrussMember::new("AB", "A", "B"),
            TrussMember::new("BC", "B", "C"),
            TrussMember::new("CA", "C", "A"),
            TrussMember::new("DE", "D", "E"),
            TrussMember::new("EF", "E", "F"),
            TrussMember::new("FD", "F", "D"),
            TrussMember::new("AD", "A", "D"),
            TrussMember::new("BE", "B", "E"),
            TrussMember::new("CF", "C", "F"),
        ],
        loads: vec![TrussLoad::new("C", 0.0, -10.0)],
    };
    let result = analyze_truss(&config).expect("well-formed truss");

    assert_eq!(result.determinacy, Determinacy::Determinate);
    assert!(!result.is_valid);
    assert_eq!(result.error_code.as_deref(), Some("UNSOLVED_SYSTEM"));
    assert!(result.member_forces.is_empty());

    // Reactions are still reported
    assert_eq!(result.reactions.len(), 2);
    assert!(approx_eq(result.reaction("A").unwrap().ry, 5.0, 1e-9));
    assert!(approx_eq(result.reaction("B").unwrap().ry, 5.0, 1e-9));
}

#[test]
fn test_truss_without_supports() {
    let mut config = TrussPreset::Triangle.config();
    for node in &mut config.nodes {
        node.support = None;
    }
    let result = analyze_truss(&config).unwrap();

    assert!(!result.is_valid);
    assert_eq!(result.error_code.as_deref(), Some("MISSING_SUPPORT"));
}

#[test]
fn test_dangling_member_is_an_error() {
    let mut config = TrussPreset::Triangle.config();
    config.members.push(TrussMember::new("CX", "C", "X"));
    assert!(analyze_truss(&config).is_err());
}

#[test]
fn test_analysis_is_idempotent() {
    let config = TrussPreset::Pratt.config();
    assert_eq!(analyze_truss(&config).unwrap(), analyze_truss(&config).unwrap());
}
