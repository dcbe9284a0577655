//! # Method of Joints
//!
//! Solves member axial forces of a pin-jointed truss by visiting joints one
//! at a time. A joint can be solved once at most two of its members are
//! still unknown: two equations (ΣFx = 0, ΣFy = 0) for up to two forces.
//!
//! Each round scans the unsolved joints in input order and solves every one
//! that has become solvable. Rounds stop when all members are known, when a
//! round makes no progress, or after `2 × member count` rounds.
//!
//! ## Sign Convention
//!
//! Tension is positive. A member pulls on a joint along the unit vector
//! pointing from that joint into the member: `+u` at the member's start
//! joint and `−u` at its end joint, where `u` points start → end.

use tracing::{debug, warn};

use crate::errors::{CalcError, CalcResult};

/// Determinants smaller than this mark two unknown members as parallel
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Member geometry by joint index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointMember {
    pub start: usize,
    pub end: usize,
    /// Length (m)
    pub length: f64,
    /// Direction cosines of start → end
    pub cos: f64,
    pub sin: f64,
}

impl JointMember {
    /// Member between two joints at the given coordinates (m)
    pub fn between(start: usize, end: usize, from: (f64, f64), to: (f64, f64)) -> Self {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = dx.hypot(dy);
        JointMember {
            start,
            end,
            length,
            cos: dx / length,
            sin: dy / length,
        }
    }

    /// +1 if `joint` is the start of this member, −1 otherwise
    pub fn sign_at(&self, joint: usize) -> f64 {
        if joint == self.start {
            1.0
        } else {
            -1.0
        }
    }

    /// Unit pull direction of a tension force on `joint`
    pub fn pull_on(&self, joint: usize) -> (f64, f64) {
        let s = self.sign_at(joint);
        (s * self.cos, s * self.sin)
    }
}

/// Solve all member forces.
///
/// `external[j]` is the applied load plus support reaction at joint `j` (kN).
/// Returns forces in member order, or `UnsolvedSystem` if some members
/// could not be reached.
pub fn solve_joints(members: &[JointMember], external: &[(f64, f64)]) -> CalcResult<Vec<f64>> {
    let joint_count = external.len();
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); joint_count];
    for (m, member) in members.iter().enumerate() {
        for joint in [member.start, member.end] {
            let list = incident.get_mut(joint).ok_or_else(|| CalcError::Internal {
                message: format!("member {} references joint {} of {}", m, joint, joint_count),
            })?;
            list.push(m);
        }
    }

    let mut forces: Vec<Option<f64>> = vec![None; members.len()];
    let mut joint_done = vec![false; joint_count];
    let max_rounds = (2 * members.len()).max(1);

    for round in 0..max_rounds {
        let mut progress = false;

        for joint in 0..joint_count {
            if joint_done[joint] {
                continue;
            }

            // Known resultant at the joint: external force plus solved members
            let mut known = external[joint];
            let mut unknown = Vec::with_capacity(2);
            for &m in &incident[joint] {
                match forces[m] {
                    Some(f) => {
                        let (ux, uy) = members[m].pull_on(joint);
                        known.0 += f * ux;
                        known.1 += f * uy;
                    }
                    None => unknown.push(m),
                }
            }

            match unknown.as_slice() {
                [] => {
                    joint_done[joint] = true;
                }
                [m] => {
                    // Single unknown: cancel the resultant along the member
                    let (ux, uy) = members[*m].pull_on(joint);
                    forces[*m] = Some(-(known.0 * ux + known.1 * uy));
                    joint_done[joint] = true;
                    progress = true;
                }
                [m1, m2] => {
                    let (a1, b1) = members[*m1].pull_on(joint);
                    let (a2, b2) = members[*m2].pull_on(joint);
                    // [a1 a2; b1 b2]·[F1; F2] = −known
                    let det = a1 * b2 - a2 * b1;
                    if det.abs() < SINGULAR_TOLERANCE {
                        continue;
                    }
                    let (rx, ry) = (-known.0, -known.1);
                    forces[*m1] = Some((rx * b2 - a2 * ry) / det);
                    forces[*m2] = Some((a1 * ry - rx * b1) / det);
                    joint_done[joint] = true;
                    progress = true;
                }
                _ => {}
            }
        }

        let unsolved = forces.iter().filter(|f| f.is_none()).count();
        debug!(round, unsolved, "method of joints round");
        if unsolved == 0 || !progress {
            break;
        }
    }

    let unsolved = forces.iter().filter(|f| f.is_none()).count();
    if unsolved > 0 {
        warn!(unsolved, "method of joints stalled");
        return Err(CalcError::UnsolvedSystem { unsolved });
    }

    Ok(forces.into_iter().flatten().collect())
}

// =============================================================================
// UNIT TESTS
// =============================================================================
