//! # Propped Cantilever Compatibility
//!
//! Roller reaction of a beam fixed at one support and propped by a roller at
//! the other. The roller force is the one that cancels the tip deflection of
//! the released cantilever:
//!
//! ```text
//! R·l³/(3EI) + δ_load(l) = 0
//! ```
//!
//! Positions `u` are local: measured from the fixed support toward the
//! roller, `l` is the distance between them. Loads with `u < 0` sit behind
//! the fixed support and do not reach the roller. Loads with `u > l` sit on
//! the overhang past the roller.
//!
//! ```text
//!  ▣══════════════════○═══════
//!  u = 0              u = l     u > l
//! ```

/// Roller reaction per unit upward force at `u`, with the sign flipped
/// (a unit downward force gives a positive, upward reaction).
///
/// - 0 ≤ u ≤ l: u²(3l − u)/(2l³)
/// - u > l:     (3u − l)/(2l)
#[inline]
fn force_influence(u: f64, l: f64) -> f64 {
    if u < 0.0 {
        0.0
    } else if u <= l {
        u * u * (3.0 * l - u) / (2.0 * l.powi(3))
    } else {
        (3.0 * u - l) / (2.0 * l)
    }
}

/// Roller reaction per unit counterclockwise couple at `u`, sign flipped.
///
/// - 0 ≤ u ≤ l: 3u(2l − u)/(2l³)
/// - u > l:     3/(2l)
#[inline]
fn couple_influence(u: f64, l: f64) -> f64 {
    if u < 0.0 {
        0.0
    } else if u <= l {
        3.0 * u * (2.0 * l - u) / (2.0 * l.powi(3))
    } else {
        3.0 / (2.0 * l)
    }
}

/// Roller reaction for a point force (upward positive) at local position `u`
///
/// For a gravity load on the span: R = P·u²(3l − u)/(2l³)
#[inline]
pub fn propped_point_reaction(force: f64, u: f64, l: f64) -> f64 {
    -force * force_influence(u, l)
}

/// Roller reaction for a couple `m0` (counterclockwise positive, local frame) at `u`
///
/// A couple at the roller end gives R = −3M0/(2l), carrying M0/2 over to the fixed end.
#[inline]
pub fn propped_moment_reaction(m0: f64, u: f64, l: f64) -> f64 {
    -m0 * couple_influence(u, l)
}

/// Roller reaction for a full-span uniform load `w`: R = −3wl/8
#[inline]
pub fn propped_uniform_full_reaction(w: f64, l: f64) -> f64 {
    -3.0 * w * l / 8.0
}

/// Roller reaction for a linearly varying load between local positions `u0` and `u1`
/// with intensities `q0` and `q1` (upward positive, kN/m).
///
/// Uniform (`q0 == q1`) and triangular loads both go through here. The load is
/// split at the fixed support and at the roller so each piece meets a
/// single polynomial branch of the influence line. On the span the
/// integrand is quartic, which 3-point Gauss-Legendre integrates exactly.
pub fn propped_linear_load_reaction(u0: f64, q0: f64, u1: f64, q1: f64, l: f64) -> f64 {
    let (u0, q0, u1, q1) = if u0 <= u1 { (u0, q0, u1, q1) } else { (u1, q1, u0, q0) };
    let width = u1 - u0;
    if width <= 0.0 {
        return 0.0;
    }
    let intensity = |u: f64| q0 + (q1 - q0) * (u - u0) / width;

    let mut reaction = 0.0;
    for (lo, hi) in [(u0.max(0.0), u1.min(l)), (u0.max(l), u1)] {
        if hi > lo {
            reaction -= gauss_legendre_3(lo, hi, |u| intensity(u) * force_influence(u, l));
        }
    }
    reaction
}

/// 3-point Gauss-Legendre quadrature over [a, b], exact for polynomials up to degree 5
fn gauss_legendre_3(a: f64, b: f64, f: impl Fn(f64) -> f64) -> f64 {
    const NODE: f64 = 0.774_596_669_241_483_4; // sqrt(3/5)
    const W_OUTER: f64 = 5.0 / 9.0;
    const W_CENTER: f64 = 8.0 / 9.0;

    let half = (b - a) / 2.0;
    let mid = (a + b) / 2.0;
    half * (W_OUTER * f(mid - half * NODE) + W_CENTER * f(mid) + W_OUTER * f(mid + half * NODE))
}

// =============================================================================
// UNIT TESTS
// =============================================================================
