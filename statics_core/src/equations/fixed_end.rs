//! # Fixed-End Moments
//!
//! Reaction moments at the two ends of a beam fixed at both ends, for a
//! single load. Positions are measured from the left fixed support, `l` is
//! the distance between the supports.
//!
//! ```text
//!        F
//!        ↓
//!  ▣═════╪══════════▣
//!  MA    a     b    MB
//!  ←────── l ───────→
//! ```
//!
//! Every function returns `(MA, MB)`, the moments the left and right
//! supports apply to the beam (counterclockwise positive). For a gravity
//! load MA is counterclockwise (positive) and MB clockwise (negative).

/// Fixed-end moments for a point force `force` at distance `a` from the left support
///
/// # Formulas (Roark's Table 8.1, Case 1d)
/// - |MA| = P·a·b²/l²
/// - |MB| = P·a²·b/l²
///
/// where b = l − a
#[inline]
pub fn fem_point_load(force: f64, a: f64, l: f64) -> (f64, f64) {
    let b = l - a;
    let l2 = l * l;
    (-force * a * b * b / l2, force * a * a * b / l2)
}

/// Fixed-end moments for a uniform load `w` from `start` to `end`
///
/// The resultant W = w·(end − start) is placed at its centroid and the
/// point-load formula is scaled by 2/3:
///
/// ```text
/// |MA| ≈ (2/3)·W·ā·b̄²/l²      |MB| ≈ (2/3)·W·ā²·b̄/l²
/// ```
///
/// For a load spanning the whole beam (ā = b̄ = l/2) this gives the exact
/// w·l²/12. For partial loads it is an approximation whose accuracy has
/// not been checked against the exact integral.
#[inline]
pub fn fem_partial_uniform(w: f64, start: f64, end: f64, l: f64) -> (f64, f64) {
    let resultant = w * (end - start);
    let centroid = (start + end) / 2.0;
    let (ma, mb) = fem_point_load(resultant, centroid, l);
    (ma * 2.0 / 3.0, mb * 2.0 / 3.0)
}

/// Fixed-end moments for an applied couple `m0` (counterclockwise positive) at distance `a`
///
/// # Formulas (Roark's Table 8.1, Case 3d)
/// - MA = M0·b·(2a − b)/l²
/// - MB = M0·a·(2b − a)/l²
///
/// where b = l − a. A couple at midspan gives MA = MB = M0/4.
#[inline]
pub fn fem_applied_moment(m0: f64, a: f64, l: f64) -> (f64, f64) {
    let b = l - a;
    let l2 = l * l;
    (m0 * b * (2.0 * a - b) / l2, m0 * a * (2.0 * b - a) / l2)
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON || (a - b).abs() / b.abs().max(1.0) < 1e-9
    }

    #[test]
    fn test_point_load_midspan() {
        // P = 20 down at midspan of 8 m: |M| = PL/8 = 20
        let (ma, mb) = fem_point_load(-20.0, 4.0, 8.0);
        assert!(approx_eq(ma, 20.0), "MA = {}", ma);
        assert!(approx_eq(mb, -20.0), "MB = {}", mb);
    }

    #[test]
    fn test_point_load_asymmetric() {
        // P = 9 down at a = 2 on l = 6: MA = 9·2·16/36 = 8, MB = 9·4·4/36 = 4
        let (ma, mb) = fem_point_load(-9.0, 2.0, 6.0);
        assert!(approx_eq(ma, 8.0), "MA = {}", ma);
        assert!(approx_eq(mb, -4.0), "MB = {}", mb);
    }

    #[test]
    fn test_point_load_at_support_vanishes() {
        let (ma, mb) = fem_point_load(-10.0, 0.0, 5.0);
        assert!(approx_eq(ma, 0.0));
        assert!(approx_eq(mb, 0.0));
    }

    #[test]
    fn test_full_uniform_matches_exact() {
        // w = 3 down over 6 m: wL²/12 = 9
        let (ma, mb) = fem_partial_uniform(-3.0, 0.0, 6.0, 6.0);
        assert!(approx_eq(ma, 9.0), "MA = {}", ma);
        assert!(approx_eq(mb, -9.0), "MB = {}", mb);
    }

    #[test]
    fn test_partial_uniform_is_not_the_exact_formula() {
        // Exact MA for w over [0, l/2]: 11wl²/192
        let l: f64 = 8.0;
        let w: f64 = -1.0;
        let exact_ma = -w * 11.0 * l * l / 192.0;
        let (ma, _) = fem_partial_uniform(w, 0.0, l / 2.0, l);
        assert!((ma - exact_ma).abs() > 0.1, "approximation unexpectedly exact: {}", ma);
    }

    #[test]
    fn test_applied_moment_midspan() {
        let (ma, mb) = fem_applied_moment(8.0, 3.0, 6.0);
        assert!(approx_eq(ma, 2.0), "MA = {}", ma);
        assert!(approx_eq(mb, 2.0), "MB = {}", mb);
    }

    #[test]
    fn test_applied_moment_at_end_is_taken_by_that_support() {
        // Couple applied right at the left support is resisted entirely there
        let (ma, mb) = fem_applied_moment(5.0, 0.0, 4.0);
        assert!(approx_eq(ma, -5.0), "MA = {}", ma);
        assert!(approx_eq(mb, 0.0), "MB = {}", mb);
    }
}
