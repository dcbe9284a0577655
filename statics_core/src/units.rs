//! # Unit Types
//!
//! Type-safe wrappers for the SI units the engine exchanges with callers.
//! They are plain `f64` newtypes that serialize as bare numbers.
//!
//! ## Working Units
//!
//! Model input and solver output use a consistent "structural SI" set:
//! - Length: metres (m); truss elongation in millimetres (mm)
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-metres (kN·m)
//! - Stress / modulus: megapascals (MPa = N/mm²)
//! - Section modulus: cm³, moment of inertia: cm⁴, member area: mm²
//!
//! Mixed-unit products (stress from kN·m over cm³, EI from MPa and cm⁴)
//! are collected here so the solvers never carry raw conversion factors.
//!
//! ## Example
//!
//! ```rust
//! use statics_core::units::{Meters, Millimeters, KnM, Cm3, bending_stress};
//!
//! let span = Meters(6.0);
//! let span_mm: Millimeters = span.into();
//! assert_eq!(span_mm.0, 6000.0);
//!
//! // 15 kN·m over a 500 cm³ section
//! assert_eq!(bending_stress(KnM(15.0), Cm3(500.0)).0, 30.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Force Units
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

impl From<KiloNewtons> for Newtons {
    fn from(kn: KiloNewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

impl From<Newtons> for KiloNewtons {
    fn from(n: Newtons) -> Self {
        KiloNewtons(n.0 / 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnM(pub f64);

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NMm(pub f64);

impl From<KnM> for NMm {
    fn from(knm: KnM) -> Self {
        NMm(knm.0 * 1.0e6)
    }
}

impl From<NMm> for KnM {
    fn from(nmm: NMm) -> Self {
        KnM(nmm.0 / 1.0e6)
    }
}

// ============================================================================
// Stress Units
// ============================================================================

/// Stress or elastic modulus in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

// ============================================================================
// Section Properties
// ============================================================================

/// Cross-sectional area in mm²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm2(pub f64);

/// Section modulus in cm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm3(pub f64);

/// Moment of inertia in cm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm4(pub f64);

/// Flexural rigidity in kN·m²
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnM2(pub f64);

// ============================================================================
// Mixed-Unit Products
// ============================================================================

/// Bending stress σ = M/S.
///
/// kN·m → N·mm is ×10⁶, cm³ → mm³ is ×10³, so σ[MPa] = 1000·M/S.
pub fn bending_stress(moment: KnM, section_modulus: Cm3) -> MegaPascals {
    let m: NMm = moment.into();
    MegaPascals(m.0 / (section_modulus.0 * 1.0e3))
}

/// Flexural rigidity EI from E in MPa and I in cm⁴.
///
/// MPa = 10³ kN/m², cm⁴ = 10⁻⁸ m⁴, so EI[kN·m²] = E·I·10⁻⁵.
pub fn flexural_rigidity(elastic_modulus: MegaPascals, inertia: Cm4) -> KnM2 {
    KnM2(elastic_modulus.0 * inertia.0 * 1.0e-5)
}

/// Axial stress σ = N/A with N in kN and A in mm².
pub fn axial_stress(force: KiloNewtons, area: Mm2) -> MegaPascals {
    let n: Newtons = force.into();
    MegaPascals(n.0 / area.0)
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Meters);
impl_arithmetic!(Millimeters);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(Newtons);
impl_arithmetic!(KnM);
impl_arithmetic!(NMm);
impl_arithmetic!(MegaPascals);
impl_arithmetic!(Mm2);
impl_arithmetic!(Cm3);
impl_arithmetic!(Cm4);
impl_arithmetic!(KnM2);
