//! # Closed-Form Beam Equations
//!
//! Formulas used by the indeterminate beam solvers. Keeping them in one
//! place makes each one easy to check against a reference table.
//!
//! ## Modules
//!
//! - [`fixed_end`] - Fixed-end moments for a beam fixed at both ends
//! - [`propped`] - Roller reaction of a propped cantilever by slope/deflection compatibility
//!
//! ## Sign Conventions
//!
//! - **Forces**: Positive upward (gravity loads are negative)
//! - **Moments / couples**: Positive counterclockwise
//! - **Reaction moments**: The moment the support applies to the beam, counterclockwise positive
//!
//! ## References
//!
//! - Roark's Formulas for Stress and Strain, 8th Edition, Table 8.1
//! - Structural Analysis by R.C. Hibbeler, Chapter 12

pub mod fixed_end;
pub mod propped;

pub use fixed_end::{fem_applied_moment, fem_partial_uniform, fem_point_load};
pub use propped::{
    propped_linear_load_reaction, propped_moment_reaction, propped_point_reaction,
    propped_uniform_full_reaction,
};
