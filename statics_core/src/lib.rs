//! # statics_core - Structural Statics Engine
//!
//! `statics_core` computes support reactions, shear/moment diagrams and
//! stress/deflection estimates for single-span beams, and member axial
//! forces for pin-jointed plane trusses. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take a model and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Two error tiers**: Malformed input is an `Err`; structures that cannot
//!   be solved come back as results with `is_valid = false`
//!
//! ## Units and Signs
//!
//! Lengths in m, forces in kN, moments in kN·m, E in MPa, S in cm³, I in cm⁴,
//! truss areas in mm². Forces are positive upward, moments counterclockwise.
//!
//! ## Quick Start
//!
//! ```rust
//! use statics_core::calculations::{analyze_beam, BeamConfig, Support};
//! use statics_core::loads::Load;
//!
//! let beam = BeamConfig::new(4.0)
//!     .with_support(Support::fixed(0.0))
//!     .with_load(Load::point(4.0, -10.0));
//!
//! let result = analyze_beam(&beam).unwrap();
//! let wall = result.reaction(0).unwrap();
//! assert!((wall.vertical - 10.0).abs() < 1e-9);
//! assert!((wall.moment - 40.0).abs() < 1e-9);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Beam and truss solvers, presets
//! - [`loads`] - Beam load definitions and resultants
//! - [`equations`] - Closed-form fixed-end and propped-cantilever formulas
//! - [`settings`] - Solver settings
//! - `project` - Project container and metadata (feature `project-files`)
//! - `file_io` - Atomic project saves, version-checked loads, project locks
//!   (feature `project-files`)
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod equations;
pub mod errors;
#[cfg(feature = "project-files")]
pub mod file_io;
pub mod loads;
#[cfg(feature = "project-files")]
pub mod project;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze_beam, analyze_truss, CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
#[cfg(feature = "project-files")]
pub use file_io::{load_project, save_project, ProjectLock};
#[cfg(feature = "project-files")]
pub use project::{Project, ProjectMetadata};
pub use settings::SolverSettings;
