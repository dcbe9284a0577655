//! # Project Data Structures
//!
//! The `Project` struct is the root container for a set of analyses.
//! Projects serialize to human-readable JSON files.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, title, timestamps)
//! ├── settings: SolverSettings (diagram samples, equilibrium tolerance)
//! └── items: HashMap<Uuid, CalculationItem> (beams and trusses)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use statics_core::calculations::{BeamPreset, Preset};
//! use statics_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "Statics homework 3");
//! project.add_item(Preset::Beam(BeamPreset::Cantilever).to_item());
//!
//! for output in project.analyze_all().unwrap() {
//!     println!("{}: valid = {}", output.label(), output.is_valid());
//! }
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutput};
use crate::errors::CalcResult;
use crate::settings::SolverSettings;

/// Current schema version for project files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map so they keep stable ids while
/// being edited, added or removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub meta: ProjectMetadata,

    /// Solver settings applied to every item
    #[serde(default)]
    pub settings: SolverSettings,

    /// All calculation items, keyed by UUID
    #[serde(default)]
    pub items: HashMap<Uuid, CalculationItem>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use statics_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "Bridge study");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                title: title.into(),
                created: now,
                modified: now,
            },
            settings: SolverSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add a calculation item, returning its new UUID
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items sorted by label, then by id for equal labels
    pub fn sorted_items(&self) -> Vec<(&Uuid, &CalculationItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|(a_id, a), (b_id, b)| a.label().cmp(b.label()).then_with(|| a_id.cmp(b_id)));
        items
    }

    /// Analyze every item with the project settings, ordered by label.
    ///
    /// Stops at the first item with malformed input.
    pub fn analyze_all(&self) -> CalcResult<Vec<CalculationOutput>> {
        debug!(items = self.items.len(), "analyzing project");
        self.sorted_items()
            .into_iter()
            .map(|(_, item)| item.analyze(&self.settings))
            .collect()
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "")
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Project title
    pub title: String,

    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{BeamPreset, Preset, TrussPreset};

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "Roof truss");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.title, "Roof truss");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.settings, SolverSettings::default());
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "Footbridge");
        project.add_item(Preset::Truss(TrussPreset::Warren).to_item());
        let json = serde_json::to_string_pretty(&project).unwrap();

        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("\"diagram_samples\": 200"));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, project);
    }

    #[test]
    fn test_add_remove_item() {
        let mut project = Project::new("Engineer", "Test");
        let id = project.add_item(Preset::Beam(BeamPreset::Cantilever).to_item());
        assert_eq!(project.item_count(), 1);
        assert!(project.get_item(&id).is_some());

        let removed = project.remove_item(&id);
        assert!(removed.is_some());
        assert_eq!(project.item_count(), 0);
        assert!(project.remove_item(&id).is_none());
    }

    #[test]
    fn test_analyze_all_ordered_by_label() {
        let mut project = Project::new("Engineer", "Test");
        for preset in ["warren", "cantilever", "fixed-fixed"] {
            project.add_item(preset.parse::<Preset>().unwrap().to_item());
        }
        let labels: Vec<String> = project
            .analyze_all()
            .unwrap()
            .iter()
            .map(|o| o.label().to_string())
            .collect();
        assert_eq!(labels, ["cantilever", "fixed-fixed", "warren"]);
    }

    #[test]
    fn test_missing_settings_use_defaults() {
        let json = r#"{
            "meta": {
                "version": "0.1.0",
                "engineer": "E",
                "title": "T",
                "created": "2025-01-01T00:00:00Z",
                "modified": "2025-01-01T00:00:00Z"
            }
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.settings, SolverSettings::default());
        assert!(project.items.is_empty());
    }
}
