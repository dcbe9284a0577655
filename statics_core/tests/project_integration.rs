//! Integration tests for project files: save, load, analyze.

#![cfg(feature = "project-files")]

use std::env::temp_dir;
use std::fs;
use std::path::PathBuf;

use statics_core::calculations::{BeamPreset, CalculationItem, CalculationOutput, Preset};
use statics_core::file_io::parse_project;
use statics_core::settings::SolverSettings;
use statics_core::{load_project, save_project, Project};

fn temp_project_path(name: &str) -> PathBuf {
    temp_dir().join(format!("statics_integration_{}_{}.json", name, std::process::id()))
}

#[test]
fn test_every_preset_survives_a_saved_project() {
    let path = temp_project_path("all_presets");

    let mut project = Project::new("Integration", "All presets");
    for preset in Preset::all() {
        project.add_item(preset.to_item());
    }
    save_project(&project, &path).expect("save");

    let loaded = load_project(&path).expect("load");
    let _ = fs::remove_file(&path);
    assert_eq!(loaded, project);

    let before = project.analyze_all().expect("analyze original");
    let after = loaded.analyze_all().expect("analyze loaded");
    assert_eq!(before, after);
    assert_eq!(after.len(), Preset::all().count());

    // Only the three-support beam is beyond the closed-form solvers
    for output in &after {
        let expected = output.label() != BeamPreset::Continuous.name();
        assert_eq!(output.is_valid(), expected, "{}: {:?}", output.label(), output.error());
    }
}

#[test]
fn test_project_settings_reach_the_solver() {
    let mut project = Project::new("Integration", "Coarse diagram");
    project.settings = SolverSettings::default().with_diagram_samples(5);
    project.add_item(Preset::Beam(BeamPreset::SimplySupported).to_item());

    let outputs = project.analyze_all().unwrap();
    let CalculationOutput::Beam { result, .. } = &outputs[0] else {
        panic!("expected a beam output");
    };
    // 5 uniform samples already include the load and both supports
    assert_eq!(result.diagram.len(), 5);
    assert!((result.max_moment.value - 15.0).abs() < 1e-9);
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut project = Project::new("Integration", "Bad settings");
    project.settings = SolverSettings::default().with_diagram_samples(1);
    project.add_item(Preset::Beam(BeamPreset::Cantilever).to_item());
    assert!(project.analyze_all().is_err());
}

/// A sample count that would exhaust memory is a contract error, not a crash
#[test]
fn test_oversized_sample_count_from_file_is_rejected() {
    let mut project = Project::new("Integration", "Huge diagram");
    project.add_item(Preset::Beam(BeamPreset::SimplySupported).to_item());
    let mut json = serde_json::to_value(&project).unwrap();
    json["settings"]["diagram_samples"] = serde_json::json!(u64::MAX);

    let loaded = parse_project(&json.to_string()).expect("schema is valid");
    let err = loaded.analyze_all().unwrap_err();
    assert_eq!(err.error_code(), "INVALID_INPUT");
}

#[test]
fn test_item_json_is_tagged_by_type() {
    let item: CalculationItem = Preset::Beam(BeamPreset::Cantilever).to_item();
    let json = serde_json::to_value(&item).unwrap();
    assert_eq!(json["type"], "Beam");

    let back: CalculationItem = serde_json::from_value(json).unwrap();
    assert_eq!(back, item);
}
