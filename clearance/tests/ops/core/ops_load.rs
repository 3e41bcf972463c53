use clearance::{
    AttributionState, Clearance, ClearanceError, ExternalAttributionSource, ProjectInput,
};

use crate::helpers::{attribution_data, id, open, pkg, scanned_project};

#[test]
fn build_without_project_is_invalid_arg() {
    let err = Clearance::builder().build().err().unwrap();
    assert!(matches!(err, ClearanceError::InvalidArg(_)));
}

#[test]
fn loads_project_json_with_file_and_folder_nodes() {
    let json = r#"{
        "metadata": { "projectId": "p", "fileCreationDate": "2024" },
        "resources": { "root": { "src": { "file_1": 1, "file_2": 1 } }, "file": 1 },
        "manualAttributions": {
            "attributions": {
                "uuid_1": { "packageName": "Angular", "packageVersion": "16.0.0", "attributionConfidence": 80 }
            },
            "resourcesToAttributions": { "/root/src/file_1": ["uuid_1"] }
        }
    }"#;
    let input: ProjectInput = serde_json::from_str(json).unwrap();
    let project = open(input);

    assert!(project.load_warnings().is_empty());
    assert_eq!(project.metadata().project_id, "p");
    assert!(project.tree().contains("/root/src/"));
    assert!(project.tree().is_file("/file"));
    assert_eq!(
        project.attribution_state(&id("uuid_1")),
        Some(AttributionState::Active)
    );
    assert_eq!(
        project.resources_for_attribution(&id("uuid_1")),
        vec!["/root/src/file_1".to_string()]
    );
}

#[test]
fn inconsistent_project_data_is_dropped_with_warnings() {
    let mut input = scanned_project();
    input.manual_attributions = attribution_data(vec![
        ("on-breakpoint", pkg("a", "1"), vec!["/root/node_modules/"]),
        ("on-unknown", pkg("b", "1"), vec!["/nowhere"]),
        ("kept", pkg("c", "1"), vec!["/root/src/index.js", "/nowhere"]),
    ]);
    input
        .manual_attributions
        .resources_to_attributions
        .insert("/root/src/util.js".into(), vec![id("ghost")]);
    input.resolved_external_attributions.insert(id("not-a-signal"));
    input.attribution_breakpoints.insert("/missing/".into());

    let project = open(input);

    assert!(project.attribution(&id("on-breakpoint")).is_none());
    assert!(project.attribution(&id("on-unknown")).is_none());
    assert_eq!(
        project.resources_for_attribution(&id("kept")),
        vec!["/root/src/index.js".to_string()]
    );
    assert!(project.attributions_for_resource("/root/src/util.js").is_empty());
    assert!(!project.is_resolved(&id("not-a-signal")));
    assert!(!project.breakpoints().contains("/missing/"));
    assert!(project.load_warnings().len() >= 6);
    project.manual().check_consistency().unwrap();
}

#[test]
fn breakpoint_paths_are_canonicalized() {
    let mut input = scanned_project();
    input.attribution_breakpoints = ["/root/node_modules".to_owned()].into_iter().collect();
    let project = open(input);
    assert!(project.breakpoints().contains("/root/node_modules/"));
}

#[test]
fn builder_sources_override_project_sources() {
    let project = Clearance::builder()
        .project(scanned_project())
        .source("SC", ExternalAttributionSource::new("Scancode Toolkit", 5))
        .build()
        .unwrap();
    let sources = &project.config().sources;
    assert_eq!(sources["SC"].name, "Scancode Toolkit");
    assert_eq!(sources["SC"].priority, 5);
    assert_eq!(sources["HC"].name, "High Compute");
}

#[test]
fn preferred_markers_are_collected_on_load() {
    let mut input = scanned_project();
    if let Some(p) = input
        .manual_attributions
        .attributions
        .get_mut(&id("m-react"))
    {
        p.preferred = true;
    }
    if let Some(p) = input
        .external_attributions
        .attributions
        .get_mut(&id("sc-zlib"))
    {
        p.preferred = true;
    }
    let project = open(input);
    assert!(project.preferred().contains(&id("m-react")));
    assert!(project.preferred().contains(&id("sc-zlib")));
    assert!(!project.preferred().contains(&id("sc-react")));
}
