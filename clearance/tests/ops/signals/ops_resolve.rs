use clearance::{AttributionState, ClearanceError};

use crate::helpers::{id, open, scanned_project};

#[test]
fn resolve_and_unresolve_toggle_the_set() {
    let mut project = open(scanned_project());
    let react = id("sc-react");
    let before = project.signal(&react).cloned();

    project.resolve(&[react.clone()]).unwrap();
    assert_eq!(project.attribution_state(&react), Some(AttributionState::Resolved));
    assert!(project.save_file_args().resolved_external_attributions.contains(&react));
    assert_eq!(project.signal(&react).cloned(), before);

    project.unresolve(&[react.clone()]).unwrap();
    assert_eq!(
        project.attribution_state(&react),
        Some(AttributionState::Unresolved)
    );
}

#[test]
fn resolve_rejects_manual_ids_without_partial_effect() {
    let mut project = open(scanned_project());
    let err = project
        .resolve(&[id("sc-lodash"), id("m-react")])
        .unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));
    assert!(!project.is_resolved(&id("sc-lodash")));
}

#[test]
fn resolved_signals_leave_progress() {
    let mut project = open(scanned_project());
    let before = project.progress("/root/src/util.js").unwrap();
    assert_eq!(before.only_signals, 1);

    project.resolve(&[id("sc-lodash")]).unwrap();
    let after = project.progress("/root/src/util.js").unwrap();
    assert_eq!(after.only_signals, 0);
    assert_eq!(after.none, 1);
}

#[test]
fn clearing_preferred_records_was_preferred() {
    let mut project = open(scanned_project());
    let react = id("m-react");

    project.set_preferred(&react, true).unwrap();
    assert!(project.preferred().contains(&react));
    assert!(project.attribution(&react).unwrap().preferred);

    project.set_preferred(&react, false).unwrap();
    let now = project.attribution(&react).unwrap();
    assert!(!now.preferred);
    assert!(now.was_preferred);
    assert!(!project.preferred().contains(&react));
}

#[test]
fn signals_toggle_preferred_without_changing() {
    let mut project = open(scanned_project());
    let react = id("hc-react");
    let before = project.signal(&react).cloned();
    assert_eq!(
        project.preference_state(&react),
        Some(AttributionState::NotPreferred)
    );

    project.set_preferred(&react, true).unwrap();
    assert_eq!(
        project.preference_state(&react),
        Some(AttributionState::Preferred)
    );
    assert!(project.preferred().contains(&react));
    assert_eq!(project.signal(&react).cloned(), before);
    assert_eq!(
        project.attribution_state(&react),
        Some(AttributionState::Unresolved)
    );

    project.set_preferred(&react, false).unwrap();
    assert_eq!(
        project.preference_state(&react),
        Some(AttributionState::NotPreferred)
    );
    assert_eq!(project.signal(&react).cloned(), before);
}

#[test]
fn preference_state_is_for_signals_only() {
    let mut project = open(scanned_project());
    assert_eq!(project.preference_state(&id("m-react")), None);
    let err = project.set_preferred(&id("nope"), true).unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));
}
