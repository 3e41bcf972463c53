use clearance::{AttributionState, ClearanceError};

use crate::helpers::{id, open, replace_pair};

#[test]
fn replace_moves_links_and_deletes_source() {
    let mut project = open(replace_pair());
    project.replace(&id("uuid_1"), &id("uuid_2")).unwrap();

    let payload = project.save_file_args();
    assert_eq!(payload.resources_to_attributions["/a"], vec![id("uuid_2")]);
    assert_eq!(payload.resources_to_attributions["/b"], vec![id("uuid_2")]);
    assert!(!payload.manual_attributions.contains_key(&id("uuid_1")));
    assert_eq!(
        project.attribution_state(&id("uuid_1")),
        Some(AttributionState::Deleted)
    );
    project.manual().check_consistency().unwrap();
}

#[test]
fn replace_does_not_duplicate_shared_links() {
    let mut project = open(replace_pair());
    project.link("/b", &id("uuid_1")).unwrap();
    project.replace(&id("uuid_1"), &id("uuid_2")).unwrap();
    assert_eq!(
        project.save_file_args().resources_to_attributions["/b"],
        vec![id("uuid_2")]
    );
}

#[test]
fn self_replacement_is_rejected() {
    let mut project = open(replace_pair());
    let before = project.save_file_args();
    let err = project.replace(&id("uuid_1"), &id("uuid_1")).unwrap_err();
    assert_eq!(err, ClearanceError::self_replacement("uuid_1"));
    assert_eq!(project.save_file_args(), before);
}

#[test]
fn replace_with_unknown_target_changes_nothing() {
    let mut project = open(replace_pair());
    let before = project.save_file_args();
    let err = project.replace(&id("uuid_1"), &id("ghost")).unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));
    assert_eq!(project.save_file_args(), before);
}

#[test]
fn two_step_replace_uses_the_mark() {
    let mut project = open(replace_pair());
    project.mark_for_replacement(&id("uuid_1")).unwrap();
    assert_eq!(project.marked_for_replacement(), Some(&id("uuid_1")));

    project.replace_marked_with(&id("uuid_2")).unwrap();
    assert_eq!(project.marked_for_replacement(), None);
    assert!(project.attribution(&id("uuid_1")).is_none());
}

#[test]
fn failed_two_step_replace_keeps_the_mark() {
    let mut project = open(replace_pair());
    project.mark_for_replacement(&id("uuid_1")).unwrap();
    let err = project.replace_marked_with(&id("uuid_1")).unwrap_err();
    assert!(matches!(err, ClearanceError::SelfReplacement { .. }));
    assert_eq!(project.marked_for_replacement(), Some(&id("uuid_1")));

    project.unmark_for_replacement();
    let err = project.replace_marked_with(&id("uuid_2")).unwrap_err();
    assert!(matches!(err, ClearanceError::InvalidArg(_)));
}

#[test]
fn deleting_the_marked_attribution_clears_the_mark() {
    let mut project = open(replace_pair());
    project.mark_for_replacement(&id("uuid_1")).unwrap();
    project.delete(&id("uuid_1")).unwrap();
    assert_eq!(project.marked_for_replacement(), None);
}
