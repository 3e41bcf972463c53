use clearance::{AttributionState, ClearanceError, Confidence, PackageInfo};

use crate::helpers::{angular_vue, id, open, pkg, scanned_project};

#[test]
fn create_is_uncommitted_with_high_confidence() {
    let mut project = open(angular_vue());
    let new_id = project.create(PackageInfo::default()).unwrap();

    assert_eq!(
        project.attribution_state(&new_id),
        Some(AttributionState::Uncommitted)
    );
    assert_eq!(
        project.attribution(&new_id).unwrap().attribution_confidence,
        Some(Confidence::High)
    );
    assert!(!project.save_file_args().manual_attributions.contains_key(&new_id));
    project.manual().check_consistency().unwrap();
}

#[test]
fn create_registers_preferred_marker() {
    let mut project = open(angular_vue());
    let new_id = project
        .create(PackageInfo {
            preferred: true,
            ..pkg("react", "18.2.0")
        })
        .unwrap();
    assert!(project.preferred().contains(&new_id));

    project.discard(&new_id).unwrap();
    assert!(!project.preferred().contains(&new_id));
}

#[test]
fn link_commits_and_is_idempotent() {
    let mut project = open(angular_vue());
    let new_id = project.create(pkg("react", "18.2.0")).unwrap();

    assert!(project.link("/file", &new_id).unwrap());
    assert!(!project.link("/file", &new_id).unwrap());

    assert_eq!(project.attribution_state(&new_id), Some(AttributionState::Active));
    let payload = project.save_file_args();
    assert_eq!(payload.resources_to_attributions["/file"], vec![new_id.clone()]);
    assert!(payload.manual_attributions.contains_key(&new_id));
}

#[test]
fn link_accepts_folders_without_trailing_slash() {
    let mut project = open(angular_vue());
    project.link("/root/src", &id("uuid_1")).unwrap();
    assert_eq!(
        project.resources_for_attribution(&id("uuid_1")),
        vec!["/root/src/".to_string(), "/root/src/file_1".to_string()]
    );
}

#[test]
fn link_rejects_unknown_paths_and_breakpoints() {
    let mut project = open(scanned_project());
    let before = project.save_file_args();

    let err = project.link("/root/missing.js", &id("m-react")).unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));

    let err = project.link("/root/node_modules", &id("m-react")).unwrap_err();
    assert_eq!(err, ClearanceError::breakpoint("/root/node_modules/"));

    assert_eq!(project.save_file_args(), before);
}

#[test]
fn unlinking_the_last_link_deletes_for_good() {
    let mut project = open(angular_vue());
    let gone = id("uuid_2");

    assert!(project.unlink("/root/src/file_2", &gone).unwrap());
    assert_eq!(project.attribution_state(&gone), Some(AttributionState::Deleted));
    assert!(project.attribution(&gone).is_none());
    assert!(!project.save_file_args().manual_attributions.contains_key(&gone));

    let err = project.link("/root/src/file_2", &gone).unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));
    for _ in 0..32 {
        assert_ne!(project.create(PackageInfo::default()).unwrap(), gone);
    }
}

#[test]
fn unlinking_one_of_several_links_keeps_the_attribution() {
    let mut project = open(angular_vue());
    project.link("/file", &id("uuid_1")).unwrap();
    assert!(!project.unlink("/file", &id("uuid_1")).unwrap());
    assert_eq!(
        project.attribution_state(&id("uuid_1")),
        Some(AttributionState::Active)
    );
}

#[test]
fn unlink_of_missing_link_is_not_found() {
    let mut project = open(angular_vue());
    let err = project.unlink("/file", &id("uuid_1")).unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));
}

#[test]
fn delete_removes_every_link() {
    let mut project = open(angular_vue());
    project.link("/file", &id("uuid_1")).unwrap();
    let removed = project.delete(&id("uuid_1")).unwrap();
    assert_eq!(removed.package_name.as_deref(), Some("Angular"));

    let payload = project.save_file_args();
    assert!(!payload.resources_to_attributions.contains_key("/file"));
    assert!(!payload.resources_to_attributions.contains_key("/root/src/file_1"));
    assert_eq!(
        project.attribution_state(&id("uuid_1")),
        Some(AttributionState::Deleted)
    );
    project.manual().check_consistency().unwrap();
}

#[test]
fn discard_drops_uncommitted_only() {
    let mut project = open(angular_vue());
    let draft = project.create(pkg("tmp", "0")).unwrap();
    project.discard(&draft).unwrap();
    assert_eq!(project.attribution_state(&draft), Some(AttributionState::Deleted));

    let err = project.discard(&id("uuid_1")).unwrap_err();
    assert!(matches!(err, ClearanceError::InvalidArg(_)));
}

#[test]
fn update_replaces_all_fields() {
    let mut project = open(angular_vue());
    project
        .update(&id("uuid_2"), pkg("vue", "3.4.0"))
        .unwrap();
    let now = project.attribution(&id("uuid_2")).unwrap();
    assert_eq!(now.package_version.as_deref(), Some("3.4.0"));

    let err = project.update(&id("nope"), pkg("x", "1")).unwrap_err();
    assert!(matches!(err, ClearanceError::NotFound { .. }));
}
