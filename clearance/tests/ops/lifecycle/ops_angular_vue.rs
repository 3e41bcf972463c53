use std::collections::BTreeMap;

use clearance::{EditSession, PackageField, SaveOutcome};

use crate::helpers::{angular_vue, id, open};

#[test]
fn aggregate_root_counts_both_attributions() {
    let project = open(angular_vue());
    let root = project.tree().canonicalize("/root").unwrap();
    let counts = clearance_core::aggregate(
        project.tree(),
        &root,
        project.manual(),
        project.breakpoints(),
        None,
    );
    assert_eq!(
        counts,
        BTreeMap::from([(id("uuid_1"), 1), (id("uuid_2"), 1)])
    );
}

#[test]
fn renaming_angular_to_react_reaches_the_save_payload() {
    let mut project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_1")).unwrap();
    form.set_field(PackageField::PackageName, "React");
    assert!(form.is_dirty());
    assert!(form.can_save());

    let outcome = form.save(&mut project, "/root/src/file_1").unwrap();
    assert_eq!(outcome, SaveOutcome::Updated);
    assert!(!form.is_dirty());

    let payload = project.save_file_args();
    assert_eq!(
        payload.manual_attributions[&id("uuid_1")]
            .package_name
            .as_deref(),
        Some("React")
    );
    assert_eq!(
        payload.resources_to_attributions["/root/src/file_1"],
        vec![id("uuid_1")]
    );
    assert_eq!(
        payload.manual_attributions[&id("uuid_2")]
            .package_name
            .as_deref(),
        Some("Vue")
    );
    assert!(payload.resolved_external_attributions.is_empty());
}
