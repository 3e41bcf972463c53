use clearance::{
    AttributionFilters, AttributionState, ClearanceError, Confidence, EditSession, PackageField,
    SaveOutcome,
};

use crate::helpers::{angular_vue, id, open, scanned_project};

const CURL: &str = "pkg:rpm/opensuse/curl@7.56.1-1.1.?arch=i386&distro=opensuse-tumbleweed";

#[test]
fn typed_purl_overwrites_sub_fields() {
    let project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_1")).unwrap();
    form.set_purl(CURL);

    let p = form.package();
    assert_eq!(p.package_type.as_deref(), Some("rpm"));
    assert_eq!(p.package_namespace.as_deref(), Some("opensuse"));
    assert_eq!(p.package_name.as_deref(), Some("curl"));
    assert_eq!(p.package_version.as_deref(), Some("7.56.1-1.1."));
    assert_eq!(
        p.package_purl_appendix.as_deref(),
        Some("?arch=i386&distro=opensuse-tumbleweed")
    );
    assert!(form.purl_error().is_none());
    assert!(form.can_save());
}

#[test]
fn invalid_purl_keeps_fields_and_blocks_save() {
    let mut project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_1")).unwrap();
    form.set_purl(CURL);
    form.set_comment(Some("checked".into()));
    form.set_purl("invalid-purl");

    assert_eq!(form.package().package_name.as_deref(), Some("curl"));
    assert_eq!(form.package().comment.as_deref(), Some("checked"));
    assert_eq!(form.purl(), "invalid-purl");
    assert!(matches!(
        form.purl_error(),
        Some(ClearanceError::InvalidPurl { .. })
    ));
    assert!(form.is_dirty());
    assert!(!form.can_save());

    let err = form.save(&mut project, "/root/src/file_1").unwrap_err();
    assert!(matches!(err, ClearanceError::InvalidPurl { .. }));
    assert_eq!(
        project.attribution(&id("uuid_1")).unwrap().package_name.as_deref(),
        Some("Angular")
    );
}

#[test]
fn invalid_purl_alone_leaves_nothing_to_undo() {
    let project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_1")).unwrap();
    form.set_purl("invalid-purl");

    assert!(form.purl_error().is_some());
    assert!(!form.is_dirty());
    assert!(!form.can_save());
    assert_eq!(form.package().package_name.as_deref(), Some("Angular"));
}

#[test]
fn editing_a_purl_field_clears_the_typed_purl() {
    let project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_1")).unwrap();
    form.set_purl("pkg:npm/%zz");
    assert!(form.purl_error().is_some());

    form.set_field(PackageField::PackageName, "angular-core");
    assert!(form.purl_error().is_none());
    assert_eq!(form.purl(), "pkg:npm/angular-core@16.0.0");
}

#[test]
fn undo_restores_last_saved_state() {
    let mut project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_2")).unwrap();
    form.set_field(PackageField::PackageVersion, "3.0.0");
    form.save(&mut project, "/root/src/file_2").unwrap();

    form.set_field(PackageField::PackageVersion, "3.1.0");
    form.set_purl("nonsense");
    form.undo();

    assert!(!form.is_dirty());
    assert!(form.purl_error().is_none());
    assert_eq!(form.package().package_version.as_deref(), Some("3.0.0"));
}

#[test]
fn saving_an_empty_edit_deletes() {
    let mut project = open(angular_vue());
    let mut form = EditSession::begin(&project, &id("uuid_2")).unwrap();
    for field in [
        PackageField::PackageType,
        PackageField::PackageName,
        PackageField::PackageVersion,
    ] {
        form.set_field(field, "  ");
    }
    assert!(form.package().is_empty());

    let outcome = form.save(&mut project, "/root/src/file_2").unwrap();
    assert_eq!(outcome, SaveOutcome::Deleted);
    assert_eq!(
        project.attribution_state(&id("uuid_2")),
        Some(AttributionState::Deleted)
    );
    assert!(form.id().is_none());
}

#[test]
fn new_attribution_is_linked_on_save_with_high_confidence() {
    let mut project = open(scanned_project());
    let mut form = EditSession::new_attribution();
    form.set_purl("pkg:npm/left-pad@1.3.0");
    form.set_flags(AttributionFilters::FOLLOW_UP | AttributionFilters::NEEDS_REVIEW);

    let SaveOutcome::Created(new_id) = form.save(&mut project, "/root/README.md").unwrap() else {
        panic!("expected a created attribution");
    };
    let saved = project.attribution(&new_id).unwrap();
    assert_eq!(saved.attribution_confidence, Some(Confidence::High));
    assert!(saved.follow_up);
    assert!(saved.needs_review);
    assert!(!saved.first_party);
    assert_eq!(
        project.resources_for_attribution(&new_id),
        vec!["/root/README.md".to_string()]
    );
    assert_eq!(form.id(), Some(&new_id));

    assert_eq!(
        form.save(&mut project, "/root/README.md").unwrap(),
        SaveOutcome::Unchanged
    );
}

#[test]
fn empty_new_attribution_is_discarded() {
    let mut project = open(angular_vue());
    let count = project.manual().len();
    let mut form = EditSession::new_attribution();
    assert_eq!(
        form.save(&mut project, "/file").unwrap(),
        SaveOutcome::Discarded
    );
    assert_eq!(project.manual().len(), count);
}

#[test]
fn created_draft_is_committed_on_save() {
    let mut project = open(angular_vue());
    let draft = project.create(Default::default()).unwrap();
    let mut form = EditSession::begin(&project, &draft).unwrap();
    form.set_copyright(Some("(c) Example".into()));

    assert_eq!(
        form.save(&mut project, "/file").unwrap(),
        SaveOutcome::Created(draft.clone())
    );
    assert_eq!(project.attribution_state(&draft), Some(AttributionState::Active));
    assert_eq!(
        project.save_file_args().resources_to_attributions["/file"],
        vec![draft]
    );
}

#[test]
fn new_attribution_on_breakpoint_fails_without_creating() {
    let mut project = open(scanned_project());
    let count = project.manual().len();
    let mut form = EditSession::new_attribution();
    form.set_field(PackageField::PackageName, "x");
    let err = form.save(&mut project, "/root/node_modules/").unwrap_err();
    assert!(matches!(err, ClearanceError::Breakpoint { .. }));
    assert_eq!(project.manual().len(), count);
    assert!(form.is_dirty());
}

#[test]
fn apply_takes_over_a_signal_without_provenance() {
    let project = open(scanned_project());
    let mut form = EditSession::new_attribution();
    form.apply(project.signal(&id("hc-react")).unwrap());
    assert_eq!(form.package().package_name.as_deref(), Some("react"));
    assert!(form.package().source.is_none());
    assert!(form.package().origin_ids.is_empty());
}
