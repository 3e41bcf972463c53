use clearance::{
    AttributionFilters, AttributionStatistics, BreakpointPolicy, Clearance, ExportKind,
    ProgressBreakdown,
};

use crate::helpers::{id, open, scanned_project};

#[test]
fn list_puts_named_first_then_unnamed() {
    let project = open(scanned_project());
    assert_eq!(
        project.sorted_attribution_ids(AttributionFilters::empty()),
        vec![id("m-react"), id("m-zlib"), id("m-acme")]
    );
}

#[test]
fn filters_combine_conjunctively() {
    let project = open(scanned_project());
    let ids = |f| project.sorted_attribution_ids(f);

    assert_eq!(ids(AttributionFilters::FOLLOW_UP), vec![id("m-zlib")]);
    assert_eq!(ids(AttributionFilters::FIRST_PARTY), vec![id("m-acme")]);
    assert_eq!(
        ids(AttributionFilters::NOT_FIRST_PARTY),
        vec![id("m-react"), id("m-zlib")]
    );
    assert!(ids(AttributionFilters::FOLLOW_UP | AttributionFilters::FIRST_PARTY).is_empty());
}

#[test]
fn statistics_count_flags() {
    let project = open(scanned_project());
    assert_eq!(
        project.attribution_statistics(),
        AttributionStatistics {
            total: 3,
            follow_up: 1,
            first_party: 1,
            needs_review: 0,
            pre_selected: 0,
            excluded_from_notice: 0,
        }
    );
}

#[test]
fn export_views_select_by_kind() {
    let mut project = open(scanned_project());

    let follow_up = project.export_view(ExportKind::FollowUp);
    assert_eq!(follow_up.len(), 1);
    assert_eq!(follow_up[0].id, id("m-zlib"));
    assert_eq!(follow_up[0].resources, vec!["/root/vendor.tar/inner.c".to_string()]);

    let mut acme = project.attribution(&id("m-acme")).unwrap().clone();
    acme.exclude_from_notice = true;
    project.update(&id("m-acme"), acme).unwrap();

    for kind in [ExportKind::CompactList, ExportKind::DetailedList, ExportKind::Spdx] {
        let ids: Vec<_> = project.export_view(kind).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![id("m-react"), id("m-zlib")]);
    }
}

#[test]
fn progress_counts_breakpoints_and_archives_as_units() {
    let project = open(scanned_project());
    assert_eq!(
        project.progress("/root").unwrap(),
        ProgressBreakdown {
            total: 6,
            manual: 2,
            only_signals: 3,
            none: 1,
        }
    );
    assert_eq!(
        project.progress("/").unwrap(),
        ProgressBreakdown {
            total: 7,
            manual: 3,
            only_signals: 3,
            none: 1,
        }
    );
    let status = project.attribution_status("/root/").unwrap();
    assert_eq!((status.attributed, status.total), (2, 6));
}

#[test]
fn node_only_policy_ignores_breakpoint_contents() {
    let project = Clearance::builder()
        .project(scanned_project())
        .breakpoint_policy(BreakpointPolicy::NodeOnly)
        .build()
        .unwrap();
    let progress = project.progress("/root").unwrap();
    assert_eq!(progress.only_signals, 2);
    assert_eq!(progress.none, 2);
}

#[test]
fn views_reject_unknown_resources() {
    let project = open(scanned_project());
    assert!(project.progress("/root/nope").is_err());
    assert!(project.contained_signals("/nope", None).is_err());
}
