use clearance::{PackageField, PanelData, Sorting};

use crate::helpers::{id, open, scanned_project};

fn names(panel: &PanelData) -> Vec<String> {
    panel
        .cards()
        .map(|c| c.package.package_name.clone().unwrap_or_default())
        .collect()
}

#[test]
fn contained_signals_skip_breakpoints_and_resolved() {
    let project = open(scanned_project());
    let panel = project.contained_signals("/root", None).unwrap();

    assert_eq!(panel.sorted_package_card_ids.len(), 4);
    let lodash = panel
        .cards()
        .find(|c| c.package.package_name.as_deref() == Some("lodash"))
        .unwrap();
    assert_eq!(lodash.count, 1);
    assert_eq!(lodash.attribution_ids, vec![id("sc-lodash")]);
    assert!(!names(&panel).contains(&"left-pad".to_string()));
}

#[test]
fn selecting_a_breakpoint_shows_its_contents() {
    let project = open(scanned_project());
    let panel = project
        .contained_signals("/root/node_modules/", Some(Sorting::Alphabetical))
        .unwrap();
    assert_eq!(names(&panel), vec!["lodash", "react"]);
}

#[test]
fn alphabetical_sorting_orders_by_label() {
    let project = open(scanned_project());
    let panel = project
        .contained_signals("/root", Some(Sorting::Alphabetical))
        .unwrap();
    let names = names(&panel);
    assert_eq!(names.first().map(String::as_str), Some("lodash"));
    assert_eq!(names.last().map(String::as_str), Some("zlib"));
}

#[test]
fn contained_attributions_cover_manual_links() {
    let project = open(scanned_project());
    let panel = project.contained_attributions("/root", None).unwrap();
    let mut names = names(&panel);
    names.sort();
    assert_eq!(names, vec!["react", "zlib"]);
}

#[test]
fn suggestions_are_grouped_by_scanner_priority() {
    let project = open(scanned_project());
    let groups = project
        .suggestions("/root/src", PackageField::PackageName)
        .unwrap();

    let labels: Vec<_> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["ScanCode", "High Compute", "Attributions"]);

    let scancode: Vec<_> = groups[0]
        .suggestions
        .iter()
        .map(|s| s.package.package_name.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(scancode, vec!["react", "lodash"]);
}

#[test]
fn resolving_removes_suggestions() {
    let mut project = open(scanned_project());
    project.resolve(&[id("hc-react")]).unwrap();
    let groups = project
        .suggestions("/root/src", PackageField::PackageName)
        .unwrap();
    assert!(groups.iter().all(|g| g.label != "High Compute"));
}
