use std::collections::BTreeSet;

use clearance_core::{
    AttributionData, Confidence, ExternalAttributionSource, PackageInfo, ProjectInput,
    ProjectMetadata, ResourceNode, Resources, Source,
};

/// Manual npm attribution with a name and version.
#[must_use]
pub fn pkg(name: &str, version: &str) -> PackageInfo {
    PackageInfo {
        package_type: Some("npm".into()),
        package_name: Some(name.into()),
        package_version: Some(version.into()),
        attribution_confidence: Some(Confidence::High),
        ..PackageInfo::default()
    }
}

/// Signal reported by scanner `source`.
#[must_use]
pub fn signal(source: &str, name: &str, version: &str) -> PackageInfo {
    PackageInfo {
        package_type: Some("npm".into()),
        package_name: Some(name.into()),
        package_version: Some(version.into()),
        license_name: Some("MIT".into()),
        source: Some(Source::new(source, 50.0)),
        origin_ids: vec![format!("{source}-{name}")],
        ..PackageInfo::default()
    }
}

/// Attribution data from `(id, package, linked paths)` rows.
#[must_use]
pub fn attribution_data(rows: Vec<(&str, PackageInfo, Vec<&str>)>) -> AttributionData {
    let mut data = AttributionData::default();
    for (id, package, paths) in rows {
        data.attributions.insert(id.into(), package);
        for path in paths {
            data.resources_to_attributions
                .entry(path.to_owned())
                .or_default()
                .push(id.into());
        }
    }
    data
}

fn metadata(id: &str) -> ProjectMetadata {
    ProjectMetadata {
        project_id: id.into(),
        file_creation_date: "2024-01-01T00:00:00Z".into(),
        project_title: None,
    }
}

/// `/root/src/file_1` attributed to Angular 16.0.0 (`uuid_1`) and
/// `/root/src/file_2` to Vue 2.6.0 (`uuid_2`); `/file` is unattributed.
#[must_use]
pub fn angular_vue() -> ProjectInput {
    let mut resources = Resources::new();
    resources.insert(
        "root".into(),
        ResourceNode::folder([(
            "src",
            ResourceNode::folder([
                ("file_1", ResourceNode::file()),
                ("file_2", ResourceNode::file()),
            ]),
        )]),
    );
    resources.insert("file".into(), ResourceNode::file());

    ProjectInput {
        metadata: metadata("angular-vue"),
        resources,
        manual_attributions: attribution_data(vec![
            ("uuid_1", pkg("Angular", "16.0.0"), vec!["/root/src/file_1"]),
            ("uuid_2", pkg("Vue", "2.6.0"), vec!["/root/src/file_2"]),
        ]),
        ..ProjectInput::default()
    }
}

/// `uuid_1` on `/a` and `uuid_2` on `/b`.
#[must_use]
pub fn replace_pair() -> ProjectInput {
    let mut resources = Resources::new();
    resources.insert("a".into(), ResourceNode::file());
    resources.insert("b".into(), ResourceNode::file());

    ProjectInput {
        metadata: metadata("replace-pair"),
        resources,
        manual_attributions: attribution_data(vec![
            ("uuid_1", pkg("lodash", "4.17.20"), vec!["/a"]),
            ("uuid_2", pkg("lodash", "4.17.21"), vec!["/b"]),
        ]),
        ..ProjectInput::default()
    }
}

/// A scanned project with two scanners, a breakpoint and an archive.
///
/// ```text
/// /LICENSE
/// /root/README.md                  left-pad (SC, resolved)
/// /root/src/index.js               react (SC), manual m-react
/// /root/src/util.js                lodash (SC)
/// /root/src/lib/helper.js          react (HC)
/// /root/node_modules/              breakpoint
/// /root/node_modules/react/index.js   react (SC)
/// /root/node_modules/lodash/lodash.js lodash (SC)
/// /root/vendor.tar/                file with children
/// /root/vendor.tar/inner.c         zlib (SC), manual m-zlib
/// ```
///
/// Scanner `SC` is shown as "ScanCode" with priority 2, `HC` as
/// "High Compute" with priority 1.
#[must_use]
pub fn scanned_project() -> ProjectInput {
    let mut resources = Resources::new();
    resources.insert("LICENSE".into(), ResourceNode::file());
    resources.insert(
        "root".into(),
        ResourceNode::folder([
            ("README.md", ResourceNode::file()),
            (
                "src",
                ResourceNode::folder([
                    ("index.js", ResourceNode::file()),
                    ("util.js", ResourceNode::file()),
                    (
                        "lib",
                        ResourceNode::folder([("helper.js", ResourceNode::file())]),
                    ),
                ]),
            ),
            (
                "node_modules",
                ResourceNode::folder([
                    (
                        "react",
                        ResourceNode::folder([("index.js", ResourceNode::file())]),
                    ),
                    (
                        "lodash",
                        ResourceNode::folder([("lodash.js", ResourceNode::file())]),
                    ),
                ]),
            ),
            (
                "vendor.tar",
                ResourceNode::folder([("inner.c", ResourceNode::file())]),
            ),
        ]),
    );

    let zlib = PackageInfo {
        package_type: Some("generic".into()),
        package_name: Some("zlib".into()),
        package_version: Some("1.3".into()),
        license_name: Some("Zlib".into()),
        ..PackageInfo::default()
    };
    let mut zlib_signal = zlib.clone();
    zlib_signal.source = Some(Source::new("SC", 70.0));

    let first_party = PackageInfo {
        copyright: Some("Copyright ACME".into()),
        first_party: true,
        attribution_confidence: Some(Confidence::High),
        ..PackageInfo::default()
    };

    ProjectInput {
        metadata: metadata("scanned"),
        resources,
        manual_attributions: attribution_data(vec![
            ("m-react", pkg("react", "18.2.0"), vec!["/root/src/index.js"]),
            (
                "m-zlib",
                PackageInfo {
                    attribution_confidence: Some(Confidence::Low),
                    follow_up: true,
                    ..zlib
                },
                vec!["/root/vendor.tar/inner.c"],
            ),
            ("m-acme", first_party, vec!["/LICENSE"]),
        ]),
        external_attributions: attribution_data(vec![
            (
                "sc-react",
                signal("SC", "react", "18.2.0"),
                vec!["/root/src/index.js", "/root/node_modules/react/index.js"],
            ),
            (
                "sc-lodash",
                signal("SC", "lodash", "4.17.21"),
                vec!["/root/src/util.js", "/root/node_modules/lodash/lodash.js"],
            ),
            ("hc-react", signal("HC", "react", "18.2.0"), vec!["/root/src/lib/helper.js"]),
            ("sc-zlib", zlib_signal, vec!["/root/vendor.tar/inner.c"]),
            ("sc-left-pad", signal("SC", "left-pad", "1.3.0"), vec!["/root/README.md"]),
        ]),
        resolved_external_attributions: BTreeSet::from(["sc-left-pad".into()]),
        attribution_breakpoints: BTreeSet::from(["/root/node_modules/".to_owned()]),
        files_with_children: BTreeSet::from(["/root/vendor.tar/".to_owned()]),
        external_attribution_sources: [
            ("SC".to_owned(), ExternalAttributionSource::new("ScanCode", 2)),
            ("HC".to_owned(), ExternalAttributionSource::new("High Compute", 1)),
        ]
        .into_iter()
        .collect(),
    }
}
