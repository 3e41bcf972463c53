//! Missing-information highlighting for the attribution form.

use clearance_types::{PackageField, PackageInfo};

/// Package types whose purl requires a namespace.
pub const TYPES_REQUIRING_NAMESPACE: &[&str] = &[
    "maven", "golang", "github", "bitbucket", "composer", "swift", "alpm", "apk", "deb", "rpm",
];

fn is_blank(v: Option<&str>) -> bool {
    v.is_none_or(|s| s.trim().is_empty())
}

/// True when `field` should be highlighted as missing on `package`.
///
/// First-party and excluded attributions never need package details.
#[must_use]
pub fn is_important_information_missing(field: PackageField, package: &PackageInfo) -> bool {
    if package.first_party || package.exclude_from_notice {
        return false;
    }
    match field {
        PackageField::PackageNamespace => {
            let needs_namespace = package.package_type.as_deref().is_some_and(|t| {
                TYPES_REQUIRING_NAMESPACE
                    .iter()
                    .any(|required| required.eq_ignore_ascii_case(t.trim()))
            });
            needs_namespace && is_blank(package.package_namespace.as_deref())
        }
        other => is_blank(other.get(package)),
    }
}
