//! Attribution payloads and their identifiers.

use core::fmt;
use std::borrow::Borrow;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque attribution identifier.
///
/// Manual and external attributions share the id space of their collection;
/// fresh ids are random v4 UUIDs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributionId(String);

impl AttributionId {
    /// Wrap an existing id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh random id.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttributionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributionId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for AttributionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for AttributionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Discrete attribution confidence.
///
/// Serialized as its numeric value. Any number read from a project file is
/// bucketed: 50 and above is `High`, everything else `Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Confidence {
    /// Reviewer is confident (80).
    High,
    /// Reviewer is unsure (20).
    Low,
}

impl Confidence {
    /// Numeric value written to project files.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::High => 80,
            Self::Low => 20,
        }
    }

    /// Bucket an arbitrary numeric confidence.
    #[must_use]
    pub fn from_value(value: f64) -> Self {
        if value >= 50.0 { Self::High } else { Self::Low }
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.value())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_value)
    }
}

/// Provenance of an external attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    /// Scanner key, looked up in the configured sources for display name and priority.
    pub name: String,
    /// Scanner-reported confidence.
    #[serde(default)]
    pub document_confidence: f64,
    /// Free-form secondary label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_name: Option<String>,
}

impl Source {
    /// Convenience constructor.
    pub fn new(name: impl Into<String>, document_confidence: f64) -> Self {
        Self {
            name: name.into(),
            document_confidence,
            additional_name: None,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(v: &bool) -> bool {
    !*v
}

mod follow_up {
    use serde::{Deserialize, Deserializer, Serializer};

    const MARKER: &str = "FOLLOW_UP";

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(v: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        if *v {
            serializer.serialize_str(MARKER)
        } else {
            serializer.serialize_bool(false)
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(b) => b,
            Raw::Text(t) => t == MARKER,
        })
    }
}

/// A single attribution: package identity, licensing and review flags.
///
/// Every field is optional. Manual attributions never carry `source`,
/// `comments` or `originIds`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    /// Package ecosystem (`npm`, `maven`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_type: Option<String>,
    /// Namespace; may contain `/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_namespace: Option<String>,
    /// Package name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    /// Purl qualifiers and subpath, including the leading `?` or `#`.
    #[serde(
        default,
        rename = "packagePURLAppendix",
        skip_serializing_if = "Option::is_none"
    )]
    pub package_purl_appendix: Option<String>,
    /// Homepage or repository url.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Copyright statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// License expression.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_name: Option<String>,
    /// Full license text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_text: Option<String>,
    /// Reviewer confidence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution_confidence: Option<Confidence>,
    /// Reviewer comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Scanner comments, external only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,
    /// Code written by the project itself.
    #[serde(default, skip_serializing_if = "is_false")]
    pub first_party: bool,
    /// Needs legal follow-up.
    #[serde(default, with = "follow_up", skip_serializing_if = "is_false")]
    pub follow_up: bool,
    /// Omitted from notice documents.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exclude_from_notice: bool,
    /// Proposed by a scanner and taken over without review.
    #[serde(default, skip_serializing_if = "is_false")]
    pub pre_selected: bool,
    /// Marked as the preferred attribution for its resources.
    #[serde(default, skip_serializing_if = "is_false")]
    pub preferred: bool,
    /// Was preferred before the marker was cleared.
    #[serde(default, skip_serializing_if = "is_false")]
    pub was_preferred: bool,
    /// Flagged for a second review pass.
    #[serde(default, skip_serializing_if = "is_false")]
    pub needs_review: bool,
    /// Scanner provenance, external only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Source>,
    /// Scanner-side ids this attribution was derived from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub origin_ids: Vec<String>,
}

fn is_blank(v: Option<&String>) -> bool {
    v.is_none_or(|s| s.trim().is_empty())
}

impl PackageInfo {
    /// True when no content field carries a value.
    ///
    /// Confidence, provenance and review markers do not count as content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.package_type,
            &self.package_namespace,
            &self.package_name,
            &self.package_version,
            &self.package_purl_appendix,
            &self.url,
            &self.copyright,
            &self.license_name,
            &self.license_text,
            &self.comment,
        ]
        .into_iter()
        .all(|f| is_blank(f.as_ref()))
            && !self.first_party
            && !self.follow_up
            && !self.exclude_from_notice
    }

    /// Label shown on cards and used for alphabetical ordering.
    ///
    /// `"name, version"` when named, otherwise the first of copyright,
    /// license name and url that is set, otherwise empty.
    #[must_use]
    pub fn display_label(&self) -> String {
        if let Some(name) = self.package_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return match self.package_version.as_deref().filter(|s| !s.trim().is_empty()) {
                Some(version) => format!("{name}, {version}"),
                None => name.to_owned(),
            };
        }
        [&self.copyright, &self.license_name, &self.url]
            .into_iter()
            .find_map(|f| f.as_deref().filter(|s| !s.trim().is_empty()))
            .unwrap_or_default()
            .to_owned()
    }

    /// True when a package name is set.
    #[must_use]
    pub fn is_named(&self) -> bool {
        !is_blank(self.package_name.as_ref())
    }

    /// Copy of this attribution as a manual one.
    ///
    /// Drops scanner provenance and markers; scanner comments are folded
    /// into `comment` when it is unset.
    #[must_use]
    pub fn to_manual(&self) -> Self {
        let mut out = self.clone();
        if out.comment.is_none() && !out.comments.is_empty() {
            out.comment = Some(out.comments.join("\n"));
        }
        out.comments.clear();
        out.source = None;
        out.origin_ids.clear();
        out.pre_selected = false;
        out.preferred = false;
        out.was_preferred = false;
        out
    }

    /// Equality of the manual projection of both attributions.
    #[must_use]
    pub fn content_eq(&self, other: &Self) -> bool {
        self.to_manual() == other.to_manual()
    }
}

/// Closed set of single-line fields that support keyed editing and suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PackageField {
    /// `packageType`
    PackageType,
    /// `packageNamespace`
    PackageNamespace,
    /// `packageName`
    PackageName,
    /// `packageVersion`
    PackageVersion,
    /// `url`
    Url,
    /// `licenseName`
    LicenseName,
}

impl PackageField {
    /// Every field, in form order.
    pub const ALL: [Self; 6] = [
        Self::PackageType,
        Self::PackageNamespace,
        Self::PackageName,
        Self::PackageVersion,
        Self::Url,
        Self::LicenseName,
    ];

    /// JSON name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PackageType => "packageType",
            Self::PackageNamespace => "packageNamespace",
            Self::PackageName => "packageName",
            Self::PackageVersion => "packageVersion",
            Self::Url => "url",
            Self::LicenseName => "licenseName",
        }
    }

    /// True for fields that feed the package URL.
    #[must_use]
    pub const fn is_purl_component(self) -> bool {
        matches!(
            self,
            Self::PackageType | Self::PackageNamespace | Self::PackageName | Self::PackageVersion
        )
    }

    /// Read the field.
    #[must_use]
    pub fn get(self, package: &PackageInfo) -> Option<&str> {
        match self {
            Self::PackageType => package.package_type.as_deref(),
            Self::PackageNamespace => package.package_namespace.as_deref(),
            Self::PackageName => package.package_name.as_deref(),
            Self::PackageVersion => package.package_version.as_deref(),
            Self::Url => package.url.as_deref(),
            Self::LicenseName => package.license_name.as_deref(),
        }
    }

    /// Overwrite the field.
    pub fn set(self, package: &mut PackageInfo, value: Option<String>) {
        let slot = match self {
            Self::PackageType => &mut package.package_type,
            Self::PackageNamespace => &mut package.package_namespace,
            Self::PackageName => &mut package.package_name,
            Self::PackageVersion => &mut package.package_version,
            Self::Url => &mut package.url,
            Self::LicenseName => &mut package.license_name,
        };
        *slot = value;
    }
}

impl fmt::Display for PackageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an attribution as reported by the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AttributionState {
    /// Manual, created but not linked yet.
    Uncommitted,
    /// Manual, linked to at least one resource.
    Active,
    /// Manual, deleted; the id is never reused.
    Deleted,
    /// Signal taking part in aggregation.
    Unresolved,
    /// Signal hidden from aggregation and progress.
    Resolved,
    /// Signal without the reviewer's preferred marker.
    NotPreferred,
    /// Signal the reviewer marked preferred.
    Preferred,
}
