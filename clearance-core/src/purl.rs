//! Package URL codec.
//!
//! Grammar: `pkg:type/namespace.../name@version?qualifiers#subpath`. The
//! qualifiers and subpath are not split up; they travel as the attribution's
//! purl appendix, leading `?` or `#` included, percent-decoded like every
//! other component.

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};

use crate::ClearanceError;
use clearance_types::PackageInfo;

const SCHEME: &str = "pkg:";

/// Characters escaped inside a single purl component.
const COMPONENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'@')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped inside the appendix. Delimiters stay literal.
const APPENDIX: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// The purl-derived fields of an attribution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurlParts {
    /// Ecosystem, lower-cased.
    pub package_type: String,
    /// Non-empty namespace segments joined by `/`.
    pub namespace: Option<String>,
    /// Package name.
    pub name: String,
    /// Version.
    pub version: Option<String>,
    /// Qualifiers and subpath with their leading delimiter.
    pub appendix: Option<String>,
}

impl PurlParts {
    /// Extract the purl-derived fields of `package`.
    ///
    /// Returns `None` when type or name is blank. Empty namespace segments
    /// are dropped, so `a//b` becomes `a/b` as it would after parsing.
    #[must_use]
    pub fn from_package(package: &PackageInfo) -> Option<Self> {
        let package_type = non_blank(package.package_type.as_deref())?;
        let name = non_blank(package.package_name.as_deref())?;
        let namespace = package
            .package_namespace
            .as_deref()
            .map(|ns| ns.split('/').filter(|s| !s.is_empty()).collect::<Vec<_>>().join("/"))
            .filter(|ns| !ns.trim().is_empty());
        Some(Self {
            package_type: package_type.to_ascii_lowercase(),
            namespace,
            name: name.to_owned(),
            version: non_blank(package.package_version.as_deref()).map(str::to_owned),
            appendix: non_blank(package.package_purl_appendix.as_deref()).map(str::to_owned),
        })
    }

    /// Overwrite the five purl-derived fields of `package`.
    pub fn apply_to(&self, package: &mut PackageInfo) {
        package.package_type = Some(self.package_type.clone());
        package.package_namespace.clone_from(&self.namespace);
        package.package_name = Some(self.name.clone());
        package.package_version.clone_from(&self.version);
        package.package_purl_appendix.clone_from(&self.appendix);
    }

    /// Render as a purl string.
    #[must_use]
    pub fn to_purl(&self) -> String {
        let mut out = String::from(SCHEME);
        out.extend(utf8_percent_encode(&self.package_type, COMPONENT));
        if let Some(ns) = &self.namespace {
            for segment in ns.split('/') {
                out.push('/');
                out.extend(utf8_percent_encode(segment, COMPONENT));
            }
        }
        out.push('/');
        out.extend(utf8_percent_encode(&self.name, COMPONENT));
        if let Some(version) = &self.version {
            out.push('@');
            out.extend(utf8_percent_encode(version, COMPONENT));
        }
        if let Some(appendix) = &self.appendix {
            if !appendix.starts_with(['?', '#']) {
                out.push('?');
            }
            out.extend(utf8_percent_encode(appendix, APPENDIX));
        }
        out
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.filter(|s| !s.trim().is_empty())
}

/// Generate the purl of `package`; `None` when type or name is blank.
#[must_use]
pub fn generate(package: &PackageInfo) -> Option<String> {
    PurlParts::from_package(package).map(|p| p.to_purl())
}

fn check_escapes(input: &str, component: &str) -> Result<(), ClearanceError> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let ok = bytes
                .get(i + 1..i + 3)
                .is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit));
            if !ok {
                return Err(ClearanceError::invalid_purl(
                    input,
                    format!("malformed percent escape in {component:?}"),
                ));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

fn decode(input: &str, component: &str) -> Result<String, ClearanceError> {
    check_escapes(input, component)?;
    percent_decode_str(component)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|_| ClearanceError::invalid_purl(input, "component is not valid UTF-8"))
}

/// Parse a purl string.
///
/// # Errors
/// Returns `ClearanceError::InvalidPurl` when the scheme is not `pkg`, type
/// or name is missing, or a component holds a malformed percent escape.
pub fn parse(input: &str) -> Result<PurlParts, ClearanceError> {
    let trimmed = input.trim();
    let rest = trimmed
        .get(..SCHEME.len())
        .filter(|scheme| scheme.eq_ignore_ascii_case(SCHEME))
        .map(|_| &trimmed[SCHEME.len()..])
        .ok_or_else(|| ClearanceError::invalid_purl(input, "scheme must be pkg"))?;

    let (path, appendix) = match rest.find(['?', '#']) {
        Some(at) => (&rest[..at], Some(&rest[at..])),
        None => (rest, None),
    };
    let appendix = match appendix {
        Some(a) if a.len() > 1 => Some(decode(input, a)?),
        _ => None,
    };

    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if segments.len() < 2 {
        return Err(ClearanceError::invalid_purl(input, "type and name are required"));
    }
    let raw_type = segments.remove(0);
    let last = segments.pop().unwrap_or_default();
    let (raw_name, raw_version) = match last.split_once('@') {
        Some((n, v)) => (n, Some(v)),
        None => (last, None),
    };

    let package_type = decode(input, raw_type)?.to_ascii_lowercase();
    let name = decode(input, raw_name)?;
    if name.trim().is_empty() {
        return Err(ClearanceError::invalid_purl(input, "name is empty"));
    }
    let version = raw_version
        .map(|v| decode(input, v))
        .transpose()?
        .filter(|v| !v.trim().is_empty());
    let namespace = if segments.is_empty() {
        None
    } else {
        let decoded = segments
            .into_iter()
            .map(|s| decode(input, s))
            .collect::<Result<Vec<_>, _>>()?;
        Some(decoded.join("/"))
    };

    Ok(PurlParts {
        package_type,
        namespace,
        name,
        version,
        appendix,
    })
}
