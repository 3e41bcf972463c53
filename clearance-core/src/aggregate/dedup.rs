use std::collections::HashMap;

use crate::aggregate::contained::contained_attribution_ids;
use crate::purl::generate;
use crate::snapshot::AggregationSnapshot;
use clearance_types::{
    ExternalAttributionSources, PackageField, PackageInfo, Suggestion, SuggestionGroup,
};

/// Group label of suggestions without a source.
pub const MANUAL_GROUP: &str = "Attributions";

const KEY_SEPARATOR: &str = "\u{1f}";

fn source_display_name<'a>(
    package: &'a PackageInfo,
    sources: &'a ExternalAttributionSources,
) -> Option<&'a str> {
    let source = package.source.as_ref()?;
    Some(
        sources
            .get(&source.name)
            .map_or(source.name.as_str(), |s| s.name.as_str()),
    )
}

fn source_priority(package: &PackageInfo, sources: &ExternalAttributionSources) -> i32 {
    package
        .source
        .as_ref()
        .and_then(|s| sources.get(&s.name))
        .map_or(0, |s| s.priority)
}

/// Identity key of `package` when suggested for `field`.
///
/// Components: source display name, copyright, license name, field value,
/// purl. Absent components stay in place as empty strings.
#[must_use]
pub fn identity_key(
    package: &PackageInfo,
    field: PackageField,
    sources: &ExternalAttributionSources,
) -> String {
    let purl = generate(package);
    [
        source_display_name(package, sources),
        package.copyright.as_deref(),
        package.license_name.as_deref(),
        field.get(package),
        purl.as_deref(),
    ]
    .map(Option::unwrap_or_default)
    .join(KEY_SEPARATOR)
}

/// Merge, rank and label suggestion candidates for `field`.
///
/// Items with a blank `field` value or without a purl are dropped. Items
/// with equal identity keys merge: counts add up, `preSelected` is OR-ed and
/// the first-seen item stays representative. The result is stably sorted by
/// descending source priority, then descending count.
pub fn suggestions<I>(
    items: I,
    field: PackageField,
    sources: &ExternalAttributionSources,
) -> Vec<Suggestion>
where
    I: IntoIterator<Item = (PackageInfo, u32)>,
{
    let mut out: Vec<Suggestion> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (package, count) in items {
        if field.get(&package).is_none_or(|v| v.trim().is_empty()) || generate(&package).is_none()
        {
            continue;
        }
        let key = identity_key(&package, field, sources);
        if let Some(&at) = index.get(&key) {
            let merged = &mut out[at];
            merged.count = merged.count.saturating_add(count);
            merged.package.pre_selected |= package.pre_selected;
            continue;
        }
        index.insert(key, out.len());
        let group = source_display_name(&package, sources)
            .unwrap_or(MANUAL_GROUP)
            .to_owned();
        let priority = source_priority(&package, sources);
        out.push(Suggestion {
            package,
            count,
            group,
            priority,
        });
    }

    out.sort_by(|a, b| b.priority.cmp(&a.priority).then(b.count.cmp(&a.count)));
    out
}

/// Fold ranked suggestions into groups, ordered by first appearance.
#[must_use]
pub fn group_suggestions(suggestions: Vec<Suggestion>) -> Vec<SuggestionGroup> {
    let mut groups: Vec<SuggestionGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for s in suggestions {
        if let Some(&at) = index.get(&s.group) {
            groups[at].suggestions.push(s);
        } else {
            index.insert(s.group.clone(), groups.len());
            groups.push(SuggestionGroup {
                label: s.group.clone(),
                suggestions: vec![s],
            });
        }
    }
    groups
}

/// Suggestions offered while editing `field` of an attribution on `resource`.
///
/// Candidates are the unresolved signals on the resource itself, the
/// unresolved signals contained below it, and the manual attributions
/// contained below it.
#[must_use]
pub fn suggestions_for_resource(
    snapshot: &AggregationSnapshot,
    resource: &str,
    field: PackageField,
) -> Vec<Suggestion> {
    let resolved = Some(&snapshot.resolved);
    let on_resource = snapshot
        .external
        .attribution_ids_for_resource(resource)
        .iter()
        .filter(|id| !snapshot.resolved.contains(*id))
        .map(|id| (id.clone(), 1));
    let external_below = contained_attribution_ids(
        &snapshot.tree,
        resource,
        &snapshot.external,
        &snapshot.breakpoints,
        resolved,
    );
    let manual_below = contained_attribution_ids(
        &snapshot.tree,
        resource,
        &snapshot.manual,
        &snapshot.breakpoints,
        None,
    );

    let external = on_resource
        .chain(external_below)
        .filter_map(|(id, count)| snapshot.external.get(&id).map(|p| (p.clone(), count)));
    let manual = manual_below
        .into_iter()
        .filter_map(|(id, count)| snapshot.manual.get(&id).map(|p| (p.clone(), count)));

    suggestions(external.chain(manual), field, &snapshot.sources)
}
