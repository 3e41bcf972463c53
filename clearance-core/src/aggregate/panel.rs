use std::cmp::Ordering;
use std::collections::HashMap;

use crate::aggregate::contained::contained_attribution_ids;
use crate::snapshot::AggregationSnapshot;
use crate::store::AttributionCollection;
use clearance_types::{AttributionId, DisplayPackageInfo, PackageInfo, PanelData, Sorting};

fn display_projection(package: &PackageInfo) -> PackageInfo {
    let mut out = package.clone();
    if let Some(source) = out.source.as_mut() {
        source.document_confidence = 0.0;
    }
    out.origin_ids.clear();
    out
}

fn label_order(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Merge counted attributions into package cards and order them.
///
/// Attributions equal in every field except source confidence and origin
/// ids share a card: counts add up, attribution ids and origin ids are
/// collected. Card ids are the first contributing attribution id.
#[must_use]
pub fn build_panel<I>(collection: &AttributionCollection, entries: I, sorting: Sorting) -> PanelData
where
    I: IntoIterator<Item = (AttributionId, u32)>,
{
    let mut cards: Vec<(PackageInfo, String, DisplayPackageInfo)> = Vec::new();
    let mut buckets: HashMap<String, Vec<usize>> = HashMap::new();

    for (id, count) in entries {
        let Some(package) = collection.get(&id) else {
            continue;
        };
        let projection = display_projection(package);
        let label = package.display_label();
        let bucket = buckets.entry(label.clone()).or_default();
        if let Some(&at) = bucket.iter().find(|&&i| cards[i].0 == projection) {
            let card = &mut cards[at].2;
            card.count = card.count.saturating_add(count);
            card.attribution_ids.push(id);
            for origin in &package.origin_ids {
                if !card.package.origin_ids.contains(origin) {
                    card.package.origin_ids.push(origin.clone());
                }
            }
        } else {
            bucket.push(cards.len());
            cards.push((
                projection,
                label,
                DisplayPackageInfo {
                    package: package.clone(),
                    attribution_ids: vec![id],
                    count,
                },
            ));
        }
    }

    match sorting {
        Sorting::Alphabetical => cards.sort_by(|a, b| label_order(&a.1, &b.1)),
        _ => cards.sort_by(|a, b| b.2.count.cmp(&a.2.count).then_with(|| label_order(&a.1, &b.1))),
    }

    let mut panel = PanelData::default();
    for (_, _, card) in cards {
        let Some(card_id) = card.attribution_ids.first().map(ToString::to_string) else {
            continue;
        };
        panel.sorted_package_card_ids.push(card_id.clone());
        panel.display_package_infos.insert(card_id, card);
    }
    panel
}

/// Cards for the unresolved signals contained below `resource`.
#[must_use]
pub fn contained_external_panel(
    snapshot: &AggregationSnapshot,
    resource: &str,
    sorting: Sorting,
) -> PanelData {
    let entries = contained_attribution_ids(
        &snapshot.tree,
        resource,
        &snapshot.external,
        &snapshot.breakpoints,
        Some(&snapshot.resolved),
    );
    build_panel(&snapshot.external, entries, sorting)
}

/// Cards for the manual attributions contained below `resource`.
#[must_use]
pub fn contained_manual_panel(
    snapshot: &AggregationSnapshot,
    resource: &str,
    sorting: Sorting,
) -> PanelData {
    let entries = contained_attribution_ids(
        &snapshot.tree,
        resource,
        &snapshot.manual,
        &snapshot.breakpoints,
        None,
    );
    build_panel(&snapshot.manual, entries, sorting)
}
