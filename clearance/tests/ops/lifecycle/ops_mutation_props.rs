use std::collections::BTreeSet;

use clearance::{AttributionId, AttributionState, Clearance};
use proptest::prelude::*;

use crate::helpers::{angular_vue, open, pkg};

const PATHS: &[&str] = &["/root/src/file_1", "/root/src/file_2", "/file", "/root/"];

#[derive(Debug, Clone)]
enum Step {
    Create,
    Link { path: usize, id: usize },
    Unlink { path: usize, id: usize },
    Delete { id: usize },
    Replace { source: usize, target: usize },
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::Create),
        (0..PATHS.len(), 0..8usize).prop_map(|(path, id)| Step::Link { path, id }),
        (0..PATHS.len(), 0..8usize).prop_map(|(path, id)| Step::Unlink { path, id }),
        (0..8usize).prop_map(|id| Step::Delete { id }),
        (0..8usize, 0..8usize).prop_map(|(source, target)| Step::Replace { source, target }),
    ]
}

fn apply(project: &mut Clearance, known: &mut Vec<AttributionId>, step: &Step) {
    let pick = |i: usize| known[i % known.len()].clone();
    // Failures are expected for stale ids; only integrity matters here.
    let _ = match *step {
        Step::Create => project.create(pkg("p", "1")).map(|id| known.push(id)),
        Step::Link { path, id } => project.link(PATHS[path], &pick(id)).map(drop),
        Step::Unlink { path, id } => project.unlink(PATHS[path], &pick(id)).map(drop),
        Step::Delete { id } => project.delete(&pick(id)).map(drop),
        Step::Replace { source, target } => project.replace(&pick(source), &pick(target)),
    };
}

proptest! {
    #[test]
    fn mutations_keep_the_save_payload_consistent(steps in prop::collection::vec(arb_step(), 1..40)) {
        let mut project = open(angular_vue());
        let mut known: Vec<AttributionId> = vec!["uuid_1".into(), "uuid_2".into()];
        let mut deleted: BTreeSet<AttributionId> = BTreeSet::new();

        for step in &steps {
            apply(&mut project, &mut known, step);
            prop_assert!(project.manual().check_consistency().is_ok());

            let payload = project.save_file_args();
            let linked: BTreeSet<&AttributionId> =
                payload.resources_to_attributions.values().flatten().collect();
            for id in payload.manual_attributions.keys() {
                prop_assert!(linked.contains(id), "{id} saved without a link");
            }
            for id in &linked {
                prop_assert!(payload.manual_attributions.contains_key(*id), "{id} linked but missing");
            }

            for id in &known {
                if project.attribution_state(id) == Some(AttributionState::Deleted) {
                    deleted.insert(id.clone());
                }
            }
            for id in &deleted {
                prop_assert_eq!(project.attribution_state(id), Some(AttributionState::Deleted));
            }
        }
    }
}
