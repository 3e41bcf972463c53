//! Attribution store: id map, link map and reverse index kept in lock-step.
//!
//! Every mutation runs on a copy of the persistent maps, checks the ids and
//! paths it touched, and only then replaces `self`. A failed mutation leaves
//! the collection exactly as it was.

use std::collections::BTreeSet;

use im::{OrdMap, OrdSet};

use crate::ClearanceError;
use crate::tree::ResourceTree;
use clearance_types::{AttributionData, AttributionId, Operation, PackageInfo};

/// Persistent set of attribution ids.
pub type IdSet = OrdSet<AttributionId>;

#[derive(Debug, Default)]
struct Touched {
    ids: Vec<AttributionId>,
    paths: Vec<String>,
}

impl Touched {
    fn id(&mut self, id: &AttributionId) {
        self.ids.push(id.clone());
    }

    fn path(&mut self, path: &str) {
        self.paths.push(path.to_owned());
    }
}

/// One attribution collection (manual or external).
///
/// Cloning is O(1); clones share structure until either side mutates.
#[derive(Debug, Clone, Default)]
pub struct AttributionCollection {
    attributions: OrdMap<AttributionId, PackageInfo>,
    links: OrdMap<String, Vec<AttributionId>>,
    reverse: OrdMap<AttributionId, OrdSet<String>>,
    uncommitted: IdSet,
    retired: IdSet,
}

impl AttributionCollection {
    /// Build a collection from project data.
    ///
    /// Link paths are canonicalized against `tree`. Links to unknown paths,
    /// to breakpoints or to unknown ids are dropped, as are attributions
    /// left without any link. Every drop is returned as a warning.
    #[must_use]
    pub fn load(
        data: AttributionData,
        tree: &ResourceTree,
        breakpoints: &BTreeSet<String>,
    ) -> (Self, Vec<ClearanceError>) {
        let mut out = Self {
            attributions: data.attributions.into_iter().collect(),
            ..Self::default()
        };
        let mut warnings = Vec::new();

        for (raw_path, ids) in data.resources_to_attributions {
            let Some(path) = tree.canonicalize(&raw_path) else {
                warnings.push(ClearanceError::not_found(format!("resource {raw_path}")));
                continue;
            };
            if breakpoints.contains(&path) {
                warnings.push(ClearanceError::breakpoint(path));
                continue;
            }
            for id in ids {
                if out.attributions.contains_key(&id) {
                    out.link_unchecked(&path, &id);
                } else {
                    warnings.push(ClearanceError::not_found(format!(
                        "attribution {id} linked at {path}"
                    )));
                }
            }
        }

        let orphans: Vec<AttributionId> = out
            .attributions
            .keys()
            .filter(|id| !out.reverse.contains_key(*id))
            .cloned()
            .collect();
        for id in orphans {
            out.attributions.remove(&id);
            warnings.push(ClearanceError::consistency(
                Operation::Load,
                format!("attribution {id} has no resource and was dropped"),
            ));
        }

        #[cfg(feature = "tracing")]
        for w in &warnings {
            tracing::warn!(warning = %w, "project data repaired on load");
        }
        (out, warnings)
    }

    /// Number of attributions, uncommitted ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributions.len()
    }

    /// True when the collection holds no attribution.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributions.is_empty()
    }

    /// Payload of `id`.
    #[must_use]
    pub fn get(&self, id: &AttributionId) -> Option<&PackageInfo> {
        self.attributions.get(id)
    }

    /// True when `id` is live.
    #[must_use]
    pub fn contains(&self, id: &AttributionId) -> bool {
        self.attributions.contains_key(id)
    }

    /// Live attributions in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&AttributionId, &PackageInfo)> {
        self.attributions.iter()
    }

    /// Committed attributions in id order.
    pub fn committed(&self) -> impl Iterator<Item = (&AttributionId, &PackageInfo)> {
        self.attributions
            .iter()
            .filter(|(id, _)| !self.uncommitted.contains(*id))
    }

    /// Resource paths carrying at least one link, with their ids in link order.
    pub fn links(&self) -> impl Iterator<Item = (&String, &Vec<AttributionId>)> {
        self.links.iter()
    }

    /// Ids linked at `path`, in link order. Empty when unlinked or absent.
    #[must_use]
    pub fn attribution_ids_for_resource(&self, path: &str) -> &[AttributionId] {
        self.links.get(path).map(Vec::as_slice).unwrap_or_default()
    }

    /// Attributions linked at `path`, in link order.
    #[must_use]
    pub fn attributions_for_resource(&self, path: &str) -> Vec<(AttributionId, PackageInfo)> {
        self.attribution_ids_for_resource(path)
            .iter()
            .filter_map(|id| self.attributions.get(id).map(|p| (id.clone(), p.clone())))
            .collect()
    }

    /// Paths `id` is linked at, sorted.
    #[must_use]
    pub fn resources_for_attribution(&self, id: &AttributionId) -> Vec<String> {
        self.reverse
            .get(id)
            .map(|paths| paths.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// True when `id` was created but never linked.
    #[must_use]
    pub fn is_uncommitted(&self, id: &AttributionId) -> bool {
        self.uncommitted.contains(id)
    }

    /// True when `id` was deleted.
    #[must_use]
    pub fn is_retired(&self, id: &AttributionId) -> bool {
        self.retired.contains(id)
    }

    /// Committed attributions and their links as project data.
    #[must_use]
    pub fn to_data(&self) -> AttributionData {
        AttributionData {
            attributions: self
                .committed()
                .map(|(id, p)| (id.clone(), p.clone()))
                .collect(),
            resources_to_attributions: self
                .links
                .iter()
                .map(|(path, ids)| (path.clone(), ids.clone()))
                .collect(),
        }
    }

    fn commit<T, F>(&mut self, op: Operation, f: F) -> Result<T, ClearanceError>
    where
        F: FnOnce(&mut Self, &mut Touched) -> Result<T, ClearanceError>,
    {
        let mut staged = self.clone();
        let mut touched = Touched::default();
        let out = f(&mut staged, &mut touched)?;
        staged.verify_local(op, &touched)?;
        *self = staged;
        Ok(out)
    }

    fn require(&self, id: &AttributionId) -> Result<(), ClearanceError> {
        if self.attributions.contains_key(id) {
            Ok(())
        } else {
            Err(ClearanceError::not_found(format!("attribution {id}")))
        }
    }

    fn fresh_id(&self) -> AttributionId {
        loop {
            let id = AttributionId::generate();
            if !self.attributions.contains_key(&id) && !self.retired.contains(&id) {
                return id;
            }
        }
    }

    fn link_unchecked(&mut self, path: &str, id: &AttributionId) -> bool {
        if let Some(ids) = self.links.get_mut(path) {
            if ids.contains(id) {
                return false;
            }
            ids.push(id.clone());
        } else {
            self.links.insert(path.to_owned(), vec![id.clone()]);
        }
        if let Some(paths) = self.reverse.get_mut(id) {
            paths.insert(path.to_owned());
        } else {
            self.reverse.insert(id.clone(), OrdSet::unit(path.to_owned()));
        }
        self.uncommitted.remove(id);
        true
    }

    fn unlink_unchecked(&mut self, path: &str, id: &AttributionId) -> bool {
        let Some(ids) = self.links.get_mut(path) else {
            return false;
        };
        let before = ids.len();
        ids.retain(|x| x != id);
        if ids.len() == before {
            return false;
        }
        if ids.is_empty() {
            self.links.remove(path);
        }
        if let Some(paths) = self.reverse.get_mut(id) {
            paths.remove(path);
            if paths.is_empty() {
                self.reverse.remove(id);
            }
        }
        true
    }

    fn retire(&mut self, id: &AttributionId) -> Option<PackageInfo> {
        self.uncommitted.remove(id);
        self.retired.insert(id.clone());
        self.attributions.remove(id)
    }

    /// Add `package` under a fresh id that is not linked anywhere yet.
    ///
    /// # Errors
    /// Returns `ConsistencyViolation` if the local check fails.
    pub fn insert_uncommitted(
        &mut self,
        package: PackageInfo,
    ) -> Result<AttributionId, ClearanceError> {
        self.commit(Operation::Create, |s, t| {
            let id = s.fresh_id();
            s.attributions.insert(id.clone(), package);
            s.uncommitted.insert(id.clone());
            t.id(&id);
            Ok(id)
        })
    }

    /// Add `package` under a fresh id linked at `path`.
    ///
    /// # Errors
    /// Returns `ConsistencyViolation` if the local check fails.
    pub fn insert_linked(
        &mut self,
        path: &str,
        package: PackageInfo,
    ) -> Result<AttributionId, ClearanceError> {
        self.commit(Operation::Create, |s, t| {
            let id = s.fresh_id();
            s.attributions.insert(id.clone(), package);
            s.link_unchecked(path, &id);
            t.id(&id);
            t.path(path);
            Ok(id)
        })
    }

    /// Drop an attribution that was never linked.
    ///
    /// # Errors
    /// Returns `NotFound` for unknown ids and `InvalidArg` for committed ones.
    pub fn discard_uncommitted(&mut self, id: &AttributionId) -> Result<(), ClearanceError> {
        self.commit(Operation::Discard, |s, t| {
            s.require(id)?;
            if !s.uncommitted.contains(id) {
                return Err(ClearanceError::InvalidArg(format!(
                    "attribution {id} is already linked"
                )));
            }
            s.retire(id);
            t.id(id);
            Ok(())
        })
    }

    /// Link `id` at `path`. Idempotent; returns whether a link was added.
    ///
    /// The caller validates `path` against the tree.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not live.
    pub fn link(&mut self, path: &str, id: &AttributionId) -> Result<bool, ClearanceError> {
        self.commit(Operation::Link, |s, t| {
            s.require(id)?;
            t.id(id);
            t.path(path);
            Ok(s.link_unchecked(path, id))
        })
    }

    /// Remove the link of `id` at `path`.
    ///
    /// Returns `true` when the id lost its last link and was collected.
    ///
    /// # Errors
    /// Returns `NotFound` when the link does not exist.
    pub fn unlink(&mut self, path: &str, id: &AttributionId) -> Result<bool, ClearanceError> {
        self.commit(Operation::Unlink, |s, t| {
            if !s.unlink_unchecked(path, id) {
                return Err(ClearanceError::not_found(format!("link of {id} at {path}")));
            }
            t.id(id);
            t.path(path);
            let orphaned = !s.reverse.contains_key(id) && !s.uncommitted.contains(id);
            if orphaned {
                s.retire(id);
                #[cfg(feature = "tracing")]
                tracing::debug!(id = %id, "collected attribution without links");
            }
            Ok(orphaned)
        })
    }

    /// Replace every field of `id`.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not live.
    pub fn update(&mut self, id: &AttributionId, package: PackageInfo) -> Result<(), ClearanceError> {
        self.commit(Operation::Update, |s, t| {
            s.require(id)?;
            s.attributions.insert(id.clone(), package);
            t.id(id);
            Ok(())
        })
    }

    /// Delete `id` and all of its links; returns the removed payload.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not live.
    pub fn remove(&mut self, id: &AttributionId) -> Result<PackageInfo, ClearanceError> {
        self.commit(Operation::Delete, |s, t| {
            s.require(id)?;
            for path in s.resources_for_attribution(id) {
                s.unlink_unchecked(&path, id);
                t.path(&path);
            }
            t.id(id);
            s.retire(id)
                .ok_or_else(|| ClearanceError::not_found(format!("attribution {id}")))
        })
    }

    /// Move every link of `source` onto `target` and delete `source`.
    ///
    /// # Errors
    /// Returns `SelfReplacement` when both ids are equal and `NotFound` when
    /// either is not live.
    pub fn replace(
        &mut self,
        source: &AttributionId,
        target: &AttributionId,
    ) -> Result<(), ClearanceError> {
        if source == target {
            return Err(ClearanceError::self_replacement(source.as_str()));
        }
        self.commit(Operation::Replace, |s, t| {
            s.require(source)?;
            s.require(target)?;
            for path in s.resources_for_attribution(source) {
                s.unlink_unchecked(&path, source);
                s.link_unchecked(&path, target);
                t.path(&path);
            }
            s.retire(source);
            t.id(source);
            t.id(target);
            Ok(())
        })
    }

    fn verify_id(&self, op: Operation, id: &AttributionId) -> Result<(), ClearanceError> {
        let paths = self.reverse.get(id);
        if !self.attributions.contains_key(id) {
            if paths.is_some() {
                return Err(ClearanceError::consistency(
                    op,
                    format!("removed attribution {id} is still linked"),
                ));
            }
            return Ok(());
        }
        match paths {
            None if !self.uncommitted.contains(id) => Err(ClearanceError::consistency(
                op,
                format!("attribution {id} has no resource"),
            )),
            Some(_) if self.uncommitted.contains(id) => Err(ClearanceError::consistency(
                op,
                format!("uncommitted attribution {id} is linked"),
            )),
            Some(paths) => {
                for path in paths {
                    if !self.attribution_ids_for_resource(path).contains(id) {
                        return Err(ClearanceError::consistency(
                            op,
                            format!("reverse index lists {path} for {id} but the link is missing"),
                        ));
                    }
                }
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn verify_path(&self, op: Operation, path: &str) -> Result<(), ClearanceError> {
        let ids = self.attribution_ids_for_resource(path);
        if self.links.get(path).is_some_and(Vec::is_empty) {
            return Err(ClearanceError::consistency(op, format!("empty link list at {path}")));
        }
        let mut seen = BTreeSet::new();
        for id in ids {
            if !seen.insert(id) {
                return Err(ClearanceError::consistency(
                    op,
                    format!("duplicate link of {id} at {path}"),
                ));
            }
            if !self.attributions.contains_key(id) {
                return Err(ClearanceError::consistency(
                    op,
                    format!("{path} links unknown attribution {id}"),
                ));
            }
            if !self.reverse.get(id).is_some_and(|p| p.contains(path)) {
                return Err(ClearanceError::consistency(
                    op,
                    format!("reverse index misses {path} for {id}"),
                ));
            }
        }
        Ok(())
    }

    fn verify_local(&self, op: Operation, touched: &Touched) -> Result<(), ClearanceError> {
        for id in &touched.ids {
            self.verify_id(op, id)?;
        }
        for path in &touched.paths {
            self.verify_path(op, path)?;
        }
        Ok(())
    }

    /// Full integrity check of the collection.
    ///
    /// Every linked id exists, every committed id is linked, the reverse
    /// index agrees with the link map, no path links an id twice, and no
    /// retired id is live.
    ///
    /// # Errors
    /// Returns the first `ConsistencyViolation` found.
    pub fn check_consistency(&self) -> Result<(), ClearanceError> {
        const OP: Operation = Operation::Load;
        for path in self.links.keys() {
            self.verify_path(OP, path)?;
        }
        for id in self.attributions.keys() {
            self.verify_id(OP, id)?;
            if self.retired.contains(id) {
                return Err(ClearanceError::consistency(
                    OP,
                    format!("retired attribution {id} is live"),
                ));
            }
        }
        for id in self.reverse.keys() {
            self.verify_id(OP, id)?;
        }
        for id in &self.uncommitted {
            if !self.attributions.contains_key(id) {
                return Err(ClearanceError::consistency(
                    OP,
                    format!("uncommitted attribution {id} is missing"),
                ));
            }
        }
        Ok(())
    }
}
