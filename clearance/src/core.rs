use std::collections::BTreeSet;
use std::sync::Arc;

use clearance_core::{
    AggregationSnapshot, AttributionCollection, AttributionId, BreakpointPolicy, ClearanceConfig,
    ClearanceError, ExternalAttributionSource, ExternalAttributionSources, IdSet, PackageInfo,
    ProjectInput, ProjectMetadata, ResourceTree, SaveFileArgs, Sorting, WorkerConfig,
};

/// Project state: the resource tree, both attribution collections and the
/// reviewer's resolution markers.
///
/// All mutations go through `&mut self`; readers take snapshots.
pub struct Clearance {
    pub(crate) tree: Arc<ResourceTree>,
    pub(crate) manual: AttributionCollection,
    pub(crate) external: AttributionCollection,
    pub(crate) resolved: IdSet,
    pub(crate) preferred: IdSet,
    pub(crate) breakpoints: Arc<BTreeSet<String>>,
    pub(crate) files_with_children: Arc<BTreeSet<String>>,
    pub(crate) metadata: ProjectMetadata,
    pub(crate) cfg: ClearanceConfig,
    pub(crate) marked_for_replacement: Option<AttributionId>,
    pub(crate) load_warnings: Vec<ClearanceError>,
}

/// Builder for opening a project with custom configuration.
pub struct ClearanceBuilder {
    project: Option<ProjectInput>,
    cfg: ClearanceConfig,
}

impl Default for ClearanceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClearanceBuilder {
    /// Create a new builder with default configuration.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a project; [`project`](Self::project) must be called
    ///   before [`build`](Self::build).
    /// - Defaults: occurrence sorting, breakpoints count as attributed when
    ///   anything below them is, and a worker queue of 16 requests.
    #[must_use]
    pub fn new() -> Self {
        Self {
            project: None,
            cfg: ClearanceConfig::default(),
        }
    }

    /// Set the project to open.
    #[must_use]
    pub fn project(mut self, input: ProjectInput) -> Self {
        self.project = Some(input);
        self
    }

    /// Register display metadata for one scanner.
    ///
    /// Behavior and trade-offs:
    /// - Overrides an entry of the same key shipped inside the project file.
    /// - Priority orders suggestion groups; unknown scanners and manual
    ///   attributions rank at 0.
    #[must_use]
    pub fn source(mut self, key: impl Into<String>, source: ExternalAttributionSource) -> Self {
        self.cfg.sources.insert(key.into(), source);
        self
    }

    /// Register display metadata for several scanners at once.
    #[must_use]
    pub fn sources(mut self, sources: ExternalAttributionSources) -> Self {
        self.cfg.sources.extend(sources);
        self
    }

    /// Choose how breakpoints below a folder contribute to its progress.
    ///
    /// Behavior and trade-offs:
    /// - `AnyDescendant`: the breakpoint counts as attributed when any node in
    ///   its subtree carries a live link; matches what reviewers see when they
    ///   open the breakpoint.
    /// - `NodeOnly`: only links on the breakpoint itself count. Since
    ///   breakpoints never carry links, such units always read as unattributed.
    #[must_use]
    pub const fn breakpoint_policy(mut self, policy: BreakpointPolicy) -> Self {
        self.cfg.breakpoint_policy = policy;
        self
    }

    /// Default card order for panels.
    #[must_use]
    pub const fn sorting(mut self, sorting: Sorting) -> Self {
        self.cfg.sorting = sorting;
        self
    }

    /// Aggregation worker limits.
    ///
    /// Behavior and trade-offs:
    /// - A small queue drops bursts of superseded requests early at the cost
    ///   of reporting dispatch failures under heavy load.
    /// - Snapshots above `max_snapshot_resources` nodes are rejected and the
    ///   caller receives an empty panel.
    #[must_use]
    pub const fn worker(mut self, worker: WorkerConfig) -> Self {
        self.cfg.worker = worker;
        self
    }

    /// Open the project.
    ///
    /// Breakpoints and files-with-children are canonicalized against the
    /// tree; entries naming unknown nodes are dropped. Links to unknown paths,
    /// to breakpoints or to unknown ids are dropped, as are attributions left
    /// without links and resolved ids that name no signal. Every drop is kept
    /// in [`Clearance::load_warnings`].
    ///
    /// # Errors
    /// Returns `InvalidArg` if no project was provided via [`project`](Self::project).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::core::build", skip(self))
    )]
    pub fn build(self) -> Result<Clearance, ClearanceError> {
        let Some(input) = self.project else {
            return Err(ClearanceError::InvalidArg(
                "no project provided; add one via project(...)".to_string(),
            ));
        };
        let mut cfg = self.cfg;
        let mut sources = input.external_attribution_sources;
        sources.append(&mut cfg.sources);
        cfg.sources = sources;

        let tree = ResourceTree::new(&input.resources);
        let mut warnings = Vec::new();

        let mut breakpoints = BTreeSet::new();
        for raw in input.attribution_breakpoints {
            match tree.canonicalize(&raw) {
                Some(path) if !tree.is_file(&path) => {
                    breakpoints.insert(path);
                }
                Some(path) => warnings.push(ClearanceError::InvalidArg(format!(
                    "breakpoint {path} is a file"
                ))),
                None => warnings.push(ClearanceError::not_found(format!("breakpoint {raw}"))),
            }
        }
        let mut files_with_children = BTreeSet::new();
        for raw in input.files_with_children {
            match tree.canonicalize(&raw) {
                Some(path) => {
                    files_with_children.insert(path);
                }
                None => warnings.push(ClearanceError::not_found(format!(
                    "file with children {raw}"
                ))),
            }
        }

        let (manual, w) = AttributionCollection::load(input.manual_attributions, &tree, &breakpoints);
        warnings.extend(w);
        let (external, w) =
            AttributionCollection::load(input.external_attributions, &tree, &breakpoints);
        warnings.extend(w);

        let mut resolved = IdSet::new();
        for id in input.resolved_external_attributions {
            if external.contains(&id) {
                resolved.insert(id);
            } else {
                warnings.push(ClearanceError::not_found(format!("resolved signal {id}")));
            }
        }
        let preferred: IdSet = manual
            .iter()
            .chain(external.iter())
            .filter(|(_, p)| p.preferred)
            .map(|(id, _)| id.clone())
            .collect();

        #[cfg(feature = "tracing")]
        for w in &warnings {
            tracing::warn!(warning = %w, "dropped inconsistent project data");
        }

        Ok(Clearance {
            tree: Arc::new(tree),
            manual,
            external,
            resolved,
            preferred,
            breakpoints: Arc::new(breakpoints),
            files_with_children: Arc::new(files_with_children),
            metadata: input.metadata,
            cfg,
            marked_for_replacement: None,
            load_warnings: warnings,
        })
    }
}

impl Clearance {
    /// Start building a new `Clearance` project.
    ///
    /// ```rust,ignore
    /// let project = clearance::Clearance::builder()
    ///     .project(input)
    ///     .source("SC", clearance::ExternalAttributionSource::new("ScanCode", 2))
    ///     .sorting(clearance::Sorting::Alphabetical)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> ClearanceBuilder {
        ClearanceBuilder::new()
    }

    /// Project header.
    #[must_use]
    pub const fn metadata(&self) -> &ProjectMetadata {
        &self.metadata
    }

    /// Effective configuration, including scanner metadata from the project.
    #[must_use]
    pub const fn config(&self) -> &ClearanceConfig {
        &self.cfg
    }

    /// Resource tree.
    #[must_use]
    pub fn tree(&self) -> &ResourceTree {
        &self.tree
    }

    /// Manual attributions.
    #[must_use]
    pub const fn manual(&self) -> &AttributionCollection {
        &self.manual
    }

    /// Signals.
    #[must_use]
    pub const fn external(&self) -> &AttributionCollection {
        &self.external
    }

    /// Resolved signal ids.
    #[must_use]
    pub const fn resolved(&self) -> &IdSet {
        &self.resolved
    }

    /// Manual attributions and signals currently marked preferred.
    #[must_use]
    pub const fn preferred(&self) -> &IdSet {
        &self.preferred
    }

    /// Canonical breakpoint paths.
    #[must_use]
    pub fn breakpoints(&self) -> &BTreeSet<String> {
        &self.breakpoints
    }

    /// Canonical folders counted as files.
    #[must_use]
    pub fn files_with_children(&self) -> &BTreeSet<String> {
        &self.files_with_children
    }

    /// Data dropped while opening the project.
    #[must_use]
    pub fn load_warnings(&self) -> &[ClearanceError] {
        &self.load_warnings
    }

    /// Manual attribution by id.
    #[must_use]
    pub fn attribution(&self, id: &AttributionId) -> Option<&PackageInfo> {
        self.manual.get(id)
    }

    /// Signal by id.
    #[must_use]
    pub fn signal(&self, id: &AttributionId) -> Option<&PackageInfo> {
        self.external.get(id)
    }

    /// Manual attributions linked directly at `path`, in link order.
    #[must_use]
    pub fn attributions_for_resource(&self, path: &str) -> Vec<(AttributionId, PackageInfo)> {
        self.tree
            .canonicalize(path)
            .map(|p| self.manual.attributions_for_resource(&p))
            .unwrap_or_default()
    }

    /// Signals linked directly at `path`, in link order.
    #[must_use]
    pub fn signals_for_resource(&self, path: &str) -> Vec<(AttributionId, PackageInfo)> {
        self.tree
            .canonicalize(path)
            .map(|p| self.external.attributions_for_resource(&p))
            .unwrap_or_default()
    }

    /// Resources a manual attribution is linked to, sorted.
    #[must_use]
    pub fn resources_for_attribution(&self, id: &AttributionId) -> Vec<String> {
        self.manual.resources_for_attribution(id)
    }

    /// Freeze the current state for the aggregation worker. O(1) in the
    /// number of attributions.
    #[must_use]
    pub fn snapshot(&self) -> Arc<AggregationSnapshot> {
        Arc::new(AggregationSnapshot {
            tree: Arc::clone(&self.tree),
            manual: self.manual.clone(),
            external: self.external.clone(),
            resolved: self.resolved.clone(),
            breakpoints: Arc::clone(&self.breakpoints),
            files_with_children: Arc::clone(&self.files_with_children),
            sources: Arc::new(self.cfg.sources.clone()),
            breakpoint_policy: self.cfg.breakpoint_policy,
        })
    }

    /// Payload for the file layer. Uncommitted attributions and signals are
    /// never included.
    #[must_use]
    pub fn save_file_args(&self) -> SaveFileArgs {
        let data = self.manual.to_data();
        SaveFileArgs {
            manual_attributions: data.attributions,
            resources_to_attributions: data.resources_to_attributions,
            resolved_external_attributions: self.resolved.iter().cloned().collect(),
        }
    }

    /// Canonical path of a resource that may carry links.
    pub(crate) fn linkable_path(&self, path: &str) -> Result<String, ClearanceError> {
        let canonical = self
            .tree
            .canonicalize(path)
            .ok_or_else(|| ClearanceError::not_found(format!("resource {path}")))?;
        if self.breakpoints.contains(&canonical) {
            return Err(ClearanceError::breakpoint(canonical));
        }
        Ok(canonical)
    }

    /// Canonical path of any resource.
    pub(crate) fn resource_path(&self, path: &str) -> Result<String, ClearanceError> {
        self.tree
            .canonicalize(path)
            .ok_or_else(|| ClearanceError::not_found(format!("resource {path}")))
    }
}
