//! The attribution form: a temporary copy of one attribution under edit.

use clearance_core::purl;
use clearance_core::{
    AttributionFilters, AttributionId, ClearanceError, Confidence, PackageField, PackageInfo,
};

use crate::Clearance;
use crate::ops::with_default_confidence;

/// What [`EditSession::save`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new attribution was created and linked.
    Created(AttributionId),
    /// The existing attribution was overwritten.
    Updated,
    /// Nothing changed since the last save.
    Unchanged,
    /// The edit was empty and the existing attribution was deleted.
    Deleted,
    /// The edit was empty and nothing had been saved yet.
    Discarded,
}

/// Temporary package info for one attribution.
///
/// Field edits stay local until [`save`](Self::save). [`undo`](Self::undo)
/// returns to the last saved state, which is the only undo level.
#[derive(Debug, Clone)]
pub struct EditSession {
    id: Option<AttributionId>,
    committed: PackageInfo,
    current: PackageInfo,
    purl_text: Option<String>,
    purl_error: Option<ClearanceError>,
}

impl EditSession {
    /// Start editing an existing manual attribution.
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not a live manual attribution.
    pub fn begin(project: &Clearance, id: &AttributionId) -> Result<Self, ClearanceError> {
        let package = project
            .attribution(id)
            .cloned()
            .ok_or_else(|| ClearanceError::not_found(format!("attribution {id}")))?;
        Ok(Self {
            id: Some(id.clone()),
            committed: package.clone(),
            current: package,
            purl_text: None,
            purl_error: None,
        })
    }

    /// Start editing an attribution that does not exist yet.
    #[must_use]
    pub fn new_attribution() -> Self {
        Self {
            id: None,
            committed: PackageInfo::default(),
            current: PackageInfo::default(),
            purl_text: None,
            purl_error: None,
        }
    }

    /// Id under edit; `None` until a new attribution is first saved.
    #[must_use]
    pub const fn id(&self) -> Option<&AttributionId> {
        self.id.as_ref()
    }

    /// Current temporary package info.
    #[must_use]
    pub const fn package(&self) -> &PackageInfo {
        &self.current
    }

    /// Text of the purl field: what was typed, else the purl derived from
    /// the current fields.
    #[must_use]
    pub fn purl(&self) -> String {
        self.purl_text
            .clone()
            .or_else(|| purl::generate(&self.current))
            .unwrap_or_default()
    }

    /// Parse error of the typed purl, if any.
    #[must_use]
    pub const fn purl_error(&self) -> Option<&ClearanceError> {
        self.purl_error.as_ref()
    }

    /// Set a single-line field. Blank values clear the field.
    ///
    /// Editing a purl component makes the purl field follow the fields again.
    pub fn set_field(&mut self, field: PackageField, value: impl Into<String>) {
        let value = value.into();
        let value = (!value.trim().is_empty()).then_some(value);
        field.set(&mut self.current, value);
        if field.is_purl_component() {
            self.purl_text = None;
            self.purl_error = None;
        }
    }

    /// Type into the purl field.
    ///
    /// A valid purl overwrites type, namespace, name, version and appendix.
    /// An invalid one leaves them as they were and blocks saving until it is
    /// corrected. Clearing the field clears all five.
    pub fn set_purl(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text.trim().is_empty() {
            self.current.package_type = None;
            self.current.package_namespace = None;
            self.current.package_name = None;
            self.current.package_version = None;
            self.current.package_purl_appendix = None;
            self.purl_error = None;
        } else {
            match purl::parse(&text) {
                Ok(parts) => {
                    parts.apply_to(&mut self.current);
                    self.purl_error = None;
                }
                Err(e) => self.purl_error = Some(e),
            }
        }
        self.purl_text = Some(text);
    }

    /// Set the copyright statement.
    pub fn set_copyright(&mut self, copyright: Option<String>) {
        self.current.copyright = copyright;
    }

    /// Set the full license text.
    pub fn set_license_text(&mut self, text: Option<String>) {
        self.current.license_text = text;
    }

    /// Set the reviewer comment.
    pub fn set_comment(&mut self, comment: Option<String>) {
        self.current.comment = comment;
    }

    /// Set the reviewer confidence.
    pub fn set_confidence(&mut self, confidence: Confidence) {
        self.current.attribution_confidence = Some(confidence);
    }

    /// Set the editable flags: first party, follow-up, excluded from notice
    /// and needs review. Other bits are ignored.
    pub fn set_flags(&mut self, flags: AttributionFilters) {
        self.current.first_party = flags.contains(AttributionFilters::FIRST_PARTY);
        self.current.follow_up = flags.contains(AttributionFilters::FOLLOW_UP);
        self.current.exclude_from_notice = flags.contains(AttributionFilters::EXCLUDED_FROM_NOTICE);
        self.current.needs_review = flags.contains(AttributionFilters::NEEDS_REVIEW);
    }

    /// Take over every field of a suggestion or signal.
    pub fn apply(&mut self, package: &PackageInfo) {
        self.current = package.to_manual();
        self.purl_text = None;
        self.purl_error = None;
    }

    /// Revert to the last saved state.
    pub fn undo(&mut self) {
        self.current = self.committed.clone();
        self.purl_text = None;
        self.purl_error = None;
    }

    /// True when the package info differs from the last saved state.
    ///
    /// Typing an unparsable purl alone changes no field, so it does not make
    /// the session dirty; [`can_save`](Self::can_save) still blocks saving.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.current != self.committed
    }

    /// True when saving would succeed and change something.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.purl_error.is_none() && self.current != self.committed
    }

    /// Write the temporary package info into `project`.
    ///
    /// Behavior and trade-offs:
    /// - An empty edit deletes the attribution under edit, or discards a new
    ///   one without creating anything.
    /// - A missing confidence is saved as `High`.
    /// - A new or never linked attribution is linked at `path`; `path` is
    ///   ignored for attributions that are already linked.
    /// - Nothing is applied when the purl is invalid.
    ///
    /// # Errors
    /// Returns the pending `InvalidPurl`, or `NotFound`/`Breakpoint` when a
    /// new attribution cannot be linked at `path`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "clearance::edit::save", skip(self, project))
    )]
    pub fn save(&mut self, project: &mut Clearance, path: &str) -> Result<SaveOutcome, ClearanceError> {
        if let Some(e) = &self.purl_error {
            return Err(e.clone());
        }
        let package = with_default_confidence(self.current.clone());
        let outcome = match self.id.clone() {
            None if package.is_empty() => SaveOutcome::Discarded,
            None => {
                let id = project.create_linked(path, package.clone())?;
                self.id = Some(id.clone());
                SaveOutcome::Created(id)
            }
            Some(id) if project.manual.is_uncommitted(&id) => {
                if package.is_empty() {
                    project.discard(&id)?;
                    self.id = None;
                    SaveOutcome::Discarded
                } else {
                    let canonical = project.linkable_path(path)?;
                    project.update(&id, package.clone())?;
                    project.link(&canonical, &id)?;
                    SaveOutcome::Created(id)
                }
            }
            Some(id) if package.is_empty() => {
                project.delete(&id)?;
                self.id = None;
                SaveOutcome::Deleted
            }
            Some(_) if package == self.committed => SaveOutcome::Unchanged,
            Some(id) => {
                project.update(&id, package.clone())?;
                SaveOutcome::Updated
            }
        };
        let saved = match outcome {
            SaveOutcome::Deleted | SaveOutcome::Discarded => PackageInfo::default(),
            _ => package,
        };
        self.committed = saved.clone();
        self.current = saved;
        self.purl_text = None;
        Ok(outcome)
    }
}
