use clearance_core::{AttributionId, ClearanceError};

use crate::Clearance;

impl Clearance {
    /// Move every link of `source` onto `target` and delete `source`.
    ///
    /// Resources already linked to `target` keep a single link. Either the
    /// whole move happens or nothing does.
    ///
    /// # Errors
    /// Returns `SelfReplacement` when both ids are equal and `NotFound` when
    /// either is not a live manual attribution.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "clearance::ops::replace",
            skip(self),
            fields(source = %source, target = %target),
        )
    )]
    pub fn replace(
        &mut self,
        source: &AttributionId,
        target: &AttributionId,
    ) -> Result<(), ClearanceError> {
        self.manual.replace(source, target)?;
        self.forget(source);
        Ok(())
    }

    /// Remember `id` as the attribution to be replaced by a later
    /// [`replace_marked_with`](Self::replace_marked_with).
    ///
    /// # Errors
    /// Returns `NotFound` when `id` is not a live manual attribution.
    pub fn mark_for_replacement(&mut self, id: &AttributionId) -> Result<(), ClearanceError> {
        if !self.manual.contains(id) {
            return Err(ClearanceError::not_found(format!("attribution {id}")));
        }
        self.marked_for_replacement = Some(id.clone());
        Ok(())
    }

    /// Forget the replacement mark.
    pub fn unmark_for_replacement(&mut self) {
        self.marked_for_replacement = None;
    }

    /// Attribution currently marked for replacement.
    #[must_use]
    pub const fn marked_for_replacement(&self) -> Option<&AttributionId> {
        self.marked_for_replacement.as_ref()
    }

    /// Replace the marked attribution with `target` and clear the mark.
    ///
    /// The mark survives a failed replacement.
    ///
    /// # Errors
    /// Returns `InvalidArg` when nothing is marked, otherwise as
    /// [`replace`](Self::replace).
    pub fn replace_marked_with(&mut self, target: &AttributionId) -> Result<(), ClearanceError> {
        let Some(source) = self.marked_for_replacement.clone() else {
            return Err(ClearanceError::InvalidArg(
                "no attribution is marked for replacement".to_string(),
            ));
        };
        self.replace(&source, target)?;
        self.marked_for_replacement = None;
        Ok(())
    }
}
