//! Content ownership per region
//!
//! A region starts out `Seeded`: its content comes from the template and may
//! be re-rendered freely. The first manual text edit flips it to
//! `UserEdited`, after which template-driven renders leave it alone. There is
//! no way back for a region while its widget lives. A region is only dropped
//! when its widget leaves the page, or cleared with the whole ledger when the
//! page is reseeded from another template.

use crate::{RenderSurface, SurfaceError};
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentState {
    Seeded,
    UserEdited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered,
    /// Region holds user edits and was left untouched
    Skipped,
}

#[derive(Debug, Clone, Default)]
pub struct ContentLedger {
    regions: HashMap<String, ContentState>,
}

impl ContentLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, region: &str) -> Option<ContentState> {
        self.regions.get(region).copied()
    }

    pub fn is_user_edited(&self, region: &str) -> bool {
        self.state(region) == Some(ContentState::UserEdited)
    }

    /// Record a manual edit; returns `true` on the first one
    pub fn mark_user_edited(&mut self, region: &str) -> bool {
        let previous = self.regions.insert(region.to_string(), ContentState::UserEdited);
        let changed = previous != Some(ContentState::UserEdited);
        if changed {
            debug!(region, "Region is now user edited");
        }
        changed
    }

    /// Render template markup into `region` unless the user owns it
    pub fn render_region(
        &mut self,
        surface: &mut dyn RenderSurface,
        region: &str,
        markup: &str,
    ) -> Result<RenderOutcome, SurfaceError> {
        if self.is_user_edited(region) {
            debug!(region, "Skipping render of user edited region");
            return Ok(RenderOutcome::Skipped);
        }

        surface.render_region(region, markup)?;
        self.regions.insert(region.to_string(), ContentState::Seeded);
        Ok(RenderOutcome::Rendered)
    }

    /// Every region rendered or edited so far
    pub fn regions(&self) -> impl Iterator<Item = &str> {
        self.regions.keys().map(String::as_str)
    }

    /// Stop tracking a region whose widget is gone
    pub fn forget(&mut self, region: &str) -> Option<ContentState> {
        self.regions.remove(region)
    }

    pub fn clear(&mut self) {
        debug!(regions = self.regions.len(), "Clearing content ledger");
        self.regions.clear();
    }

    pub fn user_edited_regions(&self) -> impl Iterator<Item = &str> {
        self.regions
            .iter()
            .filter(|(_, state)| **state == ContentState::UserEdited)
            .map(|(region, _)| region.as_str())
    }
}
