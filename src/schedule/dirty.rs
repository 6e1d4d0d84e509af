//! Per-entity dirty markers.
//!
//! Fixture-level markers are ordered sets so repeated marks collapse and a tick visits fixtures
//! in a stable order; patch-level markers are plain flags.
use std::collections::BTreeSet;

use crate::foundation::core::FixtureId;

/// Recomputation owed by a patch and its fixtures before their derived data can be trusted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyState {
    layout: BTreeSet<FixtureId>,
    positions: BTreeSet<FixtureId>,
    render_area: bool,
    dmx_map: bool,
}

impl DirtyState {
    /// `LayoutDirty(fixture)`: pixel count must be reconciled.
    pub fn mark_layout(&mut self, fixture: FixtureId) {
        self.layout.insert(fixture);
    }

    /// `PixelPositionsDirty(fixture)`: pixel positions must be recomputed.
    pub fn mark_positions(&mut self, fixture: FixtureId) {
        self.positions.insert(fixture);
    }

    /// `RenderAreaDirty(patch)`.
    pub fn mark_render_area(&mut self) {
        self.render_area = true;
    }

    /// `DmxMapDirty(patch)`.
    pub fn mark_dmx_map(&mut self) {
        self.dmx_map = true;
    }

    /// `true` when the fixture's pixels await reconciliation.
    pub fn layout_dirty(&self, fixture: FixtureId) -> bool {
        self.layout.contains(&fixture)
    }

    /// `true` when the fixture's pixel positions await recomputation.
    pub fn positions_dirty(&self, fixture: FixtureId) -> bool {
        self.positions.contains(&fixture)
    }

    /// `true` when the patch bounds await recomputation.
    pub fn render_area_dirty(&self) -> bool {
        self.render_area
    }

    /// `true` when the universe map awaits a rebuild.
    pub fn dmx_map_dirty(&self) -> bool {
        self.dmx_map
    }

    /// `true` when any recomputation is pending. A settled tick leaves this `false`, shapeless
    /// fixtures included.
    pub fn any(&self) -> bool {
        !self.layout.is_empty() || !self.positions.is_empty() || self.render_area || self.dmx_map
    }

    pub(crate) fn take_layout(&mut self) -> Vec<FixtureId> {
        std::mem::take(&mut self.layout).into_iter().collect()
    }

    /// Snapshot of fixtures with pending positions; entries are cleared one by one as they are
    /// processed.
    pub(crate) fn pending_positions(&self) -> Vec<FixtureId> {
        self.positions.iter().copied().collect()
    }

    pub(crate) fn clear_positions(&mut self, fixture: FixtureId) {
        self.positions.remove(&fixture);
    }

    pub(crate) fn clear_render_area(&mut self) {
        self.render_area = false;
    }

    pub(crate) fn clear_dmx_map(&mut self) {
        self.dmx_map = false;
    }

    /// Drop every marker referring to a destroyed fixture.
    pub(crate) fn forget(&mut self, fixture: FixtureId) {
        self.layout.remove(&fixture);
        self.positions.remove(&fixture);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/dirty.rs"]
mod tests;
