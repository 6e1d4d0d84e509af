use crate::{
    foundation::core::FixtureId,
    foundation::error::{PixelMapError, PixelMapResult},
    patch::entities::{Fixture, Pixel},
    patch::model::Patch,
};

/// Pixel entities created or destroyed by one reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PixelDelta {
    /// Pixels appended.
    pub created: usize,
    /// Pixels dropped from the tail.
    pub destroyed: usize,
}

/// Grow or shrink the fixture's pixel set to match its layout.
///
/// New pixels start black at the origin. Shrinking drops pixels from the tail; which ones go is
/// not meaningful since pixels carry no identity beyond their index.
pub fn reconcile(fixture: &mut Fixture) -> PixelDelta {
    let want = fixture.layout.pixel_count();
    let have = fixture.pixels.len();
    if have < want {
        fixture.pixels.resize(want, Pixel::default());
        PixelDelta {
            created: want - have,
            destroyed: 0,
        }
    } else {
        fixture.pixels.truncate(want);
        PixelDelta {
            created: 0,
            destroyed: have - want,
        }
    }
}

/// Reconcile one fixture of `patch` and raise the markers that follow from a layout change:
/// its positions, and the patch DMX map (byte count may have changed the span).
pub fn reconcile_fixture(patch: &mut Patch, id: FixtureId) -> PixelMapResult<PixelDelta> {
    let fixture = patch
        .fixtures
        .get_mut(id)
        .ok_or(PixelMapError::UnknownFixture(id))?;
    let delta = reconcile(fixture);
    if delta != PixelDelta::default() {
        tracing::trace!(fixture = %id, created = delta.created, destroyed = delta.destroyed, "pixels reconciled");
    }
    patch.dirty.mark_positions(id);
    patch.dirty.mark_dmx_map();
    Ok(delta)
}

/// Reconcile every fixture marked `LayoutDirty`, clearing the markers. Returns how many
/// fixtures were processed.
pub(crate) fn reconcile_dirty_layouts(patch: &mut Patch) -> usize {
    let mut processed = 0;
    for id in patch.dirty.take_layout() {
        if reconcile_fixture(patch, id).is_ok() {
            processed += 1;
        }
    }
    processed
}

#[cfg(test)]
#[path = "../../tests/unit/layout/reconcile.rs"]
mod tests;
