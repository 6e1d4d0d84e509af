use crate::{
    foundation::core::FixtureId,
    foundation::error::{PixelMapError, PixelMapResult},
    foundation::math::range_fraction,
    patch::entities::Fixture,
    patch::model::Patch,
};

/// Place every pixel of `fixture` on its shape, in creation order. Returns `false` (and leaves
/// positions untouched) when the fixture has no shape.
pub fn update_positions(fixture: &mut Fixture) -> bool {
    let Some(shape) = fixture.shape.as_ref() else {
        return false;
    };
    let count = fixture.pixels.len();
    for (index, pixel) in fixture.pixels.iter_mut().enumerate() {
        pixel.position = shape.evaluate(range_fraction(index, count), index, count);
    }
    true
}

/// Recompute one fixture's positions, clear its `PixelPositionsDirty` marker and mark the patch
/// render area dirty. A shapeless fixture only has its marker cleared and returns `false`;
/// assigning a shape or changing the layout raises the marker again.
pub fn update_fixture_positions(patch: &mut Patch, id: FixtureId) -> PixelMapResult<bool> {
    let fixture = patch
        .fixtures
        .get_mut(id)
        .ok_or(PixelMapError::UnknownFixture(id))?;
    let placed = update_positions(fixture);
    patch.dirty.clear_positions(id);
    if placed {
        patch.dirty.mark_render_area();
    }
    Ok(placed)
}

/// Run [`update_fixture_positions`] for every fixture with pending positions. Returns how many
/// fixtures were repositioned.
pub(crate) fn update_dirty_positions(patch: &mut Patch) -> usize {
    let mut updated = 0;
    for id in patch.dirty.pending_positions() {
        match update_fixture_positions(patch, id) {
            Ok(true) => updated += 1,
            Ok(false) => {}
            Err(_) => patch.dirty.clear_positions(id),
        }
    }
    updated
}

#[cfg(test)]
#[path = "../../tests/unit/layout/positions.rs"]
mod tests;
