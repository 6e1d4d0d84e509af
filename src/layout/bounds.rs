use crate::{
    foundation::core::RenderArea,
    foundation::math::{point_max, point_min},
    patch::model::Patch,
};

/// Component-wise bounds of every pixel in `patch`, or `None` when it has no pixels.
pub fn pixel_bounds(patch: &Patch) -> Option<RenderArea> {
    let mut positions = patch.pixels().map(|(_, p)| p.position);
    let first = positions.next()?;
    let (min, max) = positions.fold((first, first), |(min, max), p| {
        (point_min(min, p), point_max(max, p))
    });
    Some(RenderArea { min, max })
}

/// Recompute the patch render area and clear `RenderAreaDirty`.
///
/// A patch without pixels keeps its previous bounds rather than collapsing to a degenerate
/// box. Returns `true` when new bounds were stored.
pub fn recompute_bounds(patch: &mut Patch) -> bool {
    let bounds = pixel_bounds(patch);
    patch.dirty.clear_render_area();
    match bounds {
        Some(area) => {
            patch.render_area = area;
            true
        }
        None => false,
    }
}
