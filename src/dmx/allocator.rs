//! Universe allocation: decides which universes a patch needs and which fixtures feed each one.
//!
//! The fixture/universe relation is never patched incrementally. Every pass recomputes each
//! fixture's span from its address and byte count, diffs the required id set against the live
//! universes (keeping survivors, so their buffers and identity persist), then tears down and
//! rebuilds all links.
use std::collections::{BTreeSet, btree_map::Entry};

use crate::{
    foundation::core::{FixtureId, UNIVERSE_SIZE},
    foundation::math::universe_span,
    patch::entities::{DmxAddress, Layout, Universe, UniverseSpan},
    patch::model::Patch,
};

/// What one allocation pass changed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct AllocationReport {
    /// Universe ids created by this pass, ascending.
    pub created: Vec<u16>,
    /// Universe ids destroyed by this pass, ascending.
    pub destroyed: Vec<u16>,
    /// Total fixture-to-universe links after the pass.
    pub links: usize,
}

/// Ordered universe ids touched by a fixture patched at `dmx` with `layout`.
///
/// Ids past `u16::MAX` cannot be represented and are dropped from the span.
pub fn fixture_span(dmx: DmxAddress, layout: Layout) -> UniverseSpan {
    let count = universe_span(dmx.address(), layout.byte_count());
    let first = u32::from(dmx.universe());
    let mut span = UniverseSpan::new();
    for i in 0..count {
        let id = first + i as u32;
        match u16::try_from(id) {
            Ok(id) => span.push(id),
            Err(_) => {
                tracing::warn!(
                    universe = dmx.universe(),
                    span = count,
                    "fixture span exceeds the universe id range; truncating"
                );
                break;
            }
        }
    }
    span
}

/// The deduplicated set of universe ids the fixtures of `patch` require.
pub fn required_universes(patch: &Patch) -> BTreeSet<u16> {
    patch
        .fixtures
        .iter()
        .flat_map(|(_, f)| fixture_span(f.dmx, f.layout))
        .collect()
}

/// Rebuild the universe set and every fixture's universe links, then clear `DmxMapDirty`.
#[tracing::instrument(skip(patch), fields(patch = %patch.name))]
pub fn rebuild_map(patch: &mut Patch) -> AllocationReport {
    let spans = patch
        .fixtures
        .iter()
        .map(|(id, f)| (id, fixture_span(f.dmx, f.layout)))
        .collect::<Vec<(FixtureId, UniverseSpan)>>();
    let required = spans
        .iter()
        .flat_map(|(_, span)| span.iter().copied())
        .collect::<BTreeSet<u16>>();

    let mut report = AllocationReport::default();

    let stale = patch
        .universes
        .keys()
        .copied()
        .filter(|id| !required.contains(id))
        .collect::<Vec<_>>();
    for id in stale {
        patch.universes.remove(&id);
        if patch.selected_universe == Some(id) {
            patch.selected_universe = None;
        }
        tracing::debug!(universe = id, "universe destroyed");
        report.destroyed.push(id);
    }

    for &id in &required {
        if let Entry::Vacant(slot) = patch.universes.entry(id) {
            slot.insert(Universe::new(id));
            tracing::debug!(universe = id, "universe created");
            report.created.push(id);
        }
    }

    patch.fixtures_by_universe.clear();
    for universe in patch.universes.values_mut() {
        universe.properties.used_size = 0;
    }
    for (id, span) in spans {
        let Some(fixture) = patch.fixtures.get_mut(id) else {
            continue;
        };
        let end = usize::from(fixture.dmx.address()).saturating_add(fixture.layout.byte_count());
        for (i, &universe_id) in span.iter().enumerate() {
            patch
                .fixtures_by_universe
                .entry(universe_id)
                .or_default()
                .push(id);
            if let Some(universe) = patch.universes.get_mut(&universe_id) {
                let used = end.saturating_sub(i * UNIVERSE_SIZE).min(UNIVERSE_SIZE) as u16;
                universe.properties.used_size = universe.properties.used_size.max(used);
            }
        }
        report.links += span.len();
        fixture.in_universe = span;
    }

    patch.dirty.clear_dmx_map();
    report
}

#[cfg(test)]
#[path = "../../tests/unit/dmx/allocator.rs"]
mod tests;
