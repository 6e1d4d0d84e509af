//! Per-channel ownership of a universe, for hex views and overlap checks.
use smallvec::SmallVec;

use crate::{
    foundation::core::{FixtureId, UNIVERSE_SIZE},
    patch::model::Patch,
};

/// The channel range `[start, end)` one fixture occupies inside one universe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct MappedField {
    /// Owning fixture.
    pub fixture: FixtureId,
    /// First channel, inclusive.
    pub start: usize,
    /// Last channel, exclusive.
    pub end: usize,
}

/// A channel claimed by more than one fixture.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Collision {
    /// Channel index within the universe.
    pub channel: usize,
    /// Every fixture writing to the channel, in link order.
    pub fixtures: Vec<FixtureId>,
}

/// Which fixtures write to each of the 512 channels of one universe.
#[derive(Clone, Debug)]
pub struct ChannelMap {
    universe_id: u16,
    fields: Vec<MappedField>,
    owners: Vec<SmallVec<[FixtureId; 1]>>,
}

impl ChannelMap {
    /// Build the map of `universe_id` from the links of the last allocation.
    ///
    /// Returns `None` when the patch has no such universe.
    pub fn build(patch: &Patch, universe_id: u16) -> Option<Self> {
        patch.universe(universe_id)?;
        let mut map = Self {
            universe_id,
            fields: Vec::new(),
            owners: vec![SmallVec::new(); UNIVERSE_SIZE],
        };
        for &id in patch.fixtures_in_universe(universe_id) {
            let Some(fixture) = patch.fixture(id) else {
                continue;
            };
            let Some(rel) = fixture.in_universe().iter().position(|&u| u == universe_id) else {
                continue;
            };
            let begin = usize::from(fixture.dmx_address().address());
            let end = begin.saturating_add(fixture.layout().byte_count());
            let base = rel * UNIVERSE_SIZE;
            let start = begin.max(base) - base;
            let stop = end.min(base + UNIVERSE_SIZE).saturating_sub(base);
            if start >= stop {
                continue;
            }
            for owners in &mut map.owners[start..stop] {
                owners.push(id);
            }
            map.fields.push(MappedField {
                fixture: id,
                start,
                end: stop,
            });
        }
        Some(map)
    }

    /// Universe this map describes.
    pub fn universe_id(&self) -> u16 {
        self.universe_id
    }

    /// One entry per linked fixture, in link order.
    pub fn fields(&self) -> &[MappedField] {
        &self.fields
    }

    /// Fixtures claiming `channel`, in link order. Empty for free or out-of-range channels.
    pub fn owners(&self, channel: usize) -> &[FixtureId] {
        self.owners.get(channel).map(|o| o.as_slice()).unwrap_or_default()
    }

    /// Number of channels claimed by at least one fixture.
    pub fn used_channels(&self) -> usize {
        self.owners.iter().filter(|o| !o.is_empty()).count()
    }

    /// Channels claimed by more than one fixture, ascending.
    pub fn collisions(&self) -> Vec<Collision> {
        self.owners
            .iter()
            .enumerate()
            .filter(|(_, o)| o.len() > 1)
            .map(|(channel, o)| Collision {
                channel,
                fixtures: o.to_vec(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/dmx/channel_map.rs"]
mod tests;
