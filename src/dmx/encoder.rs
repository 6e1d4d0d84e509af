//! Channel encoder: writes fixture colors into the universe buffers they span.
use rayon::prelude::*;

use crate::{
    foundation::core::{ColorRgbw, UNIVERSE_SIZE},
    patch::entities::{Fixture, Universe},
    patch::model::Patch,
};

const UNIVERSE_LEN: i64 = UNIVERSE_SIZE as i64;

/// Write the bytes of `colors` that belong to `universe_id` into `target`.
///
/// The fixture's channel stream starts at `start_address` of `start_universe` and carries
/// `channels_per_color` bytes per color. Pixels are clipped to the range that can touch this
/// universe, then each byte is rechecked, since one pixel may straddle a universe boundary.
/// Bytes of other fixtures in `target` are left untouched. Returns the number of bytes written.
pub fn write_colors_to_universe(
    colors: &[ColorRgbw],
    target: &mut [u8; UNIVERSE_SIZE],
    universe_id: u16,
    start_universe: u16,
    start_address: u16,
    channels_per_color: u8,
) -> usize {
    write_channels(
        colors.len(),
        |i| colors[i],
        target,
        universe_id,
        start_universe,
        start_address,
        channels_per_color,
    )
}

fn write_channels(
    count: usize,
    color_at: impl Fn(usize) -> ColorRgbw,
    target: &mut [u8; UNIVERSE_SIZE],
    universe_id: u16,
    start_universe: u16,
    start_address: u16,
    channels_per_color: u8,
) -> usize {
    if count == 0 || channels_per_color == 0 {
        return 0;
    }
    let cpc = i64::from(channels_per_color);
    let address = i64::from(start_address);
    let first_universe = i64::from(start_universe);
    let universe = i64::from(universe_id);

    // Channel range of this universe, relative to the fixture's first channel.
    let channel_start = (universe - first_universe) * UNIVERSE_LEN - address;
    let channel_end = channel_start + UNIVERSE_LEN - 1;
    let last_index = count as i64 - 1;
    if channel_end < 0 || channel_start > (last_index + 1) * cpc - 1 {
        return 0;
    }
    let first_pixel = channel_start.div_euclid(cpc).clamp(0, last_index);
    let last_pixel = channel_end.div_euclid(cpc).clamp(0, last_index);

    let mut written = 0;
    for pixel in first_pixel..=last_pixel {
        let color = color_at(pixel as usize);
        for offset in 0..cpc {
            let global = address + pixel * cpc + offset;
            if first_universe + global / UNIVERSE_LEN != universe {
                continue;
            }
            target[(global % UNIVERSE_LEN) as usize] = color.channel(offset as usize);
            written += 1;
        }
    }
    written
}

/// Write one fixture's current pixel colors into `universe`.
pub fn encode_fixture(fixture: &Fixture, universe: &mut Universe) -> usize {
    let dmx = fixture.dmx_address();
    let pixels = fixture.pixels();
    write_channels(
        pixels.len(),
        |i| pixels[i].color,
        &mut universe.channels,
        universe.properties.universe_id,
        dmx.universe(),
        dmx.address(),
        fixture.layout().channels_per_pixel(),
    )
}

/// Zero every universe buffer of `patch`, then write each linked fixture into it.
///
/// Fixtures sharing a universe write sequentially in link order. With `parallel`, distinct
/// universes are encoded on the current rayon pool. Returns the number of universes encoded.
#[tracing::instrument(skip(patch), fields(patch = %patch.name, universes = patch.universes.len()))]
pub fn encode_patch(patch: &mut Patch, parallel: bool) -> usize {
    let Patch {
        fixtures,
        universes,
        fixtures_by_universe,
        ..
    } = patch;
    let (fixtures, links) = (&*fixtures, &*fixtures_by_universe);

    let encode = |universe: &mut Universe| {
        universe.channels.fill(0);
        let linked = links
            .get(&universe.properties.universe_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        for &id in linked {
            if let Some(fixture) = fixtures.get(id) {
                encode_fixture(fixture, universe);
            }
        }
    };

    if parallel {
        universes.par_iter_mut().for_each(|(_, u)| encode(u));
    } else {
        universes.values_mut().for_each(encode);
    }
    universes.len()
}

#[cfg(test)]
#[path = "../../tests/unit/dmx/encoder.rs"]
mod tests;
