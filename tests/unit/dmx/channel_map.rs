use super::*;
use crate::{dmx::allocator::rebuild_map, layout::reconcile::reconcile_dirty_layouts};

fn patched(fixtures: &[(usize, u8, u16, u16)]) -> (Patch, Vec<FixtureId>) {
    let mut p = Patch::new("map");
    let ids = fixtures
        .iter()
        .map(|&(pixels, channels, universe, address)| {
            let id = p.create_fixture(pixels, channels);
            p.set_dmx_address(id, universe, address).unwrap();
            id
        })
        .collect();
    reconcile_dirty_layouts(&mut p);
    rebuild_map(&mut p);
    (p, ids)
}

#[test]
fn missing_universe_has_no_map() {
    let (p, _) = patched(&[(1, 3, 0, 0)]);
    assert!(ChannelMap::build(&p, 9).is_none());
}

#[test]
fn fields_are_clipped_per_universe() {
    let (p, ids) = patched(&[(10, 4, 0, 510)]);
    let m0 = ChannelMap::build(&p, 0).unwrap();
    let m1 = ChannelMap::build(&p, 1).unwrap();
    assert_eq!(
        m0.fields(),
        &[MappedField {
            fixture: ids[0],
            start: 510,
            end: 512
        }]
    );
    assert_eq!(
        m1.fields(),
        &[MappedField {
            fixture: ids[0],
            start: 0,
            end: 38
        }]
    );
    assert_eq!(m0.used_channels() + m1.used_channels(), 40);
    assert_eq!(m1.owners(37), &[ids[0]]);
    assert!(m1.owners(38).is_empty());
    assert!(m1.owners(4096).is_empty());
}

#[test]
fn overlapping_fixtures_collide() {
    let (p, ids) = patched(&[(4, 3, 2, 0), (2, 3, 2, 9), (1, 3, 2, 100)]);
    let map = ChannelMap::build(&p, 2).unwrap();
    let collisions = map.collisions();
    assert_eq!(collisions.len(), 3);
    assert_eq!(collisions[0].channel, 9);
    assert_eq!(collisions[0].fixtures, vec![ids[0], ids[1]]);
    assert_eq!(map.used_channels(), 12 + 3 + 3);
}

#[test]
fn disjoint_fixtures_do_not_collide() {
    let (p, _) = patched(&[(4, 3, 0, 0), (4, 3, 0, 12)]);
    assert!(ChannelMap::build(&p, 0).unwrap().collisions().is_empty());
}
