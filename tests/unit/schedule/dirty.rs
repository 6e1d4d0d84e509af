use super::*;
use crate::foundation::arena::{ArenaKey, SlotKey};

fn fid(i: u32) -> FixtureId {
    FixtureId::from_slot(SlotKey::new(i, 0))
}

#[test]
fn marks_are_idempotent() {
    let mut d = DirtyState::default();
    d.mark_layout(fid(1));
    d.mark_layout(fid(1));
    d.mark_layout(fid(0));
    assert_eq!(d.take_layout(), vec![fid(0), fid(1)]);
    assert!(d.take_layout().is_empty());
}

#[test]
fn patch_flags_and_any() {
    let mut d = DirtyState::default();
    assert!(!d.any());
    d.mark_dmx_map();
    d.mark_dmx_map();
    assert!(d.dmx_map_dirty());
    assert!(d.any());
    d.clear_dmx_map();
    d.mark_render_area();
    assert!(d.render_area_dirty());
    d.clear_render_area();
    assert!(!d.any());
}

#[test]
fn forget_drops_fixture_markers() {
    let mut d = DirtyState::default();
    d.mark_layout(fid(2));
    d.mark_positions(fid(2));
    d.mark_positions(fid(3));
    d.forget(fid(2));
    assert!(!d.layout_dirty(fid(2)));
    assert!(!d.positions_dirty(fid(2)));
    assert_eq!(d.pending_positions(), vec![fid(3)]);
}
