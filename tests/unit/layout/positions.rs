use super::*;
use crate::{Point, layout::reconcile::reconcile_dirty_layouts};

fn close(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn line_pixels_are_evenly_spaced() {
    let mut p = Patch::new("p");
    let f = p.create_line(Point::new(0.0, 0.0), Point::new(30.0, 0.0), 4, 3);
    reconcile_dirty_layouts(&mut p);
    assert_eq!(update_dirty_positions(&mut p), 1);

    let xs = p
        .fixture(f)
        .unwrap()
        .pixels()
        .iter()
        .map(|px| px.position.x)
        .collect::<Vec<_>>();
    assert_eq!(xs, vec![0.0, 10.0, 20.0, 30.0]);
    assert!(!p.dirty().positions_dirty(f));
    assert!(p.dirty().render_area_dirty());
}

#[test]
fn shapeless_fixture_settles_until_a_shape_arrives() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(3, 3);
    reconcile_dirty_layouts(&mut p);
    assert_eq!(update_dirty_positions(&mut p), 0);
    assert!(!p.dirty().positions_dirty(f));
    assert!(!p.dirty().render_area_dirty());

    p.set_shape(f, crate::Circle::new(Point::new(1.0, 1.0), 1.0)).unwrap();
    assert!(p.dirty().positions_dirty(f));
    assert_eq!(update_dirty_positions(&mut p), 1);
    assert!(close(p.fixture(f).unwrap().pixels()[0].position, Point::new(2.0, 1.0)));
}

#[test]
fn stale_positions_do_not_survive_a_layout_edit() {
    let mut p = Patch::new("p");
    let f = p.create_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 2, 3);
    reconcile_dirty_layouts(&mut p);
    update_dirty_positions(&mut p);
    assert!(close(p.fixture(f).unwrap().pixels()[1].position, Point::new(10.0, 0.0)));

    p.set_layout(f, 3, 3).unwrap();
    reconcile_dirty_layouts(&mut p);
    update_dirty_positions(&mut p);
    let pos = p
        .fixture(f)
        .unwrap()
        .pixels()
        .iter()
        .map(|px| px.position)
        .collect::<Vec<_>>();
    assert!(close(pos[0], Point::new(0.0, 0.0)));
    assert!(close(pos[1], Point::new(5.0, 0.0)));
    assert!(close(pos[2], Point::new(10.0, 0.0)));
}

#[test]
fn unknown_fixture_is_an_error() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(1, 1);
    p.remove_fixture(f).unwrap();
    assert!(update_fixture_positions(&mut p, f).is_err());
}
