use super::*;

#[test]
fn factories_name_fixtures_and_raise_markers() {
    let mut p = Patch::new("Patch 0");
    let a = p.create_line(Point::ORIGIN, Point::new(10.0, 0.0), 4, 3);
    let b = p.create_circle(Point::ORIGIN, 5.0, 8, 4);
    let c = p.create_fixture(2, 1);

    assert_eq!(p.fixture(a).unwrap().name(), "Line Fixture 1");
    assert_eq!(p.fixture(b).unwrap().name(), "Circle Fixture 2");
    assert_eq!(p.fixture(c).unwrap().name(), "Fixture 3");
    assert_eq!(p.fixture(b).unwrap().shape().unwrap().kind(), "circle");
    assert!(p.fixture(c).unwrap().shape().is_none());

    let d = p.dirty();
    assert!(d.layout_dirty(a) && d.layout_dirty(b) && d.layout_dirty(c));
    assert!(d.positions_dirty(a) && d.positions_dirty(b));
    assert!(!d.positions_dirty(c));
    assert!(d.dmx_map_dirty());

    // Pixels are created by the tick, not by the factory.
    assert_eq!(p.pixel_count(), 0);
    assert_eq!(p.fixture(a).unwrap().dmx_address(), DmxAddress::new(0, 0));
}

#[test]
fn setters_clamp_and_return_effective_values() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(1, 1);
    let layout = p.set_layout(f, 0, 7).unwrap();
    assert_eq!(
        (layout.pixel_count(), layout.channels_per_pixel(), layout.byte_count()),
        (1, 4, 4)
    );
    let dmx = p.set_dmx_address(f, u16::MAX, 1000).unwrap();
    assert_eq!((dmx.universe(), dmx.address()), (32767, 511));
    assert_eq!(p.fixture(f).unwrap().layout(), layout);
}

#[test]
fn stale_handles_are_rejected() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(3, 3);
    p.remove_fixture(f).unwrap();
    assert!(matches!(
        p.set_layout(f, 2, 2),
        Err(PixelMapError::UnknownFixture(id)) if id == f
    ));
    assert!(p.set_dmx_address(f, 0, 0).is_err());
    assert!(p.remove_fixture(f).is_err());
    assert!(p.select_fixture(f).is_err());
    assert!(!p.dirty().layout_dirty(f));
}

#[test]
fn edit_shape_requires_a_shape() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(3, 3);
    assert!(!p.edit_shape(f, |_| {}).unwrap());
    assert!(!p.dirty().positions_dirty(f));

    p.set_shape(f, Circle::new(Point::ORIGIN, 1.0)).unwrap();
    let edited = p
        .edit_shape(f, |s| {
            if let Shape::Circle(c) = s {
                c.set_radius_handle(Point::new(0.0, 4.0));
            }
        })
        .unwrap();
    assert!(edited);
    match p.fixture(f).unwrap().shape() {
        Some(Shape::Circle(c)) => assert_eq!(c.radius, 4.0),
        other => panic!("unexpected shape {other:?}"),
    }
    assert!(p.clear_shape(f).unwrap().is_some());
    assert!(p.fixture(f).unwrap().shape().is_none());
}

#[test]
fn selection_clears_when_fixture_is_removed() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(1, 3);
    p.select_fixture(f).unwrap();
    assert_eq!(p.selected_fixture(), Some(f));
    p.remove_fixture(f).unwrap();
    assert_eq!(p.selected_fixture(), None);
    assert!(!p.select_universe(0), "no universes before the first tick");
}

#[test]
fn rename_and_counts() {
    let mut p = Patch::new("p");
    let f = p.create_fixture(1, 3);
    p.rename_fixture(f, "Bar").unwrap();
    p.set_name("Stage");
    assert_eq!(p.fixture(f).unwrap().name(), "Bar");
    assert_eq!(p.name(), "Stage");
    assert_eq!(p.fixture_count(), 1);
    assert!(p.fixtures_in_universe(0).is_empty());
}

#[test]
fn names_number_from_the_live_fixture_count() {
    let mut p = Patch::new("p");
    let a = p.create_fixture(1, 3);
    p.create_line(Point::ORIGIN, Point::new(1.0, 0.0), 2, 3);
    p.remove_fixture(a).unwrap();
    assert_eq!(p.fixture_count(), 1);

    let c = p.create_circle(Point::ORIGIN, 1.0, 3, 3);
    assert_eq!(p.fixture(c).unwrap().name(), "Circle Fixture 2");
    let d = p.create_fixture(1, 1);
    assert_eq!(p.fixture(d).unwrap().name(), "Fixture 3");
}
