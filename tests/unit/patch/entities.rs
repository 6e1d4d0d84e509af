use super::*;

#[test]
fn layout_clamps_and_derives_bytes() {
    let l = Layout::new(0, 0);
    assert_eq!(l.pixel_count(), 1);
    assert_eq!(l.channels_per_pixel(), 1);
    assert_eq!(l.byte_count(), 1);

    let l = Layout::new(170, 9);
    assert_eq!(l.channels_per_pixel(), 4);
    assert_eq!(l.byte_count(), 680);

    assert_eq!(Layout::new(10, 3).byte_count(), 30);
}

#[test]
fn dmx_address_clamps() {
    let a = DmxAddress::new(40000, 600);
    assert_eq!(a.universe(), 32767);
    assert_eq!(a.address(), 511);
    let a = DmxAddress::new(3, 100);
    assert_eq!((a.universe(), a.address()), (3, 100));
}

#[test]
fn new_universe_is_zeroed_and_named() {
    let u = Universe::new(7);
    assert_eq!(u.properties(), UniverseProperties { universe_id: 7, used_size: 0 });
    assert!(u.channels().iter().all(|&b| b == 0));
    assert_eq!(u.name(), "Universe 7");
    assert!(format!("{u:?}").contains("universe_id: 7"));
}
