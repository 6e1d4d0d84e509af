use crate::foundation::core::{Point, UNIVERSE_SIZE};

pub(crate) fn point_min(a: Point, b: Point) -> Point {
    Point::new(a.x.min(b.x), a.y.min(b.y))
}

pub(crate) fn point_max(a: Point, b: Point) -> Point {
    Point::new(a.x.max(b.x), a.y.max(b.y))
}

/// Number of universes touched by `byte_count` channels starting at `address`.
///
/// Never less than one. Landing exactly on a universe boundary does not open another universe.
pub(crate) fn universe_span(address: u16, byte_count: usize) -> usize {
    let end = usize::from(address).saturating_add(byte_count);
    end.div_ceil(UNIVERSE_SIZE).max(1)
}

/// Fraction along a fixture for pixel `index` of `count`: `index / (count - 1)`, 0 when
/// `count <= 1`.
pub(crate) fn range_fraction(index: usize, count: usize) -> f64 {
    if count > 1 {
        index as f64 / (count - 1) as f64
    } else {
        0.0
    }
}
