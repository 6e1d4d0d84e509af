/// Application root.
pub mod app;
/// Fixtures, pixels and universes.
pub mod entities;
pub mod model;
