//! The patch: fixtures, the universes they require, and the mutation API hosts edit them through.
//!
//! Every setter here is an entry point that may raise dirty markers; derived data (pixel
//! entities, positions, bounds, universes, links) only changes inside [`Engine::advance`].
//!
//! [`Engine::advance`]: crate::Engine::advance
use std::collections::BTreeMap;

use crate::{
    foundation::arena::Arena,
    foundation::core::{ColorRgbw, FixtureId, Point, RenderArea},
    foundation::error::{PixelMapError, PixelMapResult},
    geometry::shape::{Circle, Line, Shape},
    patch::entities::{DmxAddress, Fixture, Layout, Universe},
    schedule::dirty::DirtyState,
};

/// A named collection of fixtures plus the universes derived from them.
#[derive(Debug)]
pub struct Patch {
    pub(crate) name: String,
    pub(crate) fixtures: Arena<FixtureId, Fixture>,
    pub(crate) universes: BTreeMap<u16, Universe>,
    pub(crate) fixtures_by_universe: BTreeMap<u16, Vec<FixtureId>>,
    pub(crate) render_area: RenderArea,
    pub(crate) dirty: DirtyState,
    pub(crate) selected_fixture: Option<FixtureId>,
    pub(crate) selected_universe: Option<u16>,
}

impl Patch {
    /// Empty patch with no fixtures or universes.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fixtures: Arena::new(),
            universes: BTreeMap::new(),
            fixtures_by_universe: BTreeMap::new(),
            render_area: RenderArea::default(),
            dirty: DirtyState::default(),
            selected_fixture: None,
            selected_universe: None,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the patch.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    // ---------------------------------------------------------------------------------------
    // Fixture lifetime

    /// Create a fixture with the given layout at DMX address `0.0` and no shape.
    pub fn create_fixture(&mut self, pixel_count: usize, channels_per_pixel: u8) -> FixtureId {
        let name = format!("Fixture {}", self.fixture_count() + 1);
        self.insert_fixture(name, pixel_count, channels_per_pixel, None)
    }

    /// Create a fixture laid out along a line, named `"Line Fixture N"`.
    pub fn create_line(
        &mut self,
        start: Point,
        end: Point,
        pixel_count: usize,
        channels_per_pixel: u8,
    ) -> FixtureId {
        let name = format!("Line Fixture {}", self.fixture_count() + 1);
        let shape = Shape::Line(Line::new(start, end));
        self.insert_fixture(name, pixel_count, channels_per_pixel, Some(shape))
    }

    /// Create a fixture laid out around a circle, named `"Circle Fixture N"`.
    pub fn create_circle(
        &mut self,
        center: Point,
        radius: f64,
        pixel_count: usize,
        channels_per_pixel: u8,
    ) -> FixtureId {
        let name = format!("Circle Fixture {}", self.fixture_count() + 1);
        let shape = Shape::Circle(Circle::new(center, radius));
        self.insert_fixture(name, pixel_count, channels_per_pixel, Some(shape))
    }

    fn insert_fixture(
        &mut self,
        name: String,
        pixel_count: usize,
        channels_per_pixel: u8,
        shape: Option<Shape>,
    ) -> FixtureId {
        let layout = Layout::new(pixel_count, channels_per_pixel);
        let mut fixture = Fixture::new(name, layout);
        let has_shape = shape.is_some();
        fixture.shape = shape;
        let id = self.fixtures.insert(fixture);

        self.dirty.mark_layout(id);
        self.dirty.mark_dmx_map();
        if has_shape {
            self.dirty.mark_positions(id);
        }
        tracing::debug!(fixture = %id, ?layout, "fixture created");
        id
    }

    /// Destroy a fixture together with its pixels. Universes it alone required disappear on the
    /// next tick.
    pub fn remove_fixture(&mut self, id: FixtureId) -> PixelMapResult<Fixture> {
        let fixture = self
            .fixtures
            .remove(id)
            .ok_or(PixelMapError::UnknownFixture(id))?;
        self.dirty.forget(id);
        self.dirty.mark_dmx_map();
        self.dirty.mark_render_area();
        for linked in self.fixtures_by_universe.values_mut() {
            linked.retain(|f| *f != id);
        }
        if self.selected_fixture == Some(id) {
            self.selected_fixture = None;
        }
        tracing::debug!(fixture = %id, "fixture removed");
        Ok(fixture)
    }

    // ---------------------------------------------------------------------------------------
    // Mutation API

    /// Request a new layout. Inputs are clamped; the clamped layout is returned.
    pub fn set_layout(
        &mut self,
        id: FixtureId,
        pixel_count: usize,
        channels_per_pixel: u8,
    ) -> PixelMapResult<Layout> {
        let fixture = self.fixture_mut(id)?;
        let layout = Layout::new(pixel_count, channels_per_pixel);
        if layout.pixel_count() != pixel_count
            || layout.channels_per_pixel() != channels_per_pixel
        {
            tracing::debug!(fixture = %id, pixel_count, channels_per_pixel, ?layout, "layout clamped");
        }
        fixture.layout = layout;
        self.dirty.mark_layout(id);
        Ok(layout)
    }

    /// Patch the fixture at a new DMX start. Inputs are clamped; the clamped address is
    /// returned.
    pub fn set_dmx_address(
        &mut self,
        id: FixtureId,
        universe: u16,
        address: u16,
    ) -> PixelMapResult<DmxAddress> {
        let fixture = self.fixture_mut(id)?;
        let dmx = DmxAddress::new(universe, address);
        if dmx.universe() != universe || dmx.address() != address {
            tracing::debug!(fixture = %id, universe, address, ?dmx, "dmx address clamped");
        }
        fixture.dmx = dmx;
        self.dirty.mark_dmx_map();
        Ok(dmx)
    }

    /// Replace the fixture's shape (a fixture carries at most one).
    pub fn set_shape(&mut self, id: FixtureId, shape: impl Into<Shape>) -> PixelMapResult<()> {
        self.fixture_mut(id)?.shape = Some(shape.into());
        self.dirty.mark_positions(id);
        Ok(())
    }

    /// Detach the fixture's shape. Pixel positions keep their last values.
    pub fn clear_shape(&mut self, id: FixtureId) -> PixelMapResult<Option<Shape>> {
        Ok(self.fixture_mut(id)?.shape.take())
    }

    /// Edit the current shape in place (drag handles and property panels). Returns `false` when
    /// the fixture has no shape.
    pub fn edit_shape(
        &mut self,
        id: FixtureId,
        edit: impl FnOnce(&mut Shape),
    ) -> PixelMapResult<bool> {
        let Some(shape) = self.fixture_mut(id)?.shape.as_mut() else {
            return Ok(false);
        };
        edit(shape);
        self.dirty.mark_positions(id);
        Ok(true)
    }

    /// Rename a fixture. Names need not be unique.
    pub fn rename_fixture(&mut self, id: FixtureId, name: impl Into<String>) -> PixelMapResult<()> {
        self.fixture_mut(id)?.name = name.into();
        Ok(())
    }

    // ---------------------------------------------------------------------------------------
    // Pixel colors (written by the render step, read by the channel encoder)

    /// Set one pixel's color. Fails for an index past the fixture's current pixels.
    pub fn set_pixel_color(
        &mut self,
        id: FixtureId,
        index: usize,
        color: ColorRgbw,
    ) -> PixelMapResult<()> {
        let fixture = self.fixture_mut(id)?;
        let count = fixture.pixels.len();
        let pixel = fixture.pixels.get_mut(index).ok_or_else(|| {
            PixelMapError::validation(format!(
                "pixel index {index} out of range for fixture {id} with {count} pixels"
            ))
        })?;
        pixel.color = color;
        Ok(())
    }

    /// Copy colors onto the fixture's pixels in order; extra input is ignored, missing input
    /// leaves the remaining pixels untouched. Returns the number of pixels written.
    pub fn set_pixel_colors(&mut self, id: FixtureId, colors: &[ColorRgbw]) -> PixelMapResult<usize> {
        let fixture = self.fixture_mut(id)?;
        let mut written = 0;
        for (pixel, &color) in fixture.pixels.iter_mut().zip(colors) {
            pixel.color = color;
            written += 1;
        }
        Ok(written)
    }

    /// Set every pixel of the fixture to `color`.
    pub fn fill_color(&mut self, id: FixtureId, color: ColorRgbw) -> PixelMapResult<()> {
        for pixel in &mut self.fixture_mut(id)?.pixels {
            pixel.color = color;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------------------------
    // Selection

    /// Make `id` the selected fixture.
    pub fn select_fixture(&mut self, id: FixtureId) -> PixelMapResult<()> {
        if !self.fixtures.contains(id) {
            return Err(PixelMapError::UnknownFixture(id));
        }
        self.selected_fixture = Some(id);
        Ok(())
    }

    /// Currently selected fixture, if any.
    pub fn selected_fixture(&self) -> Option<FixtureId> {
        self.selected_fixture
    }

    /// Deselect the fixture.
    pub fn clear_fixture_selection(&mut self) {
        self.selected_fixture = None;
    }

    /// Select a universe by id. Returns `false` (and leaves the selection alone) when no such
    /// universe exists.
    pub fn select_universe(&mut self, universe_id: u16) -> bool {
        if !self.universes.contains_key(&universe_id) {
            return false;
        }
        self.selected_universe = Some(universe_id);
        true
    }

    /// Currently selected universe id, if any.
    pub fn selected_universe(&self) -> Option<u16> {
        self.selected_universe
    }

    // ---------------------------------------------------------------------------------------
    // Read API

    /// Look up a live fixture.
    pub fn fixture(&self, id: FixtureId) -> Option<&Fixture> {
        self.fixtures.get(id)
    }

    pub(crate) fn fixture_mut(&mut self, id: FixtureId) -> PixelMapResult<&mut Fixture> {
        self.fixtures
            .get_mut(id)
            .ok_or(PixelMapError::UnknownFixture(id))
    }

    /// Fixtures in slot order.
    pub fn fixtures(&self) -> impl Iterator<Item = (FixtureId, &Fixture)> + '_ {
        self.fixtures.iter()
    }

    /// Number of live fixtures.
    pub fn fixture_count(&self) -> usize {
        self.fixtures.len()
    }

    /// Universes in ascending id order.
    pub fn universes(&self) -> impl Iterator<Item = &Universe> + '_ {
        self.universes.values()
    }

    /// Look up a universe by id.
    pub fn universe(&self, universe_id: u16) -> Option<&Universe> {
        self.universes.get(&universe_id)
    }

    /// Ids of all universes, ascending.
    pub fn universe_ids(&self) -> Vec<u16> {
        self.universes.keys().copied().collect()
    }

    /// Fixtures linked to a universe, in allocation order.
    pub fn fixtures_in_universe(&self, universe_id: u16) -> &[FixtureId] {
        self.fixtures_by_universe
            .get(&universe_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every pixel of every fixture, fixture by fixture.
    pub fn pixels(&self) -> impl Iterator<Item = (FixtureId, &crate::Pixel)> + '_ {
        self.fixtures
            .iter()
            .flat_map(|(id, f)| f.pixels.iter().map(move |p| (id, p)))
    }

    /// Pixels across every fixture.
    pub fn pixel_count(&self) -> usize {
        self.fixtures.iter().map(|(_, f)| f.pixels.len()).sum()
    }

    /// Bounds of every pixel as of the last tick that had pixels.
    pub fn render_area(&self) -> RenderArea {
        self.render_area
    }

    /// Recomputation pending for the next tick.
    pub fn dirty(&self) -> &DirtyState {
        &self.dirty
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/model.rs"]
mod tests;
