//! pixelmap is an incremental LED pixel-mapping engine.
//!
//! A [`Patch`] holds fixtures: groups of pixels laid out along a [`Shape`] and patched at a DMX
//! start address. Mutations only raise dirty markers; one [`Engine::advance`] per tick brings the
//! derived data up to date, in order:
//!
//! - Reconcile each fixture's pixels with its [`Layout`]
//! - Place pixels on their shapes and recompute the patch [`RenderArea`]
//! - Rebuild the set of 512-channel [`Universe`]s and the fixture links into them
//! - Encode pixel colors into the universe buffers
//!
//! Transmission (ArtNet/sACN framing) of the finished buffers is left to the host.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Universe allocation and channel output.
pub mod dmx;
/// Pixel curves.
pub mod geometry;
/// Per-tick passes that derive pixels, positions and bounds from fixtures.
pub mod layout;
/// The edited data model.
pub mod patch;
/// Dirty tracking and the tick engine.
pub mod schedule;

pub use crate::foundation::arena::{Arena, ArenaKey, SlotKey};
pub use crate::foundation::core::{
    ColorRgbw, FixtureId, MAX_CHANNELS_PER_PIXEL, MAX_DMX_ADDRESS, MAX_DMX_UNIVERSE, PatchId,
    Point, Rect, RenderArea, UNIVERSE_SIZE, Vec2,
};
pub use crate::foundation::error::{PixelMapError, PixelMapResult};

pub use crate::dmx::allocator::{AllocationReport, fixture_span, rebuild_map, required_universes};
pub use crate::dmx::channel_map::{ChannelMap, Collision, MappedField};
pub use crate::dmx::encoder::{encode_fixture, encode_patch, write_colors_to_universe};
pub use crate::dmx::fingerprint::{UniverseFingerprint, fingerprint_channels};
pub use crate::geometry::shape::{Circle, Line, PixelCurve, Shape, evaluate};
pub use crate::layout::bounds::{pixel_bounds, recompute_bounds};
pub use crate::layout::positions::{update_fixture_positions, update_positions};
pub use crate::layout::reconcile::{PixelDelta, reconcile, reconcile_fixture};
pub use crate::patch::app::PixelMapper;
pub use crate::patch::entities::{
    DmxAddress, Fixture, Layout, Pixel, Universe, UniverseProperties, UniverseSpan,
};
pub use crate::patch::model::Patch;
pub use crate::schedule::dirty::DirtyState;
pub use crate::schedule::engine::{Engine, EngineOpts, TickReport};
