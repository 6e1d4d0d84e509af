use smallvec::SmallVec;

use crate::{
    dmx::fingerprint::UniverseFingerprint,
    foundation::core::{
        ColorRgbw, MAX_CHANNELS_PER_PIXEL, MAX_DMX_ADDRESS, MAX_DMX_UNIVERSE, Point, UNIVERSE_SIZE,
    },
    geometry::shape::Shape,
};

/// Ordered list of universe ids a fixture's channel data occupies.
pub type UniverseSpan = SmallVec<[u16; 4]>;

/// Pixel/channel policy of a fixture. Always normalized: construct through [`Layout::new`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    pixel_count: usize,
    channels_per_pixel: u8,
    byte_count: usize,
}

impl Layout {
    /// Clamp `pixel_count` to `>= 1` and `channels_per_pixel` to `1..=4`, then derive the byte
    /// count.
    pub fn new(pixel_count: usize, channels_per_pixel: u8) -> Self {
        let pixel_count = pixel_count.max(1);
        let channels_per_pixel = channels_per_pixel.clamp(1, MAX_CHANNELS_PER_PIXEL);
        Self {
            pixel_count,
            channels_per_pixel,
            byte_count: pixel_count.saturating_mul(usize::from(channels_per_pixel)),
        }
    }

    /// Pixels the fixture should own.
    pub fn pixel_count(self) -> usize {
        self.pixel_count
    }

    /// Bytes each pixel occupies (1..=4).
    pub fn channels_per_pixel(self) -> u8 {
        self.channels_per_pixel
    }

    /// Total channel bytes, `pixel_count * channels_per_pixel`, saturating.
    pub fn byte_count(self) -> usize {
        self.byte_count
    }
}

/// DMX start point of a fixture. Always within range: construct through [`DmxAddress::new`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DmxAddress {
    universe: u16,
    address: u16,
}

impl DmxAddress {
    /// Clamp `universe` to `0..=32767` and `address` to `0..=511`.
    pub fn new(universe: u16, address: u16) -> Self {
        Self {
            universe: universe.min(MAX_DMX_UNIVERSE),
            address: address.min(MAX_DMX_ADDRESS),
        }
    }

    /// Start universe.
    pub fn universe(self) -> u16 {
        self.universe
    }

    /// Start channel within the start universe.
    pub fn address(self) -> u16 {
        self.address
    }
}

/// One addressable LED.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pixel {
    /// Computed from the fixture shape; never set by hosts.
    pub position: Point,
    /// Set by hosts; read by the encoder.
    pub color: ColorRgbw,
}

/// A group of pixels laid out along one shape and patched at one DMX start address.
#[derive(Clone, Debug)]
pub struct Fixture {
    pub(crate) name: String,
    pub(crate) layout: Layout,
    pub(crate) dmx: DmxAddress,
    pub(crate) shape: Option<Shape>,
    pub(crate) pixels: Vec<Pixel>,
    pub(crate) in_universe: UniverseSpan,
}

impl Fixture {
    pub(crate) fn new(name: String, layout: Layout) -> Self {
        Self {
            name,
            layout,
            dmx: DmxAddress::default(),
            shape: None,
            pixels: Vec::new(),
            in_universe: UniverseSpan::new(),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current (already clamped) layout.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// DMX start point.
    pub fn dmx_address(&self) -> DmxAddress {
        self.dmx
    }

    /// Attached shape, if any.
    pub fn shape(&self) -> Option<&Shape> {
        self.shape.as_ref()
    }

    /// Pixels in creation order. May lag the layout until the next tick reconciles it.
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel colors in pixel order.
    pub fn colors(&self) -> impl Iterator<Item = ColorRgbw> + '_ {
        self.pixels.iter().map(|p| p.color)
    }

    /// Universe ids this fixture is linked to, in span order, as of the last allocation.
    pub fn in_universe(&self) -> &[u16] {
        &self.in_universe
    }
}

/// Identity and usage of a universe.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UniverseProperties {
    /// Universe number as transmitted.
    pub universe_id: u16,
    /// One past the highest channel any linked fixture occupies; 0 when nothing is linked.
    pub used_size: u16,
}

/// A 512-channel output buffer derived from the fixtures of a patch.
#[derive(Clone)]
pub struct Universe {
    pub(crate) properties: UniverseProperties,
    pub(crate) channels: Box<[u8; UNIVERSE_SIZE]>,
    pub(crate) fingerprint: Option<UniverseFingerprint>,
}

impl std::fmt::Debug for Universe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Universe")
            .field("properties", &self.properties)
            .finish_non_exhaustive()
    }
}

impl Universe {
    pub(crate) fn new(universe_id: u16) -> Self {
        Self {
            properties: UniverseProperties {
                universe_id,
                used_size: 0,
            },
            channels: Box::new([0; UNIVERSE_SIZE]),
            fingerprint: None,
        }
    }

    /// Universe number.
    pub fn id(&self) -> u16 {
        self.properties.universe_id
    }

    /// Id and usage.
    pub fn properties(&self) -> UniverseProperties {
        self.properties
    }

    /// Channel buffer as of the last encode.
    pub fn channels(&self) -> &[u8; UNIVERSE_SIZE] {
        &self.channels
    }

    /// Display name, e.g. `"Universe 3"`.
    pub fn name(&self) -> String {
        format!("Universe {}", self.properties.universe_id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/patch/entities.rs"]
mod tests;
