use std::fmt;

use crate::foundation::arena::{ArenaKey, SlotKey};

pub use kurbo::{Point, Rect, Vec2};

/// Size of one DMX universe buffer in bytes.
pub const UNIVERSE_SIZE: usize = 512;
/// Highest assignable DMX start address within a universe.
pub const MAX_DMX_ADDRESS: u16 = 511;
/// Highest assignable start universe (15-bit port address space).
pub const MAX_DMX_UNIVERSE: u16 = 32767;
/// Maximum color channels a pixel can carry (R, G, B, W).
pub const MAX_CHANNELS_PER_PIXEL: u8 = 4;

macro_rules! arena_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
            serde::Deserialize,
        )]
        pub struct $name(SlotKey);

        impl ArenaKey for $name {
            fn from_slot(slot: SlotKey) -> Self {
                Self(slot)
            }

            fn slot(self) -> SlotKey {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

arena_key!(
    /// Handle to a fixture inside its patch.
    FixtureId
);
arena_key!(
    /// Handle to a patch inside a [`PixelMapper`](crate::PixelMapper).
    PatchId
);

/// Per-pixel color as transmitted: red, green, blue and an optional white channel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ColorRgbw {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// White; only transmitted by four-channel fixtures.
    pub w: u8,
}

impl ColorRgbw {
    /// All channels off.
    pub const BLACK: Self = Self::new(0, 0, 0, 0);

    /// Construct from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self { r, g, b, w }
    }

    /// Construct with white off.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, w: 0 }
    }

    /// Byte emitted for channel offset `i` of a pixel (0 = R, 1 = G, 2 = B, 3 = W).
    pub fn channel(self, i: usize) -> u8 {
        match i {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            3 => self.w,
            _ => 0,
        }
    }
}

/// Axis-aligned bounds enclosing every pixel of a patch.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderArea {
    /// Lower-left corner.
    pub min: Point,
    /// Upper-right corner.
    pub max: Point,
}

impl Default for RenderArea {
    fn default() -> Self {
        Self {
            min: Point::ORIGIN,
            max: Point::ORIGIN,
        }
    }
}

impl RenderArea {
    /// Convert to a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::from_points(self.min, self.max)
    }

    /// Width and height.
    pub fn size(self) -> Vec2 {
        self.max - self.min
    }
}
