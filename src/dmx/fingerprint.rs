use xxhash_rust::xxh3::Xxh3;

use crate::foundation::core::UNIVERSE_SIZE;

const XXH3_SEED: u64 = 0x5d3a_91c4_e07b_2f68;

/// Stable 128-bit digest of a universe's channel buffer, used to report which universes changed
/// between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct UniverseFingerprint {
    /// High 64 bits of the digest.
    pub hi: u64,
    /// Low 64 bits of the digest.
    pub lo: u64,
}

/// Digest the 512 channel bytes of universe `universe_id`.
pub fn fingerprint_channels(universe_id: u16, channels: &[u8; UNIVERSE_SIZE]) -> UniverseFingerprint {
    let mut h = StableHasher::new();
    h.write_u16(universe_id);
    h.write_bytes(channels);
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u16(&mut self, v: u16) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn finish(self) -> UniverseFingerprint {
        let v = self.inner.digest128();
        UniverseFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}
