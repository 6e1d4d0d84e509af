pub mod allocator;
pub mod channel_map;
pub mod encoder;
/// Change detection over universe buffers.
pub mod fingerprint;
