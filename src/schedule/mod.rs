pub mod dirty;
pub mod engine;
