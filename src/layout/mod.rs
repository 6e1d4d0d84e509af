/// Render-area aggregation.
pub mod bounds;
/// Pixel placement along fixture shapes.
pub mod positions;
/// Pixel count reconciliation.
pub mod reconcile;
