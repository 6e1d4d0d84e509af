//! The tick driver: runs the dirty-marker passes of a patch in their fixed order.
use crate::{
    dmx::{allocator::rebuild_map, encoder::encode_patch, fingerprint::fingerprint_channels},
    foundation::error::{PixelMapError, PixelMapResult},
    layout::{
        bounds::recompute_bounds, positions::update_dirty_positions,
        reconcile::reconcile_dirty_layouts,
    },
    patch::{app::PixelMapper, model::Patch},
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Engine configuration.
pub struct EngineOpts {
    /// Encode distinct universes concurrently on a rayon pool.
    pub parallel: bool,
    /// Pool size when `parallel` is set. `None` lets rayon decide; must be `>= 1` when set.
    pub threads: Option<usize>,
    /// Run the channel encoder at the end of every tick.
    pub encode_output: bool,
    /// Fingerprint encoded buffers and report which universes changed.
    pub track_changes: bool,
}

impl Default for EngineOpts {
    fn default() -> Self {
        Self {
            parallel: false,
            threads: None,
            encode_output: true,
            track_changes: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// What one [`Engine::advance`] call recomputed.
pub struct TickReport {
    /// Fixtures whose pixel set was reconciled against their layout.
    pub layouts_reconciled: usize,
    /// Fixtures whose pixel positions were recomputed.
    pub positions_updated: usize,
    /// Whether new render-area bounds were stored.
    pub render_area_updated: bool,
    /// Whether the universe map was rebuilt.
    pub dmx_map_rebuilt: bool,
    /// Universe ids created by the rebuild, ascending.
    pub universes_created: Vec<u16>,
    /// Universe ids destroyed by the rebuild, ascending.
    pub universes_destroyed: Vec<u16>,
    /// Universe buffers written by the encoder (0 when encoding is disabled).
    pub universes_encoded: usize,
    /// Universes whose bytes differ from the previous tick, ascending.
    pub changed_universes: Vec<u16>,
}

impl TickReport {
    /// `true` when the tick changed nothing a host would need to redraw or retransmit.
    pub fn is_idle(&self) -> bool {
        self.layouts_reconciled == 0
            && self.positions_updated == 0
            && !self.render_area_updated
            && !self.dmx_map_rebuilt
            && self.changed_universes.is_empty()
    }
}

/// Drives patches from their dirty markers to consistent derived data.
///
/// Holds no patch state, so one engine can serve any number of patches.
#[derive(Debug, Default)]
pub struct Engine {
    opts: EngineOpts,
    pool: Option<rayon::ThreadPool>,
}

impl Engine {
    /// Validate `opts` and build the worker pool when `parallel` is set.
    ///
    /// Fails with [`PixelMapError::Validation`] when `threads` is `Some(0)`.
    pub fn new(opts: EngineOpts) -> PixelMapResult<Self> {
        let pool = if opts.parallel {
            Some(build_thread_pool(opts.threads)?)
        } else {
            validate_threads(opts.threads)?;
            None
        };
        Ok(Self { opts, pool })
    }

    /// Options the engine was built with.
    pub fn opts(&self) -> &EngineOpts {
        &self.opts
    }

    /// Run one tick over `patch`.
    ///
    /// Order: layouts, positions, render area, universe map, encoding, change detection. Each
    /// pass only runs for what is marked dirty, except encoding, which runs every tick since
    /// pixel colors change without raising markers.
    #[tracing::instrument(skip_all, fields(patch = %patch.name))]
    pub fn advance(&self, patch: &mut Patch) -> TickReport {
        let mut report = TickReport {
            layouts_reconciled: reconcile_dirty_layouts(patch),
            positions_updated: update_dirty_positions(patch),
            ..TickReport::default()
        };

        if patch.dirty.render_area_dirty() {
            report.render_area_updated = recompute_bounds(patch);
        }

        if patch.dirty.dmx_map_dirty() {
            let allocation = rebuild_map(patch);
            report.dmx_map_rebuilt = true;
            report.universes_created = allocation.created;
            report.universes_destroyed = allocation.destroyed;
        }

        if self.opts.encode_output {
            report.universes_encoded = match &self.pool {
                Some(pool) => pool.install(|| encode_patch(patch, true)),
                None => encode_patch(patch, false),
            };
            if self.opts.track_changes {
                report.changed_universes = track_changes(patch);
            }
        }

        tracing::trace!(?report, "tick complete");
        report
    }

    /// Advance every patch of `mapper`, in patch order.
    pub fn advance_all(&self, mapper: &mut PixelMapper) -> Vec<TickReport> {
        mapper
            .patches_mut()
            .map(|(_, patch)| self.advance(patch))
            .collect()
    }
}

fn track_changes(patch: &mut Patch) -> Vec<u16> {
    let mut changed = Vec::new();
    for (&id, universe) in &mut patch.universes {
        let fp = fingerprint_channels(id, &universe.channels);
        if universe.fingerprint != Some(fp) {
            universe.fingerprint = Some(fp);
            changed.push(id);
        }
    }
    changed
}

fn validate_threads(threads: Option<usize>) -> PixelMapResult<()> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PixelMapError::validation(
            "engine 'threads' must be >= 1 when set",
        ));
    }
    Ok(())
}

fn build_thread_pool(threads: Option<usize>) -> PixelMapResult<rayon::ThreadPool> {
    validate_threads(threads)?;
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/engine.rs"]
mod tests;
