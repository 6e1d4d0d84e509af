use crate::{
    foundation::arena::Arena,
    foundation::core::PatchId,
    foundation::error::{PixelMapError, PixelMapResult},
    patch::model::Patch,
};

/// Application root: owns every patch and remembers which one the editor is showing.
#[derive(Debug, Default)]
pub struct PixelMapper {
    patches: Arena<PatchId, Patch>,
    selected: Option<PatchId>,
}

impl PixelMapper {
    /// Empty application with no patches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty patch named `"Patch N"`, N being the number of patches before it.
    pub fn create_patch(&mut self) -> PatchId {
        let name = format!("Patch {}", self.patches.len());
        let id = self.patches.insert(Patch::new(name));
        tracing::debug!(patch = %id, "patch created");
        id
    }

    /// Destroy a patch with all of its fixtures, pixels and universes.
    pub fn remove_patch(&mut self, id: PatchId) -> PixelMapResult<Patch> {
        let patch = self
            .patches
            .remove(id)
            .ok_or(PixelMapError::UnknownPatch(id))?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::debug!(patch = %id, fixtures = patch.fixture_count(), "patch removed");
        Ok(patch)
    }

    /// Look up a live patch.
    pub fn patch(&self, id: PatchId) -> Option<&Patch> {
        self.patches.get(id)
    }

    /// Look up a live patch for editing.
    pub fn patch_mut(&mut self, id: PatchId) -> Option<&mut Patch> {
        self.patches.get_mut(id)
    }

    /// Live patches in creation-slot order.
    pub fn patches(&self) -> impl Iterator<Item = (PatchId, &Patch)> + '_ {
        self.patches.iter()
    }

    /// Live patches in creation-slot order, mutably.
    pub fn patches_mut(&mut self) -> impl Iterator<Item = (PatchId, &mut Patch)> + '_ {
        self.patches.iter_mut()
    }

    /// Number of live patches.
    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }

    /// Make `id` the selected patch, replacing any previous selection.
    pub fn select_patch(&mut self, id: PatchId) -> PixelMapResult<()> {
        if !self.patches.contains(id) {
            return Err(PixelMapError::UnknownPatch(id));
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Currently selected patch, if any.
    pub fn selected_patch(&self) -> Option<PatchId> {
        self.selected
    }
}
