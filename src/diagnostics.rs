//! One-shot diagnostics for recording-time soft failures.
//!
//! Missing configuration and missing upstream resources are soft-fails:
//! the affected slot stays cleared or the effect is skipped, and a
//! warning is logged once per deduplication key so a condition that
//! persists across hundreds of frames produces a single line. The state
//! lives on the owning pass instance, not in process statics, so
//! parallel features and tests never observe each other's warnings.

use std::collections::HashSet;

use crate::frame::CameraId;
use crate::graph::GlobalTextureId;

/// Deduplication key for an emitted warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum WarnKey {
    LayerMaterialMissing(CameraId),
    LayerDepthMissing(CameraId),
    StencilMaterialMissing(CameraId),
    StencilDepthMissing(CameraId),
    DuplicateGlobal(GlobalTextureId),
}

/// Warn-once diagnostics owned by a pass for its lifetime.
#[derive(Debug)]
pub struct Diagnostics {
    emitted: HashSet<WarnKey>,
    warn_missing_depth: bool,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            emitted: HashSet::new(),
            warn_missing_depth: true,
        }
    }
}

impl Diagnostics {
    /// Create empty diagnostics state with all warnings enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the missing depth/stencil warnings.
    pub fn with_missing_depth_warnings(mut self, enabled: bool) -> Self {
        self.warn_missing_depth = enabled;
        self
    }

    /// Number of distinct warnings emitted so far.
    pub fn emitted_count(&self) -> usize {
        self.emitted.len()
    }

    /// Layer source has no override material configured.
    pub fn layer_material_missing(&mut self, camera: CameraId) {
        if self.emitted.insert(WarnKey::LayerMaterialMissing(camera)) {
            log::warn!("LayerMaskSource: override material is not set, mask slot left cleared");
        }
    }

    /// Layer source has no depth buffer to test against.
    pub fn layer_depth_missing(&mut self, camera: CameraId) {
        if !self.warn_missing_depth {
            return;
        }
        if self.emitted.insert(WarnKey::LayerDepthMissing(camera)) {
            log::warn!("LayerMaskSource: depth not available, mask slot left cleared");
        }
    }

    /// Stencil source has no fullscreen material configured.
    pub fn stencil_material_missing(&mut self, camera: CameraId) {
        if self.emitted.insert(WarnKey::StencilMaterialMissing(camera)) {
            log::warn!("StencilMaskSource: fullscreen material is not set, mask slot left cleared");
        }
    }

    /// Stencil source has no depth/stencil buffer to test against.
    pub fn stencil_depth_missing(&mut self, camera: CameraId) {
        if !self.warn_missing_depth {
            return;
        }
        if self.emitted.insert(WarnKey::StencilDepthMissing(camera)) {
            log::warn!("StencilMaskSource: depth/stencil not available, mask slot left cleared");
        }
    }

    /// Two sources published the same global name; reported once per
    /// identifier for the pass lifetime.
    pub fn duplicate_global(&mut self, id: GlobalTextureId, name: &str) {
        if self.emitted.insert(WarnKey::DuplicateGlobal(id)) {
            log::warn!("MaskGenerator: duplicate global texture name '{name}', later source wins");
        }
    }
}
