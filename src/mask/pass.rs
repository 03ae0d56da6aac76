//! Mask generation pass.

use std::collections::HashSet;
use std::sync::Arc;

use crate::device::GraphicsDevice;
use crate::diagnostics::Diagnostics;
use crate::frame::FrameData;
use crate::graph::{FrameGraph, GlobalTextureId};

use super::source::{MaskSource, MaskSourceContext};

/// Processes mask sources in declared order: allocates each slot against
/// the current target shape, records the source's clear-and-fill work,
/// and publishes the slot image under its global identifier.
///
/// Publication is last-writer-wins: when two sources share a name, the
/// later-declared one is bound at execution time, and the collision is
/// reported once per identifier for the pass lifetime.
#[derive(Debug)]
pub struct MaskGeneratorPass {
    warn_on_duplicate_global: bool,
    published: HashSet<GlobalTextureId>,
    diagnostics: Diagnostics,
}

impl MaskGeneratorPass {
    /// Create the pass with the feature's warning configuration.
    pub fn new(warn_on_duplicate_global: bool, warn_on_missing_depth_stencil: bool) -> Self {
        Self {
            warn_on_duplicate_global,
            published: HashSet::new(),
            diagnostics: Diagnostics::new()
                .with_missing_depth_warnings(warn_on_missing_depth_stencil),
        }
    }

    /// The pass's diagnostics state.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Record this frame's mask generation.
    pub fn record(
        &mut self,
        sources: &mut [MaskSource],
        graph: &mut FrameGraph,
        frame: &FrameData,
        device: &Arc<GraphicsDevice>,
    ) {
        if sources.is_empty() {
            return;
        }

        // The published set is per frame; the diagnostics state is not.
        self.published.clear();

        for source in sources.iter_mut() {
            if !source.enabled() {
                continue;
            }

            let slot = source.slot_mut();
            slot.ensure_identity();
            let Some(global_id) = slot.global_id() else {
                // Empty publication name, nothing to produce.
                continue;
            };
            let global_name = slot.global_name().to_string();

            if let Err(err) = slot.ensure_backing(device, &frame.target_descriptor) {
                log::debug!("MaskGenerator: slot '{global_name}' allocation failed: {err}");
                continue;
            }
            let Some(backing) = slot.backing().map(Arc::clone) else {
                continue;
            };

            let slot_target = graph.import_texture(&backing);
            let ctx = MaskSourceContext {
                camera: frame.camera,
                target_desc: frame.target_descriptor.clone(),
                active_depth: frame.active_depth,
                active_color: frame.active_color,
                slot_target,
            };

            source.record_mask(graph, frame, &ctx, &mut self.diagnostics);

            if self.warn_on_duplicate_global && self.published.contains(&global_id) {
                self.diagnostics.duplicate_global(global_id, &global_name);
            }
            // Always overwrite: the later source wins the name.
            self.published.insert(global_id);

            graph.add_publish_pass("mask_publish_global", global_id, slot_target);
        }
    }
}
