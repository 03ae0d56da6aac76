//! Post-process pass.

use crate::frame::FrameData;
use crate::graph::FrameGraph;

use super::effect::{PostEffect, PostEffectContext};

/// Runs the configured effects in order against the shared color buffer.
///
/// Effects mutate the color buffer in place; the strict declared order
/// is the synchronization between them. The pass is skipped entirely
/// when the active target is the back buffer, because in-place
/// transforms need an intermediate texture.
#[derive(Debug, Default)]
pub struct PostProcessPass;

impl PostProcessPass {
    /// Create the pass.
    pub fn new() -> Self {
        Self
    }

    /// Record this frame's post-processing.
    pub fn record(&mut self, effects: &mut [PostEffect], graph: &mut FrameGraph, frame: &FrameData) {
        if effects.is_empty() {
            return;
        }
        if frame.is_back_buffer_target {
            log::trace!("PostProcessPass: rendering to back buffer, skipping");
            return;
        }

        let ctx = PostEffectContext {
            source_color: frame.active_color,
            active_depth: frame.active_depth,
            target_desc: frame.target_descriptor.clone(),
            camera: frame.camera,
        };

        for effect in effects.iter_mut() {
            if !effect.enabled() {
                continue;
            }
            effect.ensure_material();
            effect.record(graph, &ctx);
        }
    }
}
