//! Post-process feature.

use crate::frame::{CameraKind, FrameData};
use crate::graph::FrameGraph;

use super::effect::PostEffect;
use super::pass::PostProcessPass;

/// Owns the ordered effect list and the pass that runs it.
///
/// Materials are held by each effect and released here, exactly once,
/// at teardown.
#[derive(Debug, Default)]
pub struct PostProcessFeature {
    effects: Vec<PostEffect>,
    pass: PostProcessPass,
}

impl PostProcessFeature {
    /// Create the feature with no effects.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an effect; declaration order is execution order.
    pub fn add_effect(&mut self, effect: impl Into<PostEffect>) {
        self.effects.push(effect.into());
    }

    /// The configured effects.
    pub fn effects(&self) -> &[PostEffect] {
        &self.effects
    }

    /// The configured effects, mutably.
    pub fn effects_mut(&mut self) -> &mut [PostEffect] {
        &mut self.effects
    }

    /// Record this frame's post-process passes, if the feature
    /// participates.
    pub fn add_passes(&mut self, graph: &mut FrameGraph, frame: &FrameData) {
        if self.effects.is_empty() {
            return;
        }
        if frame.camera_kind != CameraKind::Game {
            return;
        }

        self.pass.record(&mut self.effects, graph, frame);
    }

    /// Release every owned material. Idempotent.
    pub fn teardown(&mut self) {
        for effect in &mut self.effects {
            effect.release_material();
        }
    }
}
