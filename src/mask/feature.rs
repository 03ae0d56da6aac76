//! Mask generation feature.

use std::sync::Arc;

use crate::device::GraphicsDevice;
use crate::diagnostics::Diagnostics;
use crate::frame::{CameraKind, FrameData};
use crate::graph::FrameGraph;

use super::pass::MaskGeneratorPass;
use super::source::MaskSource;

/// Warning configuration for the mask generator.
#[derive(Debug, Clone, Copy)]
pub struct MaskFeatureConfig {
    /// Report sources that publish an already-published global name.
    pub warn_on_duplicate_global: bool,
    /// Report sources that cannot run because depth/stencil is missing.
    pub warn_on_missing_depth_stencil: bool,
}

impl Default for MaskFeatureConfig {
    fn default() -> Self {
        Self {
            warn_on_duplicate_global: true,
            warn_on_missing_depth_stencil: true,
        }
    }
}

/// Owns the ordered mask source list and the pass that runs it.
///
/// Participation is per frame: only game cameras, and only when at least
/// one source is configured. Teardown releases every owned slot exactly
/// once, whether or not the pass ever ran.
#[derive(Debug, Default)]
pub struct MaskGeneratorFeature {
    sources: Vec<MaskSource>,
    pass: Option<MaskGeneratorPass>,
    config: MaskFeatureConfig,
}

impl MaskGeneratorFeature {
    /// Create the feature with default warning configuration.
    pub fn new() -> Self {
        Self::with_config(MaskFeatureConfig::default())
    }

    /// Create the feature with the given warning configuration.
    pub fn with_config(config: MaskFeatureConfig) -> Self {
        Self {
            sources: Vec::new(),
            pass: None,
            config,
        }
    }

    /// Append a source; declaration order is execution and publication
    /// tie-break order.
    pub fn add_source(&mut self, source: impl Into<MaskSource>) {
        self.sources.push(source.into());
    }

    /// The configured sources.
    pub fn sources(&self) -> &[MaskSource] {
        &self.sources
    }

    /// The configured sources, mutably.
    pub fn sources_mut(&mut self) -> &mut [MaskSource] {
        &mut self.sources
    }

    /// The pass diagnostics, if the pass has been created.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.pass.as_ref().map(|p| p.diagnostics())
    }

    /// Record this frame's mask passes, if the feature participates.
    pub fn add_passes(
        &mut self,
        graph: &mut FrameGraph,
        frame: &FrameData,
        device: &Arc<GraphicsDevice>,
    ) {
        if self.sources.is_empty() {
            return;
        }
        if frame.camera_kind != CameraKind::Game {
            return;
        }

        let config = self.config;
        let pass = self.pass.get_or_insert_with(|| {
            MaskGeneratorPass::new(
                config.warn_on_duplicate_global,
                config.warn_on_missing_depth_stencil,
            )
        });
        pass.record(&mut self.sources, graph, frame, device);
    }

    /// Release every owned slot image. Idempotent.
    pub fn teardown(&mut self) {
        for source in &mut self.sources {
            source.slot_mut().release();
        }
    }
}
