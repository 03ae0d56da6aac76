//! Post effects.

use std::sync::Arc;

use crate::frame::CameraId;
use crate::graph::{
    BlitDraw, BlitParams, ColorAttachment, DrawContent, FrameGraph, ImageHandle, RasterPass,
};
use crate::materials::{Material, MaterialInstance};
use crate::types::TextureDescriptor;

/// Per-frame context passed from the pass to each effect.
///
/// Masks are read from global textures inside the effect's shader, so
/// they are not part of the context.
#[derive(Debug, Clone)]
pub struct PostEffectContext {
    /// The shared color image the effect reads and rewrites.
    pub source_color: Option<ImageHandle>,
    /// The frame's active depth image, if any.
    pub active_depth: Option<ImageHandle>,
    /// The camera target descriptor.
    pub target_desc: TextureDescriptor,
    /// Identity of the recording camera.
    pub camera: CameraId,
}

/// Fullscreen blit effect: transforms the shared color buffer in place
/// through its material's first pass.
///
/// The material instance is created lazily from the configured shader
/// reference and held until [`release_material`](Self::release_material)
/// is called from feature teardown.
#[derive(Debug)]
pub struct FullscreenBlitEffect {
    enabled: bool,
    shader: Option<Arc<Material>>,
    material: Option<Arc<MaterialInstance>>,
}

impl Default for FullscreenBlitEffect {
    fn default() -> Self {
        Self {
            enabled: true,
            shader: None,
            material: None,
        }
    }
}

impl FullscreenBlitEffect {
    /// Create an effect using the given shader program.
    pub fn new(shader: Arc<Material>) -> Self {
        Self {
            shader: Some(shader),
            ..Self::default()
        }
    }

    /// The configured shader program, if any.
    pub fn shader(&self) -> Option<&Arc<Material>> {
        self.shader.as_ref()
    }

    /// The instantiated material, if any.
    pub fn material(&self) -> Option<&Arc<MaterialInstance>> {
        self.material.as_ref()
    }

    /// Instantiate the material from the shader reference if not yet
    /// created. Idempotent; a missing shader leaves the effect
    /// misconfigured and its record a no-op.
    pub fn ensure_material(&mut self) {
        if self.material.is_some() {
            return;
        }
        if let Some(shader) = &self.shader {
            let label = shader.label().unwrap_or("fullscreen_blit");
            self.material = Some(Arc::new(
                MaterialInstance::new(Arc::clone(shader)).with_label(label),
            ));
        }
    }

    /// Destroy the held material. Idempotent; called from feature
    /// teardown.
    pub fn release_material(&mut self) {
        if self.material.take().is_some() {
            log::trace!("FullscreenBlitEffect: released material instance");
        }
    }

    fn record(&self, graph: &mut FrameGraph, ctx: &PostEffectContext) {
        let Some(source) = ctx
            .source_color
            .filter(|handle| graph.texture(*handle).is_some())
        else {
            return;
        };
        let Some(material) = &self.material else {
            return;
        };

        graph.add_raster_pass(
            RasterPass::new("fullscreen_blit_effect")
                .with_color(ColorAttachment::new(source))
                .with_read(source)
                .with_content(DrawContent::Blit(BlitDraw {
                    source,
                    material: Arc::clone(material),
                    pass_index: 0,
                    params: BlitParams::identity(),
                })),
        );
    }
}

/// One unit of post-processing work over the shared color buffer.
#[derive(Debug)]
pub enum PostEffect {
    /// Fullscreen material blit.
    Blit(FullscreenBlitEffect),
}

impl PostEffect {
    /// Whether the effect participates this frame.
    pub fn enabled(&self) -> bool {
        match self {
            Self::Blit(e) => e.enabled,
        }
    }

    /// Enable or disable the effect.
    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::Blit(e) => e.enabled = enabled,
        }
    }

    /// Whether the effect's material has been instantiated.
    pub fn has_material(&self) -> bool {
        match self {
            Self::Blit(e) => e.material.is_some(),
        }
    }

    /// Instantiate the effect's material if needed. Idempotent.
    pub fn ensure_material(&mut self) {
        match self {
            Self::Blit(e) => e.ensure_material(),
        }
    }

    /// Release the effect's material. Idempotent.
    pub fn release_material(&mut self) {
        match self {
            Self::Blit(e) => e.release_material(),
        }
    }

    /// Record the effect's transformation of the shared color buffer.
    ///
    /// No-op when the source color is invalid or no material is
    /// configured.
    pub fn record(&self, graph: &mut FrameGraph, ctx: &PostEffectContext) {
        match self {
            Self::Blit(e) => e.record(graph, ctx),
        }
    }
}

impl From<FullscreenBlitEffect> for PostEffect {
    fn from(effect: FullscreenBlitEffect) -> Self {
        Self::Blit(effect)
    }
}
