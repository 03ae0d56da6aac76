//! Mask sources: units that fill one slot each.
//!
//! Every variant obeys the same side-effect order: clear the slot to
//! transparent zero first, then attempt the fill. When a required input
//! is missing the fill is skipped, the slot stays cleared, and a
//! diagnostic is emitted once per camera.

use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::frame::{CameraId, FrameData, RenderLayers, RenderQueue, RendererListDesc, FORWARD_TAGS};
use crate::graph::{
    ColorAttachment, DepthStencilAttachment, DrawContent, FrameGraph, FullscreenDraw, ImageHandle,
    RasterPass, StencilState,
};
use crate::materials::MaterialInstance;
use crate::types::{ClearValue, CompareFunction, TextureDescriptor};

use super::slot::MaskSlot;

/// Per-invocation context passed from the pass to a source.
#[derive(Debug, Clone)]
pub struct MaskSourceContext {
    /// Identity of the recording camera.
    pub camera: CameraId,
    /// The camera target descriptor, depth/stencil stripped.
    pub target_desc: TextureDescriptor,
    /// The frame's active depth/stencil image, if any.
    pub active_depth: Option<ImageHandle>,
    /// The frame's active color image, if any.
    pub active_color: Option<ImageHandle>,
    /// The slot's imported backing image.
    pub slot_target: ImageHandle,
}

fn record_slot_clear(graph: &mut FrameGraph, name: &str, slot_target: ImageHandle) {
    graph.add_raster_pass(
        RasterPass::new(name)
            .with_color(ColorAttachment::new(slot_target).with_clear(ClearValue::TRANSPARENT)),
    );
}

fn resolve_depth(graph: &FrameGraph, depth: Option<ImageHandle>) -> Option<ImageHandle> {
    depth.filter(|handle| graph.texture(*handle).is_some())
}

/// Renders the geometry of selected layers into the slot with an
/// override material, producing a mask of where that geometry is
/// visible.
#[derive(Debug)]
pub struct LayerMaskSource {
    enabled: bool,
    slot: MaskSlot,
    layers: RenderLayers,
    override_material: Option<Arc<MaterialInstance>>,
}

impl Default for LayerMaskSource {
    fn default() -> Self {
        Self {
            enabled: true,
            slot: MaskSlot::default(),
            layers: RenderLayers::ALL,
            override_material: None,
        }
    }
}

impl LayerMaskSource {
    /// Create a source filling the given slot.
    pub fn new(slot: MaskSlot) -> Self {
        Self {
            slot,
            ..Self::default()
        }
    }

    /// Restrict the source to the given layers.
    pub fn with_layers(mut self, layers: RenderLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Set the override material drawn for every object.
    pub fn with_override_material(mut self, material: Arc<MaterialInstance>) -> Self {
        self.override_material = Some(material);
        self
    }

    /// The layers this source draws.
    pub fn layers(&self) -> RenderLayers {
        self.layers
    }

    /// The configured override material, if any.
    pub fn override_material(&self) -> Option<&Arc<MaterialInstance>> {
        self.override_material.as_ref()
    }

    fn record_mask(
        &self,
        graph: &mut FrameGraph,
        frame: &FrameData,
        ctx: &MaskSourceContext,
        diagnostics: &mut Diagnostics,
    ) {
        if graph.texture(ctx.slot_target).is_none() {
            return;
        }

        record_slot_clear(graph, "layer_mask_clear", ctx.slot_target);

        let Some(material) = &self.override_material else {
            diagnostics.layer_material_missing(ctx.camera);
            return;
        };
        let Some(depth) = resolve_depth(graph, ctx.active_depth) else {
            diagnostics.layer_depth_missing(ctx.camera);
            return;
        };

        let list = frame.create_renderer_list(&RendererListDesc {
            layers: self.layers,
            queue: RenderQueue::Opaque,
            shader_tags: FORWARD_TAGS.to_vec(),
            sort: frame.opaque_sort,
            override_material: Arc::clone(material),
            override_pass_index: 0,
        });

        graph.add_raster_pass(
            RasterPass::new("layer_mask_source")
                .with_color(ColorAttachment::new(ctx.slot_target))
                .with_depth_stencil(DepthStencilAttachment::new(depth).read_only())
                .with_content(DrawContent::RendererList(list)),
        );
    }
}

/// Writes the existing stencil result into the slot: one fullscreen
/// triangle through a material whose output survives only where the
/// stencil test passes.
#[derive(Debug)]
pub struct StencilMaskSource {
    enabled: bool,
    slot: MaskSlot,
    stencil_ref: u32,
    stencil_compare: CompareFunction,
    material: Option<Arc<MaterialInstance>>,
}

impl Default for StencilMaskSource {
    fn default() -> Self {
        Self {
            enabled: true,
            slot: MaskSlot::default(),
            stencil_ref: 1,
            stencil_compare: CompareFunction::Equal,
            material: None,
        }
    }
}

impl StencilMaskSource {
    /// Create a source filling the given slot.
    pub fn new(slot: MaskSlot) -> Self {
        Self {
            slot,
            ..Self::default()
        }
    }

    /// Set the stencil reference value.
    pub fn with_stencil_ref(mut self, reference: u32) -> Self {
        self.stencil_ref = reference;
        self
    }

    /// Set the stencil comparison function.
    pub fn with_stencil_compare(mut self, compare: CompareFunction) -> Self {
        self.stencil_compare = compare;
        self
    }

    /// Set the fullscreen material.
    pub fn with_material(mut self, material: Arc<MaterialInstance>) -> Self {
        self.material = Some(material);
        self
    }

    /// The stencil reference value.
    pub fn stencil_ref(&self) -> u32 {
        self.stencil_ref
    }

    /// The stencil comparison function.
    pub fn stencil_compare(&self) -> CompareFunction {
        self.stencil_compare
    }

    fn record_mask(
        &self,
        graph: &mut FrameGraph,
        ctx: &MaskSourceContext,
        diagnostics: &mut Diagnostics,
    ) {
        if graph.texture(ctx.slot_target).is_none() {
            return;
        }

        record_slot_clear(graph, "stencil_mask_clear", ctx.slot_target);

        let Some(depth) = resolve_depth(graph, ctx.active_depth) else {
            diagnostics.stencil_depth_missing(ctx.camera);
            return;
        };
        let Some(material) = &self.material else {
            diagnostics.stencil_material_missing(ctx.camera);
            return;
        };

        graph.add_raster_pass(
            RasterPass::new("stencil_mask_source")
                .with_color(ColorAttachment::new(ctx.slot_target))
                .with_depth_stencil(DepthStencilAttachment::new(depth).read_only())
                .with_content(DrawContent::Fullscreen(FullscreenDraw {
                    material: Arc::clone(material),
                    pass_index: 0,
                    stencil: Some(StencilState {
                        reference: self.stencil_ref,
                        compare: self.stencil_compare,
                    }),
                })),
        );
    }
}

/// One unit of mask input. One source fills exactly one slot.
#[derive(Debug)]
pub enum MaskSource {
    /// Layer-filtered geometry redraw.
    Layer(LayerMaskSource),
    /// Fullscreen stencil test.
    Stencil(StencilMaskSource),
}

impl MaskSource {
    /// Whether the source participates this frame.
    pub fn enabled(&self) -> bool {
        match self {
            Self::Layer(s) => s.enabled,
            Self::Stencil(s) => s.enabled,
        }
    }

    /// Enable or disable the source.
    pub fn set_enabled(&mut self, enabled: bool) {
        match self {
            Self::Layer(s) => s.enabled = enabled,
            Self::Stencil(s) => s.enabled = enabled,
        }
    }

    /// The source's slot.
    pub fn slot(&self) -> &MaskSlot {
        match self {
            Self::Layer(s) => &s.slot,
            Self::Stencil(s) => &s.slot,
        }
    }

    /// The source's slot, mutably.
    pub fn slot_mut(&mut self) -> &mut MaskSlot {
        match self {
            Self::Layer(s) => &mut s.slot,
            Self::Stencil(s) => &mut s.slot,
        }
    }

    /// Record the passes that fill the slot for this frame.
    ///
    /// No-op when the slot target is invalid. The slot is always cleared
    /// before the fill is attempted, so a skipped fill leaves a defined
    /// transparent image rather than last frame's contents.
    pub fn record_mask(
        &self,
        graph: &mut FrameGraph,
        frame: &FrameData,
        ctx: &MaskSourceContext,
        diagnostics: &mut Diagnostics,
    ) {
        match self {
            Self::Layer(s) => s.record_mask(graph, frame, ctx, diagnostics),
            Self::Stencil(s) => s.record_mask(graph, ctx, diagnostics),
        }
    }
}

impl From<LayerMaskSource> for MaskSource {
    fn from(source: LayerMaskSource) -> Self {
        Self::Layer(source)
    }
}

impl From<StencilMaskSource> for MaskSource {
    fn from(source: StencilMaskSource) -> Self {
        Self::Stencil(source)
    }
}
