//! Recorded pass types.
//!
//! Passes are immutable descriptions of deferred GPU work: attachments,
//! declared reads, and the draw content to run at execution time.

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec4;

use crate::materials::MaterialInstance;
use crate::types::{ClearValue, CompareFunction};

use super::{GlobalTextureId, ImageHandle};

/// Operation to perform when loading an attachment at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LoadOp {
    /// Clear the attachment with a specified value.
    Clear(ClearValue),
    /// Load the existing contents of the attachment.
    #[default]
    Load,
}

/// Operation to perform when storing an attachment at the end of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StoreOp {
    /// Store the attachment contents for later use.
    #[default]
    Store,
    /// Don't care about the contents after the pass.
    DontCare,
}

/// A color attachment for a raster pass.
#[derive(Debug, Clone, Copy)]
pub struct ColorAttachment {
    /// The image written by the pass.
    pub target: ImageHandle,
    /// Operation when loading the attachment.
    pub load_op: LoadOp,
    /// Operation when storing the attachment.
    pub store_op: StoreOp,
}

impl ColorAttachment {
    /// Create a new color attachment.
    pub fn new(target: ImageHandle) -> Self {
        Self {
            target,
            load_op: LoadOp::default(),
            store_op: StoreOp::default(),
        }
    }

    /// Clear the attachment with the given value at pass start.
    pub fn with_clear(mut self, value: ClearValue) -> Self {
        self.load_op = LoadOp::Clear(value);
        self
    }

    /// Set the load operation.
    pub fn with_load_op(mut self, load_op: LoadOp) -> Self {
        self.load_op = load_op;
        self
    }
}

/// A depth/stencil attachment for a raster pass.
#[derive(Debug, Clone, Copy)]
pub struct DepthStencilAttachment {
    /// The depth/stencil image bound by the pass.
    pub target: ImageHandle,
    /// Whether depth and stencil are bound read-only (testing without
    /// writing).
    pub read_only: bool,
}

impl DepthStencilAttachment {
    /// Create a new depth/stencil attachment.
    pub fn new(target: ImageHandle) -> Self {
        Self {
            target,
            read_only: false,
        }
    }

    /// Bind depth and stencil read-only.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}

/// Stencil test state for a fullscreen draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    /// Reference value compared against the stencil buffer.
    pub reference: u32,
    /// Comparison function for the test.
    pub compare: CompareFunction,
}

/// Parameter block for blit draws, uploaded as-is to the shader.
///
/// `scale_bias` is (scale.x, scale.y, bias.x, bias.y) applied to the
/// source UVs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct BlitParams {
    pub scale_bias: Vec4,
}

impl BlitParams {
    /// Full-target blit: unit scale, zero bias.
    pub fn identity() -> Self {
        Self {
            scale_bias: Vec4::new(1.0, 1.0, 0.0, 0.0),
        }
    }
}

impl Default for BlitParams {
    fn default() -> Self {
        Self::identity()
    }
}

/// A fullscreen-triangle draw through a material.
#[derive(Debug, Clone)]
pub struct FullscreenDraw {
    /// The material to draw with.
    pub material: Arc<MaterialInstance>,
    /// Shader pass index within the material.
    pub pass_index: u32,
    /// Stencil test applied to the draw, if any.
    pub stencil: Option<StencilState>,
}

/// An image-to-target copy/transform through a material.
#[derive(Debug, Clone)]
pub struct BlitDraw {
    /// The image sampled by the material.
    pub source: ImageHandle,
    /// The material to transform with.
    pub material: Arc<MaterialInstance>,
    /// Shader pass index within the material.
    pub pass_index: u32,
    /// UV scale/bias parameters.
    pub params: BlitParams,
}

/// The deferred work a raster pass performs at execution time.
#[derive(Debug, Clone, Default)]
pub enum DrawContent {
    /// Attachment load/store only (e.g. a clear pass).
    #[default]
    None,
    /// Draw a filtered, sorted renderer list.
    RendererList(crate::frame::RendererList),
    /// Draw one fullscreen triangle.
    Fullscreen(FullscreenDraw),
    /// Copy/transform an image into the color target.
    Blit(BlitDraw),
}

/// A raster pass: attachments, declared reads, and draw content.
#[derive(Debug, Clone, Default)]
pub struct RasterPass {
    name: String,
    color: Option<ColorAttachment>,
    depth_stencil: Option<DepthStencilAttachment>,
    reads: Vec<ImageHandle>,
    content: DrawContent,
}

impl RasterPass {
    /// Create a new raster pass.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the color attachment.
    pub fn with_color(mut self, attachment: ColorAttachment) -> Self {
        self.color = Some(attachment);
        self
    }

    /// Set the depth/stencil attachment.
    pub fn with_depth_stencil(mut self, attachment: DepthStencilAttachment) -> Self {
        self.depth_stencil = Some(attachment);
        self
    }

    /// Declare that the pass samples an image.
    pub fn with_read(mut self, image: ImageHandle) -> Self {
        self.reads.push(image);
        self
    }

    /// Set the draw content.
    pub fn with_content(mut self, content: DrawContent) -> Self {
        self.content = content;
        self
    }

    /// Get the pass name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the color attachment.
    pub fn color(&self) -> Option<&ColorAttachment> {
        self.color.as_ref()
    }

    /// Get the depth/stencil attachment.
    pub fn depth_stencil(&self) -> Option<&DepthStencilAttachment> {
        self.depth_stencil.as_ref()
    }

    /// Get the declared reads.
    pub fn reads(&self) -> &[ImageHandle] {
        &self.reads
    }

    /// Get the draw content.
    pub fn content(&self) -> &DrawContent {
        &self.content
    }
}

/// A pass that binds an image to its global identifier at execution time.
#[derive(Debug, Clone)]
pub struct PublishPass {
    pub(super) name: String,
    pub(super) global: GlobalTextureId,
    pub(super) image: ImageHandle,
}

impl PublishPass {
    /// Get the pass name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the global identifier being bound.
    pub fn global(&self) -> GlobalTextureId {
        self.global
    }

    /// Get the image being published.
    pub fn image(&self) -> ImageHandle {
        self.image
    }
}

/// A pass in the frame graph.
#[derive(Debug, Clone)]
pub enum Pass {
    /// Raster pass (attachment loads/stores plus draw content).
    Raster(RasterPass),
    /// Global texture publication.
    Publish(PublishPass),
}

impl Pass {
    /// Get the pass name.
    pub fn name(&self) -> &str {
        match self {
            Pass::Raster(p) => p.name(),
            Pass::Publish(p) => p.name(),
        }
    }

    /// Get this pass as a raster pass, if it is one.
    pub fn as_raster(&self) -> Option<&RasterPass> {
        if let Pass::Raster(p) = self {
            Some(p)
        } else {
            None
        }
    }

    /// Get this pass as a publish pass, if it is one.
    pub fn as_publish(&self) -> Option<&PublishPass> {
        if let Pass::Publish(p) = self {
            Some(p)
        } else {
            None
        }
    }

    /// Check if this is a raster pass.
    pub fn is_raster(&self) -> bool {
        matches!(self, Pass::Raster(_))
    }

    /// Check if this is a publish pass.
    pub fn is_publish(&self) -> bool {
        matches!(self, Pass::Publish(_))
    }
}
