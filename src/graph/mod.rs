//! Frame graph recording.
//!
//! The frame graph is the "record now, execute later" seam between the
//! feature stack and the host engine. During recording, passes describe
//! their attachments, reads, and deferred work as immutable data; the
//! execution stage (the host engine's scheduler, or the reference
//! [`GraphExecutor`] here) later consumes the descriptions in dependency
//! order and performs any synchronization itself. Nothing in this module
//! submits GPU work or inserts barriers.
//!
//! # Example
//!
//! ```ignore
//! let mut graph = FrameGraph::new();
//! let target = graph.import_texture(&texture);
//! graph.add_raster_pass(
//!     RasterPass::new("mask_clear")
//!         .with_color(ColorAttachment::new(target).with_clear(ClearValue::TRANSPARENT)),
//! );
//! ```

mod executor;
mod pass;

pub use executor::{ExecutionReport, GraphExecutor, ImageContents};
pub use pass::{
    BlitDraw, BlitParams, ColorAttachment, DepthStencilAttachment, DrawContent, FullscreenDraw,
    LoadOp, Pass, PublishPass, RasterPass, StencilState, StoreOp,
};

use std::sync::Arc;

use crate::resources::Texture;

/// Handle to an image imported into a [`FrameGraph`].
///
/// `ImageHandle` is `Copy` and cheap to pass around. It is only valid
/// within the graph (and frame) that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(u32);

impl ImageHandle {
    fn new(index: u32) -> Self {
        Self(index)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle to a pass in a [`FrameGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PassHandle(u32);

impl PassHandle {
    fn new(index: u32) -> Self {
        Self(index)
    }
}

/// Stable identifier for a globally published texture.
///
/// Derived deterministically from the publication name, so unrelated
/// shader work can address the texture by name without sharing handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlobalTextureId(u64);

impl GlobalTextureId {
    /// Derive the identifier for a publication name.
    ///
    /// FNV-1a over the name bytes; the same name always yields the same
    /// id within and across frames.
    pub fn from_name(name: &str) -> Self {
        const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

        let mut hash = FNV_OFFSET;
        for byte in name.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(FNV_PRIME);
        }
        Self(hash)
    }
}

/// A frame's recorded rendering operations.
///
/// The graph owns the per-frame pass list and the set of imported
/// external images. Persistent resources (slot backings, camera targets)
/// are imported each frame; the returned [`ImageHandle`] is how passes
/// reference them for the rest of the frame.
#[derive(Debug, Default)]
pub struct FrameGraph {
    imported: Vec<Arc<Texture>>,
    passes: Vec<Pass>,
}

impl FrameGraph {
    /// Create a new empty frame graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Import an external texture for use in this frame.
    ///
    /// Importing the same texture twice returns the same handle.
    pub fn import_texture(&mut self, texture: &Arc<Texture>) -> ImageHandle {
        if let Some(index) = self.imported.iter().position(|t| Arc::ptr_eq(t, texture)) {
            return ImageHandle::new(index as u32);
        }
        let index = self.imported.len() as u32;
        self.imported.push(Arc::clone(texture));
        ImageHandle::new(index)
    }

    /// Resolve an image handle to its texture.
    ///
    /// Returns `None` for handles that do not belong to this graph;
    /// callers treat that as an expected warm-up/teardown transient.
    pub fn texture(&self, handle: ImageHandle) -> Option<&Arc<Texture>> {
        self.imported.get(handle.index())
    }

    /// Get the number of imported images.
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    /// Add a raster pass to the graph.
    ///
    /// The pass should be fully configured before adding.
    pub fn add_raster_pass(&mut self, pass: RasterPass) -> PassHandle {
        let index = self.passes.len() as u32;
        self.passes.push(Pass::Raster(pass));
        PassHandle::new(index)
    }

    /// Add a pass that binds an image to a global texture identifier.
    ///
    /// The binding takes effect at execution time, not at record time:
    /// reads by name observe whichever publication executed last.
    pub fn add_publish_pass(
        &mut self,
        name: impl Into<String>,
        global: GlobalTextureId,
        image: ImageHandle,
    ) -> PassHandle {
        let index = self.passes.len() as u32;
        self.passes.push(Pass::Publish(PublishPass {
            name: name.into(),
            global,
            image,
        }));
        PassHandle::new(index)
    }

    /// Get all passes in the graph.
    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    /// Get the number of passes in the graph.
    pub fn pass_count(&self) -> usize {
        self.passes.len()
    }

    /// Clear all passes and imports so the graph can record a new frame.
    pub fn clear(&mut self) {
        self.imported.clear();
        self.passes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::GraphicsDevice;
    use crate::types::{ClearValue, TextureDescriptor, TextureFormat, TextureUsage};

    fn create_test_texture() -> Arc<Texture> {
        let device = GraphicsDevice::new("test");
        device
            .create_texture(&TextureDescriptor::new_2d(
                256,
                256,
                TextureFormat::Rgba8Unorm,
                TextureUsage::RENDER_ATTACHMENT,
            ))
            .unwrap()
    }

    #[test]
    fn test_import_dedup() {
        let texture = create_test_texture();
        let mut graph = FrameGraph::new();

        let a = graph.import_texture(&texture);
        let b = graph.import_texture(&texture);
        assert_eq!(a, b);
        assert_eq!(graph.imported_count(), 1);
    }

    #[test]
    fn test_texture_lookup() {
        let texture = create_test_texture();
        let mut graph = FrameGraph::new();
        let handle = graph.import_texture(&texture);

        assert!(Arc::ptr_eq(graph.texture(handle).unwrap(), &texture));

        // A handle from another graph does not resolve here.
        let mut other = FrameGraph::new();
        other.import_texture(&create_test_texture());
        let stale = other.import_texture(&create_test_texture());
        assert!(graph.texture(stale).is_none());
    }

    #[test]
    fn test_add_raster_pass() {
        let texture = create_test_texture();
        let mut graph = FrameGraph::new();
        let target = graph.import_texture(&texture);

        graph.add_raster_pass(
            RasterPass::new("clear")
                .with_color(ColorAttachment::new(target).with_clear(ClearValue::TRANSPARENT)),
        );
        assert_eq!(graph.pass_count(), 1);
        assert_eq!(graph.passes()[0].name(), "clear");
    }

    #[test]
    fn test_clear() {
        let texture = create_test_texture();
        let mut graph = FrameGraph::new();
        let target = graph.import_texture(&texture);
        graph.add_publish_pass("publish", GlobalTextureId::from_name("_Mask"), target);

        graph.clear();

        assert_eq!(graph.pass_count(), 0);
        assert_eq!(graph.imported_count(), 0);
    }

    #[test]
    fn test_global_id_deterministic() {
        let a = GlobalTextureId::from_name("_Mask");
        let b = GlobalTextureId::from_name("_Mask");
        let c = GlobalTextureId::from_name("_OtherMask");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
