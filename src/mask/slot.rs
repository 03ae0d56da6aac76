//! Mask slot: one named output image and its global publication identity.

use std::sync::Arc;

use crate::device::GraphicsDevice;
use crate::error::RenderResult;
use crate::graph::GlobalTextureId;
use crate::resources::Texture;
use crate::types::{TextureDescriptor, TextureFormat, TextureUsage};

/// Defines one mask output: the backing image plus the name it is
/// published under.
///
/// The backing image persists across frames and is reallocated only when
/// the camera target's shape changes; it is released exactly once, at
/// feature teardown.
#[derive(Debug)]
pub struct MaskSlot {
    global_name: String,
    format: TextureFormat,
    global_id: Option<GlobalTextureId>,
    backing: Option<Arc<Texture>>,
}

impl Default for MaskSlot {
    fn default() -> Self {
        Self::new("_CustomMask", TextureFormat::R8Unorm)
    }
}

impl MaskSlot {
    /// Create a slot publishing under the given name and format.
    pub fn new(global_name: impl Into<String>, format: TextureFormat) -> Self {
        Self {
            global_name: global_name.into(),
            format,
            global_id: None,
            backing: None,
        }
    }

    /// The publication name.
    pub fn global_name(&self) -> &str {
        &self.global_name
    }

    /// The slot's pixel format.
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// The derived global identifier; `None` until the slot has been
    /// activated, or when the name is empty.
    pub fn global_id(&self) -> Option<GlobalTextureId> {
        self.global_id
    }

    /// The backing image, if allocated.
    pub fn backing(&self) -> Option<&Arc<Texture>> {
        self.backing.as_ref()
    }

    /// Recompute the global identifier from the current name.
    ///
    /// An empty name yields no identifier; the slot must not be
    /// published in that state.
    pub fn ensure_identity(&mut self) {
        self.global_id = if self.global_name.is_empty() {
            None
        } else {
            Some(GlobalTextureId::from_name(&self.global_name))
        };
    }

    /// Allocate or reallocate the backing image to match the camera
    /// target shape.
    ///
    /// The backing takes its dimensions and sample count from `base`,
    /// its format from the slot, and is usable as both render attachment
    /// and sampled texture; depth/stencil state is never carried over.
    /// The existing allocation is reused when the shape is unchanged.
    pub fn ensure_backing(
        &mut self,
        device: &Arc<GraphicsDevice>,
        base: &TextureDescriptor,
    ) -> RenderResult<()> {
        let desired = TextureDescriptor {
            label: Some(self.global_name.clone()),
            size: base.size,
            sample_count: base.sample_count,
            format: self.format,
            usage: TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
        };

        if let Some(backing) = &self.backing {
            if backing.descriptor().same_shape(&desired) {
                return Ok(());
            }
        }

        self.backing = Some(device.create_texture(&desired)?);
        Ok(())
    }

    /// Release the backing image. Safe to call when already released.
    pub fn release(&mut self) {
        if self.backing.take().is_some() {
            log::trace!("MaskSlot '{}': released backing image", self.global_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_desc(width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor::new_2d(
            width,
            height,
            TextureFormat::Rgba8Unorm,
            TextureUsage::RENDER_ATTACHMENT,
        )
    }

    #[test]
    fn test_identity_from_name() {
        let mut slot = MaskSlot::new("_Mask", TextureFormat::R8Unorm);
        assert!(slot.global_id().is_none());

        slot.ensure_identity();
        assert_eq!(slot.global_id(), Some(GlobalTextureId::from_name("_Mask")));
    }

    #[test]
    fn test_empty_name_has_no_identity() {
        let mut slot = MaskSlot::new("", TextureFormat::R8Unorm);
        slot.ensure_identity();
        assert!(slot.global_id().is_none());
    }

    #[test]
    fn test_backing_reused_when_shape_unchanged() {
        let device = GraphicsDevice::new("test");
        let mut slot = MaskSlot::default();

        slot.ensure_backing(&device, &base_desc(1920, 1080)).unwrap();
        let first = slot.backing().unwrap().clone();

        slot.ensure_backing(&device, &base_desc(1920, 1080)).unwrap();
        assert!(Arc::ptr_eq(slot.backing().unwrap(), &first));
    }

    #[test]
    fn test_backing_reallocated_on_shape_change() {
        let device = GraphicsDevice::new("test");
        let mut slot = MaskSlot::default();

        slot.ensure_backing(&device, &base_desc(1920, 1080)).unwrap();
        let first = slot.backing().unwrap().clone();

        slot.ensure_backing(&device, &base_desc(1280, 720)).unwrap();
        let second = slot.backing().unwrap();
        assert!(!Arc::ptr_eq(second, &first));
        assert_eq!(second.width(), 1280);
        assert_eq!(second.height(), 720);
        assert_eq!(second.format(), TextureFormat::R8Unorm);

        slot.ensure_backing(&device, &base_desc(1280, 720).with_sample_count(4))
            .unwrap();
        assert_eq!(slot.backing().unwrap().sample_count(), 4);
    }

    #[test]
    fn test_release_is_idempotent() {
        let device = GraphicsDevice::new("test");
        let mut slot = MaskSlot::default();
        slot.ensure_backing(&device, &base_desc(640, 480)).unwrap();
        assert!(slot.backing().is_some());

        slot.release();
        assert!(slot.backing().is_none());
        slot.release();
        assert!(slot.backing().is_none());

        device.cleanup_dead_resources();
        assert_eq!(device.texture_count(), 0);
    }
}
