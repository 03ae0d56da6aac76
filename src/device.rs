//! Graphics device.
//!
//! The [`GraphicsDevice`] is the resource-creation interface the feature
//! stack consumes. In a full renderer the device wraps a GPU backend; here
//! it validates descriptors, tracks live resources, and hands out
//! reference-counted handles the passes record against.

use std::sync::{Arc, Weak};

use parking_lot::RwLock;

use crate::error::{RenderError, RenderResult};
use crate::materials::{Material, MaterialDescriptor};
use crate::resources::Texture;
use crate::types::TextureDescriptor;

/// Capabilities of a graphics device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceCapabilities {
    /// Maximum texture dimension.
    pub max_texture_dimension: u32,
}

impl Default for DeviceCapabilities {
    fn default() -> Self {
        Self {
            max_texture_dimension: 16384,
        }
    }
}

/// A graphics device for creating GPU resources.
///
/// # Thread Safety
///
/// `GraphicsDevice` is `Send + Sync`; resource creation uses interior
/// mutability for tracking.
pub struct GraphicsDevice {
    name: String,
    capabilities: DeviceCapabilities,
    // Weak references for leak inspection, not ownership.
    textures: RwLock<Vec<Weak<Texture>>>,
    materials: RwLock<Vec<Weak<Material>>>,
}

impl GraphicsDevice {
    /// Create a new device.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        let name = name.into();
        log::info!("Creating GraphicsDevice '{name}'");
        Arc::new(Self {
            name,
            capabilities: DeviceCapabilities::default(),
            textures: RwLock::new(Vec::new()),
            materials: RwLock::new(Vec::new()),
        })
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the device capabilities.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// Create a GPU texture.
    ///
    /// # Errors
    ///
    /// Returns an error if the texture dimensions are zero or exceed
    /// device limits.
    pub fn create_texture(
        self: &Arc<Self>,
        descriptor: &TextureDescriptor,
    ) -> RenderResult<Arc<Texture>> {
        let max_dim = self.capabilities.max_texture_dimension;
        if descriptor.size.width > max_dim || descriptor.size.height > max_dim {
            return Err(RenderError::InvalidParameter(format!(
                "texture dimension exceeds maximum {max_dim}"
            )));
        }
        if descriptor.size.width == 0 || descriptor.size.height == 0 {
            return Err(RenderError::InvalidParameter(
                "texture dimensions cannot be zero".to_string(),
            ));
        }

        let texture = Arc::new(Texture::new(Arc::clone(self), descriptor.clone()));
        self.textures.write().push(Arc::downgrade(&texture));

        log::trace!(
            "GraphicsDevice: created texture {:?}, size={}x{}",
            descriptor.label,
            descriptor.size.width,
            descriptor.size.height
        );

        Ok(texture)
    }

    /// Create a material.
    pub fn create_material(
        self: &Arc<Self>,
        descriptor: &MaterialDescriptor,
    ) -> RenderResult<Arc<Material>> {
        let material = Arc::new(Material::new(Arc::clone(self), descriptor.clone()));
        self.materials.write().push(Arc::downgrade(&material));

        log::trace!("GraphicsDevice: created material {:?}", descriptor.label);

        Ok(material)
    }

    /// Get the number of live textures created by this device.
    pub fn texture_count(&self) -> usize {
        self.textures
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Get the number of live materials created by this device.
    pub fn material_count(&self) -> usize {
        self.materials
            .read()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Clean up dead weak references to released resources.
    pub fn cleanup_dead_resources(&self) {
        self.textures.write().retain(|w| w.strong_count() > 0);
        self.materials.write().retain(|w| w.strong_count() > 0);
    }
}

impl std::fmt::Debug for GraphicsDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsDevice")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .finish()
    }
}

static_assertions::assert_impl_all!(GraphicsDevice: Send, Sync);
