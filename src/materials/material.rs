//! Material definition.
//!
//! A [`Material`] bundles the shader sources for a draw. It is created by
//! [`GraphicsDevice`](crate::device::GraphicsDevice) and can be shared by
//! many [`MaterialInstance`](super::MaterialInstance)s.

use std::sync::Arc;

use crate::device::GraphicsDevice;

/// Shader stage in the graphics pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader.
    Vertex,
    /// Fragment shader.
    Fragment,
}

/// Shader source for a material.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    /// The shader stage.
    pub stage: ShaderStage,
    /// Shader source code (WGSL, SPIR-V, etc. - backend dependent).
    pub source: Vec<u8>,
    /// Entry point function name.
    pub entry_point: String,
}

impl ShaderSource {
    /// Create a new shader source.
    pub fn new(
        stage: ShaderStage,
        source: impl Into<Vec<u8>>,
        entry_point: impl Into<String>,
    ) -> Self {
        Self {
            stage,
            source: source.into(),
            entry_point: entry_point.into(),
        }
    }

    /// Create a vertex shader source.
    pub fn vertex(source: impl Into<Vec<u8>>, entry_point: impl Into<String>) -> Self {
        Self::new(ShaderStage::Vertex, source, entry_point)
    }

    /// Create a fragment shader source.
    pub fn fragment(source: impl Into<Vec<u8>>, entry_point: impl Into<String>) -> Self {
        Self::new(ShaderStage::Fragment, source, entry_point)
    }
}

/// Descriptor for creating a material.
#[derive(Debug, Clone, Default)]
pub struct MaterialDescriptor {
    /// Shaders used by this material.
    pub shaders: Vec<ShaderSource>,
    /// Number of passes the shader exposes. Draw records reference
    /// passes by index; index 0 is always valid.
    pub pass_count: u32,
    /// Optional label for debugging.
    pub label: Option<String>,
}

impl MaterialDescriptor {
    /// Create a new material descriptor with a single pass.
    pub fn new() -> Self {
        Self {
            shaders: Vec::new(),
            pass_count: 1,
            label: None,
        }
    }

    /// Add a shader to the material.
    pub fn with_shader(mut self, shader: ShaderSource) -> Self {
        self.shaders.push(shader);
        self
    }

    /// Set the number of shader passes.
    pub fn with_pass_count(mut self, count: u32) -> Self {
        self.pass_count = count;
        self
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A material defines the shader program used for rendering.
///
/// Materials are created by
/// [`GraphicsDevice::create_material`](crate::device::GraphicsDevice::create_material)
/// and hold a strong reference to their parent device.
pub struct Material {
    device: Arc<GraphicsDevice>,
    descriptor: MaterialDescriptor,
}

impl Material {
    /// Create a new material (called by GraphicsDevice).
    pub(crate) fn new(device: Arc<GraphicsDevice>, descriptor: MaterialDescriptor) -> Self {
        Self { device, descriptor }
    }

    /// Get the parent device.
    pub fn device(&self) -> &Arc<GraphicsDevice> {
        &self.device
    }

    /// Get the material descriptor.
    pub fn descriptor(&self) -> &MaterialDescriptor {
        &self.descriptor
    }

    /// Get the shaders.
    pub fn shaders(&self) -> &[ShaderSource] {
        &self.descriptor.shaders
    }

    /// Get the number of shader passes.
    pub fn pass_count(&self) -> u32 {
        self.descriptor.pass_count
    }

    /// Get the material label, if set.
    pub fn label(&self) -> Option<&str> {
        self.descriptor.label.as_deref()
    }
}

impl std::fmt::Debug for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Material")
            .field("label", &self.descriptor.label)
            .field("shader_count", &self.descriptor.shaders.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Material: Send, Sync);
