//! Shared helpers for the feature integration tests.

use std::sync::Arc;

use glam::Vec3;
use render_features::frame::{CameraId, CameraKind, RenderLayers, RenderObject};
use render_features::materials::{MaterialDescriptor, ShaderSource};
use render_features::{
    FrameData, FrameGraph, GraphicsDevice, Material, MaterialInstance, Texture, TextureDescriptor,
    TextureFormat, TextureUsage,
};

/// Initialize logging for a test; safe to call repeatedly.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A device plus the camera target images a frame renders with.
pub struct TestContext {
    pub device: Arc<GraphicsDevice>,
    pub color: Arc<Texture>,
    pub depth: Arc<Texture>,
}

impl TestContext {
    pub fn new(width: u32, height: u32) -> Self {
        init_logger();
        let device = GraphicsDevice::new("test");
        let color = device
            .create_texture(
                &TextureDescriptor::new_2d(
                    width,
                    height,
                    TextureFormat::Rgba16Float,
                    TextureUsage::RENDER_ATTACHMENT | TextureUsage::TEXTURE_BINDING,
                )
                .with_label("camera_color"),
            )
            .unwrap();
        let depth = device
            .create_texture(
                &TextureDescriptor::new_2d(
                    width,
                    height,
                    TextureFormat::Depth24PlusStencil8,
                    TextureUsage::RENDER_ATTACHMENT,
                )
                .with_label("camera_depth"),
            )
            .unwrap();
        Self {
            device,
            color,
            depth,
        }
    }

    /// Build frame data for a game camera with the active color and
    /// depth imported into the graph.
    pub fn game_frame(&self, graph: &mut FrameGraph) -> FrameData {
        let mut frame = FrameData::new(
            CameraId(1),
            CameraKind::Game,
            self.color.descriptor().clone(),
        );
        frame.active_color = Some(graph.import_texture(&self.color));
        frame.active_depth = Some(graph.import_texture(&self.depth));
        frame
    }

    /// A frame whose camera sees one opaque object on the given layers.
    pub fn game_frame_with_object(&self, graph: &mut FrameGraph, layers: RenderLayers) -> FrameData {
        let mut frame = self.game_frame(graph);
        frame
            .cull_results
            .push(RenderObject::opaque(42, Vec3::new(0.0, 0.0, 10.0)).with_layers(layers));
        frame
    }

    /// A material instance suitable for mask drawing.
    pub fn mask_material(&self, label: &str) -> Arc<MaterialInstance> {
        let material = self
            .device
            .create_material(
                &MaterialDescriptor::new()
                    .with_shader(ShaderSource::fragment(b"fs_mask".to_vec(), "fs_main"))
                    .with_label(label),
            )
            .unwrap();
        Arc::new(MaterialInstance::new(material).with_label(label))
    }

    /// A shader program suitable for a fullscreen post effect.
    pub fn effect_shader(&self, label: &str) -> Arc<Material> {
        self.device
            .create_material(
                &MaterialDescriptor::new()
                    .with_shader(ShaderSource::vertex(b"vs_fullscreen".to_vec(), "vs_main"))
                    .with_shader(ShaderSource::fragment(b"fs_effect".to_vec(), "fs_main"))
                    .with_label(label),
            )
            .unwrap()
    }
}
