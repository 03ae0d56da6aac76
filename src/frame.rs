//! Per-frame data the host renderer supplies to features.
//!
//! [`FrameData`] is the frame-scoped lookup surface: camera identity and
//! kind, the camera target descriptor, the active color/depth images
//! (already imported into the frame graph), and the culling results that
//! renderer lists are built from.

use std::sync::Arc;

use glam::Vec3;

use crate::graph::ImageHandle;
use crate::materials::MaterialInstance;
use crate::types::TextureDescriptor;

/// Identity of a camera, stable across frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraId(pub u32);

/// Kind of camera driving a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKind {
    /// Primary in-game camera.
    Game,
    /// Editor scene-view camera.
    SceneView,
    /// Asset/thumbnail preview camera.
    Preview,
    /// Reflection probe camera.
    Reflection,
}

/// Render layer bitmask for filtering objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderLayers(pub u32);

impl RenderLayers {
    /// The default layer objects spawn on.
    pub const DEFAULT: Self = Self(1);
    /// All layers.
    pub const ALL: Self = Self(u32::MAX);
    /// No layers.
    pub const NONE: Self = Self(0);

    /// Create a mask with a single layer bit set.
    pub fn layer(index: u32) -> Self {
        Self(1 << index)
    }

    /// Whether this mask shares any layer with another.
    pub fn intersects(&self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for RenderLayers {
    fn default() -> Self {
        Self::ALL
    }
}

/// Render queue an object belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderQueue {
    Opaque,
    Transparent,
}

/// Shader tag identifying which pipeline passes can draw an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShaderTag(pub &'static str);

/// The tag set drawn by forward geometry passes.
pub const FORWARD_TAGS: &[ShaderTag] = &[
    ShaderTag("Forward"),
    ShaderTag("ForwardOnly"),
    ShaderTag("Unlit"),
];

/// Sort order applied to opaque draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OpaqueSortMode {
    /// Sort front to back by distance from the camera.
    #[default]
    FrontToBack,
    /// Keep submission order.
    None,
}

/// One culled object visible this frame.
#[derive(Debug, Clone, Copy)]
pub struct RenderObject {
    /// Handle to the object's mesh.
    pub mesh_id: u64,
    /// Layers the object belongs to.
    pub layers: RenderLayers,
    /// Queue the object renders in.
    pub queue: RenderQueue,
    /// Shader tag of the object's material.
    pub tag: ShaderTag,
    /// World-space position for sorting.
    pub world_position: Vec3,
}

impl RenderObject {
    /// Create an opaque forward object on the default layer.
    pub fn opaque(mesh_id: u64, world_position: Vec3) -> Self {
        Self {
            mesh_id,
            layers: RenderLayers::DEFAULT,
            queue: RenderQueue::Opaque,
            tag: FORWARD_TAGS[0],
            world_position,
        }
    }

    /// Set the object's layers.
    pub fn with_layers(mut self, layers: RenderLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Set the object's queue.
    pub fn with_queue(mut self, queue: RenderQueue) -> Self {
        self.queue = queue;
        self
    }

    /// Set the object's shader tag.
    pub fn with_tag(mut self, tag: ShaderTag) -> Self {
        self.tag = tag;
        self
    }
}

/// Visible objects produced by the host's culling.
#[derive(Debug, Clone, Default)]
pub struct CullResults {
    objects: Vec<RenderObject>,
}

impl CullResults {
    /// Create empty cull results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visible object.
    pub fn push(&mut self, object: RenderObject) {
        self.objects.push(object);
    }

    /// Get the visible objects.
    pub fn objects(&self) -> &[RenderObject] {
        &self.objects
    }
}

/// Parameters for building a renderer list from cull results.
#[derive(Debug, Clone)]
pub struct RendererListDesc {
    /// Layers to include.
    pub layers: RenderLayers,
    /// Queue to include.
    pub queue: RenderQueue,
    /// Shader tags to include.
    pub shader_tags: Vec<ShaderTag>,
    /// Sort order for the draws.
    pub sort: OpaqueSortMode,
    /// Material drawn in place of each object's own.
    pub override_material: Arc<MaterialInstance>,
    /// Shader pass index used with the override material.
    pub override_pass_index: u32,
}

/// A filtered, sorted list of draws with an override material.
#[derive(Debug, Clone)]
pub struct RendererList {
    draws: Vec<u64>,
    override_material: Arc<MaterialInstance>,
    pass_index: u32,
}

impl RendererList {
    /// Mesh ids in draw order.
    pub fn draws(&self) -> &[u64] {
        &self.draws
    }

    /// The override material applied to every draw.
    pub fn override_material(&self) -> &Arc<MaterialInstance> {
        &self.override_material
    }

    /// The shader pass index used with the override material.
    pub fn pass_index(&self) -> u32 {
        self.pass_index
    }

    /// Number of draws in the list.
    pub fn len(&self) -> usize {
        self.draws.len()
    }

    /// Whether the list has no draws.
    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

/// Frame-scoped data handed to features each frame.
///
/// Built fresh by the host per camera per frame; never persisted by
/// features.
#[derive(Debug, Clone)]
pub struct FrameData {
    /// Camera identity.
    pub camera: CameraId,
    /// Camera kind, gating feature participation.
    pub camera_kind: CameraKind,
    /// Camera world position, for opaque sorting.
    pub camera_position: Vec3,
    /// Descriptor of the camera's color target.
    pub target_descriptor: TextureDescriptor,
    /// The shared color image, if an intermediate target is active.
    pub active_color: Option<ImageHandle>,
    /// The active depth/stencil image, if any.
    pub active_depth: Option<ImageHandle>,
    /// Whether the active target is the final back buffer (no
    /// intermediate texture available for in-place effects).
    pub is_back_buffer_target: bool,
    /// Default sort order for opaque geometry.
    pub opaque_sort: OpaqueSortMode,
    /// Visible objects this frame.
    pub cull_results: CullResults,
}

impl FrameData {
    /// Create frame data with no active images and empty cull results.
    pub fn new(camera: CameraId, camera_kind: CameraKind, target: TextureDescriptor) -> Self {
        Self {
            camera,
            camera_kind,
            camera_position: Vec3::ZERO,
            target_descriptor: target,
            active_color: None,
            active_depth: None,
            is_back_buffer_target: false,
            opaque_sort: OpaqueSortMode::default(),
            cull_results: CullResults::new(),
        }
    }

    /// Build a renderer list: filter the cull results by queue, layer
    /// mask, and shader tags, then sort per the requested order.
    pub fn create_renderer_list(&self, desc: &RendererListDesc) -> RendererList {
        let mut visible: Vec<&RenderObject> = self
            .cull_results
            .objects()
            .iter()
            .filter(|o| {
                o.queue == desc.queue
                    && o.layers.intersects(desc.layers)
                    && desc.shader_tags.contains(&o.tag)
            })
            .collect();

        if desc.sort == OpaqueSortMode::FrontToBack {
            visible.sort_by(|a, b| {
                let da = a.world_position.distance_squared(self.camera_position);
                let db = b.world_position.distance_squared(self.camera_position);
                da.total_cmp(&db)
            });
        }

        RendererList {
            draws: visible.iter().map(|o| o.mesh_id).collect(),
            override_material: Arc::clone(&desc.override_material),
            pass_index: desc.override_pass_index,
        }
    }
}
