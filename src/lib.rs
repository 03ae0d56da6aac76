//! # Render Features
//!
//! Mask generation and custom post-processing for a render graph-based
//! renderer.
//!
//! The crate is built around a two-phase contract: features *record*
//! immutable pass descriptions into a [`FrameGraph`](graph::FrameGraph)
//! each frame, and a separate execution stage (the host engine's
//! scheduler, or the reference [`GraphExecutor`](graph::GraphExecutor))
//! consumes them later, owning all GPU synchronization.
//!
//! # Features
//! - Mask sources (layer-filtered geometry, stencil tests) filling named
//!   slot images published as global textures
//! - A post-effect chain transforming the shared color buffer in place
//! - Persistent slot backings reallocated only on target shape changes
//! - One-shot diagnostics keyed by camera and publication identity
//!
//! # Example
//!
//! ```ignore
//! let mut masks = MaskGeneratorFeature::new();
//! masks.add_source(LayerMaskSource::new(MaskSlot::new("_Mask", TextureFormat::R8Unorm))
//!     .with_override_material(mask_material));
//!
//! // Each frame:
//! masks.add_passes(&mut graph, &frame, &device);
//! ```

pub mod device;
pub mod diagnostics;
pub mod error;
pub mod frame;
pub mod graph;
pub mod mask;
pub mod materials;
pub mod postfx;
pub mod resources;
pub mod types;

// Re-export main types for convenience
pub use device::GraphicsDevice;
pub use diagnostics::Diagnostics;
pub use error::{RenderError, RenderResult};
pub use frame::{CameraId, CameraKind, CullResults, FrameData, RenderLayers, RenderObject};
pub use graph::{FrameGraph, GlobalTextureId, GraphExecutor, ImageHandle};
pub use mask::{
    LayerMaskSource, MaskGeneratorFeature, MaskSlot, MaskSource, StencilMaskSource,
};
pub use materials::{Material, MaterialDescriptor, MaterialInstance};
pub use postfx::{FullscreenBlitEffect, PostEffect, PostProcessFeature};
pub use resources::Texture;
pub use types::{ClearValue, TextureDescriptor, TextureFormat, TextureUsage};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the feature stack.
///
/// Optional; logs the version for startup traces.
pub fn init() {
    log::info!("render-features v{VERSION} initialized");
}
