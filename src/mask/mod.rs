//! Mask generation.
//!
//! Mask sources fill named slot images from scene state (layer-filtered
//! geometry redraws, stencil tests) and publish them as global textures
//! so downstream shaders can sample them by name. The
//! [`MaskGeneratorFeature`] owns the ordered source list and drives one
//! [`MaskGeneratorPass`] per frame.

mod feature;
mod pass;
mod slot;
mod source;

pub use feature::{MaskFeatureConfig, MaskGeneratorFeature};
pub use pass::MaskGeneratorPass;
pub use slot::MaskSlot;
pub use source::{LayerMaskSource, MaskSource, MaskSourceContext, StencilMaskSource};
