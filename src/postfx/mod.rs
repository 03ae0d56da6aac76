//! Custom post-processing.
//!
//! Post effects transform the shared color buffer in place, in declared
//! order. Masks produced by the mask generator are consumed through
//! their global names inside effect shaders; effects never receive mask
//! handles directly.

mod effect;
mod feature;
mod pass;

pub use effect::{FullscreenBlitEffect, PostEffect, PostEffectContext};
pub use feature::PostProcessFeature;
pub use pass::PostProcessPass;
