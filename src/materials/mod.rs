//! Materials and material instances.
//!
//! A [`Material`] is the shader-program-level object; a
//! [`MaterialInstance`] is the per-user handle passes record draws with.
//! Shader compilation and property storage belong to the host engine;
//! this module only carries what the feature stack needs to reference
//! and own materials across frames.

mod instance;
mod material;

pub use instance::MaterialInstance;
pub use material::{Material, MaterialDescriptor, ShaderSource, ShaderStage};
