//! GPU resources.

mod texture;

pub use texture::Texture;
