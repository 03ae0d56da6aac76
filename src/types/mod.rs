//! Common types shared across the feature stack.

mod common;
mod texture;

pub use common::{ClearValue, CompareFunction, Extent3d};
pub use texture::{TextureDescriptor, TextureFormat, TextureUsage};
