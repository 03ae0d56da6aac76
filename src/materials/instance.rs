//! Material instance.
//!
//! A [`MaterialInstance`] is an owned use of a shared [`Material`].
//! Post effects create one lazily from their shader reference and are
//! solely responsible for releasing it; mask sources are handed
//! instances configured by the host.

use std::sync::Arc;

use super::material::Material;

/// A material instance referencing a shared material.
///
/// Multiple instances can share the same [`Material`]; the instance is
/// the unit of ownership the feature stack creates and releases.
pub struct MaterialInstance {
    material: Arc<Material>,
    label: Option<String>,
}

impl MaterialInstance {
    /// Create a new material instance.
    pub fn new(material: Arc<Material>) -> Self {
        Self {
            material,
            label: None,
        }
    }

    /// Set a debug label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the parent material.
    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    /// Get the instance label, if set.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl std::fmt::Debug for MaterialInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MaterialInstance")
            .field("material", &self.material.label())
            .field("label", &self.label)
            .finish()
    }
}

static_assertions::assert_impl_all!(MaterialInstance: Send, Sync);
