//! Reference execution of recorded frame graphs.
//!
//! The executor consumes passes in recorded order and tracks what each
//! image would contain afterwards, plus the global texture registry that
//! publish passes update. Recorded order is the dependency order for the
//! feature stack, so no reordering or barrier logic happens here; a real
//! GPU scheduler owns both.

use std::collections::HashMap;
use std::sync::Arc;

use crate::resources::Texture;
use crate::types::ClearValue;

use super::{DrawContent, FrameGraph, GlobalTextureId, ImageHandle, LoadOp, Pass};

/// What an image holds after execution.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageContents {
    /// Never written this frame.
    Undefined,
    /// Cleared to a value and not drawn into since.
    Cleared(ClearValue),
    /// Written by the named pass.
    Rendered {
        /// Name of the last pass that drew into the image.
        pass: String,
    },
}

/// Per-frame record of what executed and what each image ended up holding.
#[derive(Debug)]
pub struct ExecutionReport {
    contents: Vec<ImageContents>,
    executed: Vec<String>,
}

impl ExecutionReport {
    /// Contents of an image after the frame.
    ///
    /// Handles from another graph report [`ImageContents::Undefined`].
    pub fn contents(&self, image: ImageHandle) -> &ImageContents {
        self.contents
            .get(image.index())
            .unwrap_or(&ImageContents::Undefined)
    }

    /// Names of the passes that executed, in order.
    pub fn executed_passes(&self) -> &[String] {
        &self.executed
    }
}

/// Executes recorded frame graphs and owns the global texture registry.
///
/// The registry persists across frames: a publication stays visible
/// until another publish pass rebinds the same identifier.
#[derive(Debug, Default)]
pub struct GraphExecutor {
    globals: HashMap<GlobalTextureId, Arc<Texture>>,
}

impl GraphExecutor {
    /// Create a new executor with an empty global registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a globally published texture by identifier.
    pub fn global(&self, id: GlobalTextureId) -> Option<&Arc<Texture>> {
        self.globals.get(&id)
    }

    /// Resolve a globally published texture by name.
    pub fn global_by_name(&self, name: &str) -> Option<&Arc<Texture>> {
        self.global(GlobalTextureId::from_name(name))
    }

    /// Number of bound global textures.
    pub fn global_count(&self) -> usize {
        self.globals.len()
    }

    /// Execute a recorded graph in pass order.
    pub fn execute(&mut self, graph: &FrameGraph) -> ExecutionReport {
        let mut contents = vec![ImageContents::Undefined; graph.imported_count()];
        let mut executed = Vec::with_capacity(graph.pass_count());

        for pass in graph.passes() {
            match pass {
                Pass::Raster(raster) => {
                    let Some(color) = raster.color() else {
                        // Depth-only work is outside this executor's scope.
                        executed.push(raster.name().to_string());
                        continue;
                    };
                    if graph.texture(color.target).is_none() {
                        log::debug!(
                            "GraphExecutor: pass '{}' targets an invalid image, skipped",
                            raster.name()
                        );
                        continue;
                    }

                    if let LoadOp::Clear(value) = color.load_op {
                        contents[color.target.index()] = ImageContents::Cleared(value);
                    }

                    let drew = match raster.content() {
                        DrawContent::None => false,
                        DrawContent::RendererList(list) => !list.is_empty(),
                        DrawContent::Fullscreen(_) => true,
                        DrawContent::Blit(blit) => graph.texture(blit.source).is_some(),
                    };
                    if drew {
                        contents[color.target.index()] = ImageContents::Rendered {
                            pass: raster.name().to_string(),
                        };
                    }

                    executed.push(raster.name().to_string());
                }
                Pass::Publish(publish) => {
                    // Binding happens here, at execution time: the last
                    // publication to execute is the one reads observe.
                    if let Some(texture) = graph.texture(publish.image()) {
                        self.globals.insert(publish.global(), Arc::clone(texture));
                    }
                    executed.push(publish.name().to_string());
                }
            }
        }

        ExecutionReport { contents, executed }
    }
}
