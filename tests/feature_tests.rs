//! Integration tests for the mask generation and post-processing
//! features, run against the reference graph executor.
//!
//! The tests drive whole frames the way a host renderer would: build a
//! frame graph, let the features record into it, execute, and inspect
//! image contents and the global texture registry.

mod common;

use std::sync::Arc;

use rstest::rstest;

use common::TestContext;
use render_features::frame::{CameraId, RenderLayers};
use render_features::graph::{DrawContent, ImageContents};
use render_features::mask::MaskFeatureConfig;
use render_features::{
    ClearValue, FrameGraph, GraphExecutor, FullscreenBlitEffect, LayerMaskSource,
    MaskGeneratorFeature, MaskSlot, PostProcessFeature, StencilMaskSource, TextureDescriptor,
    TextureFormat, TextureUsage,
};

// ============================================================================
// End-to-end frame
// ============================================================================

/// One full frame: a layer mask source and a stencil mask source fill
/// distinct slots and publish them, then a post effect transforms the
/// shared color buffer.
#[test]
fn test_end_to_end_masks_and_post_effect() {
    let ctx = TestContext::new(1920, 1080);

    let mut masks = MaskGeneratorFeature::new();
    masks.add_source(
        LayerMaskSource::new(MaskSlot::new("_Mask", TextureFormat::R8Unorm))
            .with_layers(RenderLayers::layer(2))
            .with_override_material(ctx.mask_material("layer_mask")),
    );
    masks.add_source(
        StencilMaskSource::new(MaskSlot::new("_StencilMask", TextureFormat::R8Unorm))
            .with_material(ctx.mask_material("stencil_mask")),
    );

    let mut post = PostProcessFeature::new();
    post.add_effect(FullscreenBlitEffect::new(ctx.effect_shader("outline_composite")));

    let mut graph = FrameGraph::new();
    let frame = ctx.game_frame_with_object(&mut graph, RenderLayers::layer(2));

    // Mask production records before post-processing so published masks
    // are available when effects read them by name.
    masks.add_passes(&mut graph, &frame, &ctx.device);
    post.add_passes(&mut graph, &frame);

    let mut executor = GraphExecutor::new();
    let report = executor.execute(&graph);

    // Both slots allocated at the camera's resolution.
    for source in masks.sources() {
        let backing = source.slot().backing().expect("slot allocated");
        assert_eq!(backing.width(), 1920);
        assert_eq!(backing.height(), 1080);
    }

    // Both published under their distinct global names.
    let layer_backing = masks.sources()[0].slot().backing().unwrap();
    let stencil_backing = masks.sources()[1].slot().backing().unwrap();
    assert!(Arc::ptr_eq(
        executor.global_by_name("_Mask").unwrap(),
        layer_backing
    ));
    assert!(Arc::ptr_eq(
        executor.global_by_name("_StencilMask").unwrap(),
        stencil_backing
    ));

    // Both fills actually ran: the layer redraw found its object, the
    // stencil draw is unconditional once depth and material exist.
    let layer_target = graph.import_texture(layer_backing);
    let stencil_target = graph.import_texture(stencil_backing);
    assert_eq!(
        report.contents(layer_target),
        &ImageContents::Rendered {
            pass: "layer_mask_source".to_string()
        }
    );
    assert_eq!(
        report.contents(stencil_target),
        &ImageContents::Rendered {
            pass: "stencil_mask_source".to_string()
        }
    );

    // The post effect observed a valid shared color handle and rewrote
    // it in place.
    let blit = graph
        .passes()
        .iter()
        .find_map(|p| p.as_raster().filter(|r| r.name() == "fullscreen_blit_effect"))
        .expect("post effect pass recorded");
    let DrawContent::Blit(draw) = blit.content() else {
        panic!("expected blit content");
    };
    assert!(Arc::ptr_eq(graph.texture(draw.source).unwrap(), &ctx.color));
    assert_eq!(
        report.contents(frame.active_color.unwrap()),
        &ImageContents::Rendered {
            pass: "fullscreen_blit_effect".to_string()
        }
    );

    // No diagnostics on a healthy frame.
    assert_eq!(masks.diagnostics().unwrap().emitted_count(), 0);

    masks.teardown();
    post.teardown();
}

// ============================================================================
// Ordering
// ============================================================================

/// Two sources publishing the same name: the later-declared source's
/// image is the one visible after the frame.
#[test]
fn test_later_source_wins_shared_global_name() {
    let ctx = TestContext::new(640, 480);

    let mut masks = MaskGeneratorFeature::with_config(MaskFeatureConfig {
        warn_on_duplicate_global: true,
        warn_on_missing_depth_stencil: true,
    });
    masks.add_source(
        StencilMaskSource::new(MaskSlot::new("_Shared", TextureFormat::R8Unorm))
            .with_material(ctx.mask_material("first")),
    );
    masks.add_source(
        StencilMaskSource::new(MaskSlot::new("_Shared", TextureFormat::R8Unorm))
            .with_material(ctx.mask_material("second")),
    );

    let mut executor = GraphExecutor::new();
    for _ in 0..3 {
        let mut graph = FrameGraph::new();
        let frame = ctx.game_frame(&mut graph);
        masks.add_passes(&mut graph, &frame, &ctx.device);
        executor.execute(&graph);
    }

    let second_backing = masks.sources()[1].slot().backing().unwrap();
    assert!(Arc::ptr_eq(
        executor.global_by_name("_Shared").unwrap(),
        second_backing
    ));

    // The collision is reported exactly once across all frames.
    assert_eq!(masks.diagnostics().unwrap().emitted_count(), 1);
}

// ============================================================================
// One-shot diagnostics
// ============================================================================

/// The same soft-fail condition across 100 frames produces one warning;
/// a different camera produces an independent second one.
#[test]
fn test_missing_material_warns_once_per_camera() {
    let ctx = TestContext::new(320, 240);

    let mut masks = MaskGeneratorFeature::new();
    masks.add_source(LayerMaskSource::new(MaskSlot::new(
        "_Mask",
        TextureFormat::R8Unorm,
    )));

    let mut executor = GraphExecutor::new();
    for _ in 0..100 {
        let mut graph = FrameGraph::new();
        let frame = ctx.game_frame(&mut graph);
        masks.add_passes(&mut graph, &frame, &ctx.device);

        // The fill soft-fails every frame; the slot is still a defined
        // transparent image, not stale data.
        let report = executor.execute(&graph);
        let slot_target = graph.import_texture(masks.sources()[0].slot().backing().unwrap());
        assert_eq!(
            report.contents(slot_target),
            &ImageContents::Cleared(ClearValue::TRANSPARENT)
        );
    }
    assert_eq!(masks.diagnostics().unwrap().emitted_count(), 1);

    let mut graph = FrameGraph::new();
    let mut frame = ctx.game_frame(&mut graph);
    frame.camera = CameraId(2);
    masks.add_passes(&mut graph, &frame, &ctx.device);
    assert_eq!(masks.diagnostics().unwrap().emitted_count(), 2);
}

/// A frame without depth soft-fails, then recovers when depth returns.
#[test]
fn test_missing_depth_recovers_next_frame() {
    let ctx = TestContext::new(320, 240);

    let mut masks = MaskGeneratorFeature::new();
    masks.add_source(
        StencilMaskSource::new(MaskSlot::new("_Mask", TextureFormat::R8Unorm))
            .with_material(ctx.mask_material("stencil")),
    );

    let mut executor = GraphExecutor::new();

    // Warm-up frame: no depth yet.
    let mut graph = FrameGraph::new();
    let mut frame = ctx.game_frame(&mut graph);
    frame.active_depth = None;
    masks.add_passes(&mut graph, &frame, &ctx.device);
    let report = executor.execute(&graph);
    let slot_target = graph.import_texture(masks.sources()[0].slot().backing().unwrap());
    assert_eq!(
        report.contents(slot_target),
        &ImageContents::Cleared(ClearValue::TRANSPARENT)
    );
    assert_eq!(masks.diagnostics().unwrap().emitted_count(), 1);

    // Depth available: the fill runs, and no new warning appears.
    let mut graph = FrameGraph::new();
    let frame = ctx.game_frame(&mut graph);
    masks.add_passes(&mut graph, &frame, &ctx.device);
    let report = executor.execute(&graph);
    let slot_target = graph.import_texture(masks.sources()[0].slot().backing().unwrap());
    assert_eq!(
        report.contents(slot_target),
        &ImageContents::Rendered {
            pass: "stencil_mask_source".to_string()
        }
    );
    assert_eq!(masks.diagnostics().unwrap().emitted_count(), 1);
}

// ============================================================================
// Enablement and empty lists
// ============================================================================

#[test]
fn test_disabled_items_record_no_work() {
    let ctx = TestContext::new(320, 240);

    let mut masks = MaskGeneratorFeature::new();
    masks.add_source(
        StencilMaskSource::new(MaskSlot::new("_Mask", TextureFormat::R8Unorm))
            .with_material(ctx.mask_material("stencil")),
    );
    masks.sources_mut()[0].set_enabled(false);

    let mut post = PostProcessFeature::new();
    post.add_effect(FullscreenBlitEffect::new(ctx.effect_shader("effect")));
    post.effects_mut()[0].set_enabled(false);

    let mut graph = FrameGraph::new();
    let frame = ctx.game_frame(&mut graph);
    masks.add_passes(&mut graph, &frame, &ctx.device);
    post.add_passes(&mut graph, &frame);

    assert_eq!(graph.pass_count(), 0);
    assert!(masks.sources()[0].slot().backing().is_none());
    assert!(!post.effects()[0].has_material());
}

#[test]
fn test_empty_orchestrators_allocate_nothing() {
    let ctx = TestContext::new(320, 240);
    let textures_before = ctx.device.texture_count();

    let mut masks = MaskGeneratorFeature::new();
    let mut post = PostProcessFeature::new();

    let mut graph = FrameGraph::new();
    let frame = ctx.game_frame(&mut graph);
    masks.add_passes(&mut graph, &frame, &ctx.device);
    post.add_passes(&mut graph, &frame);

    assert_eq!(graph.pass_count(), 0);
    assert_eq!(ctx.device.texture_count(), textures_before);

    masks.teardown();
    post.teardown();
}

// ============================================================================
// Slot reallocation
// ============================================================================

/// The slot backing reallocates iff the target shape changed.
#[rstest]
#[case::same_shape(640, 480, 1, false)]
#[case::width_changed(800, 480, 1, true)]
#[case::height_changed(640, 360, 1, true)]
#[case::sample_count_changed(640, 480, 4, true)]
fn test_backing_reallocation_follows_shape(
    #[case] width: u32,
    #[case] height: u32,
    #[case] samples: u32,
    #[case] expect_realloc: bool,
) {
    let ctx = TestContext::new(640, 480);

    let mut slot = MaskSlot::new("_Mask", TextureFormat::R8Unorm);
    let base = TextureDescriptor::new_2d(
        640,
        480,
        TextureFormat::Rgba16Float,
        TextureUsage::RENDER_ATTACHMENT,
    );
    slot.ensure_backing(&ctx.device, &base).unwrap();
    let first = slot.backing().unwrap().clone();

    let next = TextureDescriptor::new_2d(
        width,
        height,
        TextureFormat::Rgba16Float,
        TextureUsage::RENDER_ATTACHMENT,
    )
    .with_sample_count(samples);
    slot.ensure_backing(&ctx.device, &next).unwrap();

    assert_eq!(!Arc::ptr_eq(slot.backing().unwrap(), &first), expect_realloc);
}

/// The camera target's format does not matter to the slot: its own
/// pixel format is fixed by configuration.
#[test]
fn test_base_format_change_does_not_reallocate() {
    let ctx = TestContext::new(640, 480);

    let mut slot = MaskSlot::new("_Mask", TextureFormat::R8Unorm);
    let hdr = TextureDescriptor::new_2d(
        640,
        480,
        TextureFormat::Rgba16Float,
        TextureUsage::RENDER_ATTACHMENT,
    );
    let ldr = TextureDescriptor::new_2d(
        640,
        480,
        TextureFormat::Rgba8Unorm,
        TextureUsage::RENDER_ATTACHMENT,
    );

    slot.ensure_backing(&ctx.device, &hdr).unwrap();
    let first = slot.backing().unwrap().clone();
    assert_eq!(first.format(), TextureFormat::R8Unorm);

    slot.ensure_backing(&ctx.device, &ldr).unwrap();
    assert!(Arc::ptr_eq(slot.backing().unwrap(), &first));
}

/// A resize mid-run reallocates every slot once and then settles.
#[test]
fn test_resize_reallocates_then_settles() {
    let mut ctx = TestContext::new(1920, 1080);

    let mut masks = MaskGeneratorFeature::new();
    masks.add_source(
        StencilMaskSource::new(MaskSlot::new("_Mask", TextureFormat::R8Unorm))
            .with_material(ctx.mask_material("stencil")),
    );

    let mut graph = FrameGraph::new();
    let frame = ctx.game_frame(&mut graph);
    masks.add_passes(&mut graph, &frame, &ctx.device);
    let full_res = masks.sources()[0].slot().backing().unwrap().clone();

    // The window shrinks: new camera targets, new slot shape.
    ctx = TestContext::new(1280, 720);
    let mut previous = None;
    for _ in 0..3 {
        let mut graph = FrameGraph::new();
        let frame = ctx.game_frame(&mut graph);
        masks.add_passes(&mut graph, &frame, &ctx.device);

        let backing = masks.sources()[0].slot().backing().unwrap().clone();
        assert_eq!(backing.width(), 1280);
        assert!(!Arc::ptr_eq(&backing, &full_res));
        if let Some(previous) = &previous {
            assert!(Arc::ptr_eq(&backing, previous));
        }
        previous = Some(backing);
    }
}
