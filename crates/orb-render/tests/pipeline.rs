//! End-to-end: config → engine → sink, and scene → compositor → PNG.

use std::time::Duration;

use orb_core::{ConversationState, OrbConfig, OrbScene};
use orb_render::{ChannelSink, Compositor, Frame, OrbEngine, OverlayImage};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tempfile::TempDir;

fn overlay() -> OverlayImage {
    OverlayImage::placeholder(orb_render::asset::MISSING_COLOR)
}

fn render(seed: u64, ticks: usize) -> Frame {
    let config = OrbConfig::new(320, 180, 24.0);
    let compositor = Compositor::new(&config, overlay());
    let mut scene = OrbScene::new(&config);
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut motion = scene.step(ConversationState::Speaking, &mut rng);
    for _ in 1..ticks {
        motion = scene.step(ConversationState::Speaking, &mut rng);
    }
    compositor.compose(&scene, &motion).unwrap()
}

#[test]
fn same_seed_renders_identical_frames() {
    let a = render(42, 60);
    let b = render(42, 60);
    assert_eq!(a.data(), b.data());
}

#[test]
fn snapshot_png_round_trips_dimensions() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orb.png");
    render(7, 30).save_png(&path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (320, 180));
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 255]);
}

#[tokio::test]
async fn engine_streams_frames_while_speaking() {
    let config = OrbConfig::new(160, 90, 100.0);
    let (sink, mut rx) = ChannelSink::channel();
    let mut engine = OrbEngine::new(&config, overlay(), sink)
        .unwrap()
        .with_rng(SmallRng::seed_from_u64(42));

    engine.set_state(ConversationState::Speaking);
    engine.start().unwrap();
    tokio::time::sleep(Duration::from_millis(150)).await;
    engine.set_state(ConversationState::Idle);
    tokio::time::sleep(Duration::from_millis(50)).await;
    engine.stop().await.unwrap();

    let mut frames = 0u64;
    while let Ok(frame) = rx.try_recv() {
        assert_eq!(frame.data().len(), 160 * 90 * 4);
        frames += 1;
    }
    assert_eq!(frames, engine.frames_emitted());
    assert!(frames >= 5, "only {frames} frames in 200ms at 100 fps");
    assert!(engine.scene().unwrap().ticks() >= frames);
}
