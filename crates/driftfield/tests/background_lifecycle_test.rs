//! # Background Lifecycle Tests
//!
//! Mount, frame-by-frame behaviour and teardown of the particle background
//! against the headless host.

use std::time::Duration;

use driftfield::testing::HeadlessHost;
use driftfield::{
    BackgroundConfig, EventTarget, FieldSignal, FrameStats, FrameToken, ParticleBackground, SkipReason,
};
use driftfield_ui::{DrawCommand, Rect, ThemeMode, Viewport};

const FRAME: Duration = Duration::from_millis(16);

fn mount(host: &mut HeadlessHost, route: &str, animate: bool, theme: ThemeMode) -> ParticleBackground {
    ParticleBackground::mount(BackgroundConfig::default(), host, route, animate, theme).expect("host has a surface")
}

fn frame(background: &mut ParticleBackground, host: &mut HeadlessHost) -> FrameStats {
    let tokens = host.advance(FRAME);
    assert_eq!(tokens.len(), 1, "exactly one frame should be pending");
    background.on_frame(host, tokens[0]).expect("armed frame must run")
}

fn snapshot(background: &ParticleBackground) -> Vec<(f32, f32, f32, f32)> {
    background
        .field()
        .particles()
        .iter()
        .map(|p| (p.x, p.y, p.vx, p.vy))
        .collect()
}

/// Test: without a surface nothing is registered or scheduled.
#[test]
fn test_missing_surface_is_noop() {
    let mut host = HeadlessHost::without_surface(Viewport::new(400, 300));
    host.add_element(Rect::new(10.0, 10.0, 100.0, 50.0));

    let background = ParticleBackground::mount(BackgroundConfig::default(), &mut host, "/", true, ThemeMode::Dark);

    assert!(background.is_none());
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.scheduler().requested_count(), 0);
}

/// Test: mount registers three listeners, builds the grid and arms one frame.
#[test]
fn test_mount_registers_and_arms() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let background = mount(&mut host, "/", false, ThemeMode::Light);

    assert_eq!(host.listener_count(), 3);
    assert_eq!(background.listener_count(), 3);
    assert_eq!(background.field().len(), 20 * 15);
    assert_eq!(host.scheduler().pending().len(), 1);
    assert_eq!(background.pending_frame(), host.scheduler().pending().first().copied());
}

/// Test: a token the background did not arm runs nothing.
#[test]
fn test_stale_token_ignored() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);
    let pending = background.pending_frame();

    assert!(background.on_frame(&mut host, FrameToken(9_999)).is_none());
    assert_eq!(background.pending_frame(), pending);
    assert_eq!(host.recording().unwrap().frame_count(), 0);
}

/// Test: every frame re-arms exactly one successor.
#[test]
fn test_loop_stays_alive() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);

    for expected in 0..5 {
        let stats = frame(&mut background, &mut host);
        assert_eq!(stats.frame, expected);
    }
    assert_eq!(host.scheduler().requested_count(), 6);
    assert_eq!(background.stats().frames_recorded, 5);
}

/// Test: after unmount no frame runs and no listener remains.
#[test]
fn test_teardown_completeness() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let spy = host.scheduler().clone();
    let mut background = mount(&mut host, "/", false, ThemeMode::Dark);

    for _ in 0..3 {
        frame(&mut background, &mut host);
    }
    host.scroll_by(10.0);
    frame(&mut background, &mut host);
    assert!(background.is_scrolling());

    background.unmount(&mut host);
    let requested = spy.requested_count();

    assert!(spy.pending().is_empty());
    assert_eq!(spy.cancelled_count(), 1);
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.move_pointer(10.0, 10.0), 0);
    assert_eq!(host.scroll_by(10.0), 0);

    for _ in 0..10 {
        assert!(host.advance(FRAME).is_empty());
    }
    assert_eq!(spy.requested_count(), requested);
}

/// Test: a frame taken while scrolling leaves positions and velocities alone.
#[test]
fn test_scroll_skip_freezes_particles() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Dark);

    host.move_pointer(200.0, 150.0);
    for _ in 0..3 {
        frame(&mut background, &mut host);
    }
    let before = snapshot(&background);

    host.scroll_by(40.0);
    let stats = frame(&mut background, &mut host);

    assert_eq!(stats.skipped, Some(SkipReason::Scrolling));
    assert_eq!(snapshot(&background), before);
    let last = host.recording().unwrap().last_frame().unwrap();
    assert!(matches!(last, [DrawCommand::Clear { .. }]));
}

/// Test: the debounce refreshes exclusion rectangles once scrolling settles.
#[test]
fn test_scroll_settle_refreshes_rects() {
    let mut host = HeadlessHost::new(Viewport::new(800, 600));
    let element = Rect::new(100.0, 200.0, 300.0, 100.0);
    host.add_element(element);
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);
    assert_eq!(background.exclusion_rects(), &[element.expand(30.0)]);

    host.scroll_by(50.0);
    frame(&mut background, &mut host);
    assert!(background.is_scrolling());
    assert_eq!(background.exclusion_rects(), &[element.expand(30.0)]);

    let mut settled = None;
    for n in 1..=20 {
        let stats = frame(&mut background, &mut host);
        if !background.is_scrolling() {
            settled = Some((n, stats));
            break;
        }
    }

    let (n, stats) = settled.expect("debounce never fired");
    assert_eq!(n, 10, "150ms quiet window at 16ms frames");
    assert_eq!(stats.skipped, None);
    let moved = Rect::new(100.0, 150.0, 300.0, 100.0);
    assert_eq!(background.exclusion_rects(), &[moved.expand(30.0)]);
}

/// Test: continued scrolling keeps pushing the debounce out.
#[test]
fn test_scroll_burst_keeps_skipping() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);

    for _ in 0..30 {
        host.scroll_by(5.0);
        let stats = frame(&mut background, &mut host);
        assert_eq!(stats.skipped, Some(SkipReason::Scrolling));
    }
    assert_eq!(background.stats().frames_skipped_scrolling, 30);
}

/// Test: resize rebuilds the grid and re-reads layout.
#[test]
fn test_resize_rebuilds() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let handle = host.add_element(Rect::new(0.0, 0.0, 50.0, 50.0));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);

    host.move_element(handle, Rect::new(500.0, 400.0, 50.0, 50.0));
    host.resize(640, 480);
    host.resize(1000, 800);
    let stats = frame(&mut background, &mut host);

    assert_eq!(stats.signals, 2);
    assert_eq!(background.field().len(), 2000);
    assert_eq!(background.field().dimensions(), (50, 40));
    assert_eq!(
        background.exclusion_rects(),
        &[Rect::new(500.0, 400.0, 50.0, 50.0).expand(30.0)]
    );
    let last = host.recording().unwrap().last_frame().unwrap();
    assert_eq!(
        last.first(),
        Some(&DrawCommand::Clear {
            width: 1000.0,
            height: 800.0
        })
    );
}

/// Test: a resize after a pointer flood still rebuilds the grid.
#[test]
fn test_resize_survives_pointer_flood() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);

    for n in 0..300 {
        assert_eq!(host.move_pointer(n as f32, 10.0), 1);
    }
    assert_eq!(host.resize(1000, 800), 1);
    let stats = frame(&mut background, &mut host);

    // 256 queued moves, then the latched resize and newest move.
    assert_eq!(stats.signals, 258);
    assert_eq!(background.field().len(), 2000);
    assert_eq!(background.field().dimensions(), (50, 40));
    assert_eq!(background.pointer().x, 299.0);
}

/// Test: a scroll after a pointer flood still starts the scroll skip.
#[test]
fn test_scroll_survives_pointer_flood() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);

    for n in 0..300 {
        host.move_pointer(n as f32, 10.0);
    }
    host.scroll_by(20.0);
    let stats = frame(&mut background, &mut host);

    assert!(background.is_scrolling());
    assert_eq!(stats.skipped, Some(SkipReason::Scrolling));
}

/// Test: the page pause clears once, skips physics and then lets go.
#[test]
fn test_page_pause_clears_once() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", true, ThemeMode::Dark);
    host.move_pointer(200.0, 150.0);

    let before = snapshot(&background);
    let mut paused = 0;
    loop {
        let stats = frame(&mut background, &mut host);
        if stats.skipped != Some(SkipReason::PagePause) {
            assert!(stats.report.drawn > 0);
            break;
        }
        paused += 1;
        assert_eq!(snapshot(&background), before);
    }

    // 1200ms window, first frame at 16ms, last paused frame at 1184ms.
    assert_eq!(paused, 74);
    let recording = host.recording().unwrap();
    assert_eq!(recording.frame_count(), 2);
    assert_eq!(recording.frames()[0], vec![DrawCommand::Clear { width: 400.0, height: 300.0 }]);
}

/// Test: no entrance animation means no pause.
#[test]
fn test_no_pause_without_entrance() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Dark);

    let stats = frame(&mut background, &mut host);
    assert_eq!(stats.skipped, None);
}

/// Test: a soft navigation restarts the pause window.
#[test]
fn test_begin_page_restarts_pause() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Dark);
    frame(&mut background, &mut host);

    background.begin_page("/logs", true, &host);
    let stats = frame(&mut background, &mut host);
    assert_eq!(stats.skipped, Some(SkipReason::PagePause));

    host.clock().advance(Duration::from_millis(600));
    let stats = frame(&mut background, &mut host);
    assert_eq!(stats.skipped, None);
}

/// Test: the pointer lights particles up; dark theme adds glow.
#[test]
fn test_pointer_lights_particles() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Dark);

    host.move_pointer(200.0, 150.0);
    let mut stats = frame(&mut background, &mut host);
    for _ in 0..10 {
        stats = frame(&mut background, &mut host);
    }

    assert!(background.pointer().has_moved());
    assert!(stats.report.drawn > 0);
    assert!(stats.report.lines > 0);
    let last = host.recording().unwrap().last_frame().unwrap();
    assert!(last
        .iter()
        .any(|command| matches!(command, DrawCommand::Circle { glow: Some(_), .. })));
}

/// Test: theme changes cross-fade instead of snapping.
#[test]
fn test_theme_crossfade() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Light);
    frame(&mut background, &mut host);
    assert_eq!(background.theme_blend(), 0.0);

    background.set_theme(ThemeMode::Dark);
    for _ in 0..20 {
        frame(&mut background, &mut host);
    }
    let midway = background.theme_blend();
    assert!(midway > 0.0 && midway < 1.0, "blend {midway}");

    for _ in 0..30 {
        frame(&mut background, &mut host);
    }
    assert_eq!(background.theme_blend(), 1.0);
}

/// Test: theme signals from the channel behave like `set_theme`.
#[test]
fn test_theme_signal() {
    let mut host = HeadlessHost::new(Viewport::new(400, 300));
    let mut background = mount(&mut host, "/", false, ThemeMode::Dark);

    assert!(background
        .signal_sender()
        .send(FieldSignal::ThemeChanged(ThemeMode::Light)));
    for _ in 0..60 {
        frame(&mut background, &mut host);
    }
    assert_eq!(background.theme_blend(), 0.0);
}
