//! # Headless Tour
//!
//! Drives a full session against the in-memory host: first page with its
//! entrance pause, a pointer sweep, a scroll gesture, a soft navigation, a
//! theme toggle and a resize. Prints what the frame loop did.
//!
//! Usage: `headless_tour [config.toml]`

use std::time::Duration;

use driftfield::testing::HeadlessHost;
use driftfield::{AppShell, BackgroundConfig, FrameStatsAccumulator};
use driftfield_core::FieldResult;
use driftfield_ui::{Rect, ThemeMode, Viewport};

const FRAME: Duration = Duration::from_millis(16);

fn run_frames(shell: &mut AppShell, host: &mut HeadlessHost, count: usize, mut each: impl FnMut(&mut HeadlessHost, usize)) {
    for n in 0..count {
        each(host, n);
        let tokens = host.advance(FRAME);
        shell.pump(host, tokens);
    }
}

fn print_summary(stats: &FrameStatsAccumulator, recorded: usize) {
    println!("┌─ FRAMES ───────────────────────────────────────────────────────┐");
    println!("│ Frames Run:         {}", stats.frames_recorded);
    println!("│ Stepped:            {}", stats.frames_stepped);
    println!("│ Skipped (scroll):   {}", stats.frames_skipped_scrolling);
    println!("│ Skipped (pause):    {}", stats.frames_skipped_paused);
    println!("│ Skip Ratio:         {:.1}%", stats.skip_ratio() * 100.0);
    println!("└────────────────────────────────────────────────────────────────┘");
    println!();
    println!("┌─ DRAWING ──────────────────────────────────────────────────────┐");
    println!("│ Avg Particles:      {:.1}", stats.avg_drawn());
    println!("│ Lines Total:        {}", stats.lines_sum);
    println!("│ Frames Presented:   {recorded}");
    println!("│ Max Delta:          {:?}", stats.max_delta);
    println!("└────────────────────────────────────────────────────────────────┘");
}

fn main() -> FieldResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => BackgroundConfig::from_toml_file(path)?,
        None => BackgroundConfig::default(),
    };

    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║           DRIFTFIELD HEADLESS TOUR                               ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let mut host = HeadlessHost::new(Viewport::new(1280, 720));
    host.add_element(Rect::new(160.0, 120.0, 640.0, 180.0));
    host.add_element(Rect::new(160.0, 360.0, 480.0, 240.0));

    let mut shell = AppShell::new(config, ThemeMode::Light);
    if !shell.start(&mut host, "/") {
        println!("No drawing surface; nothing to do.");
        return Ok(());
    }

    // Entrance pause, then a slow pointer sweep across the page.
    run_frames(&mut shell, &mut host, 180, |host, n| {
        let x = 40.0 + n as f32 * 6.5;
        host.move_pointer(x, 360.0 + 120.0 * (n as f32 * 0.05).sin());
    });

    // A short scroll gesture; exclusion boxes are re-read once it settles.
    run_frames(&mut shell, &mut host, 30, |host, n| {
        if n < 8 {
            host.scroll_by(12.0);
        }
    });

    shell.navigate(&mut host, "/logs");
    shell.toggle_theme();
    run_frames(&mut shell, &mut host, 90, |host, n| {
        host.move_pointer(640.0, 40.0 + n as f32 * 7.0);
    });

    host.resize(1920, 1080);
    run_frames(&mut shell, &mut host, 60, |host, n| {
        host.move_pointer(960.0 + n as f32 * 3.0, 540.0);
    });

    let recorded = host.recording().map_or(0, |surface| surface.frame_count());
    if let Some(background) = shell.background() {
        println!("Particles: {}  Theme: {:?}", background.field().len(), shell.theme());
        println!();
        print_summary(background.stats(), recorded);
    }

    shell.shutdown(&mut host);
    Ok(())
}
