// What you SEE:
// • A black canvas with a red laser entering from the left edge.
// • Hold Left Mouse: draw a white mirror. Release: the laser is re-traced.
// • Hold Right Mouse: erase mirrors under the pointer. Release: re-trace.
// • S saves the current frame as a PNG. ESC quits.

mod canvas;
mod config;
mod degenerate;
mod draw;
mod error;
mod input;
mod logging;
mod marcher;
mod recorder;
mod reflect;
mod snapshot;
mod stroke;
mod surface;
mod trace;
mod types;

use clap::Parser;
use config::Config;
use draw::{Drawer, draw_brush_outline, draw_crosshair, draw_text_5x7};
use error::Error;
use input::{ButtonEdge, Edge};
use logging::{LoggingConfig, init_logging};
use recorder::StrokeRecorder;
use trace::{Termination, TraceReport, trace};
use types::{CLEAR, FrameBuffer};

/// Re-run the laser over the current mirrors.
fn retrace(recorder: &StrokeRecorder, config: &Config) -> TraceReport {
    let report = trace(recorder.canvas(), recorder.strokes(), &config.trace_settings());
    let corrected = report.path.iter().filter(|b| b.failure.is_some()).count();
    log::debug!(
        "{} ink pixels, {} of {} bounces corrected",
        recorder.canvas().ink_count(),
        corrected,
        report.bounces
    );
    report
}

fn main() -> Result<(), Error> {
    let config = Config::parse();
    init_logging(LoggingConfig { filter: config.log.clone(), ..LoggingConfig::default() });
    config.validate()?;
    log::info!(
        "canvas {}x{}, laser from {:?} at {}°",
        config.width,
        config.height,
        config.origin(),
        config.angle
    );

    /* --- Window + session state ---
       Visual: window opens showing an empty black canvas. */
    let mut drawer = Drawer::new("Laser Sketch", config.width, config.height)?;
    let mut recorder = StrokeRecorder::new(config.width, config.height);

    /* --- Buffers ---
       Visual: `last.laser` is the red path; `screen` is mirrors + laser + overlay. */
    let mut screen = FrameBuffer::new(config.width, config.height, CLEAR);
    let mut last = retrace(&recorder, &config);

    let mut draw_button = ButtonEdge::default();
    let mut erase_button = ButtonEdge::default();
    let mut snapshots = 0u32;

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let focused = drawer.is_focused();
        let mouse = drawer.mouse_pos();

        /* 1) Drawing: press opens a stroke, holding extends it, release traces. */
        match draw_button.update(drawer.draw_down() && focused) {
            Edge::Pressed => {
                recorder.begin_stroke();
                if let Some(p) = mouse { recorder.extend(p); }
            }
            Edge::Held => {
                if let Some(p) = mouse { recorder.extend(p); }
            }
            Edge::Released => {
                recorder.end_stroke();
                last = retrace(&recorder, &config);
            }
            Edge::Idle => {}
        }

        /* 2) Erasing: every held frame clears a square; release traces. */
        let erasing = match erase_button.update(drawer.erase_down() && focused) {
            Edge::Pressed | Edge::Held => {
                if let Some(p) = mouse { recorder.erase(p, config.erase_radius); }
                true
            }
            Edge::Released => {
                last = retrace(&recorder, &config);
                false
            }
            Edge::Idle => false,
        };

        /* 3) Compose: mirrors, then the laser on top. */
        screen.pixels.copy_from_slice(&recorder.ink().pixels);
        screen.overlay(&last.laser);

        /* 4) Snapshot before the overlay so the file holds only the scene. */
        if focused && drawer.s_pressed_once() {
            snapshots += 1;
            let path = snapshot::snapshot_path(&config.snapshot_dir, snapshots);
            if let Err(e) = snapshot::save_png(&screen, &path) {
                log::warn!("could not save {}: {e}", path.display());
            }
        }

        /* 5) Overlay: crosshair / brush outline, status line. */
        if let Some(p) = mouse {
            if erasing {
                draw_brush_outline(&mut screen, p, config.erase_radius, 0x00_66_66_FF);
            } else {
                draw_crosshair(&mut screen, p, 12, 0x00_FF_CC_33); // visual: yellow + at cursor
            }
        }

        let mode = if recorder.active().is_some() { "DRAW" } else if erasing { "ERASE" } else { "IDLE" };
        let outcome = match last.termination {
            Termination::Exited => "EXITED",
            Termination::BounceLimitReached => "LIMIT",
        };
        let hud = format!("{mode} | {outcome} | BOUNCES: {} | S: SNAP", last.bounces);
        draw_text_5x7(&mut screen, 8, 8, &hud, 0x00_FF_FF_FF);

        /* 6) Present to the window (this is when the on-screen image updates). */
        drawer.present(&screen)?;
    }

    log::info!("{} strokes drawn this session", recorder.strokes().len());
    Ok(())
}
